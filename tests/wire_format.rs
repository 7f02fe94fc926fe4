//! Wire format tests
//!
//! Envelope shapes, id handling and single-vs-batch discrimination as seen
//! by both clients and servers.

use jsonrpc_wire::prelude::*;
use serde_json::{Value, json};

#[test]
fn test_ids_survive_the_wire() {
    for id in [
        RpcId::from("abc"),
        RpcId::from(""),
        RpcId::Number(0),
        RpcId::Number(i64::MIN),
        RpcId::Number(i64::MAX),
        RpcId::Null,
    ] {
        let text = serde_json::to_string(&id).unwrap();
        let decoded: RpcId = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, id, "id {} changed on the wire", id);
    }
}

#[test]
fn test_ids_reject_other_kinds() {
    for text in ["1.5", "true", "{}", "[]"] {
        let err = serde_json::from_str::<RpcId>(text).unwrap_err();
        assert!(
            err.to_string().contains("string, number, or null for id"),
            "unexpected error for {}: {}",
            text,
            err
        );
    }
}

#[test]
fn test_requests_carry_ids_and_notifications_do_not() {
    let serializer = JsonRpcSerializer::snake_case();
    let request = Request::new(7, "sum", json!([1, 2]))
        .with_serialized_params(&serializer)
        .unwrap();
    let notification = Notification::new("log", json!({"line": "x"}))
        .with_serialized_params(&serializer)
        .unwrap();

    let request = serde_json::to_value(&request).unwrap();
    let notification = serde_json::to_value(&notification).unwrap();

    assert_eq!(request["id"], 7);
    assert_eq!(request["jsonrpc"], "2.0");
    assert!(notification.get("id").is_none());
    assert_eq!(notification["method"], "log");
}

#[test]
fn test_response_wrapper_shapes() {
    let single: ResponseWrapper<Value> = serde_json::from_str("{}").unwrap();
    assert!(matches!(single, ResponseWrapper::Single(_)));

    let batch: ResponseWrapper<Value> = serde_json::from_str("[{}]").unwrap();
    match batch {
        ResponseWrapper::Batch(items) => assert_eq!(items.len(), 1),
        other => panic!("expected batch, got {:?}", other),
    }

    for text in ["null", "true", "0", "\"x\""] {
        assert!(
            serde_json::from_str::<ResponseWrapper<Value>>(text).is_err(),
            "{} should not decode",
            text
        );
    }
}

#[test]
fn test_response_classification() {
    let ok: Response = serde_json::from_str(r#"{"id":1,"result":null,"jsonrpc":"2.0"}"#).unwrap();
    assert!(!ok.is_error());
    assert_eq!(ok.result(), Some(&Value::Null));

    let failed: Response = serde_json::from_str(
        r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found"},"id":"a"}"#,
    )
    .unwrap();
    assert_eq!(failed.error().unwrap().code, METHOD_NOT_FOUND);
    assert_eq!(failed.id(), &RpcId::from("a"));

    let null_id: Response =
        serde_json::from_str(r#"{"id":null,"error":{"code":-32700,"message":"Parse error"},"jsonrpc":"2.0"}"#)
            .unwrap();
    assert!(null_id.id().is_null());
}

#[test]
fn test_invalid_responses_are_decode_errors() {
    let both = serde_json::from_str::<Response>(
        r#"{"id":1,"result":1,"error":{"code":1,"message":"m"},"jsonrpc":"2.0"}"#,
    )
    .unwrap_err();
    assert!(both.to_string().contains("Has [result]: true. Has [error]: true"));

    let neither = serde_json::from_str::<Response>(r#"{"id":1,"jsonrpc":"2.0"}"#).unwrap_err();
    assert!(neither.to_string().contains("Has [result]: false. Has [error]: false"));

    let missing_id = serde_json::from_str::<Response>(r#"{"result":1,"jsonrpc":"2.0"}"#).unwrap_err();
    assert!(missing_id.to_string().contains("does not have [id] property"));
}

#[test]
fn test_server_side_batch_parsing_keeps_raw_text() {
    let body = r#"[{"jsonrpc":"2.0","method":"a","id":null},{"jsonrpc":"2.0","method":"b","params":[1]}]"#;
    let wrapper = RequestWrapper::parse(body).unwrap();

    let calls = match wrapper {
        RequestWrapper::Batch(calls) => calls,
        other => panic!("expected batch, got {:?}", other),
    };
    assert!(calls[0].is_request());
    assert_eq!(calls[0].id(), Some(&RpcId::Null));
    assert!(calls[1].is_notification());
    assert_eq!(
        calls[1].raw_json(),
        Some(r#"{"jsonrpc":"2.0","method":"b","params":[1]}"#)
    );
}

#[test]
fn test_server_builds_error_responses() {
    let response: Response = ErrorResponse::new(
        RpcId::Number(3),
        Error::internal_error(
            Some("Unhandled exception".to_string()),
            Some(json!({"type": "IoError", "message": "disk full"})),
        ),
    )
    .into();

    let text = serde_json::to_string(&response).unwrap();
    let decoded: Response = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, response);

    let info: ExceptionInfo =
        serde_json::from_value(decoded.error().unwrap().data.clone().unwrap()).unwrap();
    assert_eq!(info.type_name, "IoError");
}

#[test]
fn test_profiles_leave_untyped_params_alone() {
    let params = json!({"userId": 7, "tags": {"Mixed_Case": true}});
    for profile in [
        JsonRpcSerializer::camel_case(),
        JsonRpcSerializer::snake_case(),
        JsonRpcSerializer::wire(),
    ] {
        let encoded = profile.serialize_params(&params).unwrap().unwrap();
        assert_eq!(encoded.to_value(), params);
    }
}

#[test]
fn test_request_params_follow_profile_for_declared_names() {
    #[derive(serde::Serialize)]
    enum Level {
        Warn,
    }

    #[derive(serde::Serialize)]
    struct LogParams {
        log_level: Level,
        context: std::collections::HashMap<&'static str, &'static str>,
    }

    let request = Request::new(
        "log-1",
        "log",
        LogParams {
            log_level: Level::Warn,
            context: [("requestId", "r-9")].into_iter().collect(),
        },
    );
    let untyped = request
        .with_serialized_params(&JsonRpcSerializer::camel_case())
        .unwrap();
    let sent: Value = serde_json::from_str(&JsonRpcSerializer::wire().write(&untyped).unwrap())
        .unwrap();
    assert_eq!(
        sent["params"],
        json!({"logLevel": "warn", "context": {"requestId": "r-9"}})
    );
}
