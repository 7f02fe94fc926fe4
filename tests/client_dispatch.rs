//! Client dispatch tests
//!
//! Drives the client through the in-memory transport and checks what goes on
//! the wire and how replies are correlated.

use std::sync::Arc;

use jsonrpc_wire::prelude::*;
use jsonrpc_wire_client::testing::MockTransport;
use jsonrpc_wire_client::{ClientConfig, ClientError, JsonRpcClient};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct EchoPayload {
    bool_field: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
enum OrderState {
    AwaitingPayment,
    Shipped { tracking_code: String },
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct OrderUpdate {
    order_state: OrderState,
    line_items: std::collections::BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct ValidationDetail {
    field_name: String,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn camel_case_client(transport: &Arc<MockTransport>) -> JsonRpcClient {
    init_tracing();
    JsonRpcClient::builder()
        .with_config(ClientConfig::new("http://localhost:8080/"))
        .with_transport(transport.clone())
        .with_serializer(JsonRpcSerializer::camel_case())
        .build()
        .expect("client should build")
}

#[tokio::test]
async fn test_camel_case_echo() {
    let transport = Arc::new(
        MockTransport::new().reply(r#"{"id":"abc","result":{"boolField":true},"jsonrpc":"2.0"}"#),
    );
    let client = camel_case_client(&transport);

    let request = Request::new("abc", "echo", EchoPayload { bool_field: true });
    let result = client
        .send_request(Some("rpc"), &request, &CancellationToken::new())
        .await
        .unwrap();

    let post = transport.last_post().unwrap();
    assert_eq!(post.url.as_str(), "http://localhost:8080/rpc");
    assert_eq!(
        post.body,
        r#"{"id":"abc","method":"echo","params":{"boolField":true},"jsonrpc":"2.0"}"#
    );

    let payload: EchoPayload = result.get_response_or_err().unwrap();
    assert!(payload.bool_field);
    assert!(!result.has_error());
}

#[tokio::test]
async fn test_single_request_does_not_check_response_id() {
    let transport = Arc::new(
        MockTransport::new().reply(r#"{"id":"xyz","result":{"boolField":true},"jsonrpc":"2.0"}"#),
    );
    let client = camel_case_client(&transport);

    let result = client
        .call_with_id("abc", "echo", EchoPayload { bool_field: true })
        .await
        .unwrap();

    assert_eq!(result.response().unwrap().id(), &RpcId::from("xyz"));
    let payload: EchoPayload = result.get_response_or_err().unwrap();
    assert!(payload.bool_field);
}

#[tokio::test]
async fn test_notification_only_batch_skips_body() {
    let transport = Arc::new(MockTransport::new().reply("this body must never be read"));
    let client = camel_case_client(&transport);

    let first = Notification::new("log", json!({"lineNumber": 1}));
    let second = Notification::new("log", ());
    let result = client.batch(&[&first, &second]).await.unwrap();

    assert!(result.is_none());
    assert_eq!(transport.post_count(), 1);
    assert!(!transport.body_read());

    let sent = transport.last_post().unwrap().json();
    let calls = sent.as_array().unwrap();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|call| call.get("id").is_none()));
}

#[tokio::test]
async fn test_batch_reply_to_single_request_is_call_error() {
    let transport = Arc::new(MockTransport::new().reply(
        r#"[{"id":"abc","result":{"boolField":true},"jsonrpc":"2.0"}]"#,
    ));
    let client = camel_case_client(&transport);

    let err = client
        .call_with_id("abc", "echo", EchoPayload { bool_field: true })
        .await
        .unwrap_err();

    assert!(err.is_call_error());
    let context = err.call_context().unwrap();
    assert!(context.single_response().is_none());
    assert_eq!(context.batch_response().map(|b| b.len()), Some(1));
    assert!(context.single_call().unwrap().is_request());
    assert!(err.to_string().contains("Expected single response, got batch of 1"));
}

#[tokio::test]
async fn test_batch_correlates_by_id() {
    let transport = Arc::new(MockTransport::new().reply(
        r#"[
            {"id":"b","error":{"code":-32602,"message":"Invalid params","data":{"fieldName":"count"}},"jsonrpc":"2.0"},
            {"id":"a","result":{"boolField":true},"jsonrpc":"2.0"}
        ]"#,
    ));
    let client = camel_case_client(&transport);

    let first = Request::new("a", "echo", EchoPayload { bool_field: true });
    let second = Request::new("b", "count", json!({"count": -1}));
    let note = Notification::new("log", ());
    let batch = client
        .send_batch(None, &[&first, &second, &note], &CancellationToken::new())
        .await
        .unwrap()
        .expect("requests were sent");

    assert_eq!(batch.context().expected_batch_response_count(), 2);

    let a = RpcId::from("a");
    let b = RpcId::from("b");
    let payload: EchoPayload = batch.get_response_or_err(Some(&a)).unwrap();
    assert!(payload.bool_field);
    assert!(!batch.has_error(Some(&a)).unwrap());

    assert!(batch.has_error(Some(&b)).unwrap());
    assert!(batch.as_response::<Value>(Some(&b)).unwrap().is_none());
    let detail = batch
        .as_typed_error::<ValidationDetail>(Some(&b))
        .unwrap()
        .unwrap();
    assert_eq!(detail.code, INVALID_PARAMS);
    assert_eq!(detail.data.unwrap().field_name, "count");

    let err = batch.get_response_or_err::<Value>(Some(&b)).unwrap_err();
    assert_eq!(err.call_context().unwrap().error().unwrap().code, INVALID_PARAMS);

    assert!(batch.has_error(Some(&RpcId::from("missing"))).is_err());
}

#[tokio::test]
async fn test_error_without_data_decodes_to_none() {
    let transport = Arc::new(MockTransport::new().reply(
        r#"{"id":"abc","error":{"code":-32000,"message":"Server error","data":null},"jsonrpc":"2.0"}"#,
    ));
    let client = camel_case_client(&transport);

    let result = client.call_with_id("abc", "fail", ()).await.unwrap();
    assert!(result.has_error());

    let typed = result.as_typed_error::<ValidationDetail>().unwrap().unwrap();
    assert_eq!(typed.code, -32000);
    assert!(typed.data.is_none());
}

#[tokio::test]
async fn test_exception_info_in_wire_shape() {
    let transport = Arc::new(MockTransport::new().reply(
        r#"{"id":1,"error":{"code":-32603,"message":"Internal error","data":{"type":"NullReference","message":"value was null","details":{"frames":3}}},"jsonrpc":"2.0"}"#,
    ));
    let client = camel_case_client(&transport);

    let result = client.call_with_id(1, "explode", ()).await.unwrap();
    let error = result.as_error_with_exception_info().unwrap().unwrap();
    let info = error.data.unwrap();
    assert_eq!(info.type_name, "NullReference");
    assert_eq!(info.message, "value was null");
    assert_eq!(info.details, Some(json!({"frames": 3})));
}

#[tokio::test]
async fn test_cancellation_is_not_a_call_error() {
    let transport = Arc::new(MockTransport::new());
    let client = camel_case_client(&transport);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let first = Request::new(1, "a", ());
    let err = client.send_batch(None, &[&first], &cancel).await.unwrap_err();
    assert!(matches!(err, ClientError::Cancelled));
    assert!(err.call_context().is_none());
}

#[tokio::test]
async fn test_camel_case_names_fields_and_variants_but_not_map_keys() {
    let reply = r#"{"id":"o","result":{"orderState":{"shipped":{"trackingCode":"TR-1"}},
        "lineItems":{"SKU_01":2}},"jsonrpc":"2.0"}"#;
    let transport = Arc::new(MockTransport::new().reply(reply));
    let client = camel_case_client(&transport);

    let update = OrderUpdate {
        order_state: OrderState::AwaitingPayment,
        line_items: [("SKU_01".to_string(), 2)].into_iter().collect(),
    };
    let result = client.call_with_id("o", "order.update", update).await.unwrap();

    let sent = transport.last_post().unwrap().json();
    assert_eq!(
        sent["params"],
        json!({"orderState": "awaitingPayment", "lineItems": {"SKU_01": 2}})
    );

    let updated: OrderUpdate = result.get_response_or_err().unwrap();
    assert_eq!(
        updated.order_state,
        OrderState::Shipped {
            tracking_code: "TR-1".to_string()
        }
    );
    assert_eq!(updated.line_items["SKU_01"], 2);
}

#[tokio::test]
async fn test_default_client_sends_untyped_params_verbatim() {
    let reply = r#"{"id":"u","result":{"userName":"x","last_seen":null},"jsonrpc":"2.0"}"#;
    let transport = Arc::new(MockTransport::new().reply(reply));
    init_tracing();
    let client = JsonRpcClient::builder()
        .with_config(ClientConfig::new("http://localhost:8080/"))
        .with_transport(transport.clone())
        .build()
        .unwrap();

    let params = json!({"userId": 7, "Filter": {"isActive": true}});
    let result = client
        .call_with_id("u", "users.get", params.clone())
        .await
        .unwrap();

    let sent = transport.last_post().unwrap().json();
    assert_eq!(sent["params"], params);
    let value: Value = result.get_response_or_err().unwrap();
    assert_eq!(value, json!({"userName": "x", "last_seen": null}));
}

#[test]
fn test_client_from_url() {
    tokio_test::assert_ok!(JsonRpcClient::new("http://localhost:9000/jsonrpc"));
    tokio_test::assert_err!(JsonRpcClient::new("not a url"));
}
