//! Accessors over the responses of a completed call

use jsonrpc_wire::{Error, JsonRpcSerializer, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use crate::context::CallContext;
use crate::error::{CallError, ClientError, ClientResult};

pub mod batch;
pub mod single;

pub use batch::BatchJsonRpcResult;
pub use single::SingleJsonRpcResult;

/// Decode a success result, or fail with the context and the recorded error
fn result_or_err<T>(
    response: &Response,
    serializer: &JsonRpcSerializer,
    context: &CallContext,
) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    match response {
        Response::Success(success) => Ok(serializer.decode(&success.result)?),
        Response::Error(failure) => {
            let mut context = context.clone();
            context.with_error(failure.error.clone());
            Err(CallError::new(
                format!("Expected successful response id [{}], got error", failure.id),
                context,
            )
            .into())
        }
    }
}

fn result_or_none<T>(
    response: Option<&Response>,
    serializer: &JsonRpcSerializer,
) -> ClientResult<Option<T>>
where
    T: DeserializeOwned,
{
    match response {
        Some(Response::Success(success)) => Ok(Some(serializer.decode(&success.result)?)),
        _ => Ok(None),
    }
}

/// Decode `error.data` with the caller's profile, retrying with the wire
/// profile when that fails
fn typed_error<T>(
    error: &Error<Value>,
    wire: &JsonRpcSerializer,
    serializer: &JsonRpcSerializer,
) -> ClientResult<Error<T>>
where
    T: DeserializeOwned,
{
    let data = match &error.data {
        None | Some(Value::Null) => None,
        Some(data) => match serializer.decode::<T>(data) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                trace!(
                    error = %e,
                    "Error data did not match payload profile, retrying with wire profile"
                );
                Some(wire.decode::<T>(data).map_err(ClientError::from)?)
            }
        },
    };
    Ok(Error {
        code: error.code,
        message: error.message.clone(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonrpc_wire::{ErrorResponse, ExceptionInfo, SuccessResponse};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Detail {
        inner_code: i32,
    }

    #[test]
    fn test_typed_error_uses_payload_profile() {
        let error = Error {
            code: 1,
            message: "bad".to_string(),
            data: Some(json!({"innerCode": 7})),
        };
        let typed: Error<Detail> =
            typed_error(&error, &JsonRpcSerializer::wire(), &JsonRpcSerializer::camel_case())
                .unwrap();
        assert_eq!(typed.data, Some(Detail { inner_code: 7 }));
    }

    #[test]
    fn test_typed_error_falls_back_to_wire_profile() {
        #[derive(Debug, Deserialize, PartialEq)]
        #[serde(rename_all = "camelCase")]
        struct WireDetail {
            inner_code: i32,
        }

        let error = Error {
            code: 1,
            message: "bad".to_string(),
            data: Some(json!({"inner_code": 9})),
        };
        let camel = JsonRpcSerializer::camel_case();
        assert!(camel.decode::<WireDetail>(error.data.as_ref().unwrap()).is_err());

        let typed: Error<WireDetail> =
            typed_error(&error, &JsonRpcSerializer::wire(), &camel).unwrap();
        assert_eq!(typed.data, Some(WireDetail { inner_code: 9 }));
    }

    #[test]
    fn test_typed_error_decodes_exception_info() {
        let error = Error {
            code: -32603,
            message: "Internal error".to_string(),
            data: Some(json!({"type": "Boom", "message": "exploded", "details": null})),
        };
        let typed: Error<ExceptionInfo> =
            typed_error(&error, &JsonRpcSerializer::wire(), &JsonRpcSerializer::camel_case())
                .unwrap();
        let info = typed.data.unwrap();
        assert_eq!(info.type_name, "Boom");
        assert_eq!(info.message, "exploded");
    }

    #[test]
    fn test_typed_error_null_data_is_none() {
        let error: Error<Value> = Error {
            code: 5,
            message: "m".to_string(),
            data: Some(Value::Null),
        };
        let typed: Error<Detail> =
            typed_error(&error, &JsonRpcSerializer::wire(), &JsonRpcSerializer::camel_case())
                .unwrap();
        assert_eq!(typed.data, None);
        assert_eq!(typed.code, 5);
    }

    #[test]
    fn test_typed_error_reports_undecodable_data() {
        let error = Error {
            code: 1,
            message: "bad".to_string(),
            data: Some(json!("not an object")),
        };
        let result: ClientResult<Error<Detail>> =
            typed_error(&error, &JsonRpcSerializer::wire(), &JsonRpcSerializer::camel_case());
        assert!(result.unwrap_err().is_decode_error());
    }

    #[test]
    fn test_error_response_becomes_call_error_with_recorded_error() {
        let response: Response = ErrorResponse::new(
            "a".into(),
            Error::internal_error(Some("boom".to_string()), None),
        )
        .into();
        let err =
            result_or_err::<Value>(&response, &JsonRpcSerializer::wire(), &CallContext::new())
                .unwrap_err();
        let context = err.call_context().unwrap();
        assert_eq!(context.error().unwrap().message, "boom");
    }

    #[test]
    fn test_result_or_none_skips_errors() {
        let ok: Response = SuccessResponse::new(1.into(), json!(3)).into();
        let failed: Response =
            ErrorResponse::new(1.into(), Error::method_not_found("x")).into();
        let serializer = JsonRpcSerializer::wire();

        assert_eq!(result_or_none::<i32>(Some(&ok), &serializer).unwrap(), Some(3));
        assert_eq!(result_or_none::<i32>(Some(&failed), &serializer).unwrap(), None);
        assert_eq!(result_or_none::<i32>(None, &serializer).unwrap(), None);
    }
}
