use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::types::{JsonRpcVersion, RpcId};

/// A successful JSON-RPC response. `result` stays undecoded until a caller
/// asks for it with a concrete type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponse {
    pub id: RpcId,
    pub result: Value,
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
}

impl SuccessResponse {
    pub fn new(id: RpcId, result: Value) -> Self {
        Self {
            id,
            result,
            version: JsonRpcVersion::V2_0,
        }
    }
}

/// An error JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub id: RpcId,
    pub error: Error<Value>,
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
}

impl ErrorResponse {
    pub fn new(id: RpcId, error: Error<Value>) -> Self {
        Self {
            id,
            error,
            version: JsonRpcVersion::V2_0,
        }
    }
}

/// Either kind of response. Exactly one of `result` / `error` exists on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn id(&self) -> &RpcId {
        match self {
            Response::Success(resp) => &resp.id,
            Response::Error(resp) => &resp.id,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }

    pub fn result(&self) -> Option<&Value> {
        match self {
            Response::Success(resp) => Some(&resp.result),
            Response::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Error<Value>> {
        match self {
            Response::Success(_) => None,
            Response::Error(resp) => Some(&resp.error),
        }
    }
}

impl From<SuccessResponse> for Response {
    fn from(response: SuccessResponse) -> Self {
        Self::Success(response)
    }
}

impl From<ErrorResponse> for Response {
    fn from(response: ErrorResponse) -> Self {
        Self::Error(response)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Success(resp) => {
                write!(f, "Response: id [{}], result [{}]", resp.id, resp.result)
            }
            Response::Error(resp) => {
                write!(f, "ErrorResponse: id [{}], error [{}]", resp.id, resp.error)
            }
        }
    }
}

/// Classifies a response object by which of `id`, `result` and `error` it
/// carries. A missing `id` is rejected even though an explicit `null` is fine.
struct ResponseVisitor;

impl<'de> Visitor<'de> for ResponseVisitor {
    type Value = Response;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JSON-RPC response object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Response, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut id: Option<RpcId> = None;
        let mut result: Option<Value> = None;
        let mut error: Option<Value> = None;
        let mut version: Option<JsonRpcVersion> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                crate::ID_PROPERTY => {
                    if id.is_some() {
                        return Err(de::Error::duplicate_field(crate::ID_PROPERTY));
                    }
                    id = Some(map.next_value()?);
                }
                crate::RESULT_PROPERTY => result = Some(map.next_value()?),
                crate::ERROR_PROPERTY => error = Some(map.next_value()?),
                crate::VERSION_PROPERTY => version = Some(map.next_value()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let Some(id) = id else {
            return Err(de::Error::custom(format!(
                "JSON-RPC response does not have [{}] property",
                crate::ID_PROPERTY
            )));
        };
        let version = version.unwrap_or_default();

        match (result, error) {
            (Some(result), None) => Ok(Response::Success(SuccessResponse {
                id,
                result,
                version,
            })),
            (None, Some(error)) => {
                let error = Error::<Value>::deserialize(error).map_err(de::Error::custom)?;
                Ok(Response::Error(ErrorResponse { id, error, version }))
            }
            (result, error) => Err(de::Error::custom(format!(
                "JSON-RPC response is invalid, expected one of properties. \
                 Has [{}]: {}. Has [{}]: {}",
                crate::RESULT_PROPERTY,
                result.is_some(),
                crate::ERROR_PROPERTY,
                error.is_some()
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Response {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ResponseVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_str, json, to_value};

    #[test]
    fn test_success_response() {
        let response: Response = from_str(r#"{"id": null, "result": 2}"#).unwrap();
        assert_eq!(
            response,
            Response::Success(SuccessResponse::new(RpcId::Null, json!(2)))
        );
    }

    #[test]
    fn test_null_result_is_still_success() {
        let response: Response =
            from_str(r#"{"id": 1, "result": null, "jsonrpc": "2.0"}"#).unwrap();
        assert!(!response.is_error());
        assert_eq!(response.result(), Some(&Value::Null));
    }

    #[test]
    fn test_error_response() {
        let response: Response =
            from_str(r#"{"id": "a", "error": {"code": 1, "message": "bad"}, "jsonrpc": "2.0"}"#)
                .unwrap();
        let error = response.error().unwrap();
        assert_eq!(error.code, 1);
        assert_eq!(error.message, "bad");
        assert_eq!(error.data, None);
        assert_eq!(response.id(), &RpcId::from("a"));
    }

    #[test]
    fn test_rejects_missing_id() {
        let err = from_str::<Response>(r#"{"result": 1}"#).unwrap_err();
        assert!(err.to_string().contains("does not have [id] property"));

        assert!(from_str::<Response>("{}").is_err());
    }

    #[test]
    fn test_rejects_both_or_neither() {
        for json in [
            r#"{"id": null}"#,
            r#"{"id": null, "result": 1, "error": 2}"#,
            r#"{"id": null, "result": null, "error": null}"#,
        ] {
            let err = from_str::<Response>(json).unwrap_err();
            assert!(
                err.to_string().contains("expected one of properties"),
                "unexpected error for {}: {}",
                json,
                err
            );
        }
    }

    #[test]
    fn test_rejects_null_error_object() {
        assert!(from_str::<Response>(r#"{"id": 1, "error": null}"#).is_err());
    }

    #[test]
    fn test_rejects_bad_id() {
        let err = from_str::<Response>(r#"{"id": [1], "result": 1}"#).unwrap_err();
        assert!(err.to_string().contains("string, number, or null for id"));
    }

    #[test]
    fn test_response_serialization() {
        let response: Response =
            SuccessResponse::new(RpcId::from("abc"), json!({"ok": true})).into();
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"id":"abc","result":{"ok":true},"jsonrpc":"2.0"}"#
        );

        let response: Response =
            ErrorResponse::new(RpcId::Null, Error::parse_error(None)).into();
        assert_eq!(
            to_value(&response).unwrap(),
            json!({
                "id": null,
                "error": {"code": -32700, "message": "Parse error"},
                "jsonrpc": "2.0"
            })
        );
    }
}
