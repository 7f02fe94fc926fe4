use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error_codes;

/// Error codes reserved by JSON-RPC 2.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonRpcErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    /// Implementation-defined code inside the server error range
    ServerError(i64),
}

const PREDEFINED: [(JsonRpcErrorCode, i64, &str); 5] = [
    (JsonRpcErrorCode::ParseError, error_codes::PARSE_ERROR, "Parse error"),
    (JsonRpcErrorCode::InvalidRequest, error_codes::INVALID_REQUEST, "Invalid Request"),
    (JsonRpcErrorCode::MethodNotFound, error_codes::METHOD_NOT_FOUND, "Method not found"),
    (JsonRpcErrorCode::InvalidParams, error_codes::INVALID_PARAMS, "Invalid params"),
    (JsonRpcErrorCode::InternalError, error_codes::INTERNAL_ERROR, "Internal error"),
];

impl JsonRpcErrorCode {
    fn predefined(&self) -> Option<&'static (JsonRpcErrorCode, i64, &'static str)> {
        PREDEFINED.iter().find(|(known, _, _)| known == self)
    }

    pub fn code(&self) -> i64 {
        match (self, self.predefined()) {
            (JsonRpcErrorCode::ServerError(code), _) => *code,
            (_, Some((_, code, _))) => *code,
            (_, None) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Default message for the code
    pub fn message(&self) -> &'static str {
        self.predefined()
            .map(|(_, _, message)| *message)
            .unwrap_or("Server error")
    }

    /// Classify a raw code; `None` for application-defined codes
    pub fn from_code(code: i64) -> Option<Self> {
        PREDEFINED
            .iter()
            .find(|(_, known, _)| *known == code)
            .map(|(variant, _, _)| *variant)
            .or_else(|| {
                (error_codes::SERVER_ERROR_START..=error_codes::SERVER_ERROR_END)
                    .contains(&code)
                    .then_some(JsonRpcErrorCode::ServerError(code))
            })
    }
}

impl fmt::Display for JsonRpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// JSON-RPC error object, generic over the type of its `data` member.
///
/// `Error<Value>` is the undecoded form kept by parsed responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Error<T = Value> {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Error<T> {
    pub fn new(code: JsonRpcErrorCode, message: Option<String>, data: Option<T>) -> Self {
        Self {
            code: code.code(),
            message: message.unwrap_or_else(|| code.message().to_string()),
            data,
        }
    }

    pub fn parse_error(data: Option<T>) -> Self {
        Self::new(JsonRpcErrorCode::ParseError, None, data)
    }

    pub fn invalid_request(data: Option<T>) -> Self {
        Self::new(JsonRpcErrorCode::InvalidRequest, None, data)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            JsonRpcErrorCode::MethodNotFound,
            Some(format!("Method '{}' not found", method)),
            None,
        )
    }

    pub fn invalid_params(message: &str) -> Self {
        Self::new(
            JsonRpcErrorCode::InvalidParams,
            Some(message.to_string()),
            None,
        )
    }

    pub fn internal_error(message: Option<String>, data: Option<T>) -> Self {
        Self::new(JsonRpcErrorCode::InternalError, message, data)
    }

    /// The reserved code this error carries, if any
    pub fn known_code(&self) -> Option<JsonRpcErrorCode> {
        JsonRpcErrorCode::from_code(self.code)
    }

    /// Replace the data member, keeping code and message
    pub fn map_data<U>(self, f: impl FnOnce(Option<T>) -> Option<U>) -> Error<U> {
        Error {
            code: self.code,
            message: self.message,
            data: f(self.data),
        }
    }
}

impl<T> fmt::Display for Error<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JSON-RPC Error {}: {}", self.code, self.message)
    }
}

/// Shape of `error.data` emitted by servers that report unhandled exceptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    #[serde(rename = "type")]
    pub type_name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Errors raised while building outbound messages
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Expected params [{type_name}] to be serializable into object or array, got [{kind}]")]
    InvalidParams {
        type_name: String,
        kind: &'static str,
    },

    #[error("Failed to serialize payload: {0}")]
    Serialization(String),
}
