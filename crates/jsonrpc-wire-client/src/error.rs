//! Error types for JSON-RPC client operations

use jsonrpc_wire::ProtocolError;
use thiserror::Error;

use crate::context::CallContext;

/// Result type for JSON-RPC client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error type for JSON-RPC client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level errors, passed through untouched
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a shape the call did not expect
    #[error(transparent)]
    Call(#[from] CallError),

    /// Outbound message could not be built
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cancellation was requested before the call completed
    #[error("Operation cancelled")]
    Cancelled,

    /// A result accessor was built over a context of the wrong shape
    #[error("Invalid call context: {0}")]
    InvalidContext(&'static str),

    #[error("Batch must contain at least one call")]
    EmptyBatch,
}

/// Transport-specific errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP transport error: {0}")]
    Http(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Failure of a call, carrying everything that was sent and received
#[derive(Error, Debug)]
#[error("{message}\n{context}")]
pub struct CallError {
    message: String,
    context: Box<CallContext>,
}

impl CallError {
    pub fn new(message: impl Into<String>, context: CallContext) -> Self {
        Self {
            message: message.into(),
            context: Box::new(context),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &CallContext {
        &self.context
    }

    pub fn into_context(self) -> CallContext {
        *self.context
    }
}

impl ClientError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Context of the failed call, if this is a call error
    pub fn call_context(&self) -> Option<&CallContext> {
        match self {
            Self::Call(err) => Some(err.context()),
            _ => None,
        }
    }

    pub fn is_call_error(&self) -> bool {
        matches!(self, Self::Call(_))
    }

    /// Check if the response body failed to decode
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_error_renders_context() {
        let mut context = CallContext::new();
        context.with_http_content("{\"oops\":1}".to_string());
        let err: ClientError =
            CallError::new("Expected single response, got nothing", context).into();

        let rendered = err.to_string();
        assert!(rendered.starts_with("Expected single response, got nothing\n"));
        assert!(rendered.contains("{\"oops\":1}"));
        assert!(err.is_call_error());
        assert!(err.call_context().is_some());
    }

    #[test]
    fn test_non_call_errors_have_no_context() {
        let err = ClientError::Cancelled;
        assert!(err.call_context().is_none());
        assert!(err.is_cancelled());
    }
}
