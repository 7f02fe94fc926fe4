//! # JSON-RPC 2.0 Wire Models
//!
//! Transport-agnostic building blocks shared by JSON-RPC clients and servers.
//!
//! ## Features
//! - [`RpcId`]: string, number or null identifiers with tag-sensitive equality
//! - Typed calls ([`Request`], [`Notification`]) and their wire forms ([`UntypedCall`])
//! - [`Response`] classification (success vs error) straight from the JSON stream
//! - Single-vs-batch discrimination for both directions ([`RequestWrapper`], [`ResponseWrapper`])
//! - Serializer profiles separating payload casing from the fixed envelope

pub mod call;
pub mod error;
pub mod notification;
pub mod request;
pub mod response;
pub mod serializer;
pub mod types;
pub mod wrapper;

pub mod prelude;

// Re-export main types
pub use call::{Call, UntypedCall};
pub use error::{Error, ExceptionInfo, JsonRpcErrorCode, ProtocolError};
pub use notification::{Notification, UntypedNotification};
pub use request::{Request, RequestParams, UntypedRequest};
pub use response::{ErrorResponse, Response, SuccessResponse};
pub use serializer::{JsonRpcSerializer, NamingPolicy};
pub use types::{JsonRpcVersion, RpcId};
pub use wrapper::{RequestWrapper, ResponseWrapper};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Content type of JSON-RPC HTTP bodies
pub const CONTENT_TYPE: &str = "application/json";

pub const ID_PROPERTY: &str = "id";
pub const VERSION_PROPERTY: &str = "jsonrpc";
pub const METHOD_PROPERTY: &str = "method";
pub const PARAMS_PROPERTY: &str = "params";
pub const RESULT_PROPERTY: &str = "result";
pub const ERROR_PROPERTY: &str = "error";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Server error range: -32099 to -32000
    pub const SERVER_ERROR_START: i64 = -32099;
    pub const SERVER_ERROR_END: i64 = -32000;
}
