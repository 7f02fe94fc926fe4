//! # JSON-RPC Wire Prelude
//!
//! ```rust
//! use jsonrpc_wire::prelude::*;
//! ```

pub use crate::call::{Call, UntypedCall};
pub use crate::error::{Error, ExceptionInfo, JsonRpcErrorCode, ProtocolError};
pub use crate::notification::{Notification, UntypedNotification};
pub use crate::request::{Request, RequestParams, UntypedRequest};
pub use crate::response::{ErrorResponse, Response, SuccessResponse};
pub use crate::serializer::{JsonRpcSerializer, NamingPolicy};
pub use crate::types::{JsonRpcVersion, RpcId};
pub use crate::wrapper::{RequestWrapper, ResponseWrapper};

// Standard error codes
pub use crate::error_codes::*;
