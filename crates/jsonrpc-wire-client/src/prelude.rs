//! # JSON-RPC Client Prelude
//!
//! ```rust
//! use jsonrpc_wire_client::prelude::*;
//! ```

pub use crate::client::{JsonRpcClient, JsonRpcClientBuilder};
pub use crate::config::ClientConfig;
pub use crate::context::CallContext;
pub use crate::error::{CallError, ClientError, ClientResult};
pub use crate::id::JsonRpcIdGenerator;
pub use crate::result::{BatchJsonRpcResult, SingleJsonRpcResult};
pub use crate::transport::{HttpResponse, Transport};
pub use crate::CancellationToken;

pub use jsonrpc_wire::prelude::*;
