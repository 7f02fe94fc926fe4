//! # JSON-RPC 2.0 Client
//!
//! HTTP client for JSON-RPC 2.0 services with single, batch and notification
//! dispatch.
//!
//! ## Features
//!
//! - **Payload profiles**: camelCase or snake_case params and results, fixed envelope
//! - **Batches**: results looked up by request id, notification-only batches skip the body
//! - **Diagnostics**: every call error carries a [`CallContext`] with what was sent and received
//! - **Cancellation**: cooperative, through [`CancellationToken`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jsonrpc_wire::JsonRpcSerializer;
//! use jsonrpc_wire_client::{ClientConfig, JsonRpcClient};
//! use serde_json::{Value, json};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JsonRpcClient::builder()
//!         .with_config(ClientConfig::new("http://localhost:8080/rpc"))
//!         .with_serializer(JsonRpcSerializer::camel_case())
//!         .build()?;
//!
//!     let result = client.call("echo", json!({"value": 1})).await?;
//!     let value: Value = result.get_response_or_err()?;
//!     println!("{}", value);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod id;
pub mod result;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub mod prelude;

// Re-export main types
pub use client::{JsonRpcClient, JsonRpcClientBuilder};
pub use config::{ClientConfig, ConnectionConfig, LoggingConfig, TimeoutConfig};
pub use context::{CallContext, HttpResponseHead};
pub use error::{CallError, ClientError, ClientResult, TransportError};
pub use id::{JsonRpcIdGenerator, UuidIdGenerator};
pub use result::{BatchJsonRpcResult, SingleJsonRpcResult};
pub use transport::{HttpResponse, HttpTransport, Transport};

pub use tokio_util::sync::CancellationToken;
