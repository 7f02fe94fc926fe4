//! Request id generation

use jsonrpc_wire::RpcId;
use tracing::trace;
use uuid::Uuid;

/// Source of ids for requests sent without an explicit one
pub trait JsonRpcIdGenerator: Send + Sync {
    fn generate_id(&self) -> RpcId;
}

/// Generates random UUID v4 string ids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl JsonRpcIdGenerator for UuidIdGenerator {
    fn generate_id(&self) -> RpcId {
        let id = Uuid::new_v4().to_string();
        trace!(id = %id, "Generated request id");
        RpcId::String(id)
    }
}

impl<F> JsonRpcIdGenerator for F
where
    F: Fn() -> RpcId + Send + Sync,
{
    fn generate_id(&self) -> RpcId {
        self()
    }
}
