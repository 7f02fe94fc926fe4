use std::collections::HashMap;
use std::collections::hash_map::Entry;

use jsonrpc_wire::{Error, ExceptionInfo, JsonRpcSerializer, Response, RpcId};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::context::CallContext;
use crate::error::{CallError, ClientError, ClientResult};
use crate::result::{result_or_err, result_or_none, typed_error};

static NULL_ID: RpcId = RpcId::Null;

/// View over the responses of a batch, looked up by request id.
///
/// Lookups with `None` find the response whose id is `null`.
#[derive(Debug, Clone)]
pub struct BatchJsonRpcResult {
    context: CallContext,
    // id -> position in the context's batch response
    index: HashMap<RpcId, usize>,
    wire: JsonRpcSerializer,
    serializer: JsonRpcSerializer,
}

impl BatchJsonRpcResult {
    /// Fails when the context holds a single response
    pub fn new(
        context: CallContext,
        wire: JsonRpcSerializer,
        serializer: JsonRpcSerializer,
    ) -> ClientResult<Self> {
        if context.single_response().is_some() {
            return Err(ClientError::InvalidContext(
                "Expected batch response, got single",
            ));
        }

        let mut index = HashMap::new();
        let responses = context.batch_response().unwrap_or_default();
        for (position, response) in responses.iter().enumerate() {
            match index.entry(response.id().clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(_) => {
                    warn!(id = %response.id(), "Duplicate id in batch response, keeping the first");
                }
            }
        }

        Ok(Self {
            context,
            index,
            wire,
            serializer,
        })
    }

    pub fn context(&self) -> &CallContext {
        &self.context
    }

    pub fn into_context(self) -> CallContext {
        self.context
    }

    /// All responses in the order the server sent them
    pub fn responses(&self) -> &[Response] {
        self.context.batch_response().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.responses().len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses().is_empty()
    }

    pub fn response(&self, id: Option<&RpcId>) -> Option<&Response> {
        let key = id.unwrap_or(&NULL_ID);
        self.index
            .get(key)
            .and_then(|&position| self.responses().get(position))
    }

    fn missing(&self, id: Option<&RpcId>) -> ClientError {
        CallError::new(
            format!(
                "Expected response id [{}], got nothing",
                id.unwrap_or(&NULL_ID)
            ),
            self.context.clone(),
        )
        .into()
    }

    /// Decode the result for `id`, failing on a missing or error response
    pub fn get_response_or_err<T>(&self, id: Option<&RpcId>) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        match self.response(id) {
            Some(response) => result_or_err(response, &self.serializer, &self.context),
            None => Err(self.missing(id)),
        }
    }

    /// Decode the result for `id`; `None` when missing or an error
    pub fn as_response<T>(&self, id: Option<&RpcId>) -> ClientResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        result_or_none(self.response(id), &self.serializer)
    }

    /// Fails when no response has this id
    pub fn has_error(&self, id: Option<&RpcId>) -> ClientResult<bool> {
        self.response(id)
            .map(Response::is_error)
            .ok_or_else(|| self.missing(id))
    }

    pub fn as_any_error(&self, id: Option<&RpcId>) -> Option<&Error<Value>> {
        self.response(id).and_then(Response::error)
    }

    pub fn as_typed_error<T>(&self, id: Option<&RpcId>) -> ClientResult<Option<Error<T>>>
    where
        T: DeserializeOwned,
    {
        self.as_any_error(id)
            .map(|error| typed_error(error, &self.wire, &self.serializer))
            .transpose()
    }

    pub fn as_error_with_exception_info(
        &self,
        id: Option<&RpcId>,
    ) -> ClientResult<Option<Error<ExceptionInfo>>> {
        self.as_typed_error(id)
    }
}
