use jsonrpc_wire::{Error, ExceptionInfo, JsonRpcSerializer, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::context::CallContext;
use crate::error::{CallError, ClientError, ClientResult};
use crate::result::{result_or_err, result_or_none, typed_error};

/// View over the response of a single request
#[derive(Debug, Clone)]
pub struct SingleJsonRpcResult {
    context: CallContext,
    wire: JsonRpcSerializer,
    serializer: JsonRpcSerializer,
}

impl SingleJsonRpcResult {
    /// Fails when the context holds a batch response
    pub fn new(
        context: CallContext,
        wire: JsonRpcSerializer,
        serializer: JsonRpcSerializer,
    ) -> ClientResult<Self> {
        if context.batch_response().is_some() {
            return Err(ClientError::InvalidContext(
                "Expected single response, got batch",
            ));
        }
        Ok(Self {
            context,
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

    pub fn response(&self) -> Option<&Response> {
        self.context.single_response()
    }

    /// Decode the result, failing on a missing or error response
    pub fn get_response_or_err<T>(&self) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        match self.response() {
            Some(response) => result_or_err(response, &self.serializer, &self.context),
            None => Err(CallError::new(
                "Expected single response, got nothing",
                self.context.clone(),
            )
            .into()),
        }
    }

    /// Decode the result; `None` when the response is missing or an error
    pub fn as_response<T>(&self) -> ClientResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        result_or_none(self.response(), &self.serializer)
    }

    /// `false` when no response is stored
    pub fn has_error(&self) -> bool {
        self.response().is_some_and(Response::is_error)
    }

    pub fn as_any_error(&self) -> Option<&Error<Value>> {
        self.response().and_then(Response::error)
    }

    pub fn as_typed_error<T>(&self) -> ClientResult<Option<Error<T>>>
    where
        T: DeserializeOwned,
    {
        self.as_any_error()
            .map(|error| typed_error(error, &self.wire, &self.serializer))
            .transpose()
    }

    pub fn as_error_with_exception_info(&self) -> ClientResult<Option<Error<ExceptionInfo>>> {
        self.as_typed_error()
    }
}
