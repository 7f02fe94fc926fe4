//! JSON-RPC client dispatch

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use jsonrpc_wire::{
    Call, JsonRpcSerializer, Notification, Request, ResponseWrapper, RpcId, UntypedCall,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};
use url::Url;

use crate::config::{ClientConfig, LoggingConfig};
use crate::context::CallContext;
use crate::error::{CallError, ClientError, ClientResult, TransportError};
use crate::id::{JsonRpcIdGenerator, UuidIdGenerator};
use crate::result::{BatchJsonRpcResult, SingleJsonRpcResult};
use crate::transport::{HttpResponse, HttpTransport, Transport};

/// JSON-RPC client over an HTTP transport.
///
/// Each call builds its own [`CallContext`]; the client itself holds no
/// per-call state and can be cloned and shared across tasks.
#[derive(Clone)]
pub struct JsonRpcClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
    serializer: JsonRpcSerializer,
    wire: JsonRpcSerializer,
    id_generator: Arc<dyn JsonRpcIdGenerator>,
    logging: LoggingConfig,
}

impl fmt::Debug for JsonRpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonRpcClient")
            .field("base_url", &self.base_url.as_str())
            .field("serializer", &self.serializer)
            .finish_non_exhaustive()
    }
}

impl JsonRpcClient {
    /// Client for `url` with default configuration and the HTTP transport
    pub fn new(url: &str) -> ClientResult<Self> {
        JsonRpcClientBuilder::new()
            .with_config(ClientConfig::new(url))
            .build()
    }

    pub fn builder() -> JsonRpcClientBuilder {
        JsonRpcClientBuilder::new()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Profile used for params, results and error data
    pub fn serializer(&self) -> &JsonRpcSerializer {
        &self.serializer
    }

    fn resolve_url(&self, url: Option<&str>) -> ClientResult<Url> {
        match url {
            None => Ok(self.base_url.clone()),
            Some(path) => self.base_url.join(path).map_err(|e| {
                let reason = format!("Cannot join '{}' to {}: {}", path, self.base_url, e);
                TransportError::InvalidUrl(reason).into()
            }),
        }
    }

    async fn post(
        &self,
        url: Url,
        body: String,
        cancel: &CancellationToken,
    ) -> ClientResult<HttpResponse> {
        if self.logging.log_requests {
            trace!(url = %url, body = %body, "Sending JSON-RPC body");
        }
        cancellable(cancel, self.transport.post(url, body)).await
    }

    async fn read_body(
        &self,
        response: HttpResponse,
        cancel: &CancellationToken,
    ) -> ClientResult<String> {
        let read = async move { response.text().await.map_err(ClientError::from) };
        let content = cancellable(cancel, read).await?;
        debug!(bytes = content.len(), "Received response body");
        if self.logging.log_responses {
            trace!(content = %content, "Response content");
        }
        Ok(content)
    }

    /// Send a notification. The response body is never read.
    pub async fn send_notification<P>(
        &self,
        url: Option<&str>,
        notification: &Notification<P>,
        cancel: &CancellationToken,
    ) -> ClientResult<HttpResponse>
    where
        P: Serialize + Send + Sync,
    {
        let mut context = CallContext::new();
        let request_url = self.resolve_url(url)?;
        context.with_request_url(request_url.clone());

        let call = notification.with_serialized_params(&self.serializer)?;
        let body = self.wire.write(&call)?;
        context.with_single(call);

        let response = self.post(request_url, body, cancel).await?;
        context.with_http_response(response.head());
        trace!(method = %notification.method, status = %response.status, "Notification sent");
        Ok(response)
    }

    /// Send a request and expect a single response object
    pub async fn send_request<P>(
        &self,
        url: Option<&str>,
        request: &Request<P>,
        cancel: &CancellationToken,
    ) -> ClientResult<SingleJsonRpcResult>
    where
        P: Serialize + Send + Sync,
    {
        let mut context = CallContext::new();
        let request_url = self.resolve_url(url)?;
        context.with_request_url(request_url.clone());

        let call = request.with_serialized_params(&self.serializer)?;
        let body = self.wire.write(&call)?;
        context.with_single(call);

        let response = self.post(request_url, body, cancel).await?;
        context.with_http_response(response.head());
        let content = self.read_body(response, cancel).await?;
        context.with_http_content(content.clone());

        if content.trim().is_empty() {
            trace!(id = %request.id, "Request id [{}] failed: empty body", request.id);
            return Err(CallError::new("Expected single response, got nothing", context).into());
        }

        match serde_json::from_str::<ResponseWrapper>(&content)? {
            ResponseWrapper::Single(response) => {
                trace!(id = %request.id, "Request id [{}]: success", request.id);
                context.with_single_response(response);
            }
            ResponseWrapper::Batch(responses) => {
                let message = format!("Expected single response, got batch of {}", responses.len());
                trace!(id = %request.id, "Request id [{}] failed: {}", request.id, message);
                context.with_batch_response(responses);
                return Err(CallError::new(message, context).into());
            }
        }

        SingleJsonRpcResult::new(context, self.wire, self.serializer)
    }

    /// Send a batch.
    ///
    /// Returns `None` without reading the body when the batch holds only
    /// notifications.
    pub async fn send_batch(
        &self,
        url: Option<&str>,
        calls: &[&dyn Call],
        cancel: &CancellationToken,
    ) -> ClientResult<Option<BatchJsonRpcResult>> {
        if calls.is_empty() {
            return Err(ClientError::EmptyBatch);
        }

        let mut context = CallContext::new();
        let request_url = self.resolve_url(url)?;
        context.with_request_url(request_url.clone());

        let batch = calls
            .iter()
            .map(|call| call.with_serialized_params(&self.serializer))
            .collect::<Result<Vec<UntypedCall>, _>>()?;
        let body = self.wire.write(&batch)?;
        context.with_batch(batch);
        let count = calls.len();

        let response = self.post(request_url, body, cancel).await?;
        context.with_http_response(response.head());

        let expected = context.expected_batch_response_count();
        if expected == 0 {
            trace!(count, "Batch count [{}]: only notifications, no response expected", count);
            return Ok(None);
        }

        let content = self.read_body(response, cancel).await?;
        context.with_http_content(content.clone());

        if content.trim().is_empty() {
            trace!(count, "Batch count [{}] failed: empty body", count);
            return Err(CallError::new("Expected batch response, got nothing", context).into());
        }

        match serde_json::from_str::<ResponseWrapper>(&content)? {
            ResponseWrapper::Batch(responses) => {
                if responses.len() != expected {
                    warn!(
                        expected,
                        received = responses.len(),
                        "Batch response count differs from number of requests"
                    );
                }
                trace!(count, "Batch count [{}]: success", count);
                context.with_batch_response(responses);
            }
            ResponseWrapper::Single(response) => {
                trace!(count, "Batch count [{}] failed: {}", count, response);
                context.with_single_response(response);
                return Err(CallError::new("Expected batch response, got single", context).into());
            }
        }

        BatchJsonRpcResult::new(context, self.wire, self.serializer).map(Some)
    }

    /// Serialize and POST a call, returning the raw HTTP response
    pub async fn send(
        &self,
        url: Option<&str>,
        call: &dyn Call,
        cancel: &CancellationToken,
    ) -> ClientResult<HttpResponse> {
        let request_url = self.resolve_url(url)?;
        let untyped = call.with_serialized_params(&self.serializer)?;
        let body = self.wire.write(&untyped)?;
        self.post(request_url, body, cancel).await
    }

    /// Notify the base URL
    pub async fn notify<P>(&self, method: &str, params: P) -> ClientResult<HttpResponse>
    where
        P: Serialize + Send + Sync,
    {
        self.send_notification(None, &Notification::new(method, params), &CancellationToken::new())
            .await
    }

    /// Call the base URL with a generated id
    pub async fn call<P>(&self, method: &str, params: P) -> ClientResult<SingleJsonRpcResult>
    where
        P: Serialize + Send + Sync,
    {
        let id = self.id_generator.generate_id();
        self.call_with_id(id, method, params).await
    }

    pub async fn call_with_id<P>(
        &self,
        id: impl Into<RpcId>,
        method: &str,
        params: P,
    ) -> ClientResult<SingleJsonRpcResult>
    where
        P: Serialize + Send + Sync,
    {
        self.send_request(None, &Request::new(id, method, params), &CancellationToken::new())
            .await
    }

    pub async fn batch(&self, calls: &[&dyn Call]) -> ClientResult<Option<BatchJsonRpcResult>> {
        self.send_batch(None, calls, &CancellationToken::new()).await
    }

    /// Fresh id from the configured generator
    pub fn generate_id(&self) -> RpcId {
        self.id_generator.generate_id()
    }
}

async fn cancellable<F, T>(cancel: &CancellationToken, future: F) -> ClientResult<T>
where
    F: Future<Output = ClientResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = future => result,
    }
}

/// Builder for [`JsonRpcClient`]
#[derive(Default)]
pub struct JsonRpcClientBuilder {
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
    serializer: Option<JsonRpcSerializer>,
    id_generator: Option<Arc<dyn JsonRpcIdGenerator>>,
}

impl JsonRpcClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the HTTP transport built from the configuration
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Profile for payloads; defaults to snake_case
    pub fn with_serializer(mut self, serializer: JsonRpcSerializer) -> Self {
        self.serializer = Some(serializer);
        self
    }

    pub fn with_id_generator(mut self, id_generator: Arc<dyn JsonRpcIdGenerator>) -> Self {
        self.id_generator = Some(id_generator);
        self
    }

    pub fn build(self) -> ClientResult<JsonRpcClient> {
        let config = self.config.unwrap_or_default();

        let base_url = Url::parse(&config.url)
            .map_err(|e| ClientError::config(format!("Invalid base URL '{}': {}", config.url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::config(format!(
                "Base URL '{}' must be absolute",
                config.url
            )));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&config)?),
        };

        let client = JsonRpcClient {
            base_url,
            transport,
            serializer: self.serializer.unwrap_or_default(),
            wire: JsonRpcSerializer::wire(),
            id_generator: self
                .id_generator
                .unwrap_or_else(|| Arc::new(UuidIdGenerator)),
            logging: config.logging,
        };

        trace!(
            url = %client.base_url,
            user_agent = %config.connection.user_agent,
            timeout_ms = config.timeouts.request.as_millis() as u64,
            "JSON-RPC client initialized"
        );
        Ok(client)
    }
}
