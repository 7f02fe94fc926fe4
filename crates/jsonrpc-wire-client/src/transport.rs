//! Transport seam between the client and the network

use std::fmt;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::BoxStream;
use ::http::{HeaderMap, StatusCode};
use url::Url;

use crate::context::HttpResponseHead;
use crate::error::{ClientResult, TransportError};

pub mod http;

pub use self::http::HttpTransport;

/// Lazily read response body
pub type BodyStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// Response of a POST whose body has not been read yet
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: BodyStream,
}

impl HttpResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: BodyStream) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn head(&self) -> HttpResponseHead {
        HttpResponseHead::new(self.status, self.headers.clone())
    }

    /// Read the whole body as UTF-8 text
    pub async fn text(self) -> Result<String, TransportError> {
        let mut body = self.body;
        let mut buffer = BytesMut::new();
        while let Some(chunk) = body.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        String::from_utf8(buffer.to_vec())
            .map_err(|e| TransportError::Body(format!("Response body is not UTF-8: {}", e)))
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// HTTP transport used by the client.
///
/// Implementations are shared across concurrent calls. Non-success statuses
/// are returned as responses; only failures to exchange bytes are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to `url`
    async fn post(&self, url: Url, body: String) -> ClientResult<HttpResponse>;
}
