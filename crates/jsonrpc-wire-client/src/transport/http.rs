//! reqwest-backed HTTP transport

use std::time::Instant;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use jsonrpc_wire::CONTENT_TYPE;
use reqwest::{Client, Request};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, TransportError};
use crate::transport::{HttpResponse, Transport};

/// HTTP transport over a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport from client configuration; timeouts and headers are fixed here
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder()
            .connect_timeout(config.timeouts.connect)
            .timeout(config.timeouts.request)
            .user_agent(config.connection.user_agent.clone());

        if let Some(headers) = &config.connection.headers {
            builder = builder.default_headers(default_headers(headers.iter())?);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Use a preconfigured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn build_request(&self, url: Url, body: String) -> ClientResult<Request> {
        let request = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .body(body)
            .build()
            .map_err(TransportError::from)?;
        Ok(request)
    }
}

fn default_headers<'a>(
    headers: impl Iterator<Item = (&'a String, &'a String)>,
) -> ClientResult<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::config(format!("Invalid header name '{}': {}", name, e)))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            ClientError::config(format!("Invalid value for header '{}': {}", name, e))
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: Url, body: String) -> ClientResult<HttpResponse> {
        let start_time = Instant::now();
        debug!(url = %url, bytes = body.len(), "Sending HTTP POST");

        let request = self.build_request(url, body)?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(TransportError::from)?;

        debug!(
            status = %response.status(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "HTTP POST completed"
        );

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes_stream().map_err(TransportError::from).boxed();
        Ok(HttpResponse::new(status, headers, body))
    }
}
