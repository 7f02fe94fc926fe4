//! Per-call diagnostic record

use std::fmt;

use http::{HeaderMap, StatusCode};
use jsonrpc_wire::{Error, Response, UntypedCall};
use serde_json::Value;
use url::Url;

/// Status line and headers of an HTTP response, without the body
#[derive(Debug, Clone)]
pub struct HttpResponseHead {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl HttpResponseHead {
    pub fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self { status, headers }
    }
}

/// Everything sent and received during one dispatch.
///
/// A context is owned by a single call. It fills up as the call progresses,
/// so a failed or cancelled call leaves whatever was recorded so far.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    request_url: Option<Url>,
    single_call: Option<UntypedCall>,
    batch_call: Option<Vec<UntypedCall>>,
    http_response: Option<HttpResponseHead>,
    http_content: Option<String>,
    single_response: Option<Response>,
    batch_response: Option<Vec<Response>>,
    expected_batch_response_count: usize,
    error: Option<Error<Value>>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_url(&mut self, url: Url) {
        self.request_url = Some(url);
    }

    pub fn with_single(&mut self, call: UntypedCall) {
        self.single_call = Some(call);
    }

    /// Record an outbound batch and count the calls that expect an answer
    pub fn with_batch(&mut self, calls: Vec<UntypedCall>) {
        self.expected_batch_response_count = calls.iter().filter(|c| c.is_request()).count();
        self.batch_call = Some(calls);
    }

    pub fn with_http_response(&mut self, head: HttpResponseHead) {
        self.http_response = Some(head);
    }

    pub fn with_http_content(&mut self, content: String) {
        self.http_content = Some(content);
    }

    pub fn with_single_response(&mut self, response: Response) {
        self.single_response = Some(response);
    }

    pub fn with_batch_response(&mut self, responses: Vec<Response>) {
        self.batch_response = Some(responses);
    }

    pub fn with_error(&mut self, error: Error<Value>) {
        self.error = Some(error);
    }

    pub fn request_url(&self) -> Option<&Url> {
        self.request_url.as_ref()
    }

    pub fn single_call(&self) -> Option<&UntypedCall> {
        self.single_call.as_ref()
    }

    pub fn batch_call(&self) -> Option<&[UntypedCall]> {
        self.batch_call.as_deref()
    }

    pub fn http_response(&self) -> Option<&HttpResponseHead> {
        self.http_response.as_ref()
    }

    pub fn http_content(&self) -> Option<&str> {
        self.http_content.as_deref()
    }

    pub fn single_response(&self) -> Option<&Response> {
        self.single_response.as_ref()
    }

    pub fn batch_response(&self) -> Option<&[Response]> {
        self.batch_response.as_deref()
    }

    /// Number of requests in the outbound batch; notifications are not answered
    pub fn expected_batch_response_count(&self) -> usize {
        self.expected_batch_response_count
    }

    /// Error response recorded by a throwing accessor
    pub fn error(&self) -> Option<&Error<Value>> {
        self.error.as_ref()
    }
}

fn write_json<T: serde::Serialize>(f: &mut fmt::Formatter<'_>, value: &T) -> fmt::Result {
    match serde_json::to_string(value) {
        Ok(text) => f.write_str(&text),
        Err(e) => write!(f, "<unserializable: {}>", e),
    }
}

impl fmt::Display for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "JSON-RPC call context:")?;
        match &self.request_url {
            Some(url) => writeln!(f, "  url: {}", url)?,
            None => writeln!(f, "  url: (not sent)")?,
        }
        if let Some(call) = &self.single_call {
            write!(f, "  call: ")?;
            write_json(f, call)?;
            writeln!(f)?;
        }
        if let Some(calls) = &self.batch_call {
            write!(
                f,
                "  batch ({} calls, {} expected responses): ",
                calls.len(),
                self.expected_batch_response_count
            )?;
            write_json(f, calls)?;
            writeln!(f)?;
        }
        if let Some(head) = &self.http_response {
            writeln!(f, "  http status: {}", head.status)?;
        }
        match &self.http_content {
            Some(content) if content.is_empty() => writeln!(f, "  http content: (empty)")?,
            Some(content) => writeln!(f, "  http content: {}", content)?,
            None => {}
        }
        if let Some(response) = &self.single_response {
            writeln!(f, "  response: {}", response)?;
        }
        if let Some(responses) = &self.batch_response {
            writeln!(f, "  batch response ({} items):", responses.len())?;
            for response in responses {
                writeln!(f, "    {}", response)?;
            }
        }
        if let Some(error) = &self.error {
            match error.known_code() {
                Some(kind) => writeln!(f, "  error: {} [{}]", error, kind)?,
                None => writeln!(f, "  error: {}", error)?,
            }
        }
        Ok(())
    }
}
