//! In-memory transport for tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;
use futures::{StreamExt, stream};
use http::{HeaderMap, HeaderValue, StatusCode, header};
use serde_json::Value;
use url::Url;

use crate::error::{ClientResult, TransportError};
use crate::transport::{HttpResponse, Transport};

/// A POST seen by [`MockTransport`]
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub url: Url,
    pub body: String,
}

impl RecordedPost {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Debug)]
enum MockReply {
    Body { status: StatusCode, body: String },
    Failure(String),
}

/// Transport answering POSTs with queued replies.
///
/// Every POST is recorded. When the queue is empty the reply is
/// `200 OK` with an empty body. The body stream flags when it is polled.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    posts: Mutex<Vec<RecordedPost>>,
    body_read: Arc<AtomicBool>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a `200 OK` reply with the given body
    pub fn reply(self, body: impl Into<String>) -> Self {
        self.reply_with_status(StatusCode::OK, body)
    }

    pub fn reply_json(self, body: Value) -> Self {
        self.reply(body.to_string())
    }

    pub fn reply_with_status(self, status: StatusCode, body: impl Into<String>) -> Self {
        lock(&self.replies).push_back(MockReply::Body {
            status,
            body: body.into(),
        });
        self
    }

    /// Queue a transport failure
    pub fn fail(self, message: impl Into<String>) -> Self {
        lock(&self.replies).push_back(MockReply::Failure(message.into()));
        self
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        lock(&self.posts).clone()
    }

    pub fn post_count(&self) -> usize {
        lock(&self.posts).len()
    }

    pub fn last_post(&self) -> Option<RecordedPost> {
        lock(&self.posts).last().cloned()
    }

    /// Whether any response body was read
    pub fn body_read(&self) -> bool {
        self.body_read.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, url: Url, body: String) -> ClientResult<HttpResponse> {
        lock(&self.posts).push(RecordedPost { url, body });

        let reply = lock(&self.replies).pop_front();
        let (status, content) = match reply {
            Some(MockReply::Body { status, body }) => (status, body),
            Some(MockReply::Failure(message)) => return Err(TransportError::Http(message).into()),
            None => (StatusCode::OK, String::new()),
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let flag = Arc::clone(&self.body_read);
        let body = stream::once(async move {
            flag.store(true, Ordering::SeqCst);
            Ok::<_, TransportError>(Bytes::from(content))
        })
        .boxed();

        Ok(HttpResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_posts_and_replays_queue() {
        let transport = MockTransport::new().reply("{\"ok\":1}").fail("down");
        let url = Url::parse("http://localhost/").unwrap();

        let response = transport.post(url.clone(), "a".to_string()).await.unwrap();
        assert!(!transport.body_read());
        assert_eq!(response.text().await.unwrap(), "{\"ok\":1}");
        assert!(transport.body_read());

        assert!(transport.post(url.clone(), "b".to_string()).await.is_err());

        let response = transport.post(url, "c".to_string()).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(transport.post_count(), 3);
        assert_eq!(transport.last_post().unwrap().body, "c");
    }
}
