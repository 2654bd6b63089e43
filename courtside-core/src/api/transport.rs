//! HTTP transport abstraction.
//!
//! The [`Transport`] trait sits under [`StatsClient`](super::StatsClient) so
//! the client's retry, decoding and breaker logic can run against canned
//! responses in tests and demos. Transports only move bytes: status mapping
//! and JSON decoding belong to the client.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde_json::Value;

use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Raw response: status plus body text.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn json(value: &Value) -> Self {
        Self::ok(value.to_string())
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

pub trait Transport: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Send one request. Only connection-level failures are errors; any
    /// HTTP status, including 4xx/5xx, is a successful `HttpResponse`.
    fn send(&self, method: Method, url: &str, body: Option<&Value>)
        -> Result<HttpResponse, ApiError>;
}

/// Blocking `reqwest` transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("courtside/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<HttpResponse, ApiError> {
        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().map_err(|e| classify(url, e))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| classify(url, e))?;
        Ok(HttpResponse { status, body })
    }
}

fn classify(url: &str, e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout(format!("{url}: {e}"))
    } else if e.is_builder() {
        ApiError::InvalidRequest(format!("{url}: {e}"))
    } else {
        ApiError::NetworkUnreachable(format!("{url}: {e}"))
    }
}

/// A request as seen by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

/// Transport that replays queued responses in order and records every
/// request it receives. Once the queue is empty every call fails as
/// unreachable.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Result<HttpResponse, ApiError>) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    pub fn push_json(&self, value: Value) -> &Self {
        self.push(Ok(HttpResponse::json(&value)))
    }

    pub fn push_status(&self, status: u16) -> &Self {
        self.push(Ok(HttpResponse::status(status)))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Transport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<HttpResponse, ApiError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method,
                url: url.to_string(),
                body: body.cloned(),
            });
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::NetworkUnreachable("no scripted response".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scripted_replays_in_order_then_fails() {
        let t = ScriptedTransport::new();
        t.push_json(json!({"a": 1})).push_status(500);

        let first = t.send(Method::Get, "http://x/a", None).unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(first.body, r#"{"a":1}"#);
        assert_eq!(t.send(Method::Get, "http://x/b", None).unwrap().status, 500);
        assert!(matches!(
            t.send(Method::Get, "http://x/c", None),
            Err(ApiError::NetworkUnreachable(_))
        ));
        assert_eq!(t.requests().len(), 3);
        assert_eq!(t.remaining(), 0);
    }

    #[test]
    fn scripted_records_bodies() {
        let t = ScriptedTransport::new();
        let body = json!({"season": "2024-25"});
        let _ = t.send(Method::Post, "http://x/standings", Some(&body));
        let reqs = t.requests();
        assert_eq!(reqs[0].method, Method::Post);
        assert_eq!(reqs[0].body.as_ref(), Some(&body));
    }

    #[test]
    fn http_transport_builds() {
        assert!(HttpTransport::new(Duration::from_secs(5)).is_ok());
    }
}
