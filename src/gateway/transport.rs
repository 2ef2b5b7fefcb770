//! HTTP transport seam
//!
//! The gateway composes requests and interprets responses; moving bytes is
//! left to a transport so the same logic runs on `fetch` in the browser and
//! against scripted responses in tests.

use async_trait::async_trait;

use crate::error::Result;

/// A JSON POST request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    /// Extra headers; `Content-Type: application/json` is always sent
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    pub fn post_json(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends JSON requests. Transport-level failures are `RemoteUnavailable`.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse>;
}
