//! HTTP transport seam.
//!
//! The record client only depends on the [`Transport`] trait; production code
//! plugs in [`CurlTransport`] and tests plug in a scripted fake.

mod libcurl;
mod error;
#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use std::fmt;

pub use libcurl::CurlTransport;
pub use error::TransportError;

/// HTTP methods used by the heroes API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request. `body`, when present, is JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn with_json(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// Sends requests and returns the raw response body of a 2xx response.
///
/// Everything else (connection failure, non-2xx status, ...) is a [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Vec<u8>, TransportError>;

    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.send(Request::new(Method::Get, url)).await
    }

    async fn post(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.send(Request::new(Method::Post, url).with_json(body))
            .await
    }

    async fn put(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.send(Request::new(Method::Put, url).with_json(body))
            .await
    }

    async fn delete(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.send(Request::new(Method::Delete, url)).await
    }
}
