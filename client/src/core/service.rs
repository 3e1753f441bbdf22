//! # Service Traits
//!
//! The network boundary of the client, as a trait so tests can swap the real
//! HTTP stack for a scripted one.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};

use super::error::Result;

/// One fully-built HTTP request, ready to go on the wire.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Serialized JSON body, if any
    pub body: Option<String>,
}

/// Raw HTTP answer: status plus the unparsed body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Trait for the HTTP layer underneath the transport
///
/// Implementations must keep whatever session credential the server sets
/// (cookies) and send it back on every later request. They only report
/// transport-level failures as errors; every HTTP status, including 4xx and
/// 5xx, is a successful `HttpResponse` here.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Send one request and collect the full response body
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}
