//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `LaunchClient` builds an
//! `HttpRequest`, a `RemoteSource` turns it into an `HttpResponse`, and the
//! client parses the response. The launch API is read-only, so every request
//! is a GET and no method or body is carried.

/// A GET request described as plain data.
///
/// Built by `LaunchClient::build_*` methods. The `url` is absolute and
/// already carries its form-encoded query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
///
/// Non-success statuses are still responses; only transport failures are
/// reported as `TransportError` by a `RemoteSource`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
