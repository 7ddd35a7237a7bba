//! The injected remote data source.
//!
//! # Design
//! `LaunchClient` never calls the network itself. It hands an `HttpRequest`
//! to a `RemoteSource` and parses whatever comes back. `HttpSource` is the
//! production implementation; tests swap in scripted sources.
//!
//! The trait is `?Send`: views are driven from a single thread, and
//! overlapping requests are interleaved by one executor rather than run in
//! parallel.

use std::rc::Rc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait(?Send)]
pub trait RemoteSource {
    /// Performs one GET round-trip. Non-2xx statuses are returned as
    /// responses; only failures that produce no response are errors.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait(?Send)]
impl<S: RemoteSource + ?Sized> RemoteSource for Rc<S> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// `RemoteSource` backed by `reqwest`. No timeout is applied.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl RemoteSource for HttpSource {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
