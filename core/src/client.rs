//! Request builder, response parser and async fetch operations for the
//! launch API.
//!
//! # Design
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`, both
//! pure. The async `search_launches` / `get_launch` run that pair through the
//! injected `RemoteSource` and collapse every failure into
//! `FetchOutcome::Failed`, reporting it to the `DiagnosticSink` on the way.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

use crate::diagnostics::{Diagnostic, DiagnosticSink, Operation, TracingSink};
use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::source::RemoteSource;
use crate::types::{FetchOutcome, LaunchDetail, LaunchSummary, ResultsEnvelope, SearchQuery};

/// Base path of the public launch API (development instance).
pub const DEFAULT_BASE_URL: &str = "https://lldev.thespacedevs.com/2.2.0";

/// Characters left unescaped in query values, matching form encoding.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'*');

/// Client for the launch API.
///
/// Holds the base URL, the remote source that performs I/O and the sink that
/// receives failure diagnostics. Carries no per-request state.
pub struct LaunchClient<S> {
    base_url: String,
    source: S,
    sink: Box<dyn DiagnosticSink>,
}

impl<S> LaunchClient<S> {
    pub fn new(base_url: &str, source: S) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            source,
            sink: Box::new(TracingSink),
        }
    }

    pub fn with_default_endpoint(source: S) -> Self {
        Self::new(DEFAULT_BASE_URL, source)
    }

    /// Replaces the diagnostic sink (default: `TracingSink`).
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn build_search_launches(&self, query: &SearchQuery) -> HttpRequest {
        HttpRequest {
            url: format!(
                "{}/launch?search={}&mode=list",
                self.base_url,
                encode(query.as_str())
            ),
            headers: accept_json(),
        }
    }

    pub fn build_get_launch(&self, id: &str) -> HttpRequest {
        HttpRequest {
            url: format!("{}/launch?id={}", self.base_url, encode(id)),
            headers: accept_json(),
        }
    }

    /// Returns the result list exactly as sent, possibly empty.
    pub fn parse_search_launches(&self, response: HttpResponse) -> Result<Vec<LaunchSummary>, FetchError> {
        check_status(&response)?;
        decode_results(&response.body)
    }

    /// Returns the first record, or `NotFound` when `results` is empty.
    pub fn parse_get_launch(&self, response: HttpResponse) -> Result<LaunchDetail, FetchError> {
        check_status(&response)?;
        decode_results(&response.body)?
            .into_iter()
            .next()
            .ok_or(FetchError::NotFound)
    }

    fn settle<T>(&self, operation: Operation, subject: &str, result: Result<T, FetchError>) -> FetchOutcome<T> {
        match result {
            Ok(value) => FetchOutcome::Ok(value),
            Err(error) => {
                self.sink.emit(&Diagnostic::new(operation, subject, &error));
                FetchOutcome::Failed
            }
        }
    }
}

impl<S: RemoteSource> LaunchClient<S> {
    pub async fn search_launches(&self, query: &SearchQuery) -> FetchOutcome<Vec<LaunchSummary>> {
        let request = self.build_search_launches(query);
        tracing::debug!(url = %request.url, "searching launches");
        let result = match self.source.execute(request).await {
            Ok(response) => self.parse_search_launches(response),
            Err(e) => Err(e.into()),
        };
        self.settle(Operation::SearchLaunches, query.as_str(), result)
    }

    pub async fn get_launch(&self, id: &str) -> FetchOutcome<LaunchDetail> {
        let request = self.build_get_launch(id);
        tracing::debug!(url = %request.url, "fetching launch");
        let result = match self.source.execute(request).await {
            Ok(response) => self.parse_get_launch(response),
            Err(e) => Err(e.into()),
        };
        self.settle(Operation::GetLaunch, id, result)
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

fn accept_json() -> Vec<(String, String)> {
    vec![("accept".to_string(), "application/json".to_string())]
}

fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    Err(FetchError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode_results<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, FetchError> {
    let envelope: ResultsEnvelope<T> =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    envelope
        .results
        .ok_or_else(|| FetchError::Decode("response has no results field".to_string()))
}
