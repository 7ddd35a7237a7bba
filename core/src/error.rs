//! Error types for the launch API client.
//!
//! # Design
//! `FetchError` is the full failure taxonomy of a fetch. It never leaves the
//! client's async operations: `search_launches` and `get_launch` flatten it to
//! `FetchOutcome::Failed` after reporting a diagnostic. The pure `parse_*`
//! methods return it directly so callers driving their own I/O can inspect it.

use thiserror::Error;

/// A transport-level failure reported by a `RemoteSource`: the request never
/// produced an HTTP response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("transport failed: {0}")]
pub struct TransportError(pub String);

/// Errors produced while fetching launch data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never reached the server or the connection broke.
    #[error("network error: {0}")]
    Network(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The body is not JSON of the expected shape, or `results` is absent.
    #[error("decode failed: {0}")]
    Decode(String),

    /// A detail fetch returned an empty `results` sequence.
    #[error("no launch found")]
    NotFound,
}

impl FetchError {
    /// The status code, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
