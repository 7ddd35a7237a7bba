//! Launch search client core.
//!
//! # Overview
//! Searches a public launch-information API and fetches single launches,
//! then reconciles each result into what a view displays. Two parts:
//!
//! - `LaunchClient` (the fetch client) turns every failure mode into
//!   `FetchOutcome::Failed` plus a structured `Diagnostic`.
//! - `SearchView` / `DetailView` (the render-state controller) own one
//!   request lifecycle each and drive a loading indicator, a submitting
//!   control, and exactly one rendered block through a `Container`.
//!
//! # Design
//! - Network I/O is injected through `RemoteSource`; `HttpSource` is the
//!   `reqwest` implementation. Requests and responses are plain data.
//! - Everything runs on one thread. Overlapping requests on a view are
//!   interleaved, not parallel, and by default the last to settle is shown.
//! - Markup is out of scope: `render` produces neutral `Element` trees.

pub mod client;
pub mod container;
pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod http;
pub mod render;
pub mod source;
pub mod types;

pub use client::{LaunchClient, DEFAULT_BASE_URL};
pub use container::{Container, Control, MemoryContainer, MemoryControl};
pub use controller::{DetailView, Rendered, RequestState, SearchView, Supersession, ViewConfig};
pub use diagnostics::{Diagnostic, DiagnosticSink, FailureKind, Operation, RecordingSink, TracingSink};
pub use error::{FetchError, TransportError};
pub use http::{HttpRequest, HttpResponse};
pub use render::{markers, Element, Tag};
pub use source::{HttpSource, RemoteSource};
pub use types::{FetchOutcome, LaunchDetail, LaunchStatus, LaunchSummary, Mission, SearchQuery};
