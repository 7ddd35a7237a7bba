//! Structured failure reporting for the fetch client.
//!
//! Every failed fetch produces one `Diagnostic` handed to the client's
//! `DiagnosticSink`. The default sink forwards it to `tracing`; tests and
//! embedders can install their own.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SearchLaunches,
    GetLaunch,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::SearchLaunches => "search_launches",
            Operation::GetLaunch => "get_launch",
        }
    }
}

/// Which member of the `FetchError` taxonomy occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Http,
    Decode,
    NotFound,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Network => "network",
            FailureKind::Http => "http",
            FailureKind::Decode => "decode",
            FailureKind::NotFound => "not_found",
        }
    }
}

impl From<&FetchError> for FailureKind {
    fn from(error: &FetchError) -> Self {
        match error {
            FetchError::Network(_) => FailureKind::Network,
            FetchError::Http { .. } => FailureKind::Http,
            FetchError::Decode(_) => FailureKind::Decode,
            FetchError::NotFound => FailureKind::NotFound,
        }
    }
}

/// One failed fetch. `subject` is the search text or the launch id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub operation: Operation,
    pub subject: String,
    pub kind: FailureKind,
    pub status: Option<u16>,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(operation: Operation, subject: &str, error: &FetchError) -> Self {
        Self {
            operation,
            subject: subject.to_string(),
            kind: FailureKind::from(error),
            status: error.status(),
            detail: error.to_string(),
        }
    }
}

pub trait DiagnosticSink {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Emits each diagnostic as a `tracing` warning with structured fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        tracing::warn!(
            operation = diagnostic.operation.as_str(),
            subject = %diagnostic.subject,
            kind = diagnostic.kind.as_str(),
            status = diagnostic.status,
            detail = %diagnostic.detail,
            "launch fetch failed"
        );
    }
}

/// Keeps every diagnostic in memory. Clones share the same buffer, so one
/// clone can be installed in a client while another is inspected.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    recorded: Rc<RefCell<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<Diagnostic> {
        self.recorded.borrow().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.recorded.borrow_mut().push(diagnostic.clone());
    }
}
