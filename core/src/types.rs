//! Domain types for the launch API.
//!
//! # Design
//! These mirror the subset of the remote schema the client reads. Unknown
//! fields are ignored. In list mode the API sends `mission` as a bare string,
//! in detail mode as an object, so `LaunchSummary` accepts either.

use serde::{Deserialize, Deserializer, Serialize};

/// A trimmed, non-empty search string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Returns `None` when `text` is empty after trimming.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Launch status. `abbrev` is the short status code (e.g. `"Go"`, `"TBD"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchStatus {
    pub id: Option<u32>,
    pub name: String,
    pub abbrev: Option<String>,
    pub description: Option<String>,
}

/// One entry of a search result list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchSummary {
    pub id: String,
    pub name: String,
    pub status: LaunchStatus,
    #[serde(default, deserialize_with = "mission_name")]
    pub mission: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mission {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub mission_type: Option<String>,
}

/// A single launch as returned by the detail fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchDetail {
    pub id: String,
    pub name: String,
    pub status: LaunchStatus,
    pub window_start: Option<String>,
    pub window_end: Option<String>,
    pub mission: Option<Mission>,
    pub image: Option<String>,
}

/// Result of a remote fetch as seen by the rest of the application.
///
/// Carries no error payload: the failure has already been reported through
/// the client's `DiagnosticSink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    Ok(T),
    Failed,
}

impl<T> FetchOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, FetchOutcome::Ok(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            FetchOutcome::Ok(value) => Some(value),
            FetchOutcome::Failed => None,
        }
    }

    pub fn as_ref(&self) -> FetchOutcome<&T> {
        match self {
            FetchOutcome::Ok(value) => FetchOutcome::Ok(value),
            FetchOutcome::Failed => FetchOutcome::Failed,
        }
    }
}

/// The `{ "results": [...] }` envelope shared by both endpoints. `count`,
/// `next` and `previous` are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct ResultsEnvelope<T> {
    pub results: Option<Vec<T>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MissionField {
    Name(String),
    Object { name: String },
}

fn mission_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<MissionField>::deserialize(deserializer)?;
    Ok(field.map(|m| match m {
        MissionField::Name(name) => name,
        MissionField::Object { name } => name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_trimmed() {
        let query = SearchQuery::new("  falcon \n").unwrap();
        assert_eq!(query.as_str(), "falcon");
    }

    #[test]
    fn blank_query_is_rejected() {
        assert!(SearchQuery::new("").is_none());
        assert!(SearchQuery::new("   \t").is_none());
    }

    #[test]
    fn summary_accepts_mission_as_string() {
        let summary: LaunchSummary = serde_json::from_str(
            r#"{"id":"1","name":"Falcon Heavy","status":{"name":"Go"},"mission":"Test"}"#,
        )
        .unwrap();
        assert_eq!(summary.mission.as_deref(), Some("Test"));
        assert_eq!(summary.status.name, "Go");
        assert!(summary.status.abbrev.is_none());
    }

    #[test]
    fn summary_accepts_mission_as_object_or_null() {
        let summary: LaunchSummary = serde_json::from_str(
            r#"{"id":"1","name":"X","status":{"id":1,"name":"Go","abbrev":"Go"},"mission":{"name":"Demo","description":"d"}}"#,
        )
        .unwrap();
        assert_eq!(summary.mission.as_deref(), Some("Demo"));

        let summary: LaunchSummary =
            serde_json::from_str(r#"{"id":"1","name":"X","status":{"name":"TBD"},"mission":null}"#).unwrap();
        assert!(summary.mission.is_none());

        let summary: LaunchSummary =
            serde_json::from_str(r#"{"id":"1","name":"X","status":{"name":"TBD"}}"#).unwrap();
        assert!(summary.mission.is_none());
    }

    #[test]
    fn detail_reads_optional_fields() {
        let detail: LaunchDetail = serde_json::from_str(
            r#"{
                "id":"42","name":"Ariane 5 | JWST",
                "status":{"id":3,"name":"Launch Successful","abbrev":"Success"},
                "window_start":"2021-12-25T12:20:00Z","window_end":"2021-12-25T12:52:00Z",
                "mission":{"name":"JWST","description":"Space telescope","type":"Astrophysics"},
                "image":"https://example.test/jwst.png"
            }"#,
        )
        .unwrap();
        let mission = detail.mission.as_ref().unwrap();
        assert_eq!(mission.name, "JWST");
        assert_eq!(mission.mission_type.as_deref(), Some("Astrophysics"));
        assert_eq!(detail.status.abbrev.as_deref(), Some("Success"));
        assert_eq!(detail.window_end.as_deref(), Some("2021-12-25T12:52:00Z"));
    }

    #[test]
    fn outcome_accessors() {
        let ok: FetchOutcome<u8> = FetchOutcome::Ok(3);
        assert!(ok.is_ok());
        assert_eq!(ok.as_ref(), FetchOutcome::Ok(&3));
        assert_eq!(ok.ok(), Some(3));

        let failed: FetchOutcome<u8> = FetchOutcome::Failed;
        assert!(!failed.is_ok());
        assert_eq!(failed.ok(), None);
    }
}
