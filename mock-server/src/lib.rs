use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Status {
    pub id: u32,
    pub name: String,
    pub abbrev: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Mission {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub mission_type: String,
}

/// A launch in detail shape.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Launch {
    pub id: String,
    pub name: String,
    pub status: Status,
    pub window_start: String,
    pub window_end: String,
    pub mission: Option<Mission>,
    pub image: Option<String>,
}

/// A launch in `mode=list` shape: `mission` collapses to its name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LaunchListItem {
    pub id: String,
    pub name: String,
    pub status: Status,
    pub mission: Option<String>,
}

impl From<&Launch> for LaunchListItem {
    fn from(launch: &Launch) -> Self {
        Self {
            id: launch.id.clone(),
            name: launch.name.clone(),
            status: launch.status.clone(),
            mission: launch.mission.as_ref().map(|m| m.name.clone()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    fn new(results: Vec<T>) -> Self {
        Self {
            count: results.len(),
            next: None,
            previous: None,
            results,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LaunchQuery {
    pub search: Option<String>,
    pub mode: Option<String>,
    pub id: Option<String>,
}

/// Behaviour knobs for tests: delay every response, or answer every request
/// with a fixed status.
#[derive(Clone, Debug, Default)]
pub struct MockConfig {
    pub latency: Option<Duration>,
    pub fail_with: Option<u16>,
}

pub type Db = Arc<Vec<Launch>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    config: MockConfig,
}

pub fn app() -> Router {
    app_with(seed(), MockConfig::default())
}

pub fn app_with(launches: Vec<Launch>, config: MockConfig) -> Router {
    let state = AppState {
        db: Arc::new(launches),
        config,
    };
    Router::new().route("/launch", get(list_launches)).with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(
    listener: TcpListener,
    launches: Vec<Launch>,
    config: MockConfig,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(launches, config)).await
}

async fn list_launches(State(state): State<AppState>, Query(query): Query<LaunchQuery>) -> Response {
    tracing::info!(search = ?query.search, mode = ?query.mode, id = ?query.id, "GET /launch");

    if let Some(latency) = state.config.latency {
        tokio::time::sleep(latency).await;
    }
    if let Some(code) = state.config.fail_with {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, "forced failure").into_response();
    }

    let db = &state.db;

    if let Some(id) = &query.id {
        let found: Vec<Launch> = db.iter().filter(|l| &l.id == id).cloned().collect();
        return Json(Page::new(found)).into_response();
    }

    let needle = query.search.as_deref().unwrap_or("").to_lowercase();
    let matched: Vec<&Launch> = db
        .iter()
        .filter(|l| l.name.to_lowercase().contains(&needle))
        .collect();

    if query.mode.as_deref() == Some("list") {
        let items: Vec<LaunchListItem> = matched.into_iter().map(LaunchListItem::from).collect();
        Json(Page::new(items)).into_response()
    } else {
        let items: Vec<Launch> = matched.into_iter().cloned().collect();
        Json(Page::new(items)).into_response()
    }
}

fn status(id: u32, name: &str, abbrev: &str, description: &str) -> Status {
    Status {
        id,
        name: name.to_string(),
        abbrev: abbrev.to_string(),
        description: description.to_string(),
    }
}

/// Fixed launches the default app serves, in response order.
pub fn seed() -> Vec<Launch> {
    let success = status(3, "Launch Successful", "Success", "The launch vehicle successfully inserted its payload(s) into the target orbit(s).");
    vec![
        Launch {
            id: "e3df2ecd-c239-472f-95e4-2b89b4f75800".to_string(),
            name: "Falcon Heavy | Demo Flight".to_string(),
            status: success.clone(),
            window_start: "2018-02-06T20:45:00Z".to_string(),
            window_end: "2018-02-06T23:05:00Z".to_string(),
            mission: Some(Mission {
                name: "Demo Flight".to_string(),
                description: "Maiden flight of Falcon Heavy carrying a Tesla Roadster.".to_string(),
                mission_type: "Test Flight".to_string(),
            }),
            image: Some("https://example.test/falcon-heavy.jpg".to_string()),
        },
        Launch {
            id: "f059fcbb-5d3b-4e0b-a8b2-4b7ae1aa4a6b".to_string(),
            name: "Falcon 9 Block 5 | Starlink Group 6-1".to_string(),
            status: status(1, "Go for Launch", "Go", "Current T-0 confirmed by official or reliable sources."),
            window_start: "2023-12-29T01:01:00Z".to_string(),
            window_end: "2023-12-29T05:01:00Z".to_string(),
            mission: Some(Mission {
                name: "Starlink Group 6-1".to_string(),
                description: "A batch of satellites for the Starlink mega-constellation.".to_string(),
                mission_type: "Communications".to_string(),
            }),
            image: None,
        },
        Launch {
            id: "2ee9bd6a-3aa5-4cf0-9c0c-1d6b6a0d8b4e".to_string(),
            name: "Ariane 5 ECA | JWST".to_string(),
            status: success,
            window_start: "2021-12-25T12:20:00Z".to_string(),
            window_end: "2021-12-25T12:52:00Z".to_string(),
            mission: None,
            image: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_item_collapses_mission_to_name() {
        let launch = &seed()[0];
        let item = LaunchListItem::from(launch);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["mission"], "Demo Flight");
        assert_eq!(json["status"]["abbrev"], "Success");
    }

    #[test]
    fn list_item_without_mission_is_null() {
        let item = LaunchListItem::from(&seed()[2]);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json["mission"].is_null());
    }

    #[test]
    fn mission_type_is_renamed() {
        let json = serde_json::to_value(&seed()[0]).unwrap();
        assert_eq!(json["mission"]["type"], "Test Flight");
    }

    #[test]
    fn page_counts_results() {
        let page = Page::new(vec![1, 2, 3]);
        assert_eq!(page.count, 3);
        assert!(page.next.is_none());
    }

    #[test]
    fn seed_ids_are_unique() {
        let launches = seed();
        let mut ids: Vec<&str> = launches.iter().map(|l| l.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), launches.len());
    }
}
