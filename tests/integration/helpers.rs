//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use teamroster_api::{AppState, build_app};
use teamroster_core::config::AppConfig;
use teamroster_core::traits::Repository;
use teamroster_database::{DatabasePool, InMemoryStore};
use teamroster_database::seed::seed_sample_data;
use teamroster_entity::{Member, Team};
use teamroster_service::MemberSearchService;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for direct inserts and query statistics
    pub store: InMemoryStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// App over the sample data: teamA (member1 10, member2 20) and
    /// teamB (member3 30, member4 40).
    pub async fn new() -> Self {
        let app = Self::empty();
        seed_sample_data(&app.store.teams(), &app.store.members())
            .await
            .expect("Failed to seed sample data");
        app.store.reset_stats();
        app
    }

    /// App over an empty store.
    pub fn empty() -> Self {
        Self::build(None)
    }

    /// App over an empty store that reports on `database` in health checks.
    pub fn with_database(database: DatabasePool) -> Self {
        Self::build(Some(database))
    }

    fn build(database: Option<DatabasePool>) -> Self {
        let config = AppConfig::default();
        let store = InMemoryStore::new();
        let search = MemberSearchService::new(Arc::new(store.members()));
        let mut state = AppState::new(config.clone(), search);
        if let Some(database) = database {
            state = state.with_database(database);
        }
        let router = build_app(state);

        Self {
            router,
            store,
            config,
        }
    }

    /// Insert a team directly into the store.
    pub async fn insert_team(&self, name: &str) -> Team {
        self.store
            .teams()
            .save(Team::new(name))
            .await
            .expect("Failed to insert team")
    }

    /// Insert a member directly into the store.
    pub async fn insert_member(&self, username: &str, age: i32, team: Option<&Team>) -> Member {
        let member = match team {
            Some(team) => Member::new(username, age).with_team(team),
            None => Member::new(username, age),
        };
        self.store
            .members()
            .save(member)
            .await
            .expect("Failed to insert member")
    }

    /// Send a GET request and parse the JSON response.
    pub async fn get(&self, path: &str) -> TestResponse {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// `username` of every row, from an array body or a page's `content`.
    pub fn usernames(&self) -> Vec<String> {
        let rows = self
            .body
            .get("content")
            .unwrap_or(&self.body)
            .as_array()
            .cloned()
            .unwrap_or_default();
        rows.iter()
            .filter_map(|row| row["username"].as_str().map(str::to_string))
            .collect()
    }
}
