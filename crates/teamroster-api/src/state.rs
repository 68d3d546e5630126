//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use teamroster_core::config::AppConfig;
use teamroster_database::DatabasePool;
use teamroster_service::MemberSearchService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Member search over the configured storage backend
    pub member_search: Arc<MemberSearchService>,
    /// PostgreSQL pool, when that backend is in use
    pub database: Option<DatabasePool>,
    /// When the state was built, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Assemble the state from its parts.
    pub fn new(config: AppConfig, member_search: MemberSearchService) -> Self {
        Self {
            config: Arc::new(config),
            member_search: Arc::new(member_search),
            database: None,
            started_at: Instant::now(),
        }
    }

    /// Attach the PostgreSQL pool so health checks can reach it.
    pub fn with_database(mut self, database: DatabasePool) -> Self {
        self.database = Some(database);
        self
    }
}
