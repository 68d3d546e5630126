//! Embedded schema migrations for the `team` and `member` tables.

use sqlx::migrate::Migrator;
use tracing::info;

use teamroster_core::error::{AppError, ErrorKind};
use teamroster_core::result::AppResult;

use crate::connection::DatabasePool;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every migration the database has not seen yet.
pub async fn run_migrations(db: &DatabasePool) -> AppResult<()> {
    info!(
        available = MIGRATOR.iter().count(),
        "Applying schema migrations"
    );

    MIGRATOR.run(db.pool()).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Schema migration failed: {e}"),
            e,
        )
    })?;

    info!("Schema is up to date");
    Ok(())
}
