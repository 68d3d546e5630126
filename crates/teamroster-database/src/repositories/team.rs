//! Team repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use teamroster_core::result::AppResult;
use teamroster_core::traits::Repository;
use teamroster_core::types::TeamId;
use teamroster_entity::Team;

use super::db_error;

/// PostgreSQL-backed team storage.
#[derive(Debug, Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    /// Create a new team repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Teams with exactly this name, by id.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Vec<Team>> {
        sqlx::query_as::<_, Team>("SELECT id, name FROM team WHERE name = $1 ORDER BY id")
            .bind(name)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to find teams by name"))
    }
}

#[async_trait]
impl Repository<Team, TeamId> for TeamRepository {
    async fn find_by_id(&self, id: TeamId) -> AppResult<Option<Team>> {
        sqlx::query_as::<_, Team>("SELECT id, name FROM team WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find team"))
    }

    async fn save(&self, team: Team) -> AppResult<Team> {
        if !team.id.is_assigned() {
            return sqlx::query_as::<_, Team>(
                "INSERT INTO team (name) VALUES ($1) RETURNING id, name",
            )
            .bind(&team.name)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to insert team"));
        }

        sqlx::query_as::<_, Team>("UPDATE team SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(team.id)
            .bind(&team.name)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to update team"))
    }

    async fn delete(&self, id: TeamId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM team WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete team"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count teams"))?;
        Ok(total as u64)
    }
}
