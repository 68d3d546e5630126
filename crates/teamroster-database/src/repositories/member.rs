//! Member repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use teamroster_core::query::{Assignment, OrderSpecifier, Predicate};
use teamroster_core::result::AppResult;
use teamroster_core::traits::{BulkMutator, ProjectionSource, Repository};
use teamroster_core::types::{Bounds, MemberId};
use teamroster_entity::{Member, MemberTeamDto};

use super::db_error;
use crate::sql;

/// PostgreSQL-backed member storage.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All members with exactly this username, by id.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Vec<Member>> {
        sqlx::query_as::<_, Member>(
            "SELECT id, username, age, team_id FROM member WHERE username = $1 ORDER BY id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to find members by username"))
    }
}

#[async_trait]
impl Repository<Member, MemberId> for MemberRepository {
    async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>("SELECT id, username, age, team_id FROM member WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find member"))
    }

    async fn save(&self, member: Member) -> AppResult<Member> {
        if !member.id.is_assigned() {
            return sqlx::query_as::<_, Member>(
                "INSERT INTO member (username, age, team_id) VALUES ($1, $2, $3) \
                 RETURNING id, username, age, team_id",
            )
            .bind(&member.username)
            .bind(member.age)
            .bind(member.team_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to insert member"));
        }

        sqlx::query_as::<_, Member>(
            "UPDATE member SET username = $2, age = $3, team_id = $4 WHERE id = $1 \
             RETURNING id, username, age, team_id",
        )
        .bind(member.id)
        .bind(&member.username)
        .bind(member.age)
        .bind(member.team_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to update member"))
    }

    async fn delete(&self, id: MemberId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM member WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete member"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count members"))?;
        Ok(total as u64)
    }
}

#[async_trait]
impl ProjectionSource<MemberTeamDto> for MemberRepository {
    async fn fetch(
        &self,
        predicate: &Predicate,
        order: &[OrderSpecifier],
        bounds: Option<Bounds>,
    ) -> AppResult<Vec<MemberTeamDto>> {
        let mut qb = sql::member_team_query(predicate, order, bounds);
        debug!(sql = qb.sql(), "Fetching member/team rows");
        qb.build_query_as::<MemberTeamDto>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to fetch member/team rows"))
    }

    async fn count_matching(&self, predicate: &Predicate) -> AppResult<u64> {
        let mut qb = sql::member_team_count(predicate);
        debug!(sql = qb.sql(), "Counting member/team rows");
        let total: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count member/team rows"))?;
        Ok(total as u64)
    }
}

#[async_trait]
impl BulkMutator for MemberRepository {
    async fn update_where(
        &self,
        assignments: &[Assignment],
        predicate: &Predicate,
    ) -> AppResult<u64> {
        let mut qb = sql::member_update(assignments, predicate)?;
        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(db_error("Bulk member update failed"))?;
        Ok(result.rows_affected())
    }

    async fn delete_where(&self, predicate: &Predicate) -> AppResult<u64> {
        let mut qb = sql::member_delete(predicate)?;
        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(db_error("Bulk member delete failed"))?;
        Ok(result.rows_affected())
    }
}
