//! Storage port: the operations the search and admin services need from
//! whatever backs the member and team tables.

use async_trait::async_trait;

use crate::error::AppError;
use crate::query::{Assignment, OrderSpecifier, Predicate};
use crate::result::AppResult;
use crate::types::Bounds;

/// Generic CRUD repository trait.
///
/// Entity-specific lookups (by username, by team name) are defined on the
/// concrete repository structs.
#[async_trait]
pub trait Repository<Entity, Id>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
    Id: Send + Sync + 'static,
{
    /// Find an entity by its primary key.
    async fn find_by_id(&self, id: Id) -> AppResult<Option<Entity>>;

    /// Insert an entity with an unassigned id, or update it otherwise.
    /// Returns the stored entity with its id assigned.
    async fn save(&self, entity: Entity) -> AppResult<Entity>;

    /// Delete an entity by its primary key. Returns `true` if deleted.
    async fn delete(&self, id: Id) -> AppResult<bool>;

    /// Count total entities.
    async fn count(&self) -> AppResult<u64>;
}

/// Filtered, ordered, bounded reads producing `Row`s.
///
/// The same predicate passed to [`fetch`](Self::fetch) and
/// [`count_matching`](Self::count_matching) must select the same rows.
#[async_trait]
pub trait ProjectionSource<Row>: Send + Sync + 'static
where
    Row: Send + 'static,
{
    /// Fetch matching rows in `order`, then by id, within `bounds`.
    async fn fetch(
        &self,
        predicate: &Predicate,
        order: &[OrderSpecifier],
        bounds: Option<Bounds>,
    ) -> AppResult<Vec<Row>>;

    /// Count all rows matching `predicate`.
    async fn count_matching(&self, predicate: &Predicate) -> AppResult<u64>;

    /// Fetch the single matching row.
    ///
    /// `Ok(None)` when nothing matches; a `NonUniqueResult` error when more
    /// than one row does.
    async fn fetch_one(&self, predicate: &Predicate) -> AppResult<Option<Row>> {
        let mut rows = self.fetch(predicate, &[], Some(Bounds::limit(2))).await?;
        if rows.len() > 1 {
            return Err(AppError::non_unique_result(
                "Query expected at most one result but matched several",
            ));
        }
        Ok(rows.pop())
    }

    /// Fetch the first matching row in `order`, if any.
    async fn fetch_first(
        &self,
        predicate: &Predicate,
        order: &[OrderSpecifier],
    ) -> AppResult<Option<Row>> {
        let mut rows = self.fetch(predicate, order, Some(Bounds::limit(1))).await?;
        Ok(rows.pop())
    }
}

/// Set-based writes that bypass per-entity loading.
#[async_trait]
pub trait BulkMutator: Send + Sync + 'static {
    /// Apply `assignments` to every member matching `predicate`.
    /// Returns the number of rows updated.
    async fn update_where(
        &self,
        assignments: &[Assignment],
        predicate: &Predicate,
    ) -> AppResult<u64>;

    /// Delete every member matching `predicate`. Returns the number removed.
    async fn delete_where(&self, predicate: &Predicate) -> AppResult<u64>;
}
