//! Set-based member maintenance.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use teamroster_core::error::AppError;
use teamroster_core::query::Predicate;
use teamroster_core::result::AppResult;
use teamroster_core::traits::BulkMutator;
use teamroster_entity::QMember;

/// Bulk updates and deletes over the member table.
///
/// These run as single statements against storage and never load the
/// affected members.
#[derive(Clone)]
pub struct MemberAdminService {
    mutator: Arc<dyn BulkMutator>,
}

impl fmt::Debug for MemberAdminService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberAdminService").finish_non_exhaustive()
    }
}

impl MemberAdminService {
    /// Creates a new admin service.
    pub fn new(mutator: Arc<dyn BulkMutator>) -> Self {
        Self { mutator }
    }

    /// Set the username of every member younger than `age` to `username`.
    pub async fn rename_younger_than(&self, age: i32, username: &str) -> AppResult<u64> {
        if username.trim().is_empty() {
            return Err(AppError::validation("Username cannot be blank"));
        }
        let updated = self
            .mutator
            .update_where(&[QMember::USERNAME.set(username)], &QMember::AGE.lt(age))
            .await?;
        info!(age, updated, "Renamed members younger than threshold");
        Ok(updated)
    }

    /// Add `delta` to every member's age.
    pub async fn add_age(&self, delta: i32) -> AppResult<u64> {
        let updated = self
            .mutator
            .update_where(&[QMember::AGE.add(delta)], &Predicate::match_all())
            .await?;
        info!(delta, updated, "Adjusted member ages");
        Ok(updated)
    }

    /// Delete every member older than `age`.
    pub async fn delete_older_than(&self, age: i32) -> AppResult<u64> {
        let deleted = self.mutator.delete_where(&QMember::AGE.gt(age)).await?;
        info!(age, deleted, "Deleted members older than threshold");
        Ok(deleted)
    }
}
