//! Storage port implementations: PostgreSQL repositories and the
//! in-memory store.

pub mod member;
pub mod memory;
pub mod team;

pub use member::MemberRepository;
pub use memory::{InMemoryStore, MemoryMemberRepository, MemoryTeamRepository, QueryStats};
pub use team::TeamRepository;

use teamroster_core::error::AppError;

/// Map a sqlx error through the shared classification, prefixing context.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let mut err = AppError::from(e);
        err.message = format!("{context}: {}", err.message);
        err
    }
}
