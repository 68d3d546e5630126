//! # teamroster-database
//!
//! Storage backends for TeamRoster: PostgreSQL connection management,
//! embedded migrations, rendering of query expressions through
//! `sqlx::QueryBuilder`, the PostgreSQL repositories, and an in-memory
//! store implementing the same storage port.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod seed;
pub mod sql;

pub use connection::DatabasePool;
pub use repositories::{InMemoryStore, MemberRepository, TeamRepository};
