//! # teamroster-core
//!
//! Core crate for TeamRoster. Contains the unified error system,
//! configuration schemas, typed identifiers, the typed query expression
//! model (paths, predicates, ordering, bulk assignments), pagination types
//! with the paginated query executor, and the storage port traits.
//!
//! This crate has **no** internal dependencies on other TeamRoster crates.

pub mod config;
pub mod error;
pub mod query;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
