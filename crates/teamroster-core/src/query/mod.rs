//! Typed query expressions.
//!
//! Columns are referenced through typed paths ([`StringPath`],
//! [`NumberPath`]) that only offer the comparisons valid for their type.
//! Paths produce [`Predicate`] trees, [`OrderSpecifier`]s and bulk
//! [`Assignment`]s. The tree is storage-neutral: the database crate renders
//! it to parameterized SQL and the in-memory store evaluates it directly
//! against a [`Record`].
//!
//! The [`paging`] module holds the paginated query executor.

pub mod assignment;
pub mod order;
pub mod paging;
pub mod path;
pub mod predicate;
pub mod value;

pub use assignment::Assignment;
pub use order::{NullOrdering, OrderSpecifier, SortDirection};
pub use paging::{paginate, short_circuit_total};
pub use path::{Column, NumberPath, StringPath};
pub use predicate::{CompareOp, Predicate, Record};
pub use value::Value;
