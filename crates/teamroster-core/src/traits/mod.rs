//! Storage port traits defined in `teamroster-core` and implemented by the
//! database crate.

pub mod repository;

pub use repository::{BulkMutator, ProjectionSource, Repository};
