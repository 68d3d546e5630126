//! # teamroster-service
//!
//! Business logic for TeamRoster. The search service turns optional search
//! fields into one predicate and runs it through the paginated executor;
//! the admin service runs set-based bulk updates.
//!
//! Services follow constructor injection: the storage port they need is
//! provided at construction time as an `Arc<dyn ...>`, so either backend
//! can sit behind them.

pub mod member;

pub use member::{MemberAdminService, MemberSearchService};
