//! Member search and maintenance services.

pub mod admin;
pub mod predicate;
pub mod search;

pub use admin::MemberAdminService;
pub use predicate::condition_predicate;
pub use search::MemberSearchService;
