//! Query-string extractors.

pub mod pagination;
pub mod sort;

pub use pagination::PageParams;
pub use sort::parse_sort;
