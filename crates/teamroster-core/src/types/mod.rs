//! Core type definitions used across the TeamRoster workspace.

pub mod id;
pub mod pagination;

pub use id::*;
pub use pagination::{Bounds, Page, PageRequest};
