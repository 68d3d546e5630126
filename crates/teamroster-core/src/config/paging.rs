//! Page size defaults and limits for paginated endpoints.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default page size when the caller does not send one.
const DEFAULT_PAGE_SIZE: u64 = 20;
/// Largest page size a caller may request.
const MAX_PAGE_SIZE: u64 = 2000;

/// Pagination configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Page size used when the request omits `size`.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Requests above this size are rejected.
    #[serde(default = "max_page_size")]
    pub max_page_size: u64,
}

impl PagingConfig {
    /// Reject a zero default or a default above the maximum.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.default_page_size == 0 {
            return Err(AppError::configuration(
                "paging.default_page_size must be greater than zero",
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(AppError::configuration(format!(
                "paging.default_page_size ({}) exceeds paging.max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn max_page_size() -> u64 {
    MAX_PAGE_SIZE
}
