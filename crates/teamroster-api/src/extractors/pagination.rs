//! Paging query parameters.

use serde::{Deserialize, Serialize};
use validator::Validate;

use teamroster_core::config::PagingConfig;
use teamroster_core::error::AppError;
use teamroster_core::query::OrderSpecifier;
use teamroster_core::result::AppResult;
use teamroster_core::types::PageRequest;

use crate::error::validation_error;

use super::sort::parse_sort;

/// Query parameters for paged endpoints: `page` (0-based), `size`, `sort`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PageParams {
    /// Page number, 0-based. Defaults to the first page.
    #[validate(range(min = 0, message = "must not be negative"))]
    pub page: Option<i64>,
    /// Rows per page. Defaults to the configured page size.
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub size: Option<i64>,
    /// `field[,asc|desc]`, several terms separated by `;`.
    pub sort: Option<String>,
}

impl PageParams {
    /// Validates the parameters and converts them to a `PageRequest`.
    ///
    /// Sizes above `paging.max_page_size` are rejected rather than clamped.
    pub fn to_page_request(&self, config: &PagingConfig) -> AppResult<PageRequest> {
        self.validate().map_err(validation_error)?;

        let size = match self.size {
            Some(size) => size,
            None => i64::try_from(config.default_page_size)
                .map_err(|_| AppError::configuration("paging.default_page_size is too large"))?,
        };
        if u64::try_from(size).is_ok_and(|s| s > config.max_page_size) {
            return Err(AppError::validation(format!(
                "size: must not exceed {}",
                config.max_page_size
            )));
        }

        PageRequest::of_page(self.page.unwrap_or(0), size)
    }

    /// Parsed `sort` terms, empty when absent.
    pub fn order(&self) -> AppResult<Vec<OrderSpecifier>> {
        match self.sort.as_deref() {
            Some(sort) => parse_sort(sort),
            None => Ok(Vec::new()),
        }
    }
}
