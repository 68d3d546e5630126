//! Convenience result type alias for TeamRoster.

use crate::error::AppError;

/// A specialized `Result` type for TeamRoster operations.
pub type AppResult<T> = Result<T, AppError>;
