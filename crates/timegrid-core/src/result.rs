//! Result alias for the unified error type.

use crate::error::AppError;

/// Result alias used across all TimeGrid crates.
pub type AppResult<T> = Result<T, AppError>;
