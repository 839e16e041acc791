//! Convenience result type alias for LeaseHub.

use crate::error::AppError;

/// A specialized `Result` type for LeaseHub operations.
pub type AppResult<T> = Result<T, AppError>;
