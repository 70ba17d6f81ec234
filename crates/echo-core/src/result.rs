//! Convenience result type alias for Vocal Echo.

use crate::error::AppError;

/// A specialized `Result` type for Vocal Echo operations.
pub type AppResult<T> = Result<T, AppError>;
