use thiserror::Error;

use crate::domain::user::models::UserId;

/// Error type for CategoryName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryNameError {
    #[error("Category name is empty")]
    Empty,

    #[error("Category name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all category-related operations
#[derive(Debug, Clone, Error)]
pub enum CategoryError {
    #[error("Invalid category name: {0}")]
    InvalidName(#[from] CategoryNameError),

    #[error("Category not found: {0}")]
    NotFound(String),

    #[error("Category with that name already exists: {0}")]
    AlreadyExists(String),

    #[error("Owning user not found: {0}")]
    OwnerNotFound(UserId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
