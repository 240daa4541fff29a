//! Error types for imcredit-core

use thiserror::Error;

/// Result type alias for imcredit operations
pub type Result<T> = std::result::Result<T, CreditError>;

/// Main error type for imcredit operations
#[derive(Error, Debug)]
pub enum CreditError {
    /// Input rejected before reaching the store (missing names, no roles, ...)
    #[error("{0}")]
    Validation(String),

    /// Unknown project or author
    #[error("{0} not found")]
    NotFound(String),

    /// Reorder requested past the first or last position
    #[error("Cannot move further")]
    Boundary,

    /// Storage or network failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CreditError {
    pub fn validation(message: impl Into<String>) -> Self {
        CreditError::Validation(message.into())
    }

    pub fn project_not_found() -> Self {
        CreditError::NotFound("Project".to_string())
    }

    pub fn author_not_found() -> Self {
        CreditError::NotFound("Author".to_string())
    }

    /// True for failures the user can fix by changing the request.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, CreditError::Storage(_))
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for CreditError {
    fn from(err: rusqlite::Error) -> Self {
        CreditError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CreditError {
    fn from(err: serde_json::Error) -> Self {
        CreditError::Storage(format!("serialization: {}", err))
    }
}
