//! Error handling module for the menu store.
//!
//! Provides the error type shared by the tree store and the persistence adapter.

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INVALID_PARENT: &str = "INVALID_PARENT";
    pub const CORRUPT_STATE: &str = "CORRUPT_STATE";
    pub const DUPLICATE_SEED: &str = "DUPLICATE_SEED";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
}

/// Store error type.
#[derive(Debug)]
pub enum StoreError {
    /// Referenced menu or menu item does not exist
    NotFound(String),
    /// An insert named a parent id absent from the target forest
    InvalidParent(String),
    /// Persisted snapshot failed to parse, failed date revival, or violates
    /// a structural invariant
    CorruptState(String),
    /// Seeding attempted while the collection already has content
    DuplicateSeed(String),
    /// Database error
    Database(String),
}

impl StoreError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => codes::NOT_FOUND,
            StoreError::InvalidParent(_) => codes::INVALID_PARENT,
            StoreError::CorruptState(_) => codes::CORRUPT_STATE,
            StoreError::DuplicateSeed(_) => codes::DUPLICATE_SEED,
            StoreError::Database(_) => codes::DATABASE_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        match self {
            StoreError::NotFound(msg)
            | StoreError::InvalidParent(msg)
            | StoreError::CorruptState(msg)
            | StoreError::DuplicateSeed(msg)
            | StoreError::Database(msg) => msg,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        StoreError::Database(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Snapshot JSON error: {:?}", err);
        StoreError::CorruptState(format!("Snapshot JSON error: {}", err))
    }
}
