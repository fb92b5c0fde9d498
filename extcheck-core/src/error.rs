use extcheck_model::ModelError;
use thiserror::Error;

use crate::domain::extensions::validator::ValidationError;

/// Failures raised by a storage adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The name is already held by another record (unique constraint).
    #[error("extension name already taken: {0}")]
    Duplicate(String),

    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt extension row: {0}")]
    Corrupt(#[from] ModelError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Error taxonomy of the extension manager.
///
/// Every variant except [`ExtensionError::Storage`] is a terminal, client
/// facing business outcome with a stable [`code`](ExtensionError::code).
#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("This extension is already registered.")]
    AlreadyExists,

    #[error("Extension not found.")]
    NotFound,

    #[error("At most {limit} custom extensions can be registered.")]
    MaxLimitExceeded { limit: u64 },

    #[error(
        "This extension is registered as a fixed extension and cannot be used."
    )]
    FixedExtensionConflict,

    #[error(transparent)]
    Storage(StoreError),
}

impl ExtensionError {
    /// Stable machine-readable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            ExtensionError::Invalid(err) => err.code(),
            ExtensionError::AlreadyExists => "EXT_005",
            ExtensionError::NotFound => "EXT_006",
            ExtensionError::MaxLimitExceeded { .. } => "EXT_007",
            ExtensionError::FixedExtensionConflict => "EXT_008",
            ExtensionError::Storage(_) => "INTERNAL_ERROR",
        }
    }
}

// A unique violation means another writer won the race for the name.
impl From<StoreError> for ExtensionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => ExtensionError::AlreadyExists,
            other => ExtensionError::Storage(other),
        }
    }
}
