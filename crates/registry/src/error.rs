//! Registry error types.

use filecat_core::FileId;
use thiserror::Error;

/// Registry operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The write would give two live records the same file name and hash.
    #[error("duplicate file: '{hash}' from '{file_name}'")]
    Duplicate { file_name: String, hash: String },

    /// Update referenced an id with no live record.
    #[error("file not found: {0}")]
    NotFound(FileId),

    /// Every representable id has been issued.
    #[error("file ids exhausted")]
    IdsExhausted,
}

/// Result type for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
