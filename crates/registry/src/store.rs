//! Registry trait.

use crate::error::RegistryResult;
use async_trait::async_trait;
use filecat_core::{FileFilter, FileId, FileRecord, NewFile};

/// Keyed registry of file records.
///
/// Implementations enforce that no two live records share the same
/// `(file_name, hash)` pair and assign strictly increasing ids.
/// Returned records are owned copies.
#[async_trait]
pub trait FileRegistry: Send + Sync {
    /// Get a record by id.
    async fn get(&self, id: FileId) -> Option<FileRecord>;

    /// Get every live record. Empty when the registry holds none.
    async fn get_all(&self) -> Vec<FileRecord>;

    /// Get the records matching every criterion set in `filter`.
    async fn find(&self, filter: &FileFilter) -> Vec<FileRecord>;

    /// Insert a new record and return it with its assigned id.
    async fn add(&self, file: NewFile) -> RegistryResult<FileRecord>;

    /// Replace the record with the same id.
    async fn update(&self, record: FileRecord) -> RegistryResult<FileRecord>;

    /// Remove a record. No-op when the id is not live.
    async fn delete(&self, id: FileId);

    /// Number of live records.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
