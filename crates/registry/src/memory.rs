//! In-memory registry implementation.

use crate::error::{RegistryError, RegistryResult};
use crate::store::FileRegistry;
use async_trait::async_trait;
use filecat_core::{FileFilter, FileId, FileRecord, NewFile};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

/// State guarded by the registry lock.
#[derive(Default)]
struct Inner {
    /// Live records keyed by id.
    files: BTreeMap<FileId, FileRecord>,
    /// Secondary index: (file_name, hash) -> owning id.
    by_name_hash: HashMap<(String, String), FileId>,
    /// Last assigned id. Never decremented.
    last_id: Option<FileId>,
}

impl Inner {
    /// Id of the live record owning the pair, if any.
    fn owner_of(&self, file_name: &str, hash: &str) -> Option<FileId> {
        // Tuple keys can't be borrowed as (&str, &str), so build the key.
        self.by_name_hash
            .get(&(file_name.to_string(), hash.to_string()))
            .copied()
    }

    fn next_id(&mut self) -> RegistryResult<FileId> {
        let id = match self.last_id {
            None => FileId::FIRST,
            Some(last) => last.next().ok_or(RegistryError::IdsExhausted)?,
        };
        self.last_id = Some(id);
        Ok(id)
    }
}

/// Thread-safe in-memory registry.
///
/// Reads share a read lock; every write runs its uniqueness check and the
/// mutation depending on it under one write lock.
#[derive(Default)]
pub struct MemoryRegistry {
    inner: RwLock<Inner>,
}

impl MemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRegistry for MemoryRegistry {
    async fn get(&self, id: FileId) -> Option<FileRecord> {
        self.inner.read().await.files.get(&id).cloned()
    }

    async fn get_all(&self) -> Vec<FileRecord> {
        self.inner.read().await.files.values().cloned().collect()
    }

    async fn find(&self, filter: &FileFilter) -> Vec<FileRecord> {
        let inner = self.inner.read().await;
        inner
            .files
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect()
    }

    async fn add(&self, file: NewFile) -> RegistryResult<FileRecord> {
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.owner_of(&file.file_name, &file.hash) {
            tracing::debug!(
                existing_id = %existing,
                filename = %file.file_name,
                hash = %file.hash,
                "Rejected duplicate add"
            );
            return Err(RegistryError::Duplicate {
                file_name: file.file_name,
                hash: file.hash,
            });
        }

        let id = inner.next_id()?;
        let record = FileRecord::with_fields(id, file);
        inner.by_name_hash.insert(
            (record.file_name.clone(), record.hash.clone()),
            record.id,
        );
        inner.files.insert(id, record.clone());

        tracing::debug!(file_id = %id, filename = %record.file_name, "Added file");
        Ok(record)
    }

    async fn update(&self, record: FileRecord) -> RegistryResult<FileRecord> {
        let mut inner = self.inner.write().await;

        let Some(current) = inner.files.get(&record.id) else {
            return Err(RegistryError::NotFound(record.id));
        };
        let old_key = (current.file_name.clone(), current.hash.clone());

        if let Some(owner) = inner.owner_of(&record.file_name, &record.hash)
            && owner != record.id
        {
            tracing::debug!(
                file_id = %record.id,
                existing_id = %owner,
                filename = %record.file_name,
                hash = %record.hash,
                "Rejected duplicate update"
            );
            return Err(RegistryError::Duplicate {
                file_name: record.file_name,
                hash: record.hash,
            });
        }

        inner.by_name_hash.remove(&old_key);
        inner.by_name_hash.insert(
            (record.file_name.clone(), record.hash.clone()),
            record.id,
        );
        inner.files.insert(record.id, record.clone());

        tracing::debug!(file_id = %record.id, "Updated file");
        Ok(record)
    }

    async fn delete(&self, id: FileId) {
        let mut inner = self.inner.write().await;
        if let Some(removed) = inner.files.remove(&id) {
            inner.by_name_hash.remove(&(removed.file_name, removed.hash));
            tracing::debug!(file_id = %id, "Deleted file");
        }
    }

    async fn len(&self) -> usize {
        self.inner.read().await.files.len()
    }
}
