//! File record registry for filecat.
//!
//! This crate owns the catalog state:
//! - The `FileRegistry` contract shared by the server and tests
//! - `MemoryRegistry`, an in-memory implementation safe for concurrent use
//! - Uniqueness of `(file_name, hash)` and id assignment

pub mod error;
pub mod memory;
pub mod store;

pub use error::{RegistryError, RegistryResult};
pub use memory::MemoryRegistry;
pub use store::FileRegistry;

use filecat_core::NewFile;
use filecat_core::config::RegistryConfig;
use std::sync::Arc;

/// Demonstration records added when `seed_examples` is enabled.
pub fn example_files() -> Vec<NewFile> {
    vec![
        NewFile::new("hello.go", "F810B74143BE5F06D1CE1A22D9FEE7D6", "private"),
        NewFile::new(
            "3420 Boelter Hall.txt",
            "F966AA92D412BB814BA98426264CE375",
            "public-read-write",
        ),
    ]
}

/// Create a registry from configuration.
pub async fn from_config(config: &RegistryConfig) -> RegistryResult<Arc<dyn FileRegistry>> {
    let registry = MemoryRegistry::new();

    if config.seed_examples {
        for file in example_files() {
            let record = registry.add(file).await?;
            tracing::info!(file_id = %record.id, filename = %record.file_name, "Seeded example file");
        }
    }

    Ok(Arc::new(registry) as Arc<dyn FileRegistry>)
}
