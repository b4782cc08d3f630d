use std::path::Path;
use std::sync::Arc;

use nb_core::{HistoryStore, Result};

pub mod backends;
pub mod history;

pub use backends::*;
pub use history::{History, HISTORY_CAPACITY, STORAGE_KEY};

/// Build a history store by name: `memory` or `file` (stored under `dir`).
pub async fn create_storage(kind: &str, dir: Option<&Path>) -> Result<Arc<dyn HistoryStore>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryHistoryStore::new())),
        "file" => {
            let dir = dir.ok_or_else(|| {
                nb_core::Error::Storage("File storage requires a history directory".to_string())
            })?;
            Ok(Arc::new(FileHistoryStore::open(dir).await?))
        }
        other => Err(nb_core::Error::Storage(format!(
            "Unknown storage backend: {}. Available backends: memory, file",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::history::History;
    pub use nb_core::{HistoryEntry, HistoryStore};
}
