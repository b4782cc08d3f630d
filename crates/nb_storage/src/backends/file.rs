use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use nb_core::{HistoryEntry, HistoryStore, Result, SummaryResult};

use crate::history::{History, STORAGE_KEY};

/// History persisted as one JSON list in `<dir>/newsbite-history.json`.
/// The whole file is rewritten on every change.
#[derive(Debug)]
pub struct FileHistoryStore {
    path: PathBuf,
    history: RwLock<History>,
}

impl FileHistoryStore {
    pub async fn open(dir: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("{}.json", STORAGE_KEY));
        let history = load(&path).await;
        tracing::debug!(path = %path.display(), entries = history.len(), "Opened history file");
        Ok(Self {
            path,
            history: RwLock::new(history),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, history: &History) -> Result<()> {
        let contents = serde_json::to_vec_pretty(history)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Missing files start empty; unreadable or corrupt ones are logged and
/// also start empty.
async fn load(path: &Path) -> History {
    let contents = match tokio::fs::read(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return History::new(),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read history");
            return History::new();
        }
    };
    match serde_json::from_slice::<Vec<HistoryEntry>>(&contents) {
        Ok(entries) => History::from_entries(entries),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to parse history");
            History::new()
        }
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn record(&self, summary: &SummaryResult) -> Result<HistoryEntry> {
        let entry = HistoryEntry::new(summary);
        let mut history = self.history.write().await;
        let mut updated = history.clone();
        updated.push(entry.clone());
        self.persist(&updated).await?;
        *history = updated;
        Ok(entry)
    }

    async fn list(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.history.read().await.entries().to_vec())
    }

    async fn get(&self, id: &str) -> Result<Option<HistoryEntry>> {
        Ok(self.history.read().await.get(id).cloned())
    }

    async fn clear(&self) -> Result<()> {
        let mut history = self.history.write().await;
        self.persist(&History::new()).await?;
        history.clear();
        Ok(())
    }
}
