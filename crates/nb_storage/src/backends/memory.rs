use async_trait::async_trait;
use tokio::sync::RwLock;

use nb_core::{HistoryEntry, HistoryStore, Result, SummaryResult};

use crate::history::History;

#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    history: RwLock<History>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn record(&self, summary: &SummaryResult) -> Result<HistoryEntry> {
        let entry = HistoryEntry::new(summary);
        let mut history = self.history.write().await;
        let evicted = history.push(entry.clone());
        if !evicted.is_empty() {
            tracing::debug!(evicted = evicted.len(), "Dropped oldest history entries");
        }
        Ok(entry)
    }

    async fn list(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.history.read().await.entries().to_vec())
    }

    async fn get(&self, id: &str) -> Result<Option<HistoryEntry>> {
        Ok(self.history.read().await.get(id).cloned())
    }

    async fn clear(&self) -> Result<()> {
        self.history.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HISTORY_CAPACITY;
    use nb_core::Sentiment;

    fn summary(title: &str) -> SummaryResult {
        SummaryResult {
            title: title.to_string(),
            summary_points: vec!["one".to_string(), "two".to_string(), "three".to_string()],
            sentiment: Sentiment::Positive,
            keywords: vec!["memory".to_string()],
            word_count: 80,
            reading_time_minutes: 1,
        }
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryHistoryStore::new();
        let entry = store.record(&summary("stored")).await.unwrap();
        assert_eq!(entry.preview_points, vec!["one", "two"]);

        let fetched = store.get(&entry.id).await.unwrap().unwrap();
        assert_eq!(fetched, entry);

        for i in 0..6 {
            store.record(&summary(&format!("more {}", i))).await.unwrap();
        }
        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), HISTORY_CAPACITY);
        assert_eq!(entries[0].title, "more 5");
        assert!(store.get(&entry.id).await.unwrap().is_none());

        store.clear().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
