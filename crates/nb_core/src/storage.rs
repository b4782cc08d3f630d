use async_trait::async_trait;

use crate::types::{HistoryEntry, SummaryResult};
use crate::Result;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Record a summary at the front of the history, evicting the oldest
    /// entries beyond capacity.
    async fn record(&self, summary: &SummaryResult) -> Result<HistoryEntry>;

    /// All entries, most recent first.
    async fn list(&self) -> Result<Vec<HistoryEntry>>;

    async fn get(&self, id: &str) -> Result<Option<HistoryEntry>>;

    async fn clear(&self) -> Result<()>;
}
