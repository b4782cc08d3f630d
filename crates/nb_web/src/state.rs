use std::sync::Arc;

use nb_core::HistoryStore;
use nb_inference::SummaryPipeline;

pub struct AppState {
    pub pipeline: SummaryPipeline,
    pub history: Arc<dyn HistoryStore>,
}
