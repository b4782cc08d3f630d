pub mod error;
pub mod models;
pub mod sample;
pub mod storage;
pub mod types;

pub use error::{ConfigError, Error, ErrorKind, ValidationError};
pub use models::GenerativeModel;
pub use storage::HistoryStore;
pub use types::{ErrorResponse, HistoryEntry, Sentiment, SummaryResult};

pub type Result<T> = std::result::Result<T, Error>;
