use std::fmt;
use std::time::Duration;

pub mod metadata;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod prompt;
pub mod validate;

pub const DEFAULT_MODEL_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Generation and transport settings shared by every model backend.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    pub model_url: Option<String>,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub request_timeout: Option<Duration>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model_url: None,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            request_timeout: None,
        }
    }
}

#[derive(Clone, Default)]
pub struct Config {
    pub backend: ModelBackend,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub inference_config: InferenceConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("backend", &self.backend)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("inference_config", &self.inference_config)
            .finish()
    }
}

/// Backend-specific settings derived from the shared [`Config`].
pub trait ModelConfig: Sized {
    fn from_config(config: &Config) -> nb_core::Result<Self>;
}

pub mod prelude {
    pub use super::models::{create_model, ModelBackend};
    pub use super::pipeline::SummaryPipeline;
    pub use super::{Config, InferenceConfig};
    pub use nb_core::{Error, GenerativeModel, Result, Sentiment, SummaryResult};
}

pub use models::{create_model, ModelBackend};
pub use normalize::Normalized;
pub use pipeline::SummaryPipeline;
