use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use nb_core::{GenerativeModel, Result};

use crate::{Config, ModelConfig};

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::{GeminiConfig, GeminiModel};

/// Which model implementation serves the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelBackend {
    #[default]
    Gemini,
    Dummy,
}

impl ModelBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelBackend::Gemini => "gemini",
            ModelBackend::Dummy => "dummy",
        }
    }
}

impl fmt::Display for ModelBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(ModelBackend::Gemini),
            "dummy" => Ok(ModelBackend::Dummy),
            other => Err(format!(
                "Unknown model backend: {}. Available backends: gemini, dummy",
                other
            )),
        }
    }
}

pub fn create_model(config: &Config) -> Result<Arc<dyn GenerativeModel>> {
    match config.backend {
        ModelBackend::Gemini => {
            let model = GeminiModel::new(GeminiConfig::from_config(config)?)?;
            Ok(Arc::new(model))
        }
        ModelBackend::Dummy => Ok(Arc::new(DummyModel::new())),
    }
}
