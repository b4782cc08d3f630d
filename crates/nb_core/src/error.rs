use thiserror::Error;

use crate::types::ErrorResponse;

/// Message shown to users for every failure past input validation.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate summary. Please try again.";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Article text is required")]
    EmptyInput,

    #[error("Article must be at least 50 characters long")]
    TooShort,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("model API key is not configured")]
    MissingCredential,

    #[error("invalid model endpoint: {0}")]
    InvalidEndpoint(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Model endpoint returned status {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("Model endpoint produced no generated text")]
    EmptyGeneration,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

/// Coarse failure classes used for status codes and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Configuration,
    Transport,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Transport => "transport",
            ErrorKind::Internal => "internal",
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Config(_) => ErrorKind::Configuration,
            Error::Transport { .. } | Error::EmptyGeneration | Error::Http(_) => ErrorKind::Transport,
            Error::Serialization(_) | Error::Io(_) | Error::Storage(_) | Error::External(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// HTTP-equivalent status: 400 for bad input, 500 for everything else.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            _ => 500,
        }
    }

    /// Body returned to callers. Configuration problems never leak details.
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            Error::Validation(e) => ErrorResponse::new(e.to_string()),
            Error::Config(_) => ErrorResponse::new(GENERIC_FAILURE_MESSAGE),
            Error::Transport { status, .. } => ErrorResponse::new(GENERIC_FAILURE_MESSAGE)
                .with_details(format!("model endpoint returned status {}", status)),
            other => ErrorResponse::new(GENERIC_FAILURE_MESSAGE).with_details(other.to_string()),
        }
    }
}
