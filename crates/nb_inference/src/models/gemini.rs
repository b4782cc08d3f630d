use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use nb_core::{ConfigError, Error, GenerativeModel, Result};

use crate::{Config, ModelConfig, DEFAULT_MODEL_NAME, DEFAULT_MODEL_URL};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Clone)]
pub struct GeminiConfig {
    endpoint: Url,
    model_name: String,
    api_key: Option<String>,
    temperature: f64,
    max_output_tokens: u32,
    request_timeout: Option<Duration>,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("model_name", &self.model_name)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ModelConfig for GeminiConfig {
    fn from_config(config: &Config) -> Result<Self> {
        let inference = &config.inference_config;
        let url = inference.model_url.as_deref().unwrap_or(DEFAULT_MODEL_URL);
        let endpoint = Url::parse(url)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {}", url, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint(url.to_string()).into());
        }

        Ok(Self {
            endpoint,
            model_name: config
                .model_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
            temperature: inference.temperature,
            max_output_tokens: inference.max_output_tokens,
            request_timeout: inference.request_timeout,
        })
    }
}

impl GeminiConfig {
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.as_str().trim_end_matches('/'),
            self.model_name
        )
    }
}

pub struct GeminiModel {
    client: Client,
    config: GeminiConfig,
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

impl GeminiModel {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ConfigError::MissingCredential)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        tracing::debug!(
            model = %self.config.model_name,
            prompt_chars = prompt.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.config.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Gemini API error");
            return Err(Error::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let reply: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = reply.into_text().ok_or(Error::EmptyGeneration)?;
        tracing::debug!(reply_chars = text.len(), "Received generated text");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InferenceConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";

    fn model_for(server: &MockServer, api_key: Option<&str>) -> GeminiModel {
        let config = Config {
            api_key: api_key.map(str::to_string),
            inference_config: InferenceConfig {
                model_url: Some(server.uri()),
                ..InferenceConfig::default()
            },
            ..Config::default()
        };
        GeminiModel::new(GeminiConfig::from_config(&config).unwrap()).unwrap()
    }

    fn candidate_reply(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_generate_returns_first_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "parts": [{ "text": "Summarize me" }] }],
                "generationConfig": { "temperature": 0.3, "maxOutputTokens": 1024 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_reply("{\"title\":\"T\"}")))
            .expect(1)
            .mount(&server)
            .await;

        let model = model_for(&server, Some("test-key"));
        let text = model.generate("Summarize me").await.unwrap();
        assert_eq!(text, "{\"title\":\"T\"}");
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_reply("unused")))
            .expect(0)
            .mount(&server)
            .await;

        let model = model_for(&server, None);
        let err = model.generate("Summarize me").await.unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingCredential)));

        let model = model_for(&server, Some("   "));
        let err = model.generate("Summarize me").await.unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .expect(1)
            .mount(&server)
            .await;

        let model = model_for(&server, Some("bad-key"));
        match model.generate("Summarize me").await {
            Err(Error::Transport { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "API key not valid");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_generation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let model = model_for(&server, Some("test-key"));
        let err = model.generate("Summarize me").await.unwrap_err();
        assert!(matches!(err, Error::EmptyGeneration));
    }

    #[tokio::test]
    async fn test_blank_text_is_empty_generation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_reply("  \n")))
            .mount(&server)
            .await;

        let model = model_for(&server, Some("test-key"));
        let err = model.generate("Summarize me").await.unwrap_err();
        assert!(matches!(err, Error::EmptyGeneration));
    }

    #[test]
    fn test_config_defaults_and_url() {
        let config = GeminiConfig::from_config(&Config::default()).unwrap();
        assert_eq!(config.model_name, "gemini-2.5-flash");
        assert!(config.api_key.is_none());
        assert_eq!(
            config.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_config_debug_redacts_api_key() {
        let config = GeminiConfig::from_config(&Config {
            api_key: Some("secret-key".to_string()),
            ..Config::default()
        })
        .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-key"));
    }

    #[test]
    fn test_config_rejects_non_http_endpoint() {
        let config = Config {
            inference_config: InferenceConfig {
                model_url: Some("ftp://example.com".to_string()),
                ..InferenceConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            GeminiConfig::from_config(&config),
            Err(Error::Config(ConfigError::InvalidEndpoint(_)))
        ));
    }
}
