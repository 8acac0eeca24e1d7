//! Gemini HTTP provider
//!
//! Sends the mapping prompt to a Gemini-style `generateContent` endpoint and
//! reduces the reply to validated mappings. Generation parameters are static
//! configuration; they are not tunable per call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::column_mapping::ColumnMapping;
use crate::error::MappingError;
use crate::prompt;
use crate::provider::{self, MappingProvider};

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Static generation parameters
const TEMPERATURE: f32 = 0.2;
const TOP_K: u32 = 40;
const TOP_P: f32 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Provider configuration, read from the environment once at construction.
///
/// A missing key is not a construction failure; every call checks it first
/// and fails with a configuration error before any network activity.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
  pub api_key: Option<String>,
  pub api_base: String,
  pub model: String,
  pub timeout_secs: u64,
}

impl GeminiConfig {
  pub fn from_env() -> Self {
    Self {
      api_key: std::env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty()),
      api_base: std::env::var("GEMINI_API_URL")
        .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
      model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
      timeout_secs: std::env::var("REAM_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS),
    }
  }
}

// Wire types for the generateContent exchange

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
  contents: Vec<Content>,
  generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
  parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
  text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
  temperature: f32,
  top_k: u32,
  top_p: f32,
  max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
  text: Option<String>,
}

/// Mapping provider backed by the Gemini REST API
pub struct GeminiProvider {
  config: GeminiConfig,
  client: Client,
}

impl GeminiProvider {
  pub fn new(config: GeminiConfig) -> Self {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .expect("Failed to create HTTP client");

    Self { config, client }
  }

  pub fn from_env() -> Self {
    Self::new(GeminiConfig::from_env())
  }

  fn endpoint(&self, api_key: &str) -> String {
    format!(
      "{}/models/{}:generateContent?key={}",
      self.config.api_base, self.config.model, api_key
    )
  }

  /// Flatten the first candidate's parts into one text block
  fn extract_text(response: GenerateResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let parts = candidate.content?.parts;

    let text: String =
      parts.into_iter().filter_map(|part| part.text).collect::<Vec<_>>().join("");

    if text.trim().is_empty() {
      None
    } else {
      Some(text)
    }
  }
}

#[async_trait]
impl MappingProvider for GeminiProvider {
  async fn generate_mappings(
    &self,
    template_columns: &[String],
    data_columns: &[String],
    command: Option<&str>,
  ) -> Result<Vec<ColumnMapping>, MappingError> {
    let api_key = self
      .config
      .api_key
      .as_deref()
      .ok_or_else(|| MappingError::configuration("GEMINI_API_KEY is not set"))?;

    provider::validate_columns(template_columns, data_columns)?;

    let prompt_text = prompt::build_mapping_prompt(template_columns, data_columns, command);

    let request = GenerateRequest {
      contents: vec![Content { parts: vec![Part { text: prompt_text }] }],
      generation_config: GenerationConfig {
        temperature: TEMPERATURE,
        top_k: TOP_K,
        top_p: TOP_P,
        max_output_tokens: MAX_OUTPUT_TOKENS,
      },
    };

    let url = self.endpoint(api_key);
    let response = self
      .client
      .post(&url)
      .json(&request)
      .send()
      .await
      .map_err(MappingError::provider_unreachable)?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(MappingError::provider(status.as_u16(), body));
    }

    let reply: GenerateResponse = response
      .json()
      .await
      .map_err(|e| MappingError::parse(format!("provider reply is not valid JSON: {e}")))?;

    let text = Self::extract_text(reply).ok_or(MappingError::NoContent)?;
    tracing::debug!(chars = text.len(), "received mapping reply");

    provider::parse_mapping_reply(&text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  fn unconfigured() -> GeminiProvider {
    GeminiProvider::new(GeminiConfig {
      api_key: None,
      api_base: DEFAULT_API_BASE.to_string(),
      model: DEFAULT_MODEL.to_string(),
      timeout_secs: 5,
    })
  }

  fn configured() -> GeminiProvider {
    GeminiProvider::new(GeminiConfig {
      api_key: Some("test-key".to_string()),
      api_base: "http://localhost:1".to_string(),
      model: DEFAULT_MODEL.to_string(),
      timeout_secs: 5,
    })
  }

  fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
  }

  #[tokio::test]
  async fn missing_key_fails_before_any_network_attempt() {
    // The key check precedes request construction, so no socket is opened
    let provider = unconfigured();
    let result =
      provider.generate_mappings(&columns(&["date"]), &columns(&["DATE"]), None).await;

    assert!(matches!(result, Err(MappingError::Configuration { .. })));
  }

  #[tokio::test]
  async fn empty_columns_fail_before_any_network_attempt() {
    let provider = configured();
    let result = provider.generate_mappings(&[], &columns(&["DATE"]), None).await;

    assert!(matches!(result, Err(MappingError::Validation { .. })));
  }

  #[test]
  fn extract_text_joins_candidate_parts() {
    let response = GenerateResponse {
      candidates: vec![Candidate {
        content: Some(CandidateContent {
          parts: vec![
            CandidatePart { text: Some("{\"mappings\"".to_string()) },
            CandidatePart { text: Some(": []}".to_string()) },
          ],
        }),
      }],
    };

    assert_eq!(GeminiProvider::extract_text(response), Some("{\"mappings\": []}".to_string()));
  }

  #[test]
  fn extract_text_rejects_empty_candidates() {
    assert_eq!(GeminiProvider::extract_text(GenerateResponse { candidates: vec![] }), None);

    let blank = GenerateResponse {
      candidates: vec![Candidate {
        content: Some(CandidateContent {
          parts: vec![CandidatePart { text: Some("   ".to_string()) }],
        }),
      }],
    };
    assert_eq!(GeminiProvider::extract_text(blank), None);
  }

  #[test]
  #[serial]
  fn config_reads_environment_overrides() {
    std::env::set_var("GEMINI_API_KEY", "k");
    std::env::set_var("GEMINI_MODEL", "gemini-test");
    std::env::set_var("REAM_TIMEOUT_SECS", "7");

    let config = GeminiConfig::from_env();
    assert_eq!(config.api_key.as_deref(), Some("k"));
    assert_eq!(config.model, "gemini-test");
    assert_eq!(config.timeout_secs, 7);

    std::env::remove_var("GEMINI_API_KEY");
    std::env::remove_var("GEMINI_MODEL");
    std::env::remove_var("REAM_TIMEOUT_SECS");
  }

  #[test]
  #[serial]
  fn empty_key_in_environment_counts_as_missing() {
    std::env::set_var("GEMINI_API_KEY", "");
    let config = GeminiConfig::from_env();
    assert_eq!(config.api_key, None);
    std::env::remove_var("GEMINI_API_KEY");
  }
}
