//! Inference provider seam and reply handling
//!
//! `MappingProvider` is the capability boundary for mapping generation;
//! concrete providers live behind it so deployments and tests can swap them
//! freely. Reply handling is shared here: providers hand over the model's
//! raw text, and this module reduces it to validated `ColumnMapping` records
//! with a strict decode-or-fail policy.

use async_trait::async_trait;
use serde::Deserialize;

use crate::column_mapping::ColumnMapping;
use crate::error::MappingError;

/// Capability boundary around the external text-generation call
#[async_trait]
pub trait MappingProvider: Send + Sync {
  /// Propose one mapping per template column.
  ///
  /// Mappings come back in the model's own order; no reordering is applied.
  async fn generate_mappings(
    &self,
    template_columns: &[String],
    data_columns: &[String],
    command: Option<&str>,
  ) -> Result<Vec<ColumnMapping>, MappingError>;
}

/// Reject empty column lists and blank entries before any network call
pub fn validate_columns(
  template_columns: &[String],
  data_columns: &[String],
) -> Result<(), MappingError> {
  if template_columns.is_empty() {
    return Err(MappingError::validation("templateColumns must not be empty"));
  }
  if data_columns.is_empty() {
    return Err(MappingError::validation("dataColumns must not be empty"));
  }
  if template_columns.iter().any(|column| column.trim().is_empty()) {
    return Err(MappingError::validation("templateColumns must not contain blank names"));
  }
  if data_columns.iter().any(|column| column.trim().is_empty()) {
    return Err(MappingError::validation("dataColumns must not contain blank names"));
  }
  Ok(())
}

// Loosely-typed reply schema. The provider payload is untrusted; every field
// is optional here and checked explicitly before a value object is built.

#[derive(Debug, Deserialize)]
struct RawReply {
  #[serde(default)]
  mappings: Vec<RawMapping>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMapping {
  template_column: Option<String>,
  data_column: Option<String>,
  confidence: Option<f32>,
  reason: Option<String>,
}

/// Extract the first brace-delimited object substring: greedy scan from the
/// first `{` to the last `}`. Models wrap JSON in prose or code fences.
fn extract_json_object(text: &str) -> Option<&str> {
  let start = text.find('{')?;
  let end = text.rfind('}')?;
  if end < start {
    return None;
  }
  Some(&text[start..=end])
}

/// Reduce the model's raw text to validated mappings.
///
/// One invalid entry rejects the whole reply. An absent `mappings` array
/// decodes as an empty list.
pub fn parse_mapping_reply(text: &str) -> Result<Vec<ColumnMapping>, MappingError> {
  let json = extract_json_object(text)
    .ok_or_else(|| MappingError::parse("reply contains no JSON object"))?;

  let reply: RawReply = serde_json::from_str(json)
    .map_err(|e| MappingError::parse(format!("reply is not valid JSON: {e}")))?;

  let mut mappings = Vec::with_capacity(reply.mappings.len());
  for (index, raw) in reply.mappings.into_iter().enumerate() {
    let template_column = raw
      .template_column
      .ok_or_else(|| MappingError::parse(format!("mapping {index} is missing templateColumn")))?;
    let confidence = raw
      .confidence
      .ok_or_else(|| MappingError::parse(format!("mapping {index} is missing confidence")))?;

    let mapping = ColumnMapping::new(
      template_column,
      raw.data_column,
      confidence,
      raw.reason.unwrap_or_default(),
    )?;
    mappings.push(mapping);
  }

  Ok(mappings)
}
