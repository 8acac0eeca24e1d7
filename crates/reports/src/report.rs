use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A finished report persisted with its optional embedding.
///
/// Immutable after creation except for embedding backfill, which the store
/// performs via `update_embedding`. Callers hold snapshots; the store owns
/// persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanReport {
  pub id: Uuid,
  /// Tenant key; the isolation boundary for similarity queries
  pub company_id: String,
  pub template_id: String,
  pub period_start: NaiveDate,
  pub period_end: NaiveDate,
  /// Structured snapshot of computed metrics; opaque to the store
  pub metrics_json: Value,
  /// Rendered narrative text
  pub final_text: String,
  /// Fixed-dimension dense vector; `None` until computed
  pub embedding: Option<Vec<f32>>,
  pub file_url: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Input for `ReportStore::create`; id and creation time are allocated by
/// the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
  pub company_id: String,
  pub template_id: String,
  pub period_start: NaiveDate,
  pub period_end: NaiveDate,
  pub metrics_json: Value,
  pub final_text: String,
  pub embedding: Option<Vec<f32>>,
  pub file_url: Option<String>,
}

/// A stored report paired with its cosine similarity to a query vector.
///
/// Similarity lies in [-1.0, 1.0]; higher is more similar.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarReport {
  pub report: CleanReport,
  pub similarity: f32,
}
