//! REST API types with schemars annotations for OpenAPI generation

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use mapping::column_mapping::ColumnMapping;
use reports::report::{CleanReport, SimilarReport};

// Base Response Structure
// =======================

/// Base response object for all API endpoints
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BaseResponse<T> {
  /// Server version that produced the response
  pub version: String,

  /// Transaction ID for logging correlation
  pub transaction_id: Uuid,

  /// Optional error information
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub errors: Vec<ApiError>,

  /// Response data (generic for different endpoint types)
  #[serde(flatten)]
  pub data: T,
}

/// API error information
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiError {
  /// Error key, unique to the error source
  pub key: String,

  /// Human readable error message
  pub message: String,
}

/// Payload for endpoints that return no data; serde can only flatten
/// structs, so this stands in for `()`
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct Empty {}

impl<T> BaseResponse<T> {
  /// Create a successful response
  pub fn success(data: T, transaction_id: Uuid) -> Self {
    Self {
      version: env!("CARGO_PKG_VERSION").to_string(),
      transaction_id,
      errors: Vec::new(),
      data,
    }
  }
}

impl BaseResponse<Empty> {
  /// Create an error response
  pub fn error(errors: Vec<ApiError>, transaction_id: Uuid) -> Self {
    Self {
      version: env!("CARGO_PKG_VERSION").to_string(),
      transaction_id,
      errors,
      data: Empty {},
    }
  }
}

impl ApiError {
  pub fn new(key: &str, message: &str) -> Self {
    Self { key: key.to_string(), message: message.to_string() }
  }
}

// Status Endpoints
// ================

/// Response for /status endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StatusResponse {
  /// Always "ok" when the server is reachable
  pub status: String,
}

/// Response for /version endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VersionResponse {
  /// Current server version
  pub version: String,
}

// Mapping Endpoints
// =================

/// Request for /mappings/generate endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMappingRequest {
  /// Column names of the target report template
  pub template_columns: Vec<String>,

  /// Column names of the source data file
  pub data_columns: Vec<String>,

  /// Optional free-text instruction biasing the mapping
  pub command: Option<String>,
}

/// One proposed column mapping
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingData {
  /// Column in the target template
  pub template_column: String,

  /// Matched source column, or null when no match exists
  pub data_column: Option<String>,

  /// Model certainty in [0.0, 1.0]
  pub confidence: f32,

  /// Human-readable justification
  pub reason: String,
}

impl From<&ColumnMapping> for MappingData {
  fn from(mapping: &ColumnMapping) -> Self {
    Self {
      template_column: mapping.template_column().to_string(),
      data_column: mapping.data_column().map(str::to_string),
      confidence: mapping.confidence(),
      reason: mapping.reason().to_string(),
    }
  }
}

/// Response for /mappings/generate endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GenerateMappingResponse {
  /// Proposed mappings, in the model's order
  pub mappings: Vec<MappingData>,
}

// Report Endpoints
// ================

/// Request for /reports endpoint (creation)
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
  /// Tenant key
  pub company_id: String,

  /// Template the report was rendered from
  pub template_id: String,

  /// Reporting period start
  pub period_start: NaiveDate,

  /// Reporting period end
  pub period_end: NaiveDate,

  /// Structured snapshot of computed metrics
  pub metrics_json: Value,

  /// Rendered narrative text
  pub final_text: String,

  /// Optional embedding vector for similarity retrieval
  pub embedding: Option<Vec<f32>>,

  /// Optional URL of the generated document
  pub file_url: Option<String>,
}

/// Report data returned by the API; the raw embedding stays server-side
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
  pub id: Uuid,
  pub company_id: String,
  pub template_id: String,
  pub period_start: NaiveDate,
  pub period_end: NaiveDate,
  pub metrics_json: Value,
  pub final_text: String,
  pub file_url: Option<String>,

  /// Whether the report is eligible for similarity retrieval
  pub has_embedding: bool,

  pub created_at: DateTime<Utc>,
}

impl From<&CleanReport> for ReportData {
  fn from(report: &CleanReport) -> Self {
    Self {
      id: report.id,
      company_id: report.company_id.clone(),
      template_id: report.template_id.clone(),
      period_start: report.period_start,
      period_end: report.period_end,
      metrics_json: report.metrics_json.clone(),
      final_text: report.final_text.clone(),
      file_url: report.file_url.clone(),
      has_embedding: report.embedding.is_some(),
      created_at: report.created_at,
    }
  }
}

/// Request for /reports/get endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetReportRequest {
  pub id: Uuid,
}

/// Response carrying a single report
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReportResponse {
  pub report: ReportData,
}

/// Request for /reports/list/company endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListByCompanyRequest {
  pub company_id: String,
}

/// Request for /reports/list/template endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListByTemplateRequest {
  pub template_id: String,
}

/// Response for report list endpoints
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListReportsResponse {
  /// Reports, newest first
  pub reports: Vec<ReportData>,

  /// Number of reports returned
  pub count: usize,
}

/// Request for /reports/similar endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimilarReportsRequest {
  /// Query embedding; must match the tenant's stored dimension
  pub embedding: Vec<f32>,

  /// Tenant key; results never cross this boundary
  pub company_id: String,

  /// Maximum number of results (default 5)
  pub limit: Option<usize>,
}

/// One similarity match
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SimilarReportData {
  pub report: ReportData,

  /// Cosine similarity in [-1.0, 1.0]; higher is more similar
  pub similarity: f32,
}

impl From<&SimilarReport> for SimilarReportData {
  fn from(result: &SimilarReport) -> Self {
    Self { report: ReportData::from(&result.report), similarity: result.similarity }
  }
}

/// Response for /reports/similar endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SimilarReportsResponse {
  /// Matches, best first
  pub results: Vec<SimilarReportData>,

  /// Number of matches returned
  pub count: usize,
}

/// Request for /reports/embedding endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateEmbeddingRequest {
  pub id: Uuid,
  pub embedding: Vec<f32>,
}

/// Request for /reports/remove endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RemoveReportRequest {
  pub id: Uuid,
}
