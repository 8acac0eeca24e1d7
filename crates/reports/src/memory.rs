//! In-memory report store
//!
//! HashMap-backed implementation guarded by a single `RwLock`; each guarded
//! section is the only atomicity unit, matching the single-row semantics a
//! database-backed implementation would provide. Similarity queries read a
//! point-in-time snapshot under the read guard.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::report::{CleanReport, NewReport, SimilarReport};
use crate::similarity::cosine_similarity;
use crate::store::ReportStore;

#[derive(Default)]
pub struct MemoryReportStore {
  reports: RwLock<HashMap<Uuid, CleanReport>>,
}

impl MemoryReportStore {
  pub fn new() -> Self {
    Self::default()
  }
}

/// Expected embedding width for a tenant, fixed by its first stored vector.
///
/// `exclude` leaves one report out of the scan so an overwrite of the
/// tenant's only embedded report can change dimension consistently.
fn tenant_dimension(
  reports: &HashMap<Uuid, CleanReport>,
  company_id: &str,
  exclude: Option<Uuid>,
) -> Option<usize> {
  reports
    .values()
    .filter(|report| report.company_id == company_id && Some(report.id) != exclude)
    .find_map(|report| report.embedding.as_ref().map(Vec::len))
}

fn check_dimension(
  reports: &HashMap<Uuid, CleanReport>,
  company_id: &str,
  embedding: &[f32],
  exclude: Option<Uuid>,
) -> Result<(), StoreError> {
  if embedding.is_empty() {
    return Err(StoreError::validation("embedding must not be empty"));
  }

  if let Some(expected) = tenant_dimension(reports, company_id, exclude) {
    if expected != embedding.len() {
      return Err(StoreError::dimension_mismatch(expected, embedding.len()));
    }
  }

  Ok(())
}

#[async_trait]
impl ReportStore for MemoryReportStore {
  async fn create(&self, input: NewReport) -> Result<CleanReport, StoreError> {
    if input.company_id.trim().is_empty() {
      return Err(StoreError::validation("companyId must not be empty"));
    }

    let mut reports = self.reports.write().await;

    // An empty vector counts as no embedding
    let embedding = input.embedding.filter(|e| !e.is_empty());
    if let Some(embedding) = &embedding {
      check_dimension(&reports, &input.company_id, embedding, None)?;
    }

    let report = CleanReport {
      id: Uuid::new_v4(),
      company_id: input.company_id,
      template_id: input.template_id,
      period_start: input.period_start,
      period_end: input.period_end,
      metrics_json: input.metrics_json,
      final_text: input.final_text,
      embedding,
      file_url: input.file_url,
      created_at: Utc::now(),
    };

    reports.insert(report.id, report.clone());
    tracing::debug!(id = %report.id, company = %report.company_id, "report created");

    Ok(report)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<CleanReport>, StoreError> {
    let reports = self.reports.read().await;
    Ok(reports.get(&id).cloned())
  }

  async fn find_by_company(&self, company_id: &str) -> Result<Vec<CleanReport>, StoreError> {
    let reports = self.reports.read().await;

    let mut results: Vec<CleanReport> =
      reports.values().filter(|report| report.company_id == company_id).cloned().collect();
    results.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(results)
  }

  async fn find_by_template(&self, template_id: &str) -> Result<Vec<CleanReport>, StoreError> {
    let reports = self.reports.read().await;

    let mut results: Vec<CleanReport> =
      reports.values().filter(|report| report.template_id == template_id).cloned().collect();
    results.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(results)
  }

  async fn find_similar(
    &self,
    embedding: &[f32],
    company_id: &str,
    limit: usize,
  ) -> Result<Vec<SimilarReport>, StoreError> {
    if limit == 0 {
      return Err(StoreError::validation("limit must be a positive integer"));
    }
    if embedding.is_empty() {
      return Err(StoreError::validation("query embedding must not be empty"));
    }

    let reports = self.reports.read().await;

    if let Some(expected) = tenant_dimension(&reports, company_id, None) {
      if expected != embedding.len() {
        return Err(StoreError::dimension_mismatch(expected, embedding.len()));
      }
    }

    let mut results: Vec<SimilarReport> = reports
      .values()
      .filter(|report| report.company_id == company_id)
      .filter_map(|report| {
        report.embedding.as_ref().map(|stored| SimilarReport {
          report: report.clone(),
          similarity: cosine_similarity(embedding, stored),
        })
      })
      .collect();

    results.sort_by(|a, b| {
      b.similarity
        .partial_cmp(&a.similarity)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then_with(|| b.report.created_at.cmp(&a.report.created_at))
    });
    results.truncate(limit);

    Ok(results)
  }

  async fn update_embedding(&self, id: Uuid, embedding: Vec<f32>) -> Result<(), StoreError> {
    let mut reports = self.reports.write().await;

    let company_id = match reports.get(&id) {
      Some(report) => report.company_id.clone(),
      None => return Err(StoreError::not_found(id)),
    };

    check_dimension(&reports, &company_id, &embedding, Some(id))?;

    if let Some(report) = reports.get_mut(&id) {
      report.embedding = Some(embedding);
    }

    Ok(())
  }

  async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
    let mut reports = self.reports.write().await;
    reports.remove(&id);
    Ok(())
  }
}
