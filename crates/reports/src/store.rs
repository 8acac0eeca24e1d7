//! Report store abstraction
//!
//! Generic interface over report persistence so backends can be swapped
//! without touching the mapping or API layers. The similarity operation is
//! part of the store because eligibility (tenant and embedding presence) is
//! a storage concern.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::report::{CleanReport, NewReport, SimilarReport};

/// Result count used when the caller does not set a limit
pub const DEFAULT_SIMILAR_LIMIT: usize = 5;

#[async_trait]
pub trait ReportStore: Send + Sync {
  /// Persist a new report, allocating its id and creation time.
  ///
  /// A present non-empty embedding becomes queryable immediately; an absent
  /// one leaves the report out of similarity results until backfilled.
  async fn create(&self, input: NewReport) -> Result<CleanReport, StoreError>;

  /// Point lookup; absence is not an error
  async fn find_by_id(&self, id: Uuid) -> Result<Option<CleanReport>, StoreError>;

  /// All reports for a tenant, newest first
  async fn find_by_company(&self, company_id: &str) -> Result<Vec<CleanReport>, StoreError>;

  /// All reports for a template, newest first.
  ///
  /// Not tenant-filtered; callers needing isolation compose with a
  /// `company_id` check.
  async fn find_by_template(&self, template_id: &str) -> Result<Vec<CleanReport>, StoreError>;

  /// The tenant's nearest stored reports by cosine similarity, best first.
  ///
  /// Reports without an embedding are excluded, not scored as zero. `limit`
  /// must be positive.
  async fn find_similar(
    &self,
    embedding: &[f32],
    company_id: &str,
    limit: usize,
  ) -> Result<Vec<SimilarReport>, StoreError>;

  /// Overwrite the stored embedding of an existing report; unknown ids are
  /// an error
  async fn update_embedding(&self, id: Uuid, embedding: Vec<f32>) -> Result<(), StoreError>;

  /// Remove a report; deleting an unknown id is a no-op
  async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
