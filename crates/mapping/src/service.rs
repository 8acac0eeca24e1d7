//! Mapping service orchestration

use std::sync::Arc;

use crate::column_mapping::ColumnMapping;
use crate::error::MappingError;
use crate::provider::MappingProvider;

/// Thin orchestrator over the configured inference provider.
///
/// Callers depend on this service, not on a concrete provider, so providers
/// swap per deployment or per test without touching callers. The provider
/// handle is injected at construction; there is no global provider state.
#[derive(Clone)]
pub struct MappingService {
  provider: Arc<dyn MappingProvider>,
}

impl MappingService {
  pub fn new(provider: Arc<dyn MappingProvider>) -> Self {
    Self { provider }
  }

  /// Generate a column mapping.
  ///
  /// The provider's result and error kinds pass through unchanged.
  pub async fn generate_mapping(
    &self,
    template_columns: &[String],
    data_columns: &[String],
    command: Option<&str>,
  ) -> Result<Vec<ColumnMapping>, MappingError> {
    self.provider.generate_mappings(template_columns, data_columns, command).await
  }
}
