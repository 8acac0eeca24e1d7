//! Shared application state

use std::sync::Arc;

use mapping::gemini::GeminiProvider;
use mapping::service::MappingService;
use reports::memory::MemoryReportStore;
use reports::store::ReportStore;

/// Handles shared by every handler.
///
/// Both capabilities are injected so tests can substitute providers and
/// stores without environment or network setup.
#[derive(Clone)]
pub struct AppState {
  pub mappings: MappingService,
  pub store: Arc<dyn ReportStore>,
}

impl AppState {
  pub fn new(mappings: MappingService, store: Arc<dyn ReportStore>) -> Self {
    Self { mappings, store }
  }

  /// Production wiring: Gemini provider configured from the environment,
  /// in-memory report store
  pub fn from_env() -> Self {
    Self::new(
      MappingService::new(Arc::new(GeminiProvider::from_env())),
      Arc::new(MemoryReportStore::new()),
    )
  }
}
