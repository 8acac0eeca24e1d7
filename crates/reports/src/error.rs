use thiserror::Error;
use uuid::Uuid;

/// Failure kinds for report store operations
#[derive(Error, Debug)]
pub enum StoreError {
  #[error("Report {id} not found")]
  NotFound { id: Uuid },

  #[error("Embedding dimension {actual} does not match stored dimension {expected}")]
  DimensionMismatch { expected: usize, actual: usize },

  #[error("Invalid store request: {message}")]
  Validation { message: String },
}

impl StoreError {
  pub fn not_found(id: Uuid) -> Self {
    Self::NotFound { id }
  }

  pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
    Self::DimensionMismatch { expected, actual }
  }

  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation { message: message.into() }
  }
}
