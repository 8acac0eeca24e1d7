use thiserror::Error;

/// Failure kinds for mapping generation.
///
/// Each kind stays distinct so callers can pick a policy per kind:
/// configuration errors alert, provider errors may be retried with backoff,
/// parse and no-content errors are surfaced without retry.
#[derive(Error, Debug)]
pub enum MappingError {
  #[error("Inference provider is not configured: {message}")]
  Configuration { message: String },

  /// Non-success reply or transport failure from the inference capability.
  /// `status` is the upstream HTTP status, or `None` when the request never
  /// produced a response (connect failure, timeout).
  #[error("Inference provider failure: {body}")]
  Provider { status: Option<u16>, body: String },

  #[error("Inference provider returned no usable text")]
  NoContent,

  #[error("Failed to parse provider reply: {message}")]
  Parse { message: String },

  #[error("Invalid mapping request: {message}")]
  Validation { message: String },
}

impl MappingError {
  pub fn configuration(message: impl Into<String>) -> Self {
    Self::Configuration { message: message.into() }
  }

  pub fn provider(status: u16, body: impl Into<String>) -> Self {
    Self::Provider { status: Some(status), body: body.into() }
  }

  pub fn provider_unreachable(error: impl std::fmt::Display) -> Self {
    Self::Provider { status: None, body: error.to_string() }
  }

  pub fn parse(message: impl Into<String>) -> Self {
    Self::Parse { message: message.into() }
  }

  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation { message: message.into() }
  }
}
