use serde::Serialize;

use crate::error::MappingError;

/// One template-column to data-column mapping proposed by the model.
///
/// Immutable once constructed; `new` is the only way in and enforces the
/// confidence range and a non-empty template column. `data_column` is `None`
/// when the model found no suitable source column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
  template_column: String,
  data_column: Option<String>,
  confidence: f32,
  reason: String,
}

impl ColumnMapping {
  pub fn new(
    template_column: impl Into<String>,
    data_column: Option<String>,
    confidence: f32,
    reason: impl Into<String>,
  ) -> Result<Self, MappingError> {
    let template_column = template_column.into();

    if template_column.trim().is_empty() {
      return Err(MappingError::validation("templateColumn must not be empty"));
    }

    // NaN fails the range check as well
    if !(0.0..=1.0).contains(&confidence) {
      return Err(MappingError::validation(format!(
        "confidence {confidence} is outside [0.0, 1.0]"
      )));
    }

    Ok(Self { template_column, data_column, confidence, reason: reason.into() })
  }

  /// Column in the target template this mapping fills
  pub fn template_column(&self) -> &str {
    &self.template_column
  }

  /// Matched source column, if any
  pub fn data_column(&self) -> Option<&str> {
    self.data_column.as_deref()
  }

  /// Model certainty in [0.0, 1.0]; not a probability guarantee
  pub fn confidence(&self) -> f32 {
    self.confidence
  }

  /// Human-readable justification; informational only, never parsed
  pub fn reason(&self) -> &str {
    &self.reason
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_confidence_bounds() {
    assert!(ColumnMapping::new("date", Some("DATE".to_string()), 0.0, "exact").is_ok());
    assert!(ColumnMapping::new("date", Some("DATE".to_string()), 1.0, "exact").is_ok());
  }

  #[test]
  fn rejects_out_of_range_confidence() {
    let result = ColumnMapping::new("date", None, 1.5, "");
    assert!(matches!(result, Err(MappingError::Validation { .. })));

    let result = ColumnMapping::new("date", None, -0.1, "");
    assert!(matches!(result, Err(MappingError::Validation { .. })));
  }

  #[test]
  fn rejects_nan_confidence() {
    let result = ColumnMapping::new("date", None, f32::NAN, "");
    assert!(matches!(result, Err(MappingError::Validation { .. })));
  }

  #[test]
  fn rejects_blank_template_column() {
    let result = ColumnMapping::new("  ", Some("DATE".to_string()), 0.9, "");
    assert!(matches!(result, Err(MappingError::Validation { .. })));
  }

  #[test]
  fn unmatched_column_has_no_data_column() {
    let mapping = ColumnMapping::new("total", None, 0.4, "no candidate").unwrap();
    assert_eq!(mapping.data_column(), None);
  }
}
