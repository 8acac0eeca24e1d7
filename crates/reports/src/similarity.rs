//! Cosine similarity over report embeddings

/// Cosine similarity between two vectors, equal to `1 - cosine_distance`.
///
/// Returns 0.0 for mismatched lengths or a zero-magnitude operand; callers
/// are expected to reject mismatched dimensions before scoring.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
  if a.len() != b.len() || a.is_empty() {
    return 0.0;
  }

  let mut dot = 0.0f32;
  let mut norm_a = 0.0f32;
  let mut norm_b = 0.0f32;

  for (x, y) in a.iter().zip(b.iter()) {
    dot += x * y;
    norm_a += x * x;
    norm_b += y * y;
  }

  let magnitude = norm_a.sqrt() * norm_b.sqrt();
  if magnitude == 0.0 {
    0.0
  } else {
    dot / magnitude
  }
}
