//! Deterministic prompt construction for mapping generation

/// Build the mapping prompt: both column lists enumerated 1-indexed, the
/// optional caller instruction, and the exact reply shape the parser expects.
///
/// Same inputs always produce the same prompt.
pub fn build_mapping_prompt(
  template_columns: &[String],
  data_columns: &[String],
  command: Option<&str>,
) -> String {
  let mut prompt = String::new();

  prompt.push_str("You are matching report template columns to source data columns.\n\n");

  prompt.push_str("Template columns:\n");
  for (i, column) in template_columns.iter().enumerate() {
    prompt.push_str(&format!("{}. {}\n", i + 1, column));
  }

  prompt.push_str("\nData columns:\n");
  for (i, column) in data_columns.iter().enumerate() {
    prompt.push_str(&format!("{}. {}\n", i + 1, column));
  }

  if let Some(command) = command {
    prompt.push_str(&format!("\nAdditional instruction: {command}\n"));
  }

  prompt.push_str(
    "\nReply with a single JSON object of the shape \
     {\"mappings\": [{\"templateColumn\": string, \"dataColumn\": string or null, \
     \"confidence\": number between 0 and 1, \"reason\": string}, ...]}. \
     Use null for dataColumn when no source column matches. \
     Do not add any text outside the JSON object.",
  );

  prompt
}
