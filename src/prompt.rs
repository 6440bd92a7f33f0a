//! Prompt templates sent to the language model.

/// Suffix appended to context cut at the character limit.
pub const TRIM_MARKER: &str = " ...(trimmed)";

/// Default query when the user does not ask one.
pub const DEFAULT_QUERY: &str = "What decisions were approved?";

/// Prompt for extracting decisions from the full minutes.
pub fn build_prompt(minutes: &str, query: &str) -> String {
    format!(
        "\nExtract approved decisions from these meeting minutes.\n\n\
         Rules:\n\
         - Bullet points only\n\
         - No hallucinated items\n\
         - Skip discussions\n\n\
         Query: {query}\n\n\
         Minutes:\n\
         \"\"\"{minutes}\"\"\"\n"
    )
}

/// Prompt for extracting decisions from retrieved context.
pub fn build_rag_prompt(context: &str, query: &str) -> String {
    format!(
        "\nAnalyze stored meeting records and extract approved decisions.\n\n\
         User Query: {query}\n\n\
         Relevant Stored Context:\n\
         \"\"\"{context}\"\"\"\n\n\
         Return only bullet points and avoid hallucination.\n"
    )
}

/// Keep the first `limit` characters of `context`, marking the cut.
pub fn trim_context(context: &str, limit: usize) -> String {
    match context.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &context[..cut], TRIM_MARKER),
        None => context.to_string(),
    }
}
