//! Text preprocessing before embedding generation
//!
//! Property descriptions come from hand-edited spreadsheets, so they carry stray
//! newlines, tabs and control characters. Embedding APIs also cap input length.

use tracing::debug;

use crate::errors::PropMatchError;

/// Longest text sent to an embedding endpoint, in characters
pub const MAX_EMBEDDING_CHARS: usize = 2000;

/// Normalize, sanitize and length-limit text for embedding
pub fn preprocess_text_for_embedding(text: &str) -> Result<String, PropMatchError> {
    if text.is_empty() {
        return Err(PropMatchError::EmbeddingError(
            "Empty text provided".to_string(),
        ));
    }

    let sanitized = sanitize_text(&normalize_whitespace(text));

    if sanitized.is_empty() {
        return Err(PropMatchError::EmbeddingError(
            "Text contains only whitespace after preprocessing".to_string(),
        ));
    }

    let result = truncate_at_word_boundary(&sanitized, MAX_EMBEDDING_CHARS);
    debug!(
        "Preprocessed text: {} -> {} chars",
        text.chars().count(),
        result.chars().count()
    );
    Ok(result)
}

/// Collapse every run of whitespace (including CR/LF/tab) into one space
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Replace control characters with spaces
fn sanitize_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Truncate to `max_chars` characters, preferring the last word boundary in the final quarter
fn truncate_at_word_boundary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_chars).collect();
    if let Some(last_space) = truncated.rfind(' ') {
        if truncated[..last_space].chars().count() > max_chars * 3 / 4 {
            return truncated[..last_space].to_string();
        }
    }
    truncated
}
