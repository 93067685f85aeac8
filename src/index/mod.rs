//! Vector index abstraction
//!
//! The search tool only ever talks to [`VectorIndex`]. The handle is built once
//! at startup and passed in explicitly, so tests can swap in [`InMemoryIndex`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
pub use memory::InMemoryIndex;
pub use postgres::PgVectorIndex;

use crate::errors::Result;
use crate::models::IndexedDocument;

#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Up to `k` documents, most similar to `query` first
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<IndexedDocument>>;

    /// Insert or replace documents keyed by property id; returns the number written
    async fn upsert(&self, documents: &[IndexedDocument]) -> Result<usize>;

    /// Number of stored documents
    async fn count(&self) -> Result<usize>;

    /// Remove every document
    async fn clear(&self) -> Result<()>;
}

/// Cosine similarity in [-1, 1]; 0 when either vector has zero norm or lengths differ
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_and_orthogonal() {
        assert!((cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }
}
