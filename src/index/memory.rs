//! In-process vector index with exact cosine search

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::cosine_similarity;
use super::VectorIndex;
use crate::embeddings::Embedder;
use crate::errors::Result;
use crate::models::IndexedDocument;

struct Entry {
    document: IndexedDocument,
    embedding: Vec<f32>,
}

/// Brute-force index held in memory. Insertion order breaks similarity ties.
pub struct InMemoryIndex {
    embedder: Arc<dyn Embedder>,
    entries: RwLock<Vec<Entry>>,
}

impl InMemoryIndex {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            entries: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<IndexedDocument>> {
        let query_embedding = self.embedder.embed(query).await?;
        let entries = self.entries.read().await;

        let mut scored: Vec<(f32, &Entry)> = entries
            .iter()
            .map(|e| (cosine_similarity(&query_embedding, &e.embedding), e))
            .collect();
        // sort_by is stable, so equal similarities keep insertion order
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        debug!(
            "In-memory search over {} documents, returning up to {}",
            entries.len(),
            k
        );

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, e)| e.document.clone())
            .collect())
    }

    async fn upsert(&self, documents: &[IndexedDocument]) -> Result<usize> {
        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let mut entries = self.entries.write().await;
        for (document, embedding) in documents.iter().cloned().zip(embeddings) {
            let entry = Entry {
                document,
                embedding,
            };
            match entries
                .iter()
                .position(|e| e.document.id() == entry.document.id())
            {
                Some(pos) => entries[pos] = entry,
                None => entries.push(entry),
            }
        }

        Ok(documents.len())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.entries.read().await.len())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}
