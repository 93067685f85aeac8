//! Hybrid search: vector similarity, then hard metadata filters

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use crate::config::SearchConfig;
use crate::errors::PropMatchError;
use crate::errors::Result;
use crate::index::VectorIndex;
use crate::models::Candidate;
use crate::models::SearchFilters;

/// Retrieves `fetch_k` nearest documents, drops those failing the filters and
/// keeps the first `max_results` survivors in similarity order.
pub struct HybridSearchTool {
    index: Arc<dyn VectorIndex>,
    fetch_k: usize,
    max_results: usize,
}

impl HybridSearchTool {
    /// Default limits: 10 retrieved, 5 returned
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self::from_config(index, &SearchConfig::default())
    }

    pub fn from_config(index: Arc<dyn VectorIndex>, config: &SearchConfig) -> Self {
        Self {
            index,
            fetch_k: config.fetch_k.max(1),
            max_results: config.max_results.max(1),
        }
    }

    #[must_use]
    pub const fn fetch_k(&self) -> usize {
        self.fetch_k
    }

    #[must_use]
    pub const fn max_results(&self) -> usize {
        self.max_results
    }

    /// Fail unless the index is reachable and holds at least one document.
    ///
    /// # Errors
    /// - `IndexUnavailable` when the count query fails or the index is empty
    pub async fn ensure_ready(&self) -> Result<usize> {
        let count = self
            .index
            .count()
            .await
            .map_err(|e| PropMatchError::IndexUnavailable(e.to_string()))?;
        if count == 0 {
            return Err(PropMatchError::IndexUnavailable(
                "index is empty, run `propmatch index <csv>` first".to_string(),
            ));
        }
        info!("Vector index ready with {} documents", count);
        Ok(count)
    }

    /// Run one hybrid search.
    ///
    /// An empty result after filtering is `Ok(vec![])`. An empty retrieval means
    /// there is nothing indexed and is reported as an error.
    ///
    /// # Errors
    /// - `IndexUnavailable` when the index returns no documents at all
    /// - Embedding or database errors from the index
    pub async fn search(&self, query: &str, filters: &SearchFilters) -> Result<Vec<Candidate>> {
        info!(
            "Hybrid search: {:?} (max_price={}, min_bedrooms={})",
            query, filters.max_price, filters.min_bedrooms
        );

        let documents = self.index.similarity_search(query, self.fetch_k).await?;
        if documents.is_empty() {
            return Err(PropMatchError::IndexUnavailable(
                "similarity search returned no documents".to_string(),
            ));
        }
        let retrieved = documents.len();

        let candidates: Vec<Candidate> = documents
            .into_iter()
            .enumerate()
            .filter(|(_, doc)| filters.admits(&doc.metadata))
            .take(self.max_results)
            .map(|(rank, document)| Candidate { document, rank })
            .collect();

        debug!(
            "Retrieved {}, {} passed filters (limit {})",
            retrieved,
            candidates.len(),
            self.max_results
        );
        Ok(candidates)
    }

    /// Tool-style entry point with the filters passed as plain numbers
    pub async fn invoke(&self, query: &str, max_price: u64, min_bedrooms: u32) -> Result<Vec<Candidate>> {
        self.search(query, &SearchFilters::new(max_price, min_bedrooms))
            .await
    }
}
