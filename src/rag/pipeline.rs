//! Matching pipeline: Transform -> Search -> Score

use std::sync::Arc;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingService;
use crate::errors::Result;
use crate::index::PgVectorIndex;
use crate::index::VectorIndex;
use crate::llm::LanguageModel;
use crate::llm::LlmService;
use crate::models::MatchRequest;
use crate::models::MatchResponse;
use crate::rag::HybridSearchTool;
use crate::rag::MatchScorer;
use crate::rag::QueryTransformer;

/// The three stages wired together. Built once and shared across requests.
pub struct MatchPipeline {
    transformer: QueryTransformer,
    search_tool: HybridSearchTool,
    scorer: MatchScorer,
}

impl MatchPipeline {
    /// Wire the stages around an existing model and index
    pub fn new(llm: Arc<dyn LanguageModel>, index: Arc<dyn VectorIndex>, config: &AppConfig) -> Self {
        Self {
            transformer: QueryTransformer::new(Arc::clone(&llm)),
            search_tool: HybridSearchTool::from_config(index, &config.search),
            scorer: MatchScorer::with_concurrency(llm, config.scoring.concurrency),
        }
    }

    /// Build the production pipeline: chat LLM, embedding service, pgvector index.
    ///
    /// # Errors
    /// - Database connection errors, or a missing documents table
    /// - Embedding or LLM client configuration errors
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let llm: Arc<dyn LanguageModel> = Arc::new(LlmService::new(config)?);
        let embedder: Arc<dyn Embedder> = Arc::new(EmbeddingService::new(config)?);
        let index: Arc<dyn VectorIndex> = Arc::new(PgVectorIndex::connect(config, embedder).await?);
        Ok(Self::new(llm, index, config))
    }

    /// Check that the index can serve searches; call once before accepting requests
    ///
    /// # Errors
    /// - `IndexUnavailable` when the index is unreachable or empty
    pub async fn ensure_ready(&self) -> Result<usize> {
        self.search_tool.ensure_ready().await
    }

    /// Run one request through all three stages.
    ///
    /// No surviving candidate yields an empty `final_response`. A failed search is
    /// logged and also treated as no candidates.
    ///
    /// # Errors
    /// - Transport errors from the language model
    pub async fn run(&self, request: &MatchRequest) -> Result<MatchResponse> {
        info!("Processing match request: {}", request.user_input);

        debug!("Step 1: Transforming query");
        let transformed = self.transformer.transform(&request.user_input).await?;

        debug!("Step 2: Hybrid search");
        let candidates = match self
            .search_tool
            .search(&transformed.semantic_query, &transformed.filters)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Search failed, continuing with no candidates: {}", e);
                Vec::new()
            }
        };

        debug!("Step 3: Scoring {} candidates", candidates.len());
        let final_response = self.scorer.score(&request.user_input, candidates).await?;

        info!("Match request completed with {} results", final_response.len());
        Ok(MatchResponse {
            optimized_query: transformed.semantic_query,
            filters: transformed.filters,
            final_response,
        })
    }

    pub async fn run_input(&self, user_input: &str) -> Result<MatchResponse> {
        self.run(&MatchRequest::new(user_input)).await
    }
}
