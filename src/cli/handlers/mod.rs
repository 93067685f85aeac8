//! CLI command handlers module
//!
//! This module is organized by functional domains:
//! - init: Database schema initialization
//! - index: Corpus loading and indexing
//! - search: Hybrid search without the LLM stages
//! - matching: Full pipeline runs
//! - serve: API server
//! - info: Configuration display

pub mod index;
pub mod info;
pub mod init;
pub mod matching;
pub mod search;
pub mod serve;

use std::sync::Arc;

// Re-export all public handlers
pub use index::*;
pub use info::*;
pub use init::*;
pub use matching::*;
pub use search::*;
pub use serve::*;

use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingService;
use crate::index::PgVectorIndex;
use crate::index::VectorIndex;
use crate::AppConfig;
use crate::Result;

/// Production index handle shared by the index and search commands
async fn connect_index(config: &AppConfig) -> Result<Arc<dyn VectorIndex>> {
    let embedder: Arc<dyn Embedder> = Arc::new(EmbeddingService::new(config)?);
    Ok(Arc::new(PgVectorIndex::connect(config, embedder).await?))
}
