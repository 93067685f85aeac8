//! PostgreSQL + pgvector backed index

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use tracing::info;

use super::VectorIndex;
use crate::database::Database;
use crate::embeddings::Embedder;
use crate::errors::Result;
use crate::models::IndexedDocument;

pub struct PgVectorIndex {
    database: Arc<Database>,
    embedder: Arc<dyn Embedder>,
}

impl PgVectorIndex {
    pub fn new(database: Arc<Database>, embedder: Arc<dyn Embedder>) -> Self {
        Self { database, embedder }
    }

    /// Connect using application config and make sure the table exists
    pub async fn connect(config: &crate::config::AppConfig, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let database = Arc::new(Database::from_config(config).await?);
        database.verify_schema_or_error().await?;
        Ok(Self::new(database, embedder))
    }
}

#[async_trait]
impl VectorIndex for PgVectorIndex {
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<IndexedDocument>> {
        debug!("pgvector similarity search: k={}, query={}", k, query);
        let embedding = self.embedder.embed(query).await?;
        self.database.nearest_documents(embedding, k as i64).await
    }

    async fn upsert(&self, documents: &[IndexedDocument]) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }
        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        let written = self.database.upsert_documents(documents, embeddings).await?;
        info!("Upserted {} documents into pgvector index", written);
        Ok(written)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.database.count_documents().await?.max(0) as usize)
    }

    async fn clear(&self) -> Result<()> {
        self.database.clear_documents().await
    }
}
