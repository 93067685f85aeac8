use super::Database;
use crate::PropMatchError;
use crate::Result;

/// Table holding one row per indexed property
pub const DOCUMENTS_TABLE: &str = "property_documents";

impl Database {
    /// Check if database schema is initialized
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT FROM information_schema.tables
                WHERE table_schema = 'public'
                AND table_name = $1
            )
            ",
        )
        .bind(DOCUMENTS_TABLE)
        .fetch_one(&self.pool)
        .await?;

        if !exists {
            tracing::debug!("Missing required table: {}", DOCUMENTS_TABLE);
        }
        Ok(exists)
    }

    /// Verify database schema or return helpful error
    pub async fn verify_schema_or_error(&self) -> Result<()> {
        if !self.is_schema_initialized().await? {
            return Err(PropMatchError::IndexUnavailable(
                "Database schema not initialized. Run `propmatch init` and then `propmatch index <csv>`."
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Initialize database schema
    ///
    /// `dimension` fixes the width of the embedding column; changing models
    /// with a different width requires dropping the table.
    pub async fn init_schema(&self, dimension: usize) -> Result<()> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await?;

        sqlx::query(&format!(
            r"
            CREATE TABLE IF NOT EXISTS {DOCUMENTS_TABLE} (
                property_id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                metadata JSONB NOT NULL,
                embedding VECTOR({dimension}) NOT NULL,
                indexed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            r"
            CREATE INDEX IF NOT EXISTS idx_{DOCUMENTS_TABLE}_embedding
            ON {DOCUMENTS_TABLE} USING hnsw (embedding vector_cosine_ops)
            "
        ))
        .execute(&self.pool)
        .await?;

        tracing::info!("Schema ready: {} (embedding dimension {})", DOCUMENTS_TABLE, dimension);
        Ok(())
    }
}
