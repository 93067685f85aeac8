use pgvector::Vector;
use sqlx::types::Json;

use super::schema::DOCUMENTS_TABLE;
use super::Database;
use crate::models::IndexedDocument;
use crate::models::PropertyMetadata;
use crate::Result;

impl Database {
    /// Insert or replace documents keyed by property id
    pub async fn upsert_documents(
        &self,
        documents: &[IndexedDocument],
        embeddings: Vec<Vec<f32>>,
    ) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        for (doc, embedding) in documents.iter().zip(embeddings) {
            sqlx::query(&format!(
                r"
                INSERT INTO {DOCUMENTS_TABLE} (property_id, content, metadata, embedding)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (property_id)
                DO UPDATE SET
                    content = EXCLUDED.content,
                    metadata = EXCLUDED.metadata,
                    embedding = EXCLUDED.embedding,
                    indexed_at = NOW()
                "
            ))
            .bind(doc.id())
            .bind(&doc.content)
            .bind(Json(&doc.metadata))
            .bind(Vector::from(embedding))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(documents.len())
    }

    /// Nearest documents by cosine distance, closest first
    pub async fn nearest_documents(
        &self,
        query_embedding: Vec<f32>,
        limit: i64,
    ) -> Result<Vec<IndexedDocument>> {
        let rows: Vec<(String, Json<PropertyMetadata>)> = sqlx::query_as(&format!(
            r"
            SELECT content, metadata
            FROM {DOCUMENTS_TABLE}
            ORDER BY embedding <=> $1, property_id
            LIMIT $2
            "
        ))
        .bind(Vector::from(query_embedding))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(content, Json(metadata))| IndexedDocument { content, metadata })
            .collect())
    }

    pub async fn count_documents(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {DOCUMENTS_TABLE}"))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn clear_documents(&self) -> Result<()> {
        sqlx::query(&format!("TRUNCATE {DOCUMENTS_TABLE}"))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
