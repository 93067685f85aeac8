//! Embedding generation service with preprocessing and batch splitting

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::client::EmbeddingClient;
use super::client::EmbeddingProvider;
use super::preprocess_text_for_embedding;
use super::Embedder;
use super::EmbeddingConfig;
use crate::errors::PropMatchError;
use crate::errors::Result;

/// Service for generating embeddings
pub struct EmbeddingService {
    client: Arc<EmbeddingClient>,
    config: EmbeddingConfig,
}

impl EmbeddingService {
    /// Create a new embedding service
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        Self::from_config(EmbeddingConfig::from_app_config(config))
    }

    /// Create from custom config
    pub fn from_config(config: EmbeddingConfig) -> Result<Self> {
        let client = EmbeddingClient::new(
            config.provider,
            config.model.clone(),
            config.endpoint.clone(),
            config.api_key.clone(),
            config.timeout,
        )?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    fn check_dimension(&self, embedding: &[f32]) -> Result<()> {
        if embedding.len() == self.config.dimension {
            Ok(())
        } else {
            Err(PropMatchError::EmbeddingError(format!(
                "Model {} returned {} dimensions, expected {}",
                self.config.model,
                embedding.len(),
                self.config.dimension
            )))
        }
    }

    /// Get the model name
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the provider
    #[must_use]
    pub const fn provider(&self) -> EmbeddingProvider {
        self.config.provider
    }
}

#[async_trait]
impl Embedder for EmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let processed = preprocess_text_for_embedding(text)?;
        let embedding = self.client.generate(&processed).await?;
        self.check_dimension(&embedding)?;
        Ok(embedding)
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let processed = texts
            .iter()
            .map(|t| preprocess_text_for_embedding(t))
            .collect::<Result<Vec<String>>>()?;

        let mut embeddings = Vec::with_capacity(processed.len());
        for chunk in processed.chunks(self.config.batch_size) {
            debug!("Embedding chunk of {} texts", chunk.len());
            let chunk_embeddings = self
                .client
                .generate_batch(chunk.iter().map(String::as_str).collect())
                .await?;
            for embedding in &chunk_embeddings {
                self.check_dimension(embedding)?;
            }
            embeddings.extend(chunk_embeddings);
        }

        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn service(dimension: usize) -> EmbeddingService {
        EmbeddingService::from_config(EmbeddingConfig {
            provider: EmbeddingProvider::Ollama,
            model: "all-minilm".to_string(),
            dimension,
            batch_size: 8,
            endpoint: "http://127.0.0.1:9".to_string(),
            api_key: None,
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn test_dimension_check() {
        let service = service(3);
        assert!(service.check_dimension(&[0.0, 1.0, 2.0]).is_ok());
        assert!(service.check_dimension(&[0.0, 1.0]).is_err());
        assert_eq!(service.dimension(), 3);
    }

    #[tokio::test]
    async fn test_empty_batch_skips_network() {
        let service = service(3);
        assert!(service.embed_batch(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_before_network() {
        let service = service(3);
        let err = service.embed("   ").await.unwrap_err();
        assert!(matches!(err, PropMatchError::EmbeddingError(_)));
    }
}
