//! Embeddings generation module
//!
//! Turns property documents and semantic queries into vectors. Providers:
//! - `OpenAI`-compatible endpoints (OpenAI, Together, vLLM, ...)
//! - Ollama (local models such as `all-minilm`)
//!
//! # Examples
//!
//! ```rust,no_run
//! use propmatch::config::AppConfig;
//! use propmatch::embeddings::Embedder;
//! use propmatch::embeddings::EmbeddingService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = EmbeddingService::new(&config)?;
//!
//!     let embedding = service.embed("Sunny two-bedroom near the beach").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod generator;
pub mod text_preprocessing;

use std::time::Duration;

use async_trait::async_trait;
pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
pub use generator::EmbeddingService;
pub use text_preprocessing::preprocess_text_for_embedding;

use crate::errors::Result;

/// Anything that can map text to a fixed-width vector
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed many texts; output order matches input order
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    fn dimension(&self) -> usize;
}

/// Configuration for embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: usize,
    pub batch_size: usize,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl EmbeddingConfig {
    pub fn from_app_config(config: &crate::config::AppConfig) -> Self {
        let provider = if config.uses_ollama() {
            EmbeddingProvider::Ollama
        } else {
            EmbeddingProvider::OpenAI
        };

        Self {
            provider,
            model: config.embedding_model().to_string(),
            dimension: config.embedding_dimension(),
            batch_size: config.embeddings.batch_size.max(1),
            endpoint: config.llm_endpoint().to_string(),
            api_key: if provider == EmbeddingProvider::OpenAI {
                Some(config.llm_key().to_string())
            } else {
                None
            },
            timeout: Duration::from_secs(config.llm.request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_provider_from_default_config() {
        let config = EmbeddingConfig::from_app_config(&AppConfig::default());
        assert_eq!(config.provider, EmbeddingProvider::Ollama);
        assert!(config.api_key.is_none());
        assert_eq!(config.dimension, 384);
    }

    #[test]
    fn test_remote_endpoint_uses_openai_with_key() {
        let mut app = AppConfig::default();
        app.llm.llm_endpoint = "https://api.openai.com/v1".to_string();
        app.llm.llm_key = "sk-test".to_string();

        let config = EmbeddingConfig::from_app_config(&app);
        assert_eq!(config.provider, EmbeddingProvider::OpenAI);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_provider_agrees_with_chat_client() {
        use crate::llm::LlmProvider;

        for (endpoint, key) in [
            ("http://127.0.0.1:11434", ""),
            ("http://localhost:11434/", "anything"),
            ("http://localhost:8000/v1", ""),
            ("http://10.0.0.5:8000/v1", "ollama"),
            ("https://api.openai.com/v1", "sk-test"),
        ] {
            let mut app = AppConfig::default();
            app.llm.llm_endpoint = endpoint.to_string();
            app.llm.llm_key = key.to_string();

            let embeddings = EmbeddingConfig::from_app_config(&app).provider;
            let chat = LlmProvider::detect(endpoint, key);
            let expected_ollama = endpoint.contains(":11434") || key == "ollama";
            assert_eq!(embeddings == EmbeddingProvider::Ollama, expected_ollama, "{endpoint}");
            assert_eq!(chat == LlmProvider::Ollama, expected_ollama, "{endpoint}");
        }
    }
}
