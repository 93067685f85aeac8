//! Embedding API clients for various providers

use std::time::Duration;

use futures::stream::StreamExt;
use futures::stream::{
    self,
};
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::errors::PropMatchError;
use crate::errors::Result;

/// Concurrent requests used to emulate batching against Ollama
const OLLAMA_BATCH_CONCURRENCY: usize = 16;

/// Supported embedding providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// `OpenAI`-compatible embeddings API
    OpenAI,
    /// Ollama local embeddings
    Ollama,
}

/// Client for generating embeddings from various providers
pub struct EmbeddingClient {
    provider: EmbeddingProvider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(
        provider: EmbeddingProvider,
        model: String,
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PropMatchError::HttpError(e.to_string()))?;

        Ok(Self {
            provider,
            model,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    /// Generate embedding for a single text
    ///
    /// # Errors
    /// - API request failures (network errors, timeouts, authentication failures)
    /// - Invalid API responses (malformed JSON, missing embedding)
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        match self.provider {
            EmbeddingProvider::OpenAI => {
                let mut embeddings = self.generate_batch_openai(vec![text]).await?;
                embeddings.pop().ok_or_else(|| {
                    PropMatchError::EmbeddingError("No embedding in response".to_string())
                })
            }
            EmbeddingProvider::Ollama => self.generate_ollama(text).await,
        }
    }

    /// Generate embeddings for multiple texts in batch, preserving input order
    pub async fn generate_batch(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        match self.provider {
            EmbeddingProvider::OpenAI => self.generate_batch_openai(texts).await,
            EmbeddingProvider::Ollama => {
                // Ollama has no batch endpoint; buffered keeps results in input order
                let concurrency = texts.len().clamp(1, OLLAMA_BATCH_CONCURRENCY);
                let owned: Vec<String> = texts.into_iter().map(str::to_owned).collect();
                let results: Vec<Result<Vec<f32>>> = stream::iter(owned)
                    .map(|text| async move { self.generate_ollama(&text).await })
                    .buffered(concurrency)
                    .collect()
                    .await;

                results.into_iter().collect()
            }
        }
    }

    /// Generate embeddings in batch using an `OpenAI`-compatible API
    async fn generate_batch_openai(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            PropMatchError::ConfigError("Embedding API key not provided".to_string())
        })?;

        #[derive(Serialize)]
        struct OpenAIBatchRequest<'a> {
            input: Vec<&'a str>,
            model: &'a str,
        }

        #[derive(Deserialize)]
        struct OpenAIResponse {
            data: Vec<EmbeddingData>,
        }

        #[derive(Deserialize)]
        struct EmbeddingData {
            index: usize,
            embedding: Vec<f32>,
        }

        let expected = texts.len();
        let url = format!("{}/embeddings", self.endpoint);
        debug!("Calling embeddings API: {} items", expected);

        let request = OpenAIBatchRequest {
            input: texts,
            model: &self.model,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PropMatchError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PropMatchError::EmbeddingError(format!(
                "Embeddings API error ({status}): {error_text}"
            )));
        }

        let mut result: OpenAIResponse = response.json().await.map_err(|e| {
            PropMatchError::EmbeddingError(format!("Failed to parse response: {e}"))
        })?;

        if result.data.len() != expected {
            return Err(PropMatchError::EmbeddingError(format!(
                "Expected {expected} embeddings, got {}",
                result.data.len()
            )));
        }

        result.data.sort_by_key(|d| d.index);
        Ok(result.data.into_iter().map(|d| d.embedding).collect())
    }

    /// Generate embedding using Ollama API
    async fn generate_ollama(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            embedding: Vec<f32>,
        }

        let url = format!("{}/api/embeddings", self.endpoint);
        debug!("Calling Ollama embeddings API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PropMatchError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PropMatchError::EmbeddingError(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response.json().await.map_err(|e| {
            PropMatchError::EmbeddingError(format!("Failed to parse response: {e}"))
        })?;

        Ok(result.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_openai_requires_api_key() {
        let client = EmbeddingClient::new(
            EmbeddingProvider::OpenAI,
            "text-embedding-3-small".to_string(),
            "http://127.0.0.1:9".to_string(),
            None,
            Duration::from_secs(1),
        )
        .unwrap();

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, PropMatchError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_ollama_batch_fans_out_per_text() {
        let client = EmbeddingClient::new(
            EmbeddingProvider::Ollama,
            "all-minilm".to_string(),
            "http://127.0.0.1:9".to_string(),
            None,
            Duration::from_secs(1),
        )
        .unwrap();

        let empty = client.generate_batch(Vec::new()).await.unwrap();
        assert!(empty.is_empty());

        let texts = vec![String::from("garden flat"), String::from("beach house")];
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        assert!(client.generate_batch(refs).await.is_err());
    }

    #[tokio::test]
    #[ignore = "Requires a running Ollama instance"]
    async fn test_ollama_embedding() {
        let client = EmbeddingClient::new(
            EmbeddingProvider::Ollama,
            "all-minilm".to_string(),
            "http://localhost:11434".to_string(),
            None,
            Duration::from_secs(30),
        )
        .unwrap();

        let embedding = client.generate("Hello, world!").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }
}
