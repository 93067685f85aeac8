//! Chat-completion clients for the supported LLM providers

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::LanguageModel;
use crate::config::is_ollama_endpoint;
use crate::config::AppConfig;
use crate::errors::PropMatchError;
use crate::errors::Result;

/// Supported chat providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// `OpenAI`-compatible `/chat/completions` (OpenAI, Groq, vLLM, ...)
    OpenAI,
    /// Ollama `/api/chat`
    Ollama,
}

impl LlmProvider {
    /// Pick a provider with the rule the embedding client also uses
    #[must_use]
    pub fn detect(endpoint: &str, key: &str) -> Self {
        if is_ollama_endpoint(endpoint, key) {
            Self::Ollama
        } else {
            Self::OpenAI
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Client for chat completions
#[derive(Clone)]
pub struct LlmService {
    provider: LlmProvider,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    client: Client,
}

impl LlmService {
    /// Create an LLM service from application config
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm.request_timeout_secs))
            .build()
            .map_err(|e| PropMatchError::HttpError(e.to_string()))?;

        Ok(Self {
            provider: LlmProvider::detect(config.llm_endpoint(), config.llm_key()),
            endpoint: config.llm_endpoint().trim_end_matches('/').to_string(),
            api_key: config.llm_key().to_string(),
            model: config.llm_model().to_string(),
            temperature: config.llm.temperature,
            client,
        })
    }

    #[must_use]
    pub const fn provider(&self) -> LlmProvider {
        self.provider
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat_openai(&self, prompt: &str) -> Result<String> {
        #[derive(Serialize)]
        struct OpenAIRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage<'a>>,
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct OpenAIResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            content: Option<String>,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: {}", url);

        let request = OpenAIRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
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
            return Err(PropMatchError::LlmError(format!(
                "Chat API error ({status}): {error_text}"
            )));
        }

        let result: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| PropMatchError::LlmError(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| PropMatchError::LlmError("No choices in response".to_string()))
    }

    async fn chat_ollama(&self, prompt: &str) -> Result<String> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage<'a>>,
            stream: bool,
            options: OllamaOptions,
        }

        #[derive(Serialize)]
        struct OllamaOptions {
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            message: OllamaMessage,
        }

        #[derive(Deserialize)]
        struct OllamaMessage {
            content: String,
        }

        let url = format!("{}/api/chat", self.endpoint);
        debug!("Calling Ollama chat API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
            },
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
            return Err(PropMatchError::LlmError(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| PropMatchError::LlmError(format!("Failed to parse response: {e}")))?;

        Ok(result.message.content)
    }
}

#[async_trait]
impl LanguageModel for LlmService {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        match self.provider {
            LlmProvider::OpenAI => self.chat_openai(prompt).await,
            LlmProvider::Ollama => self.chat_ollama(prompt).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_detection() {
        assert_eq!(
            LlmProvider::detect("http://localhost:11434", "ollama"),
            LlmProvider::Ollama
        );
        assert_eq!(
            LlmProvider::detect("http://localhost:11434", "anything"),
            LlmProvider::Ollama
        );
        assert_eq!(
            LlmProvider::detect("https://api.groq.com/openai/v1", "gsk_test"),
            LlmProvider::OpenAI
        );
    }

    #[test]
    fn test_service_from_config_trims_endpoint() {
        let mut config = AppConfig::default();
        config.llm.llm_endpoint = "https://api.openai.com/v1/".to_string();
        config.llm.llm_key = "sk-test".to_string();

        let service = LlmService::new(&config).unwrap();
        assert_eq!(service.provider(), LlmProvider::OpenAI);
        assert_eq!(service.endpoint, "https://api.openai.com/v1");
        assert_eq!(service.model(), "llama3.1:8b");
    }

    #[tokio::test]
    #[ignore = "Requires a running Ollama instance"]
    async fn test_ollama_invoke() {
        let service = LlmService::new(&AppConfig::default()).unwrap();
        let text = service.invoke("Reply with the word ok").await.unwrap();
        assert!(!text.is_empty());
    }
}
