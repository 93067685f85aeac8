//! Language-model access for the matching pipeline
//!
//! The pipeline only needs `invoke(prompt) -> text`. [`LanguageModel`] is that
//! seam; [`LlmService`] implements it over OpenAI-compatible and Ollama chat APIs.
//! Responses are untrusted text and are validated by [`response`].

pub mod client;
pub mod prompts;
pub mod response;

use async_trait::async_trait;
pub use client::LlmProvider;
pub use client::LlmService;
pub use prompts::MatchPrompts;
pub use prompts::PromptTemplate;

use crate::errors::Result;

/// A text-in, text-out language model
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send one prompt and return the raw completion text.
    ///
    /// Errors are transport-level failures only; malformed content is the caller's concern.
    async fn invoke(&self, prompt: &str) -> Result<String>;
}
