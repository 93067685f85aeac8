use thiserror::Error;

#[derive(Error, Debug)]
pub enum PropMatchError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Vector index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, PropMatchError>;

/// Why a language-model response could not be turned into the expected structure.
///
/// These are never fatal: callers map them onto their fallback branch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseParseError {
    #[error("no JSON object found in model output")]
    NoJson,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("missing or invalid field `{0}`")]
    InvalidField(&'static str),
}
