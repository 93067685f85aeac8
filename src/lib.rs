//! PropMatch: match free-text housing requests to a property corpus
//!
//! A request flows through three stages: the query transformer splits it into a
//! semantic query and hard filters, the hybrid search tool retrieves by vector
//! similarity and filters on metadata, and the match scorer asks a language model
//! to rate each survivor. See [`rag::MatchPipeline`].

pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod errors;
pub mod index;
pub mod ingest;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;

#[cfg(test)]
mod models_tests;

pub use config::AppConfig;
pub use errors::*;
