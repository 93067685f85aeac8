//! Property matching pipeline
//!
//! Three stages run in order for every request:
//! - [`QueryTransformer`] splits free text into a semantic query and hard filters
//! - [`HybridSearchTool`] retrieves by similarity and applies the filters
//! - [`MatchScorer`] rates each survivor and sorts by score
//!
//! # Examples
//!
//! ```rust,no_run
//! use propmatch::config::AppConfig;
//! use propmatch::models::MatchRequest;
//! use propmatch::rag::MatchPipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let pipeline = MatchPipeline::from_config(&config).await?;
//!     pipeline.ensure_ready().await?;
//!
//!     let request = MatchRequest::from_preferences("$500k", 2, "modern apartment near the beach");
//!     let response = pipeline.run(&request).await?;
//!     for m in &response.final_response {
//!         println!("{} scored {}: {}", m.id, m.score, m.reason);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod pipeline;
pub mod scorer;
pub mod search;
pub mod transformer;

pub use pipeline::MatchPipeline;
pub use scorer::parse_score_response;
pub use scorer::MatchScorer;
pub use scorer::ScoreVerdict;
pub use search::HybridSearchTool;
pub use transformer::parse_transform_response;
pub use transformer::QueryTransformer;
pub use transformer::TransformedQuery;
