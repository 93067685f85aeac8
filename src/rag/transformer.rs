//! Query transformation: free text -> semantic query + hard filters

use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::errors::ResponseParseError;
use crate::errors::Result;
use crate::ingest::try_parse_price;
use crate::llm::response::extract_json_object;
use crate::llm::LanguageModel;
use crate::llm::MatchPrompts;
use crate::llm::PromptTemplate;
use crate::models::SearchFilters;

/// Output of the transformer stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedQuery {
    pub semantic_query: String,
    pub filters: SearchFilters,
}

impl TransformedQuery {
    /// The raw input as query, no filters
    pub fn fallback(user_input: &str) -> Self {
        Self {
            semantic_query: user_input.to_string(),
            filters: SearchFilters::default(),
        }
    }
}

pub struct QueryTransformer {
    llm: Arc<dyn LanguageModel>,
    template: PromptTemplate,
}

impl QueryTransformer {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            llm,
            template: MatchPrompts::query_transform(),
        }
    }

    /// Ask the model to split `user_input`.
    ///
    /// Malformed model output yields [`TransformedQuery::fallback`]; only transport
    /// errors are returned.
    pub async fn transform(&self, user_input: &str) -> Result<TransformedQuery> {
        info!("Transforming query: {}", user_input);

        let prompt = self.template.render_with(&[("user_input", user_input)]);
        let response = self.llm.invoke(&prompt).await?;
        debug!("Transformer raw response: {}", response);

        let transformed = match parse_transform_response(&response, user_input) {
            Ok(transformed) => transformed,
            Err(e) => {
                warn!("Transformer output unusable ({e}), falling back to raw input");
                TransformedQuery::fallback(user_input)
            }
        };

        info!(
            "Semantic query: {:?} | max_price={} min_bedrooms={}",
            transformed.semantic_query, transformed.filters.max_price, transformed.filters.min_bedrooms
        );
        Ok(transformed)
    }
}

/// Validate a transformer response.
///
/// Only a missing JSON object is an error. Inside the object every field is lenient:
/// a blank or non-string `semantic_query` becomes `user_input`, and each filter that
/// is absent or unreadable becomes 0.
pub fn parse_transform_response(
    content: &str,
    user_input: &str,
) -> std::result::Result<TransformedQuery, ResponseParseError> {
    let object = extract_json_object(content)?;

    let semantic_query = object
        .get("semantic_query")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map_or_else(|| user_input.to_string(), str::to_string);

    let filters = match object.get("filters") {
        Some(Value::Object(filters)) => parse_filters(filters),
        _ => SearchFilters::default(),
    };

    Ok(TransformedQuery {
        semantic_query,
        filters,
    })
}

fn parse_filters(filters: &Map<String, Value>) -> SearchFilters {
    let max_price = filters.get("max_price").map_or(0, lenient_amount);
    let min_bedrooms = filters.get("min_bedrooms").map_or(0, lenient_amount);
    let min_bedrooms = u32::try_from(min_bedrooms).unwrap_or(u32::MAX);

    SearchFilters {
        max_price,
        min_bedrooms,
    }
}

/// Non-negative integer from whatever the model emitted; 0 when unreadable.
/// Out-of-range numbers saturate so an absurd bound still filters.
fn lenient_amount(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or_else(|| {
            // `as` saturates at u64::MAX
            n.as_f64()
                .filter(|f| f.is_finite() && *f > 0.0)
                .map_or(0, |f| f.trunc() as u64)
        }),
        Value::String(s) => try_parse_price(s).unwrap_or(0),
        _ => 0,
    }
}
