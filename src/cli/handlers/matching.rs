//! Matching pipeline handler

use crate::cli::output::print_info;
use crate::cli::output::print_matches;
use crate::models::MatchRequest;
use crate::rag::MatchPipeline;
use crate::AppConfig;
use crate::PropMatchError;
use crate::Result;

/// Build the pipeline input from either free text or profile fields
pub fn build_match_request(
    input: Option<String>,
    budget: Option<String>,
    bedrooms: Option<u32>,
    preferences: Option<String>,
) -> Result<MatchRequest> {
    if let Some(input) = input.filter(|s| !s.trim().is_empty()) {
        return Ok(MatchRequest::new(input));
    }
    if budget.is_none() && bedrooms.is_none() && preferences.is_none() {
        return Err(PropMatchError::Custom(
            "Provide a request, or at least one of --budget, --bedrooms, --preferences".to_string(),
        ));
    }

    Ok(MatchRequest::from_preferences(
        budget.as_deref().unwrap_or("not specified"),
        bedrooms.unwrap_or(0),
        preferences.as_deref().unwrap_or("none"),
    ))
}

pub async fn handle_match_command(config: &AppConfig, request: MatchRequest, json: bool) -> Result<()> {
    let pipeline = MatchPipeline::from_config(config).await?;
    pipeline.ensure_ready().await?;

    if !json {
        print_info(&format!("🤖 Matching: \"{}\"", request.user_input));
        println!();
    }

    let response = pipeline.run(&request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_matches(&response);
    }
    Ok(())
}
