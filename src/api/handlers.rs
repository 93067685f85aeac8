/// API request handlers
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::api::types::MatchApiRequest;
use crate::models::MatchResponse;
use crate::rag::MatchPipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<MatchPipeline>,
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let (status, indexed_properties) = match state.pipeline.ensure_ready().await {
        Ok(count) => ("healthy", count),
        Err(e) => {
            warn!("Health check: {}", e);
            ("degraded", 0)
        }
    };

    Json(ApiResponse::success(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        indexed_properties,
    }))
}

/// Run the matching pipeline (POST /api/match)
pub async fn match_properties(
    State(state): State<AppState>,
    Json(req): Json<MatchApiRequest>,
) -> Result<Json<ApiResponse<MatchResponse>>, StatusCode> {
    let Some(request) = req.into_match_request() else {
        return Ok(Json(ApiResponse::error(
            "Provide `user_input` or at least one of `budget`, `bedrooms`, `preferences`",
        )));
    };
    info!("POST /api/match: {}", request.user_input);

    match state.pipeline.run(&request).await {
        Ok(response) => Ok(Json(ApiResponse::success(response))),
        Err(e) => {
            error!("Error processing match request: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
