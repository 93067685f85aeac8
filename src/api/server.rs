//! HTTP server implementation

use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::rag::MatchPipeline;
use crate::Result;

/// Build the application router around a ready pipeline
pub fn build_router(pipeline: Arc<MatchPipeline>, enable_cors: bool) -> Router {
    let state = AppState { pipeline };

    let mut app = Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server.
///
/// The index is checked before binding; an unreachable or empty index stops startup.
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("🚀 Starting PropMatch API server...");

    let pipeline = Arc::new(MatchPipeline::from_config(config).await?);
    pipeline.ensure_ready().await?;

    let app = build_router(pipeline, enable_cors);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /api/health - Health check");
    info!("  POST /api/match  - Match properties to a request");

    axum::serve(listener, app).await?;

    Ok(())
}
