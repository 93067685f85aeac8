//! API server handler

use crate::AppConfig;
use crate::Result;

pub async fn handle_serve_api(config: &AppConfig, host: String, port: u16, cors: bool) -> Result<()> {
    use crate::api::serve_api;

    println!("🚀 Starting PropMatch API Server");
    println!("================================\n");
    println!("📍 Host: {host}");
    println!("🔌 Port: {port}");
    println!("🌐 CORS: {}", if cors { "Enabled" } else { "Disabled" });
    println!();

    serve_api(config, host, port, cors).await
}
