//! AURA Intelligence Server
//!
//! Receives telemetry events forwarded by the gateway, scores them and
//! sends enriched alerts back for persistence.

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aura_intelligence::{build_state, config::Config, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aura_intelligence=debug,aura::enforcement=error,tower_http=debug".into());

    let json_logs = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Load configuration
    let config = Config::from_env();

    tracing::info!("AURA Intelligence Server starting...");
    tracing::info!("Configuration: {:?}", config);

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set: escalated events will keep their ML score");
    }

    let state = build_state(&config)?;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
