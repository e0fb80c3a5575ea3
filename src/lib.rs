//! AURA Intelligence Service
//!
//! Scores endpoint telemetry, escalates suspicious events to a reasoning
//! service and forwards the resulting alerts to the persistence gateway.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    AURA INTELLIGENCE                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  POST /intelligence/api/v1/scoring (Axum)                    │
//! │        │                                                     │
//! │        ▼                                                     │
//! │  ┌──────────┐   ≥ 0.8   ┌───────────┐   ┌────────────────┐   │
//! │  │ Scoring  │──────────▶│ Cognitive │──▶│ Fusion (≥ 0.9  │   │
//! │  │ (rules)  │           │ (Gemini)  │   │ → enforcement) │   │
//! │  └────┬─────┘           └───────────┘   └───────┬────────┘   │
//! │       └──────────────────────┬──────────────────┘            │
//! │                              ▼                               │
//! │                     ┌────────────────┐                       │
//! │                     │ Dispatch       │──▶ Gateway            │
//! │                     └────────────────┘                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod scoring;
pub mod cognitive;
pub mod dispatch;
pub mod enforcement;
pub mod pipeline;
pub mod handlers;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::{AppError, AppResult};

use cognitive::GeminiValidator;
use dispatch::GatewayDispatcher;
use enforcement::LogEnforcementHook;
use pipeline::Pipeline;
use scoring::RuleBasedScorer;

/// Intake route for telemetry events
pub const SCORING_ROUTE: &str = "/intelligence/api/v1/scoring";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    /// Whether a reasoning-service credential is configured
    pub cognitive_enabled: bool,
}

/// Wire the production pipeline from configuration
pub fn build_state(config: &config::Config) -> Result<AppState, reqwest::Error> {
    let validator = GeminiValidator::new(config.gemini())?;
    let cognitive_enabled = validator.is_configured();
    let dispatcher = GatewayDispatcher::new(config.gateway())?;

    let pipeline = Pipeline::new(
        config.pipeline(),
        Arc::new(RuleBasedScorer::new()),
        Arc::new(validator),
        Arc::new(dispatcher),
        Arc::new(LogEnforcementHook),
    );

    Ok(AppState {
        pipeline: Arc::new(pipeline),
        cognitive_enabled,
    })
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route(SCORING_ROUTE, post(handlers::scoring::ingest))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
