//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: i64,
    cognitive_validation: &'static str,
    scoring_threshold: f64,
    enforce_threshold: f64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let thresholds = state.pipeline.config();

    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        cognitive_validation: if state.cognitive_enabled { "enabled" } else { "fallback-only" },
        scoring_threshold: thresholds.scoring_threshold,
        enforce_threshold: thresholds.enforce_threshold,
    })
}
