//! Telemetry scoring handler

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::models::{IngestAck, TelemetryEvent};
use crate::{AppResult, AppState};

/// Score one telemetry event.
///
/// Returns 202 once the event is well-formed, whatever happens downstream.
pub async fn ingest(
    State(state): State<AppState>,
    payload: Result<Json<TelemetryEvent>, JsonRejection>,
) -> AppResult<(StatusCode, Json<IngestAck>)> {
    let Json(event) = payload?;
    event.validate()?;

    let report = state.pipeline.process(event).await;

    tracing::debug!(
        alert_id = %report.alert.alert_id,
        escalated = report.escalated(),
        enforced = report.enforced(),
        "Event processed"
    );

    Ok((StatusCode::ACCEPTED, Json(report.ack())))
}
