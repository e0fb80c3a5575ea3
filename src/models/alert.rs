//! Alert record forwarded to the persistence gateway

use serde::{Deserialize, Serialize};

use super::event::TelemetryEvent;

/// Prefix joined with the event id to form the alert id
pub const ALERT_ID_PREFIX: &str = "ALERT-";

/// Alert lifecycle status. This service only ever creates pending alerts;
/// later transitions belong to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertStatus {
    #[serde(rename = "PENDENTE")]
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub alert_id: String,
    pub endpoint_id: String,
    pub user_id: Option<String>,
    /// Alert creation time (epoch seconds), not the event time
    pub creation_timestamp: i64,
    pub ml_score: f64,
    pub cognitive_analysis: String,
    pub aura_confidence_score: f64,
    pub status: AlertStatus,
}

impl AlertRecord {
    /// Derive the alert id for an event id. Same input, same id.
    pub fn alert_id_for(event_id: &str) -> String {
        format!("{}{}", ALERT_ID_PREFIX, event_id)
    }

    /// New pending alert for a scored event, before any escalation
    pub fn pending(event: &TelemetryEvent, ml_score: f64) -> Self {
        Self {
            alert_id: Self::alert_id_for(&event.event_id),
            endpoint_id: event.endpoint_id.clone(),
            user_id: event.user_id.clone(),
            creation_timestamp: chrono::Utc::now().timestamp(),
            ml_score,
            cognitive_analysis: String::new(),
            aura_confidence_score: ml_score,
            status: AlertStatus::Pending,
        }
    }
}

/// Acknowledgment returned to the intake caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestAck {
    pub status: String,
    pub alert_id: String,
}

impl IngestAck {
    pub const ACCEPTED: &'static str = "Accepted for processing";

    pub fn accepted(alert_id: impl Into<String>) -> Self {
        Self {
            status: Self::ACCEPTED.to_string(),
            alert_id: alert_id.into(),
        }
    }
}
