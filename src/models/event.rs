//! Telemetry event model

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Event category reported by an endpoint agent.
///
/// The set is open-ended: agents may report types this service has never
/// seen, which are kept verbatim in `Other` and scored as low risk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    DecoyAccess,
    FileWrite,
    ProcessLaunch,
    AuthFail,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::DecoyAccess => "DECOY_ACCESS",
            EventType::FileWrite => "FILE_WRITE",
            EventType::ProcessLaunch => "PROCESS_LAUNCH",
            EventType::AuthFail => "AUTH_FAIL",
            EventType::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for EventType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DECOY_ACCESS" => EventType::DecoyAccess,
            "FILE_WRITE" => EventType::FileWrite,
            "PROCESS_LAUNCH" => EventType::ProcessLaunch,
            "AUTH_FAIL" => EventType::AuthFail,
            _ => EventType::Other(raw),
        }
    }
}

impl From<&str> for EventType {
    fn from(raw: &str) -> Self {
        EventType::from(raw.to_string())
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single telemetry event as submitted by an agent (through the gateway).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    #[validate(length(min = 1, message = "eventId must not be empty"))]
    pub event_id: String,

    #[validate(length(min = 1, message = "endpointId must not be empty"))]
    pub endpoint_id: String,

    #[serde(default)]
    pub user_id: Option<String>,

    #[validate(custom(function = "validate_event_type"))]
    pub event_type: EventType,

    /// Occurrence time on the endpoint (epoch seconds)
    #[serde(default = "receipt_time")]
    pub timestamp: i64,

    /// Type-specific details, e.g. `filePath`, `command`, `operationCount`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub context_data: Map<String, Value>,
}

impl TelemetryEvent {
    /// Look up a string-valued context field. Non-string values count as absent.
    pub fn context_str(&self, key: &str) -> Option<&str> {
        self.context_data.get(key).and_then(Value::as_str)
    }
}

fn validate_event_type(event_type: &EventType) -> Result<(), validator::ValidationError> {
    if event_type.as_str().trim().is_empty() {
        let mut err = validator::ValidationError::new("event_type");
        err.message = Some("eventType must not be empty".into());
        return Err(err);
    }
    Ok(())
}

fn receipt_time() -> i64 {
    chrono::Utc::now().timestamp()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Map<String, Value>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
