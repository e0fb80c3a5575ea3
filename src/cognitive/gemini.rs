//! Gemini-backed cognitive validator

use async_trait::async_trait;
use std::time::Duration;

use super::parse::parse_generate_response;
use super::prompt::build_request_body;
use super::{CognitiveError, CognitiveValidator};
use crate::models::{CognitiveResult, TelemetryEvent};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest response body read from the reasoning service
pub const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// Error bodies are only kept for debug logging
const ERROR_BODY_PREVIEW_BYTES: usize = 512;

/// Connection settings for the reasoning service
#[derive(Clone)]
pub struct GeminiSettings {
    /// `None` disables the remote call entirely
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub struct GeminiValidator {
    client: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiValidator {
    pub fn new(settings: GeminiSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        Ok(Self { client, settings })
    }

    /// Whether a credential is configured
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model,
        )
    }

    async fn request_verdict(
        &self,
        event: &TelemetryEvent,
        ml_score: f64,
        history: &[TelemetryEvent],
    ) -> Result<CognitiveResult, CognitiveError> {
        let api_key = self.api_key().ok_or(CognitiveError::MissingCredential)?;
        let body = build_request_body(event, ml_score, history);
        let timeout = self.settings.timeout;

        tracing::debug!("Gemini request to model={}", self.settings.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CognitiveError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = read_body(response, ERROR_BODY_PREVIEW_BYTES)
                .await
                .unwrap_or_default();
            return Err(CognitiveError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = read_body(response, MAX_RESPONSE_BYTES)
            .await
            .map_err(|e| CognitiveError::from_reqwest(e, timeout))?;

        parse_generate_response(&text)
    }
}

/// Read at most `limit` bytes of the body; the rest is dropped.
async fn read_body(mut response: reqwest::Response, limit: usize) -> Result<String, reqwest::Error> {
    let mut buf: Vec<u8> = Vec::new();

    while let Some(chunk) = response.chunk().await? {
        let room = limit - buf.len();
        if chunk.len() > room {
            buf.extend_from_slice(&chunk[..room]);
            break;
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[async_trait]
impl CognitiveValidator for GeminiValidator {
    async fn validate(
        &self,
        event: &TelemetryEvent,
        ml_score: f64,
        history: &[TelemetryEvent],
    ) -> CognitiveResult {
        if !self.is_configured() {
            tracing::warn!(
                event_id = %event.event_id,
                "Reasoning service credential missing, keeping ML score {:.2}",
                ml_score
            );
            return CognitiveResult::fallback(ml_score, CognitiveError::MissingCredential);
        }

        match self.request_verdict(event, ml_score, history).await {
            Ok(result) => {
                tracing::info!(
                    event_id = %event.event_id,
                    decision = %result.decision,
                    confidence = result.confidence_score,
                    "Cognitive validation completed"
                );
                result
            }
            Err(err) => {
                if let CognitiveError::Status { body, .. } = &err {
                    tracing::debug!("Reasoning service error body: {}", body);
                }
                tracing::error!(event_id = %event.event_id, "Validation processing error: {}", err);
                CognitiveResult::fallback(ml_score, format!("cognitive validation failed: {}", err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Decision;
    use crate::test_support::{spawn_stub, unreachable_url};
    use axum::http::StatusCode;
    use serde_json::json;

    fn event() -> TelemetryEvent {
        serde_json::from_value(json!({
            "eventId": "evt-42",
            "endpointId": "HR-LAPTOP-14",
            "userId": "sara.smith",
            "eventType": "DECOY_ACCESS",
            "timestamp": 1,
            "contextData": {}
        }))
        .unwrap()
    }

    fn settings(base_url: &str, api_key: Option<&str>) -> GeminiSettings {
        GeminiSettings {
            api_key: api_key.map(str::to_string),
            model: "gemini-test".to_string(),
            base_url: base_url.to_string(),
            timeout: Duration::from_millis(500),
        }
    }

    fn envelope(answer: serde_json::Value) -> String {
        json!({ "candidates": [{ "content": { "parts": [{ "text": answer.to_string() }] } }] })
            .to_string()
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits() {
        let stub = spawn_stub(StatusCode::OK, envelope(json!({})), Duration::ZERO).await;

        for key in [None, Some(""), Some("   ")] {
            let validator = GeminiValidator::new(settings(&stub.base_url, key)).unwrap();
            let result = validator.validate(&event(), 0.99, &[]).await;

            assert_eq!(result.confidence_score, 0.99);
            assert_eq!(result.decision, Decision::FalsePositive);
            assert!(result.analysis_summary.contains("credential is missing"));
        }
        assert_eq!(stub.hits(), 0);
    }

    #[tokio::test]
    async fn test_successful_validation() {
        let answer = json!({
            "analysis_summary": "Decoy file read interactively; likely credential hunting.",
            "confidence_score": 0.95,
            "decision": "REAL"
        });
        let stub = spawn_stub(StatusCode::OK, envelope(answer), Duration::ZERO).await;
        let validator = GeminiValidator::new(settings(&stub.base_url, Some("secret-key"))).unwrap();

        let result = validator.validate(&event(), 0.99, &[]).await;
        assert_eq!(result.decision, Decision::Real);
        assert_eq!(result.confidence_score, 0.95);

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path_and_query, "/models/gemini-test:generateContent");
        assert_eq!(requests[0].headers["x-goog-api-key"], "secret-key");

        let sent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert!(sent["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("ML Anomaly Score: 0.99"));
    }

    #[tokio::test]
    async fn test_error_status_falls_back_to_ml_score() {
        let stub = spawn_stub(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"boom"}"#,
            Duration::ZERO,
        )
        .await;
        let validator = GeminiValidator::new(settings(&stub.base_url, Some("k"))).unwrap();

        let result = validator.validate(&event(), 0.85, &[]).await;
        assert_eq!(result.confidence_score, 0.85);
        assert_eq!(result.decision, Decision::FalsePositive);
        assert!(result.analysis_summary.contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_unparsable_answer_falls_back() {
        let stub = spawn_stub(
            StatusCode::OK,
            json!({ "candidates": [{ "content": { "parts": [{ "text": "not json at all" }] } }] })
                .to_string(),
            Duration::ZERO,
        )
        .await;
        let validator = GeminiValidator::new(settings(&stub.base_url, Some("k"))).unwrap();

        let result = validator.validate(&event(), 0.99, &[]).await;
        assert_eq!(result.confidence_score, 0.99);
        assert!(result.analysis_summary.contains("malformed answer"));
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let stub = spawn_stub(StatusCode::OK, envelope(json!({})), Duration::from_secs(3)).await;
        let validator = GeminiValidator::new(settings(&stub.base_url, Some("k"))).unwrap();

        let started = std::time::Instant::now();
        let result = validator.validate(&event(), 0.99, &[]).await;
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(result.confidence_score, 0.99);
        assert!(result.analysis_summary.contains("did not answer"));
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back_without_leaking_key() {
        let base = unreachable_url().await;
        let validator = GeminiValidator::new(settings(&base, Some("super-secret"))).unwrap();

        let result = validator.validate(&event(), 0.9, &[]).await;
        assert_eq!(result.confidence_score, 0.9);
        assert_eq!(result.decision, Decision::FalsePositive);
        assert!(!result.analysis_summary.is_empty());
        assert!(!result.analysis_summary.contains("super-secret"));
    }

    #[tokio::test]
    async fn test_large_error_body_is_bounded() {
        let huge = "x".repeat(4 * MAX_RESPONSE_BYTES);
        let stub = spawn_stub(StatusCode::BAD_GATEWAY, huge, Duration::ZERO).await;
        let validator = GeminiValidator::new(settings(&stub.base_url, Some("k"))).unwrap();

        let err = validator.request_verdict(&event(), 0.99, &[]).await.unwrap_err();
        match err {
            CognitiveError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), ERROR_BODY_PREVIEW_BYTES);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_oversized_answer_is_cut_and_falls_back() {
        let padding = "y".repeat(2 * MAX_RESPONSE_BYTES);
        let answer = json!({
            "analysis_summary": padding,
            "confidence_score": 0.1,
            "decision": "FP"
        });
        let stub = spawn_stub(StatusCode::OK, envelope(answer), Duration::ZERO).await;
        let validator = GeminiValidator::new(settings(&stub.base_url, Some("k"))).unwrap();

        let body = read_body(
            reqwest::get(format!("{}/any", stub.base_url)).await.unwrap(),
            MAX_RESPONSE_BYTES,
        )
        .await
        .unwrap();
        assert_eq!(body.len(), MAX_RESPONSE_BYTES);

        // truncated envelope no longer parses
        let result = validator.validate(&event(), 0.9, &[]).await;
        assert_eq!(result.confidence_score, 0.9);
        assert_eq!(result.decision, Decision::FalsePositive);
    }

    #[test]
    fn test_debug_redacts_key() {
        let s = settings("http://x", Some("super-secret"));
        assert!(!format!("{:?}", s).contains("super-secret"));
    }
}
