//! Cognitive Validation
//!
//! Second opinion from an external reasoning service for events whose
//! anomaly score crossed the scoring threshold.
//!
//! ## Structure
//! - `prompt`: system instruction and request body
//! - `parse`: envelope → embedded JSON answer → `CognitiveResult`
//! - `gemini`: `GeminiValidator`, the HTTP client
//!
//! Validators never fail from the caller's point of view: every problem
//! is turned into `CognitiveResult::fallback`.

pub mod prompt;
pub mod parse;
pub mod gemini;

pub use gemini::{GeminiSettings, GeminiValidator};

use async_trait::async_trait;
use std::time::Duration;

use crate::models::{CognitiveResult, TelemetryEvent};

#[async_trait]
pub trait CognitiveValidator: Send + Sync {
    /// Validate an escalated event.
    ///
    /// `history` holds prior events for the same endpoint/user, oldest first.
    async fn validate(
        &self,
        event: &TelemetryEvent,
        ml_score: f64,
        history: &[TelemetryEvent],
    ) -> CognitiveResult;
}

/// Everything that can go wrong while asking the reasoning service.
/// Never leaves the validator.
#[derive(Debug, thiserror::Error)]
pub enum CognitiveError {
    #[error("reasoning service credential is missing")]
    MissingCredential,
    #[error("reasoning service did not answer within {0:?}")]
    Timeout(Duration),
    #[error("request to reasoning service failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("reasoning service returned HTTP {status}")]
    Status { status: u16, body: String },
    #[error("malformed response envelope: {0}")]
    MalformedEnvelope(String),
    #[error("malformed answer: {0}")]
    MalformedAnswer(String),
}

impl CognitiveError {
    /// Classify a reqwest failure. The URL is stripped so it never ends
    /// up in alert text.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            CognitiveError::Timeout(timeout)
        } else {
            CognitiveError::Transport(err.without_url())
        }
    }
}
