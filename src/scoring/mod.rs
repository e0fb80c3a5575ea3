//! Anomaly Scoring
//!
//! First, cheap opinion on every event. The pipeline only depends on the
//! `AnomalyScorer` trait so a trained model can replace the fixed rules.
//!
//! ## Structure
//! - `rules`: scores, indicators and the default rule table
//! - `scorer`: `RuleBasedScorer`, first-match evaluation

pub mod rules;
pub mod scorer;

pub use rules::{ContextMatch, ScoringRule, BASELINE_SCORE};
pub use scorer::RuleBasedScorer;

use crate::models::TelemetryEvent;

/// Maps an event to an anomaly score in `[0.0, 1.0]`.
///
/// Implementations must be pure and total: no I/O, no panics, a value for
/// every event including unknown event types.
pub trait AnomalyScorer: Send + Sync {
    fn score(&self, event: &TelemetryEvent) -> f64;
}
