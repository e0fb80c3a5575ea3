//! Decision fusion: thresholds and the final confidence rule

use crate::models::CognitiveResult;

/// Once escalation happened the verdict's score replaces the ML score,
/// fallback verdicts included.
pub fn fuse(ml_score: f64, verdict: Option<&CognitiveResult>) -> f64 {
    match verdict {
        Some(v) => v.confidence_score,
        None => ml_score,
    }
}

pub fn should_escalate(ml_score: f64, scoring_threshold: f64) -> bool {
    ml_score >= scoring_threshold
}

pub fn should_enforce(aura_confidence_score: f64, enforce_threshold: f64) -> bool {
    aura_confidence_score >= enforce_threshold
}
