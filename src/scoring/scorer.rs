//! Rule-based anomaly scorer
//!
//! Evaluates `ScoringRule`s in order; first match wins, otherwise the
//! baseline score applies.

use super::rules::{default_rules, ContextMatch, ScoringRule, BASELINE_SCORE};
use super::AnomalyScorer;
use crate::models::TelemetryEvent;

#[derive(Debug, Clone)]
pub struct RuleBasedScorer {
    rules: Vec<ScoringRule>,
}

impl Default for RuleBasedScorer {
    fn default() -> Self {
        Self { rules: default_rules() }
    }
}

impl RuleBasedScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule with the lowest priority. Its score is clamped into
    /// `[BASELINE_SCORE, 1.0]`.
    pub fn with_rule(mut self, mut rule: ScoringRule) -> Self {
        rule.score = clamp_score(rule.score);
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    /// Name of the rule that fires for this event, if any
    pub fn matching_rule(&self, event: &TelemetryEvent) -> Option<&ScoringRule> {
        self.rules.iter().find(|rule| rule_matches(rule, event))
    }
}

impl AnomalyScorer for RuleBasedScorer {
    fn score(&self, event: &TelemetryEvent) -> f64 {
        match self.matching_rule(event) {
            Some(rule) => {
                tracing::debug!(rule = rule.name, event_id = %event.event_id, "Scoring rule matched");
                rule.score
            }
            None => BASELINE_SCORE,
        }
    }
}

fn rule_matches(rule: &ScoringRule, event: &TelemetryEvent) -> bool {
    if rule.event_type != event.event_type {
        return false;
    }

    match &rule.context {
        ContextMatch::Any => true,
        ContextMatch::FieldContains { field, needles } => match event.context_str(field) {
            Some(value) => needles.iter().any(|needle| value.contains(*needle)),
            None => false,
        },
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(BASELINE_SCORE, 1.0)
    } else {
        BASELINE_SCORE
    }
}
