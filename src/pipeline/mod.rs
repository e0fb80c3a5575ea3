//! Scoring Pipeline
//!
//! Per-event orchestration:
//!
//! ```text
//! RECEIVED → SCORED ─┬─ score <  scoring threshold ─→ SKIPPED ───────────────┐
//!                    └─ score >= scoring threshold ─→ ESCALATED ─┬───────────┤
//!                                                               └→ ENFORCED ┤
//!                                                                           ▼
//!                                                        DISPATCHED → DONE
//! ```
//!
//! Every invocation reaches DONE. Collaborator failures are absorbed by the
//! collaborators themselves, so `process` is infallible.

pub mod fusion;


use std::sync::Arc;
use tracing::Instrument;

use crate::cognitive::CognitiveValidator;
use crate::dispatch::AlertDispatcher;
use crate::enforcement::EnforcementHook;
use crate::models::{clamp_confidence, AlertRecord, CognitiveResult, IngestAck, TelemetryEvent};
use crate::scoring::AnomalyScorer;

pub const DEFAULT_SCORING_THRESHOLD: f64 = 0.8;
pub const DEFAULT_ENFORCE_THRESHOLD: f64 = 0.9;

/// Thresholds the orchestrator works with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Escalate to cognitive validation at or above this ML score
    pub scoring_threshold: f64,
    /// Fire the enforcement hook at or above this fused score
    pub enforce_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scoring_threshold: DEFAULT_SCORING_THRESHOLD,
            enforce_threshold: DEFAULT_ENFORCE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Scored,
    Escalated,
    Skipped,
    Enforced,
    Dispatched,
    Done,
}

/// What happened to one event
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// The alert exactly as handed to the dispatcher
    pub alert: AlertRecord,
    /// Verdict, present iff the event was escalated
    pub verdict: Option<CognitiveResult>,
    pub stages: Vec<PipelineStage>,
}

impl PipelineReport {
    pub fn escalated(&self) -> bool {
        self.stages.contains(&PipelineStage::Escalated)
    }

    pub fn enforced(&self) -> bool {
        self.stages.contains(&PipelineStage::Enforced)
    }

    /// Caller-facing acknowledgment; independent of dispatch outcome
    pub fn ack(&self) -> IngestAck {
        IngestAck::accepted(self.alert.alert_id.clone())
    }
}

pub struct Pipeline {
    config: PipelineConfig,
    scorer: Arc<dyn AnomalyScorer>,
    validator: Arc<dyn CognitiveValidator>,
    dispatcher: Arc<dyn AlertDispatcher>,
    enforcement: Arc<dyn EnforcementHook>,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        scorer: Arc<dyn AnomalyScorer>,
        validator: Arc<dyn CognitiveValidator>,
        dispatcher: Arc<dyn AlertDispatcher>,
        enforcement: Arc<dyn EnforcementHook>,
    ) -> Self {
        Self {
            config,
            scorer,
            validator,
            dispatcher,
            enforcement,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one event through the pipeline.
    pub async fn process(&self, event: TelemetryEvent) -> PipelineReport {
        let span = tracing::info_span!(
            "pipeline",
            event_id = %event.event_id,
            endpoint_id = %event.endpoint_id
        );

        self.run(event).instrument(span).await
    }

    async fn run(&self, event: TelemetryEvent) -> PipelineReport {
        let mut stages = vec![PipelineStage::Received];
        tracing::info!(event_type = %event.event_type, "Received scoring request");

        let ml_score = clamp_confidence(self.scorer.score(&event));
        stages.push(PipelineStage::Scored);

        let mut alert = AlertRecord::pending(&event, ml_score);

        let verdict = if fusion::should_escalate(ml_score, self.config.scoring_threshold) {
            stages.push(PipelineStage::Escalated);
            tracing::warn!(
                "ML score ({:.2}) exceeds threshold {:.2}, requesting cognitive validation",
                ml_score,
                self.config.scoring_threshold
            );

            // Correlation slot: no event history is kept yet.
            let history: Vec<TelemetryEvent> = Vec::new();
            let verdict = self.validator.validate(&event, ml_score, &history).await;

            alert.cognitive_analysis = verdict.analysis_summary.clone();
            alert.aura_confidence_score = fusion::fuse(ml_score, Some(&verdict));

            if fusion::should_enforce(alert.aura_confidence_score, self.config.enforce_threshold) {
                stages.push(PipelineStage::Enforced);
                self.enforcement.trigger(&alert, &verdict);
            }

            Some(verdict)
        } else {
            stages.push(PipelineStage::Skipped);
            tracing::debug!("ML score {:.2} below threshold, no escalation", ml_score);
            alert.aura_confidence_score = fusion::fuse(ml_score, None);
            None
        };

        let snapshot = alert.clone();
        self.dispatcher.dispatch(alert).await;
        stages.push(PipelineStage::Dispatched);
        stages.push(PipelineStage::Done);

        PipelineReport {
            alert: snapshot,
            verdict,
            stages,
        }
    }
}
