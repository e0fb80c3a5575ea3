//! Enforcement hook
//!
//! Fired when the fused confidence reaches the enforcement threshold.
//! Nothing is remediated here; the hook only signals an external
//! response workflow.

use crate::models::{AlertRecord, CognitiveResult};

/// Log target reserved for enforcement signals, so they can be routed
/// apart from ordinary service logs.
pub const ENFORCEMENT_TARGET: &str = "aura::enforcement";

pub trait EnforcementHook: Send + Sync {
    fn trigger(&self, alert: &AlertRecord, verdict: &CognitiveResult);
}

/// Default hook: a critical record on `ENFORCEMENT_TARGET`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEnforcementHook;

impl EnforcementHook for LogEnforcementHook {
    fn trigger(&self, alert: &AlertRecord, verdict: &CognitiveResult) {
        tracing::error!(
            target: ENFORCEMENT_TARGET,
            alert_id = %alert.alert_id,
            endpoint_id = %alert.endpoint_id,
            user_id = alert.user_id.as_deref().unwrap_or("unknown"),
            aura_confidence_score = alert.aura_confidence_score,
            decision = %verdict.decision,
            "CRITICAL SOAR ACTION PENDING: encryption risk detected on {} (AURA score {:.2})",
            alert.endpoint_id,
            alert.aura_confidence_score
        );
    }
}
