//! Scoring Rules & Constants
//!
//! Fixed-rule baseline used until a trained model replaces it.
//! Only data lives here; evaluation is in `scorer`.

use crate::models::EventType;

// ============================================================================
// SCORES
// ============================================================================

/// Access to a decoy (honeypot) resource
pub const DECOY_ACCESS_SCORE: f64 = 0.99;

/// Write into a known data-staging directory
pub const STAGING_WRITE_SCORE: f64 = 0.85;

/// Launch of a known lateral-movement / discovery tool
pub const LATERAL_MOVEMENT_SCORE: f64 = 0.60;

/// Score for everything else. Must stay above zero so threshold
/// comparisons downstream keep a strict ordering.
pub const BASELINE_SCORE: f64 = 0.05;

// ============================================================================
// INDICATORS
// ============================================================================

/// Path fragments of directories commonly used to stage data before exfiltration
pub const STAGING_PATH_MARKERS: &[&str] = &["C:\\Users\\Public"];

/// Command tokens of tools used for lateral movement or discovery
pub const LATERAL_MOVEMENT_TOOLS: &[&str] = &["wmic"];

/// Context key holding the written file path for FILE_WRITE
pub const FILE_PATH_KEY: &str = "filePath";

/// Context key holding the command line for PROCESS_LAUNCH
pub const COMMAND_KEY: &str = "command";

// ============================================================================
// RULE DEFINITION
// ============================================================================

/// Predicate over `contextData`
#[derive(Debug, Clone)]
pub enum ContextMatch {
    /// Matches any context
    Any,
    /// String field contains one of the needles (case-sensitive)
    FieldContains {
        field: &'static str,
        needles: &'static [&'static str],
    },
}

/// One independent scoring rule: event type + context predicate → score
#[derive(Debug, Clone)]
pub struct ScoringRule {
    pub name: &'static str,
    pub event_type: EventType,
    pub context: ContextMatch,
    pub score: f64,
}

/// Default rule set, in priority order
pub fn default_rules() -> Vec<ScoringRule> {
    vec![
        ScoringRule {
            name: "decoy_access",
            event_type: EventType::DecoyAccess,
            context: ContextMatch::Any,
            score: DECOY_ACCESS_SCORE,
        },
        ScoringRule {
            name: "staging_directory_write",
            event_type: EventType::FileWrite,
            context: ContextMatch::FieldContains {
                field: FILE_PATH_KEY,
                needles: STAGING_PATH_MARKERS,
            },
            score: STAGING_WRITE_SCORE,
        },
        ScoringRule {
            name: "lateral_movement_tool",
            event_type: EventType::ProcessLaunch,
            context: ContextMatch::FieldContains {
                field: COMMAND_KEY,
                needles: LATERAL_MOVEMENT_TOOLS,
            },
            score: LATERAL_MOVEMENT_SCORE,
        },
    ]
}
