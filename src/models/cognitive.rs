//! Cognitive validation verdict

use serde::{Deserialize, Serialize};

/// Hard cap on the stored analysis text. The reasoning service is asked for
/// roughly 50 words; anything far beyond that is cut here.
pub const MAX_SUMMARY_CHARS: usize = 1024;

/// Verdict of the reasoning service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "REAL")]
    Real,
    #[serde(rename = "FP")]
    FalsePositive,
}

impl Decision {
    /// Lenient parse of the service's answer. Anything that is not clearly
    /// `REAL` is treated as a false positive.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("REAL") {
            Decision::Real
        } else {
            Decision::FalsePositive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Real => "REAL",
            Decision::FalsePositive => "FP",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a cognitive validation call, always well-formed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CognitiveResult {
    pub analysis_summary: String,
    /// Refined confidence, clamped to [0.0, 1.0]
    pub confidence_score: f64,
    pub decision: Decision,
}

impl CognitiveResult {
    pub fn new(analysis_summary: impl Into<String>, confidence_score: f64, decision: Decision) -> Self {
        Self {
            analysis_summary: truncate_summary(analysis_summary.into()),
            confidence_score: clamp_confidence(confidence_score),
            decision,
        }
    }

    /// Result used whenever the reasoning layer cannot be consulted:
    /// the original ML score stands and the decision defaults to FP.
    pub fn fallback(ml_score: f64, diagnostic: impl std::fmt::Display) -> Self {
        Self::new(
            format!("ERROR: {}. Defaulting to ML score.", diagnostic),
            ml_score,
            Decision::FalsePositive,
        )
    }
}

/// Clamp a confidence value into [0.0, 1.0]; NaN and infinities map to 0.0.
pub fn clamp_confidence(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn truncate_summary(mut summary: String) -> String {
    if summary.len() > MAX_SUMMARY_CHARS {
        let mut cut = MAX_SUMMARY_CHARS;
        while !summary.is_char_boundary(cut) {
            cut -= 1;
        }
        summary.truncate(cut);
    }
    summary
}
