//! Prompt construction for the reasoning service

use serde_json::{json, Value};

use crate::models::TelemetryEvent;

/// Role instruction sent with every request
pub const SYSTEM_INSTRUCTION: &str = "You are a highly specialized L3 Security Analyst (AURA Cognitive Analyst). \
Your goal is to validate if an automated anomaly alert is a genuine attack (REAL) or a False Positive (FP) based on the full context. \
Provide a concise, single-paragraph analysis (max 50 words) and output a strict JSON format: \
{\"analysis_summary\": string, \"confidence_score\": number between 0.0 and 1.0, \"decision\": \"REAL\" or \"FP\"}.";

/// Longest identifier copied into the prompt
const MAX_FIELD_CHARS: usize = 128;

/// At most this many prior events are listed, most recent last
pub const MAX_HISTORY_IN_PROMPT: usize = 10;

pub fn build_user_prompt(event: &TelemetryEvent, ml_score: f64, history: &[TelemetryEvent]) -> String {
    let mut prompt = format!(
        "CONTEXTUAL DATA:\n\
         Endpoint ID: {}\n\
         User ID: {}\n\
         Event Type: {}\n\
         ML Anomaly Score: {:.2}\n",
        bounded(&event.endpoint_id),
        bounded(event.user_id.as_deref().unwrap_or("unknown")),
        bounded(event.event_type.as_str()),
        ml_score,
    );

    if !history.is_empty() {
        let skip = history.len().saturating_sub(MAX_HISTORY_IN_PROMPT);
        prompt.push_str("PRIOR EVENTS (oldest first):\n");
        for prior in &history[skip..] {
            prompt.push_str(&format!(
                "- {} at {}\n",
                bounded(prior.event_type.as_str()),
                prior.timestamp
            ));
        }
    }

    prompt
}

/// `generateContent` request body
pub fn build_request_body(event: &TelemetryEvent, ml_score: f64, history: &[TelemetryEvent]) -> Value {
    json!({
        "system_instruction": {
            "parts": [{ "text": SYSTEM_INSTRUCTION }],
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": build_user_prompt(event, ml_score, history) }],
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
        },
    })
}

fn bounded(value: &str) -> String {
    value.chars().take(MAX_FIELD_CHARS).collect()
}
