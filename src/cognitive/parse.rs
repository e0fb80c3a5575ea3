//! Response decoding for the reasoning service.
//!
//! The answer arrives as text inside a JSON envelope
//! (`candidates[0].content.parts[0].text`), and that text is itself JSON,
//! sometimes wrapped in prose or code fences. Both layers are decoded here
//! so the rest of the crate only sees `CognitiveResult`.

use serde_json::{Map, Value};

use super::CognitiveError;
use crate::models::{CognitiveResult, Decision};

/// Used when the answer has no `analysis_summary`
pub const MISSING_SUMMARY: &str = "No summary provided by the reasoning service.";

/// Decode a full `generateContent` response body.
pub fn parse_generate_response(body: &str) -> Result<CognitiveResult, CognitiveError> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|e| CognitiveError::MalformedEnvelope(e.to_string()))?;

    let text = answer_text(&envelope)?;
    let answer = parse_answer(text)?;
    Ok(verdict_from_answer(&answer))
}

/// Pull the answer text out of the envelope.
pub fn answer_text(envelope: &Value) -> Result<&str, CognitiveError> {
    envelope["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| {
            CognitiveError::MalformedEnvelope("missing candidates[0].content.parts[0].text".into())
        })
}

/// Locate and parse the JSON object embedded in the answer text.
pub fn parse_answer(text: &str) -> Result<Map<String, Value>, CognitiveError> {
    let raw = extract_json_object(text)
        .ok_or_else(|| CognitiveError::MalformedAnswer("no JSON object in answer text".into()))?;

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CognitiveError::MalformedAnswer("answer is not a JSON object".into())),
        Err(e) => Err(CognitiveError::MalformedAnswer(e.to_string())),
    }
}

/// Slice from the first `{` to the last `}`; drops fences and chatter
/// around the object.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Map answer keys onto a verdict. Missing or mistyped keys fall back to
/// their defaults instead of failing.
pub fn verdict_from_answer(answer: &Map<String, Value>) -> CognitiveResult {
    let summary = answer
        .get("analysis_summary")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(MISSING_SUMMARY);

    let confidence = answer
        .get("confidence_score")
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .unwrap_or(0.0);

    let decision = answer
        .get("decision")
        .and_then(Value::as_str)
        .map(Decision::parse_lenient)
        .unwrap_or(Decision::FalsePositive);

    CognitiveResult::new(summary, confidence, decision)
}
