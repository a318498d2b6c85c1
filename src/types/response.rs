//! Typed view of a `generateContent` response.
//!
//! Response shape: `{ candidates: [{ content: { parts, role }, finishReason }],
//! usageMetadata }`. Parts are ordered; a reply may interleave text and
//! `functionCall` parts.

use serde::{Deserialize, Serialize};

use super::message::{Content, Part};
use super::tool::FunctionCall;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u64,
    #[serde(default)]
    pub candidates_token_count: u64,
    #[serde(default)]
    pub total_token_count: u64,
}

impl GenerateResponse {
    /// Ordered parts of the first candidate.
    pub fn parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated text parts of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self.parts().iter().filter_map(Part::as_text).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.join(""))
        }
    }

    /// Tool invocations requested by the first candidate, in order.
    pub fn function_calls(&self) -> Vec<&FunctionCall> {
        self.parts().iter().filter_map(Part::as_function_call).collect()
    }

    /// Normalized finish reason: `STOP` → `stop`, `MAX_TOKENS` → `length`,
    /// `SAFETY`/`RECITATION` → `content_filter`, anything else lowercased.
    pub fn finish_reason(&self) -> Option<String> {
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .map(|r| match r {
                "STOP" => "stop".to_string(),
                "MAX_TOKENS" => "length".to_string(),
                "SAFETY" | "RECITATION" => "content_filter".to_string(),
                other => other.to_lowercase(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: serde_json::Value) -> GenerateResponse {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn text_reply() {
        let resp = parse(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "I control lights." }], "role": "model" },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 5,
                "candidatesTokenCount": 4,
                "totalTokenCount": 9
            }
        }));
        assert_eq!(resp.text().as_deref(), Some("I control lights."));
        assert!(resp.function_calls().is_empty());
        assert_eq!(resp.finish_reason().as_deref(), Some("stop"));
        assert_eq!(resp.usage_metadata.unwrap().total_token_count, 9);
    }

    #[test]
    fn function_call_reply() {
        let resp = parse(json!({
            "candidates": [{
                "content": {
                    "parts": [{ "functionCall": { "name": "square", "args": { "side": 5 } } }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }));
        let calls = resp.function_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "square");
        assert_eq!(calls[0].args["side"], 5);
        assert!(resp.text().is_none());
    }

    #[test]
    fn interleaved_parts_keep_order() {
        let resp = parse(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Calling the tool now. " },
                        { "functionCall": { "name": "enable_lights", "args": {} } },
                        { "text": "Done." }
                    ],
                    "role": "model"
                }
            }]
        }));
        assert_eq!(resp.parts().len(), 3);
        assert_eq!(resp.text().as_deref(), Some("Calling the tool now. Done."));
        assert_eq!(resp.function_calls()[0].name, "enable_lights");
    }

    #[test]
    fn empty_candidates() {
        let resp = parse(json!({}));
        assert!(resp.parts().is_empty());
        assert!(resp.text().is_none());
        assert!(resp.finish_reason().is_none());
    }

    #[test]
    fn safety_finish_reason_normalizes() {
        let resp = parse(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }));
        assert_eq!(resp.finish_reason().as_deref(), Some("content_filter"));
    }
}
