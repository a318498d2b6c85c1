//! Conversation content types mirroring the Gemini wire format.
//!
//! Gemini conversations use `contents` entries with a role (`user` or
//! `model`) and an ordered list of `parts`. A part is plain text, a
//! `functionCall` requested by the model, or a `functionResponse` fed back
//! by the caller.

use serde::{Deserialize, Serialize};

use super::tool::{FunctionCall, FunctionResponse};

/// Message role. System text is not a role here; it travels in the
/// top-level `systemInstruction` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One element of a `parts` array.
///
/// Externally tagged so that serde produces the wire shapes
/// `{"text": ...}`, `{"functionCall": ...}` and `{"functionResponse": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Part {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "functionCall")]
    FunctionCall(FunctionCall),
    #[serde(rename = "functionResponse")]
    FunctionResponse(FunctionResponse),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Part::FunctionCall(c) => Some(c),
            _ => None,
        }
    }
}

/// One `contents` entry: a role plus its ordered parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::text(text)],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::text(text)],
        }
    }

    /// Tool results go back to the model as user-role parts.
    pub fn function_responses(responses: Vec<FunctionResponse>) -> Self {
        Self {
            role: Role::User,
            parts: responses.into_iter().map(Part::FunctionResponse).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_part_wire_shape() {
        let v = serde_json::to_value(Content::user("Turn the lights on")).unwrap();
        assert_eq!(v["role"], "user");
        assert_eq!(v["parts"][0]["text"], "Turn the lights on");
    }

    #[test]
    fn function_call_part_parses() {
        let part: Part = serde_json::from_value(json!({
            "functionCall": { "name": "square", "args": { "side": 5 } }
        }))
        .unwrap();
        let call = part.as_function_call().unwrap();
        assert_eq!(call.name, "square");
        assert_eq!(call.args["side"], 5);
    }

    #[test]
    fn function_response_wire_shape() {
        let content = Content::function_responses(vec![FunctionResponse::new(
            "square",
            json!({ "area": 25 }),
        )]);
        let v = serde_json::to_value(&content).unwrap();
        assert_eq!(v["role"], "user");
        assert_eq!(v["parts"][0]["functionResponse"]["name"], "square");
        assert_eq!(v["parts"][0]["functionResponse"]["response"]["area"], 25);
    }
}
