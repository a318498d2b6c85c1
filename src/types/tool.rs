//! Tool calling definitions for the Gemini `generateContent` API.
//!
//! Tool schemas are declared statically by the caller (name, description,
//! JSON Schema parameters) rather than derived from code by reflection.
//! A declaration's identity is its name; names must be unique within the
//! tool set bound to a session.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single callable exposed to the model.
///
/// Serializes to one entry of the wire `tools[].functionDeclarations` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the arguments object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

impl FunctionDeclaration {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            parameters: Some(parameters),
        }
    }

    /// A declaration whose function takes no arguments.
    pub fn no_args(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            parameters: None,
        }
    }

    /// Derive the parameter schema from a Rust type.
    pub fn for_type<T: JsonSchema>(name: impl Into<String>, description: impl Into<String>) -> Self {
        let schema = schemars::schema_for!(T);
        Self {
            name: name.into(),
            description: Some(description.into()),
            parameters: serde_json::to_value(schema.schema).ok(),
        }
    }
}

/// Tool invocation requested by the model.
///
/// Wire shape: the inner object of a `functionCall` part. `args` is always
/// a JSON object keyed by parameter name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// Result of executing a tool, fed back to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

impl FunctionResponse {
    pub fn new(name: impl Into<String>, response: Value) -> Self {
        Self {
            name: name.into(),
            response,
        }
    }

    /// An error outcome, reported to the model instead of aborting the turn.
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: serde_json::json!({ "error": message.into() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn declaration_serializes_schema_verbatim() {
        let decl = FunctionDeclaration::new(
            "set_light_color",
            "Set the light color.",
            json!({
                "type": "object",
                "properties": { "rgb_hex": { "type": "string" } },
                "required": ["rgb_hex"]
            }),
        );
        let v = serde_json::to_value(&decl).unwrap();
        assert_eq!(v["name"], "set_light_color");
        assert_eq!(v["parameters"]["required"][0], "rgb_hex");
    }

    #[test]
    fn no_args_declaration_omits_parameters() {
        let decl = FunctionDeclaration::no_args("enable_lights", "Turn on the lighting system.");
        let v = serde_json::to_value(&decl).unwrap();
        assert!(v.get("parameters").is_none());
    }

    #[test]
    fn derived_schema_includes_fields() {
        #[derive(JsonSchema)]
        #[allow(dead_code)]
        struct SquareArgs {
            side: i64,
        }
        let decl = FunctionDeclaration::for_type::<SquareArgs>("square", "Area of a square.");
        let params = decl.parameters.unwrap();
        assert!(params["properties"]["side"].is_object());
    }

    #[test]
    fn function_call_parses_missing_args() {
        let call: FunctionCall = serde_json::from_value(json!({ "name": "enable_lights" })).unwrap();
        assert_eq!(call.name, "enable_lights");
        assert!(call.args.is_null());
    }
}
