//! Tool dispatch table.
//!
//! Maps function names returned by the model to local handlers. Arguments
//! are validated against the declared JSON Schema before the handler runs,
//! so a hallucinated or malformed invocation never reaches tool code.
//!
//! Registration order is preserved; [`ToolRegistry::declarations`] yields
//! the tool set in the order it was registered, which is the order bound
//! to a session.

use std::sync::Arc;

use async_trait::async_trait;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use crate::error::Error;
use crate::types::tool::{FunctionCall, FunctionDeclaration, FunctionResponse};
use crate::Result;

/// A locally executable tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute with the model-supplied arguments object.
    async fn call(&self, args: Value) -> Result<Value>;
}

/// Adapter for synchronous closures.
struct FnHandler<F>(F);

#[async_trait]
impl<F> ToolHandler for FnHandler<F>
where
    F: Fn(Value) -> Result<Value> + Send + Sync,
{
    async fn call(&self, args: Value) -> Result<Value> {
        (self.0)(args)
    }
}

struct Registration {
    declaration: FunctionDeclaration,
    schema: Option<JSONSchema>,
    handler: Arc<dyn ToolHandler>,
}

#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<Registration>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Re-registering a name replaces the earlier entry
    /// in place, keeping its position.
    pub fn register(
        &mut self,
        declaration: FunctionDeclaration,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<()> {
        let schema = match &declaration.parameters {
            Some(params) => Some(
                JSONSchema::options()
                    .with_draft(Draft::Draft7)
                    .compile(params)
                    .map_err(|e| {
                        Error::validation(format!(
                            "invalid parameter schema for '{}': {}",
                            declaration.name, e
                        ))
                    })?,
            ),
            None => None,
        };

        let registration = Registration {
            declaration,
            schema,
            handler,
        };
        match self
            .entries
            .iter_mut()
            .find(|e| e.declaration.name == registration.declaration.name)
        {
            Some(existing) => *existing = registration,
            None => self.entries.push(registration),
        }
        Ok(())
    }

    /// Register a synchronous closure as a tool.
    pub fn register_fn<F>(&mut self, declaration: FunctionDeclaration, f: F) -> Result<()>
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.register(declaration, Arc::new(FnHandler(f)))
    }

    /// The registered tool set, in registration order, for binding to a
    /// session.
    pub fn declarations(&self) -> Vec<FunctionDeclaration> {
        self.entries.iter().map(|e| e.declaration.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.declaration.name == name)
    }

    /// Execute a model-requested invocation, rejecting unknown names and
    /// schema-invalid arguments.
    pub async fn try_dispatch(&self, call: &FunctionCall) -> Result<Value> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.declaration.name == call.name)
            .ok_or_else(|| Error::validation(format!("unknown tool '{}'", call.name)))?;

        // The model omits `args` for zero-parameter functions.
        let args = if call.args.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            call.args.clone()
        };

        if let Some(schema) = &entry.schema {
            if let Err(errors) = schema.validate(&args) {
                let detail = errors.map(|e| e.to_string()).collect::<Vec<_>>().join("; ");
                return Err(Error::validation(format!(
                    "arguments for '{}' failed schema validation: {}",
                    call.name, detail
                )));
            }
        }

        tracing::debug!(tool = %call.name, "dispatching tool call");
        entry.handler.call(args).await
    }

    /// Like [`try_dispatch`](Self::try_dispatch), but folds failures into
    /// an error [`FunctionResponse`] so the model hears about them instead
    /// of the turn aborting. Used by the automatic dispatch loop.
    pub async fn dispatch(&self, call: &FunctionCall) -> FunctionResponse {
        match self.try_dispatch(call).await {
            Ok(value) => FunctionResponse::new(&call.name, value),
            Err(e) => {
                tracing::warn!(tool = %call.name, error = %e, "tool call failed");
                FunctionResponse::error(&call.name, e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field(
                "tools",
                &self
                    .entries
                    .iter()
                    .map(|e| e.declaration.name.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square_decl() -> FunctionDeclaration {
        FunctionDeclaration::new(
            "square",
            "Area of a square.",
            json!({
                "type": "object",
                "properties": { "side": { "type": "integer" } },
                "required": ["side"]
            }),
        )
    }

    fn registry_with_square() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry
            .register_fn(square_decl(), |args| {
                let side = args["side"].as_i64().unwrap_or(0);
                Ok(json!({ "area": side * side }))
            })
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn dispatches_valid_call() {
        let registry = registry_with_square();
        let call = FunctionCall {
            name: "square".into(),
            args: json!({ "side": 5 }),
        };
        let value = registry.try_dispatch(&call).await.unwrap();
        assert_eq!(value["area"], 25);
    }

    #[tokio::test]
    async fn rejects_unknown_tool() {
        let registry = registry_with_square();
        let call = FunctionCall {
            name: "circle".into(),
            args: json!({ "radius": 1 }),
        };
        let err = registry.try_dispatch(&call).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn rejects_schema_invalid_arguments() {
        let registry = registry_with_square();
        let call = FunctionCall {
            name: "square".into(),
            args: json!({ "side": "five" }),
        };
        let err = registry.try_dispatch(&call).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn dispatch_folds_errors_into_response() {
        let registry = registry_with_square();
        let call = FunctionCall {
            name: "circle".into(),
            args: json!({}),
        };
        let response = registry.dispatch(&call).await;
        assert_eq!(response.name, "circle");
        assert!(response.response["error"].as_str().unwrap().contains("unknown tool"));
    }

    #[tokio::test]
    async fn null_args_accepted_for_no_arg_tool() {
        let mut registry = ToolRegistry::new();
        registry
            .register_fn(
                FunctionDeclaration::no_args("enable_lights", "Turn on the lighting system."),
                |_| Ok(json!({ "status": "on" })),
            )
            .unwrap();
        let call = FunctionCall {
            name: "enable_lights".into(),
            args: Value::Null,
        };
        let value = registry.try_dispatch(&call).await.unwrap();
        assert_eq!(value["status"], "on");
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let mut registry = registry_with_square();
        registry
            .register_fn(
                FunctionDeclaration::no_args("triangle", "Area of a triangle."),
                |_| Ok(Value::Null),
            )
            .unwrap();
        registry
            .register_fn(square_decl(), |_| Ok(json!({ "area": 0 })))
            .unwrap();
        let names: Vec<String> = registry.declarations().into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["square", "triangle"]);
    }

    #[test]
    fn invalid_parameter_schema_is_rejected() {
        let mut registry = ToolRegistry::new();
        let decl = FunctionDeclaration::new(
            "broken",
            "Bad schema.",
            json!({ "type": 42 }),
        );
        let err = registry.register_fn(decl, |_| Ok(Value::Null)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
