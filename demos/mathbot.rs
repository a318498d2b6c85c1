//! Area-calculation bot: forced tool choice and automatic dispatch.
//!
//! Requires `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) in the environment.
//!
//! ```bash
//! cargo run --example mathbot
//! ```

use gemini_toolcall::{
    ChatSession, FunctionDeclaration, GeminiConfig, ToolConfig, ToolRegistry,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const MODEL: &str = "gemini-2.0-flash";
const INSTRUCTIONS: &str = "You are a helpful engineer. You can calculate the area \
    of square, triangle and rectangle. Do not perform any other tasks.";

fn area_registry() -> anyhow::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    registry.register_fn(
        FunctionDeclaration::new(
            "square",
            "Calculate the area of a square.",
            json!({
                "type": "object",
                "properties": {
                    "side": { "type": "integer", "description": "Length of one side." }
                },
                "required": ["side"]
            }),
        ),
        |args| {
            let side = args["side"].as_i64().unwrap_or(0);
            let area = side * side;
            println!("Area of the square: {area}");
            Ok(json!({ "area": area }))
        },
    )?;

    registry.register_fn(
        FunctionDeclaration::new(
            "rectangle",
            "Calculate the area of a rectangle.",
            json!({
                "type": "object",
                "properties": {
                    "length": { "type": "integer" },
                    "width": { "type": "integer" }
                },
                "required": ["length", "width"]
            }),
        ),
        |args| {
            let area = args["length"].as_i64().unwrap_or(0) * args["width"].as_i64().unwrap_or(0);
            println!("Area of the rectangle: {area}");
            Ok(json!({ "area": area }))
        },
    )?;

    registry.register_fn(
        FunctionDeclaration::new(
            "triangle",
            "Calculate the area of a triangle.",
            json!({
                "type": "object",
                "properties": {
                    "base": { "type": "integer" },
                    "height": { "type": "integer" }
                },
                "required": ["base", "height"]
            }),
        ),
        |args| {
            let area =
                args["base"].as_f64().unwrap_or(0.0) * args["height"].as_f64().unwrap_or(0.0) / 2.0;
            println!("Area of the triangle: {area}");
            Ok(json!({ "area": area }))
        },
    )?;

    Ok(registry)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = area_registry()?;
    let config = GeminiConfig::from_env()?;

    // ANY restricted to the square tool: the reply must be a square call.
    let mut session = ChatSession::builder(config.clone(), MODEL)
        .tools(registry.declarations())
        .system_instruction(INSTRUCTIONS)
        .build()?;
    let response = session
        .send_with_config(
            "compute area of a square with side 5",
            &ToolConfig::any(["square"]),
        )
        .await?;
    for call in response.function_calls() {
        println!("[any] model requested {} with {}", call.name, call.args);
    }

    // Automatic dispatch: the tool runs locally and the model reports back.
    let mut session = ChatSession::builder(config, MODEL)
        .tools(registry.declarations())
        .system_instruction(INSTRUCTIONS)
        .build()?;
    let response = session
        .send_with_dispatch(
            "print area of triangle, its base is 2m and height is 4m",
            None,
            &registry,
        )
        .await?;
    println!("[dispatch] {}", response.text().unwrap_or_default());

    Ok(())
}
