//! Lighting-control bot exercising every function calling mode.
//!
//! Requires `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) in the environment.
//!
//! ```bash
//! cargo run --example lightbot
//! ```

use gemini_toolcall::{
    ChatSession, FunctionDeclaration, GeminiConfig, ToolConfig, ToolRegistry,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const MODEL: &str = "gemini-2.0-flash";
const INSTRUCTIONS: &str = "You are a helpful lighting system bot. \
    You can turn lights on and off, and you can set the color. \
    Do not perform any other tasks.";

fn lighting_registry() -> anyhow::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    registry.register_fn(
        FunctionDeclaration::no_args("enable_lights", "Turn on the lighting system."),
        |_| {
            println!("LIGHTBOT: Lights enabled.");
            Ok(json!({ "status": "enabled" }))
        },
    )?;

    registry.register_fn(
        FunctionDeclaration::new(
            "set_light_color",
            "Set the light color. Lights must be enabled for this to work.",
            json!({
                "type": "object",
                "properties": {
                    "rgb_hex": { "type": "string", "description": "Color as an RGB hex string." }
                },
                "required": ["rgb_hex"]
            }),
        ),
        |args| {
            let rgb_hex = args["rgb_hex"].as_str().unwrap_or("unknown").to_string();
            println!("LIGHTBOT: Lights set to {rgb_hex}.");
            Ok(json!({ "status": "color_set", "rgb_hex": rgb_hex }))
        },
    )?;

    registry.register_fn(
        FunctionDeclaration::no_args("stop_lights", "Stop flashing lights."),
        |_| {
            println!("LIGHTBOT: Lights turned off.");
            Ok(json!({ "status": "off" }))
        },
    )?;

    Ok(registry)
}

fn new_session(registry: &ToolRegistry) -> anyhow::Result<ChatSession> {
    let config = GeminiConfig::from_env()?;
    Ok(ChatSession::builder(config, MODEL)
        .tools(registry.declarations())
        .system_instruction(INSTRUCTIONS)
        .build()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = lighting_registry()?;

    // NONE: text only, tools are forbidden.
    let mut session = new_session(&registry)?;
    let response = session
        .send_with_config("What can you do?", &ToolConfig::none())
        .await?;
    println!("[none] {}", response.text().unwrap_or_default());

    // AUTO: the model decides between text and a tool call.
    let mut session = new_session(&registry)?;
    let response = session
        .send_with_config("Turn the lights on.", &ToolConfig::auto())
        .await?;
    println!("[auto] {:?}", response.parts().first());

    // ANY restricted to a subset: a call to one of these two is forced.
    let mut session = new_session(&registry)?;
    let response = session
        .send_with_config(
            "Make the lights pulse purple.",
            &ToolConfig::any(["set_light_color", "stop_lights"]),
        )
        .await?;
    println!("[any] {:?}", response.parts().first());

    // Automatic dispatch: requested calls run through the registry and
    // their results go back to the model until it answers in text.
    let mut session = new_session(&registry)?;
    let response = session
        .send_with_dispatch("It is dark in here, help me out.", None, &registry)
        .await?;
    println!("[dispatch] {}", response.text().unwrap_or_default());

    Ok(())
}
