//! # gemini-toolcall
//!
//! Typed client for the Google Gemini `generateContent` API, focused on
//! function calling modes.
//!
//! ## Overview
//!
//! A caller declares a tool set as explicit schema structures, picks a
//! calling mode, opens a [`ChatSession`] bound to the tool set and a system
//! instruction, and sends prompts. Responses expose either plain text or
//! structured function-call parts.
//!
//! ## Calling modes
//!
//! - **None** — the model must answer in text; no tool may be invoked.
//! - **Auto** — the model decides between text and any bound tool.
//! - **Any** — the model must invoke exactly one tool, restricted to an
//!   allow-list when one is given.
//! - **Automatic dispatch** — [`ChatSession::send_with_dispatch`] executes
//!   model-requested calls through a [`ToolRegistry`] and feeds results
//!   back, bounded by a configurable turn cap.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use gemini_toolcall::{ChatSession, FunctionDeclaration, GeminiConfig, ToolConfig};
//!
//! #[tokio::main]
//! async fn main() -> gemini_toolcall::Result<()> {
//!     let config = GeminiConfig::from_env()?;
//!     let mut session = ChatSession::builder(config, "gemini-2.0-flash")
//!         .system_instruction("You are a helpful lighting system bot.")
//!         .tool(FunctionDeclaration::no_args(
//!             "enable_lights",
//!             "Turn on the lighting system.",
//!         ))
//!         .build()?;
//!
//!     let response = session
//!         .send_with_config("What can you do?", &ToolConfig::none())
//!         .await?;
//!     println!("{}", response.text().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Module organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Credentials and endpoint configuration |
//! | [`registry`] | Tool dispatch table with argument validation |
//! | [`session`] | Chat sessions and the dispatch loop |
//! | [`transport`] | HTTP transport (one exchange per call, no retries) |
//! | [`types`] | Wire types: contents, tools, modes, responses |

pub mod config;
pub mod error;
pub mod registry;
pub mod session;
pub mod transport;
pub mod types;

pub use config::GeminiConfig;
pub use error::Error;
pub use registry::{ToolHandler, ToolRegistry};
pub use session::{ChatSession, ChatSessionBuilder, DEFAULT_MAX_TOOL_TURNS};
pub use types::{
    message::{Content, Part, Role},
    response::GenerateResponse,
    tool::{FunctionCall, FunctionDeclaration, FunctionResponse},
    tool_config::{FunctionCallingMode, ToolConfig},
};

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;
