//! Core type definitions.
//!
//! Strongly-typed representations of the Gemini `generateContent` wire
//! format, plus the function calling mode configuration.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`message`] | Conversation contents and parts |
//! | [`response`] | Typed `generateContent` responses |
//! | [`tool`] | Tool declarations, calls, and results |
//! | [`tool_config`] | Function calling mode configuration |

pub mod message;
pub mod response;
pub mod tool;
pub mod tool_config;

pub use message::{Content, Part, Role};
pub use response::{Candidate, GenerateResponse, UsageMetadata};
pub use tool::{FunctionCall, FunctionDeclaration, FunctionResponse};
pub use tool_config::{FunctionCallingConfig, FunctionCallingMode, ToolConfig};
