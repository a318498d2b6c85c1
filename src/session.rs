//! Chat sessions and the tool invocation dispatch loop.
//!
//! A [`ChatSession`] is bound at construction to a model, a fixed tool set,
//! a system instruction, and credentials. It is not reconfigurable: a
//! different tool set or instruction means a new session. The session holds
//! conversation history, so repeated sends continue one conversation.
//!
//! [`ChatSession::send_with_config`] performs exactly one prompt/response
//! exchange under a [`ToolConfig`]; the caller inspects the returned parts
//! and decides what, if anything, to execute. Nothing is executed
//! implicitly. [`ChatSession::send_with_dispatch`] opts into the automatic
//! loop: model-requested calls are executed through a [`ToolRegistry`] and
//! their results fed back until the model answers in text or the turn cap
//! is hit.

use serde_json::Value;

use crate::config::GeminiConfig;
use crate::error::Error;
use crate::registry::ToolRegistry;
use crate::transport::HttpTransport;
use crate::types::message::Content;
use crate::types::response::GenerateResponse;
use crate::types::tool::{FunctionCall, FunctionDeclaration};
use crate::types::tool_config::ToolConfig;
use crate::Result;

/// Upper bound on automatic dispatch rounds unless overridden.
pub const DEFAULT_MAX_TOOL_TURNS: usize = 10;

#[derive(Debug)]
pub struct ChatSessionBuilder {
    config: GeminiConfig,
    model: String,
    tools: Vec<FunctionDeclaration>,
    system_instruction: Option<String>,
    temperature: Option<f64>,
    max_output_tokens: Option<u32>,
    max_tool_turns: usize,
}

impl ChatSessionBuilder {
    pub fn new(config: GeminiConfig, model: impl Into<String>) -> Self {
        Self {
            config,
            model: model.into(),
            tools: Vec::new(),
            system_instruction: None,
            temperature: None,
            max_output_tokens: None,
            max_tool_turns: DEFAULT_MAX_TOOL_TURNS,
        }
    }

    /// Bind the full tool set the model may see.
    pub fn tools(mut self, tools: Vec<FunctionDeclaration>) -> Self {
        self.tools = tools;
        self
    }

    pub fn tool(mut self, tool: FunctionDeclaration) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Cap on automatic dispatch rounds for
    /// [`ChatSession::send_with_dispatch`].
    pub fn max_tool_turns(mut self, max_tool_turns: usize) -> Self {
        self.max_tool_turns = max_tool_turns;
        self
    }

    /// Build the session. Fails before any network call when the credential
    /// is absent or the bound tool set contains duplicate names.
    pub fn build(self) -> Result<ChatSession> {
        if self.config.api_key.is_empty() {
            return Err(Error::configuration("API key is empty"));
        }
        let mut seen = std::collections::HashSet::new();
        for tool in &self.tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(Error::validation(format!(
                    "duplicate tool name '{}' in bound tool set",
                    tool.name
                )));
            }
        }

        let transport = HttpTransport::new(&self.config)?;
        Ok(ChatSession {
            transport,
            model: self.model,
            tools: self.tools,
            system_instruction: self.system_instruction,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            max_tool_turns: self.max_tool_turns,
            history: Vec::new(),
        })
    }
}

#[derive(Debug)]
pub struct ChatSession {
    transport: HttpTransport,
    model: String,
    tools: Vec<FunctionDeclaration>,
    system_instruction: Option<String>,
    temperature: Option<f64>,
    max_output_tokens: Option<u32>,
    max_tool_turns: usize,
    history: Vec<Content>,
}

impl ChatSession {
    pub fn builder(config: GeminiConfig, model: impl Into<String>) -> ChatSessionBuilder {
        ChatSessionBuilder::new(config, model)
    }

    /// Conversation so far, in wire order.
    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// One exchange with the service-default calling mode.
    pub async fn send(&mut self, prompt: impl Into<String>) -> Result<GenerateResponse> {
        self.send_inner(prompt.into(), None).await
    }

    /// One exchange under an explicit function calling mode.
    pub async fn send_with_config(
        &mut self,
        prompt: impl Into<String>,
        tool_config: &ToolConfig,
    ) -> Result<GenerateResponse> {
        self.send_inner(prompt.into(), Some(tool_config)).await
    }

    async fn send_inner(
        &mut self,
        prompt: String,
        tool_config: Option<&ToolConfig>,
    ) -> Result<GenerateResponse> {
        if prompt.is_empty() {
            return Err(Error::validation("prompt must be non-empty"));
        }
        self.exchange(Content::user(prompt), tool_config).await
    }

    /// Automatic dispatch: send the prompt, execute every requested tool
    /// call through `registry`, feed the results back, and repeat until the
    /// model stops requesting calls. The loop is bounded by
    /// `max_tool_turns`; exceeding it is a [`Error::Runtime`].
    ///
    /// The same `tool_config` is attached to every request of the loop,
    /// matching single-exchange semantics. Note that `Any` mode forces a
    /// call on every turn, so an `Any` config here will always run into
    /// the turn cap unless the model is expected to finish in text.
    pub async fn send_with_dispatch(
        &mut self,
        prompt: impl Into<String>,
        tool_config: Option<&ToolConfig>,
        registry: &ToolRegistry,
    ) -> Result<GenerateResponse> {
        let mut response = self.send_inner(prompt.into(), tool_config).await?;

        let mut turns = 0;
        loop {
            let calls: Vec<FunctionCall> =
                response.function_calls().into_iter().cloned().collect();
            if calls.is_empty() {
                return Ok(response);
            }
            if turns >= self.max_tool_turns {
                return Err(Error::runtime(format!(
                    "automatic dispatch exceeded {} tool turns",
                    self.max_tool_turns
                )));
            }
            turns += 1;
            tracing::info!(turn = turns, calls = calls.len(), "executing tool calls");

            let mut results = Vec::with_capacity(calls.len());
            for call in &calls {
                results.push(registry.dispatch(call).await);
            }
            response = self
                .exchange(Content::function_responses(results), tool_config)
                .await?;
        }
    }

    async fn exchange(
        &mut self,
        content: Content,
        tool_config: Option<&ToolConfig>,
    ) -> Result<GenerateResponse> {
        self.history.push(content);
        let body = self.request_body(tool_config)?;

        let raw = match self.transport.generate_content(&self.model, &body).await {
            Ok(raw) => raw,
            Err(e) => {
                // Keep history consistent with what the service has seen.
                self.history.pop();
                return Err(e);
            }
        };

        let response: GenerateResponse = serde_json::from_value(raw)?;
        if let Some(reply) = response.candidates.first().and_then(|c| c.content.clone()) {
            self.history.push(reply);
        }
        Ok(response)
    }

    fn request_body(&self, tool_config: Option<&ToolConfig>) -> Result<Value> {
        let mut body = serde_json::json!({
            "contents": serde_json::to_value(&self.history)?,
        });

        if let Some(instruction) = &self.system_instruction {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": instruction }]
            });
        }

        if !self.tools.is_empty() {
            body["tools"] = serde_json::json!([{
                "functionDeclarations": serde_json::to_value(&self.tools)?
            }]);
        }

        if let Some(config) = tool_config {
            body["toolConfig"] = serde_json::to_value(config)?;
        }

        let mut generation = serde_json::Map::new();
        if let Some(t) = self.temperature {
            generation.insert("temperature".into(), serde_json::json!(t));
        }
        if let Some(mt) = self.max_output_tokens {
            generation.insert("maxOutputTokens".into(), serde_json::json!(mt));
        }
        if !generation.is_empty() {
            body["generationConfig"] = Value::Object(generation);
        }

        Ok(body)
    }
}
