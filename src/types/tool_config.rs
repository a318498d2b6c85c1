//! Function calling mode configuration.
//!
//! A [`ToolConfig`] tells the model whether and which tools it may invoke
//! for one exchange. Construction is pure: equal inputs always produce
//! field-for-field equal configs, and no local validation is performed
//! against the bound tool set — an allow-list entry that names no bound
//! tool is passed through and rejected by the service.

use serde::{Deserialize, Serialize};

/// Wire modes of `functionCallingConfig.mode`.
///
/// - `None`: the model must answer in text; no tool may be invoked.
/// - `Auto`: the model chooses freely between text and any bound tool.
/// - `Any`: the model must invoke exactly one tool, restricted to the
///   allow-list when one is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FunctionCallingMode {
    None,
    Auto,
    Any,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallingConfig {
    pub mode: FunctionCallingMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_function_names: Vec<String>,
}

/// The `toolConfig` request field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub function_calling_config: FunctionCallingConfig,
}

impl ToolConfig {
    /// Build a config for `mode`, keeping `allowed_function_names` only
    /// where it has meaning (the `Any` mode). Under `None` and `Auto` a
    /// supplied allow-list is discarded.
    pub fn from_mode<I, S>(mode: FunctionCallingMode, allowed_function_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = match mode {
            FunctionCallingMode::Any => allowed_function_names.into_iter().map(Into::into).collect(),
            FunctionCallingMode::None | FunctionCallingMode::Auto => {
                let supplied = allowed_function_names.into_iter().count();
                if supplied > 0 {
                    tracing::debug!(mode = ?mode, supplied, "allow-list ignored for this mode");
                }
                Vec::new()
            }
        };
        Self {
            function_calling_config: FunctionCallingConfig {
                mode,
                allowed_function_names: names,
            },
        }
    }

    /// Forbid tool invocation entirely.
    pub fn none() -> Self {
        Self::from_mode(FunctionCallingMode::None, Vec::<String>::new())
    }

    /// Let the model decide between text and any bound tool.
    pub fn auto() -> Self {
        Self::from_mode(FunctionCallingMode::Auto, Vec::<String>::new())
    }

    /// Force a tool invocation, restricted to `allowed_function_names`
    /// when non-empty.
    pub fn any<I, S>(allowed_function_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_mode(FunctionCallingMode::Any, allowed_function_names)
    }

    pub fn mode(&self) -> FunctionCallingMode {
        self.function_calling_config.mode
    }

    pub fn allowed_function_names(&self) -> &[String] {
        &self.function_calling_config.allowed_function_names
    }
}
