//! Types for completion operations.

use serde::{Deserialize, Serialize};

/// Default output budget when the caller doesn't set one.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// A single-turn completion request.
///
/// The prompt is sent as the only user message. `system` is optional and is
/// passed through untouched to providers that support a system prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system: Option<String>,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Text returned by the model plus the usage figures the provider reported.
///
/// Token counts are `None` when the provider doesn't report usage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Completion {
    pub text: String,
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
    pub stop_reason: Option<String>,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Combined input and output tokens, when both are known.
    pub fn total_tokens(&self) -> Option<u32> {
        Some(self.input_tokens? + self.output_tokens?)
    }
}
