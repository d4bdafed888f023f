//! Chat-completion wire types
//!
//! These mirror the OpenAI-compatible `/v1/chat/completions` shape that both
//! llama.cpp-style servers and in-process runtimes speak. Only the fields the
//! classifier reads are modelled on the response side; everything else in the
//! envelope is ignored during deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sets assistant behaviour
    System,
    /// End-user input
    User,
    /// Model output
    Assistant,
}

/// A single message in a chat exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message author
    pub role: Role,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Structured-output constraint sent alongside the messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Constraint kind, always `json_object` for classification
    #[serde(rename = "type")]
    pub kind: String,

    /// JSON Schema the output must conform to
    pub schema: Value,
}

impl ResponseFormat {
    /// JSON-object constraint carrying the given schema
    pub fn json_object(schema: Value) -> Self {
        Self {
            kind: "json_object".to_string(),
            schema,
        }
    }
}

/// Request handed to a completion backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Ordered chat exchange
    pub messages: Vec<ChatMessage>,

    /// Structured-output constraint
    pub response_format: ResponseFormat,

    /// Generation length cap
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f64,
}

/// Completion envelope returned by a backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Generated choices; classification only reads the first
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One generated alternative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Position in the `choices` array
    #[serde(default)]
    pub index: u32,

    /// Generated message
    pub message: ResponseMessage,

    /// Why generation stopped (`stop`, `length`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Message inside a [`Choice`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Author role as reported by the backend
    #[serde(default = "default_assistant")]
    pub role: Role,

    /// Generated text; may be absent when the backend returns tool calls only
    #[serde(default)]
    pub content: Option<String>,
}

fn default_assistant() -> Role {
    Role::Assistant
}

impl ChatCompletion {
    /// Envelope with a single assistant choice
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                index: 0,
                message: ResponseMessage {
                    role: Role::Assistant,
                    content: Some(content.into()),
                },
                finish_reason: Some("stop".to_string()),
            }],
        }
    }

    /// Content of the first choice, if any
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first()?.message.content.as_deref()
    }
}
