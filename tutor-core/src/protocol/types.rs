//! Core types for tutoring conversations
//!
//! These are the host-facing types: the ordered message history, the
//! per-turn options the user selected in the UI, and the normalized reply
//! the core hands back. Provider wire shapes live in `provider::wire` and
//! are produced from these by the request translator.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User input turn
    User,
    /// Model-authored reply turn
    Model,
}

impl MessageRole {
    /// Wire name used in provider content turns
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Model => "model",
        }
    }
}

/// Individual content part of a message
///
/// Exactly one variant per part. Image data is base64-encoded by the host
/// before it reaches the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    /// Plain text content
    Text { text: String },
    /// Inline image content (base64 encoded)
    InlineImage { mime_type: String, data: String },
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Create an inline image part from base64 data
    pub fn inline_image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part::InlineImage {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// A single turn in the conversation history
///
/// History is owned by the host UI and passed by reference into the core per
/// call. The core never mutates or deletes messages; it only reads them and
/// returns a new model-authored string for the host to append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    role: MessageRole,

    /// Ordered content parts; invariant: at least one present
    pub parts: Vec<Part>,

    /// Creation time, epoch milliseconds
    pub timestamp_ms: i64,

    /// Set by the host when this turn failed to produce a reply
    #[serde(default)]
    pub error: bool,
}

impl Message {
    /// Create a message with an explicit role and parts
    pub fn new(role: MessageRole, parts: Vec<Part>) -> Self {
        Self {
            role,
            parts,
            timestamp_ms: epoch_millis(),
            error: false,
        }
    }

    /// Create a user message with a single text part
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, vec![Part::text(text)])
    }

    /// Create a model message with a single text part
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Model, vec![Part::text(text)])
    }

    /// Create a user message from pre-built parts (e.g. image attachments)
    pub fn user_with_parts(parts: Vec<Part>) -> Self {
        Self::new(MessageRole::User, parts)
    }

    /// Role of the message sender; immutable after creation
    pub fn role(&self) -> MessageRole {
        self.role
    }

    /// Override the creation timestamp
    pub fn with_timestamp(mut self, timestamp_ms: i64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// Mark this turn as failed
    pub fn mark_error(mut self) -> Self {
        self.error = true;
        self
    }
}

fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Tutoring subject selected in the UI
///
/// Selects a fixed system instruction (see `config::system_instruction`).
/// Display colors and icons are a host concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Physics,
    Chemistry,
    English,
    General,
}

impl Subject {
    /// Stable name used as a persistence key by the host
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::English => "english",
            Subject::General => "general",
        }
    }
}

/// Reasoning depth selected in the UI
///
/// Maps deterministically to a model tier and reasoning budget; the mapping
/// lives in `config::model_choice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingLevel {
    None,
    Moderate,
    Deep,
}

/// Model tier a request is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    /// High-availability model used for most turns
    Fast,
    /// Deep-reasoning model with a much lower rate limit
    Premium,
}

/// Per-turn options supplied by the host alongside the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskOptions {
    pub subject: Subject,
    pub thinking: ThinkingLevel,
    pub use_search: bool,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            subject: Subject::General,
            thinking: ThinkingLevel::None,
            use_search: false,
        }
    }
}

impl AskOptions {
    /// Create options for a subject with default depth and no search
    pub fn for_subject(subject: Subject) -> Self {
        Self {
            subject,
            ..Default::default()
        }
    }

    /// Set the reasoning depth
    pub fn with_thinking(mut self, thinking: ThinkingLevel) -> Self {
        self.thinking = thinking;
        self
    }

    /// Enable web-search augmentation
    pub fn with_search(mut self) -> Self {
        self.use_search = true;
        self
    }
}

/// A web citation attached to a grounded reply
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub uri: String,
}

/// Normalized provider reply: display text plus unique citations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderReply {
    /// Reply text; never empty (the normalizer substitutes a fallback)
    pub text: String,

    /// Unique (title, uri) pairs in first-seen order; empty when ungrounded
    pub sources: Vec<SourceRef>,
}
