//! Wire types for the generateContent API
//!
//! Request and response shapes as they go over HTTP, camelCase per the
//! provider's JSON convention. Optional fields use `skip_serializing_if`
//! because the protocol distinguishes an absent field from an empty one
//! (notably `tools`: no tools and an empty tools array are different
//! requests).

use serde::{Deserialize, Serialize};

/// A single generateContent request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Target model identifier; routed via the URL, never serialized in the body
    #[serde(skip)]
    pub model: String,

    /// Ordered conversation turns
    pub contents: Vec<Content>,

    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,

    /// Tool declarations; `None` means the field is absent on the wire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolSpec>>,
}

/// A content turn: a role plus ordered parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    pub parts: Vec<WirePart>,
}

impl Content {
    /// Build a role-less content holding a single text part, used for
    /// system instructions
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![WirePart::Text { text: text.into() }],
        }
    }
}

/// One part of a content turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WirePart {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
}

/// Inline binary payload, base64 encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

/// Generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(rename = "thinkingConfig", skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

/// Reasoning-budget control; a budget of 0 disables reasoning explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThinkingConfig {
    #[serde(rename = "thinkingBudget")]
    pub thinking_budget: u32,
}

/// A tool the model is allowed to use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    #[serde(rename = "googleSearch", skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

impl ToolSpec {
    /// The web-search capability descriptor
    pub fn web_search() -> Self {
        Self {
            google_search: Some(GoogleSearch {}),
        }
    }
}

/// Marker for the built-in web search tool; serializes as an empty object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleSearch {}

/// A generateContent response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One response candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    #[serde(rename = "groundingMetadata", skip_serializing_if = "Option::is_none")]
    pub grounding_metadata: Option<GroundingMetadata>,

    #[serde(rename = "finishReason", skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Citation metadata attached to a grounded candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One grounding chunk; only web references carry citation data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

/// A web citation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate's parts
    pub fn text(&self) -> String {
        let Some(candidate) = self.candidates.first() else {
            return String::new();
        };
        let Some(content) = &candidate.content else {
            return String::new();
        };
        content
            .parts
            .iter()
            .filter_map(|part| match part {
                WirePart::Text { text } => Some(text.as_str()),
                WirePart::Inline { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// Convenience constructor for a single-candidate text response
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![WirePart::Text { text: text.into() }],
                }),
                grounding_metadata: None,
                finish_reason: Some("STOP".to_string()),
            }],
        }
    }
}
