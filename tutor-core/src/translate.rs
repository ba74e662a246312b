//! Request translator: history plus options into a provider request
//!
//! A pure mapping with no side effects, testable without network access.
//! Model and budget come from the thinking-level table in `config`; the
//! system instruction is selected by subject alone.

use crate::config::{self, ModelChoice};
use crate::error::{TutorError, TutorResult};
use crate::protocol::{AskOptions, Message, Part};
use crate::provider::wire::{
    Blob, Content, GenerateRequest, GenerationConfig, ThinkingConfig, ToolSpec, WirePart,
};

/// Build the provider request for one turn
///
/// The history must be non-empty and every message must carry at least one
/// part; anything else is `InvalidInput`. Part ordering within each message
/// is preserved.
pub fn build_request(history: &[Message], options: &AskOptions) -> TutorResult<GenerateRequest> {
    if history.is_empty() {
        return Err(TutorError::InvalidInput(
            "history must contain at least one message".to_string(),
        ));
    }

    let mut contents = Vec::with_capacity(history.len());
    for (index, message) in history.iter().enumerate() {
        if message.parts.is_empty() {
            return Err(TutorError::InvalidInput(format!(
                "message at index {} has no parts",
                index
            )));
        }
        contents.push(Content {
            role: Some(message.role().as_str().to_string()),
            parts: message.parts.iter().map(translate_part).collect(),
        });
    }

    let choice = config::model_choice(options.thinking);

    let mut request = GenerateRequest {
        model: String::new(),
        contents,
        system_instruction: Some(Content::text(config::system_instruction(options.subject))),
        generation_config: None,
        tools: options.use_search.then(|| vec![ToolSpec::web_search()]),
    };
    apply_model_choice(&mut request, &choice);

    Ok(request)
}

/// Point an already-built request at a different model choice
///
/// Used at build time and again by the engine when it downgrades a premium
/// request to the fast tier mid-loop.
pub fn apply_model_choice(request: &mut GenerateRequest, choice: &ModelChoice) {
    request.model = choice.model_id().to_string();
    // An explicit budget of 0 disables reasoning; absence would leave the
    // provider's default in effect.
    request.generation_config = Some(GenerationConfig {
        thinking_config: Some(ThinkingConfig {
            thinking_budget: choice.thinking_budget,
        }),
    });
}

fn translate_part(part: &Part) -> WirePart {
    match part {
        Part::Text { text } => WirePart::Text { text: text.clone() },
        Part::InlineImage { mime_type, data } => WirePart::Inline {
            inline_data: Blob {
                mime_type: mime_type.clone(),
                data: data.clone(),
            },
        },
    }
}
