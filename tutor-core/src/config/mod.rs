//! Core configuration: the provider credential and the static lookup tables
//!
//! The subject-to-instruction and thinking-level-to-model mappings are
//! immutable configuration data rather than branching inside the engine, so
//! the retry logic stays uncluttered and each table is testable on its own.

mod error;
mod secrets;

pub use error::{ConfigError, ConfigResult};
pub use secrets::SecretString;

use crate::protocol::{ModelTier, Subject, ThinkingLevel};
use std::env;

/// Environment variable holding the provider API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Model identifier for the fast tier
pub const FAST_MODEL: &str = "gemini-2.5-flash";

/// Model identifier for the premium (deep-reasoning) tier
pub const PREMIUM_MODEL: &str = "gemini-2.5-pro";

/// Reasoning budget for moderate depth on the fast tier
pub const MODERATE_THINKING_BUDGET: u32 = 2048;

/// Reasoning budget for deep reasoning on the premium tier
pub const DEEP_THINKING_BUDGET: u32 = 8192;

/// The opaque provider credential, loaded once at startup
#[derive(Debug, Clone)]
pub struct Credential {
    key: SecretString,
}

impl Credential {
    /// Read the credential from the environment
    ///
    /// Absence is a configuration error, raised before any request is
    /// attempted; it must never surface as a network failure.
    pub fn from_env() -> ConfigResult<Self> {
        let value = env::var(API_KEY_VAR).map_err(|_| ConfigError::EnvVarNotFound {
            var: API_KEY_VAR.to_string(),
        })?;
        Self::from_key(value)
    }

    /// Build a credential from an already-resolved key
    pub fn from_key(key: impl Into<String>) -> ConfigResult<Self> {
        let key = SecretString::new(key);
        if key.is_empty() {
            return Err(ConfigError::Invalid {
                message: format!("{} is set but empty", API_KEY_VAR),
            });
        }
        Ok(Self { key })
    }

    /// The wrapped API key
    pub fn key(&self) -> &SecretString {
        &self.key
    }
}

/// A resolved (model, reasoning budget) pair for one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelChoice {
    pub tier: ModelTier,
    pub thinking_budget: u32,
}

impl ModelChoice {
    /// Concrete model identifier for this choice's tier
    pub fn model_id(&self) -> &'static str {
        match self.tier {
            ModelTier::Fast => FAST_MODEL,
            ModelTier::Premium => PREMIUM_MODEL,
        }
    }

    /// The fallback target when the premium tier is rate limited:
    /// fast tier with reasoning disabled.
    pub fn downgraded() -> Self {
        Self {
            tier: ModelTier::Fast,
            thinking_budget: 0,
        }
    }
}

/// Deterministic thinking-level table
///
/// | level    | tier    | budget |
/// |----------|---------|--------|
/// | None     | Fast    | 0      |
/// | Moderate | Fast    | 2048   |
/// | Deep     | Premium | 8192   |
pub fn model_choice(level: ThinkingLevel) -> ModelChoice {
    match level {
        ThinkingLevel::None => ModelChoice {
            tier: ModelTier::Fast,
            thinking_budget: 0,
        },
        ThinkingLevel::Moderate => ModelChoice {
            tier: ModelTier::Fast,
            thinking_budget: MODERATE_THINKING_BUDGET,
        },
        ThinkingLevel::Deep => ModelChoice {
            tier: ModelTier::Premium,
            thinking_budget: DEEP_THINKING_BUDGET,
        },
    }
}

/// Fixed system instruction for a subject
pub fn system_instruction(subject: Subject) -> &'static str {
    match subject {
        Subject::Math => {
            "You are a patient math tutor. Explain concepts step by step, \
             state each intermediate result, and format every expression, \
             equation, and symbol in LaTeX using $...$ for inline math and \
             $$...$$ for display math. Encourage the student to attempt the \
             next step before revealing it."
        }
        Subject::Physics => {
            "You are a physics tutor. Ground every explanation in the \
             underlying principle, keep units explicit in all working, and \
             format formulas and derivations in LaTeX using $...$ for inline \
             math and $$...$$ for display math."
        }
        Subject::Chemistry => {
            "You are a chemistry tutor. Balance every equation you present, \
             name compounds alongside their formulas, and format chemical \
             equations and quantitative working in LaTeX using $...$ and \
             $$...$$ delimiters."
        }
        Subject::English => {
            "You are an English tutor. Give concise, structured feedback on \
             grammar, vocabulary, and style, quote the student's own words \
             when correcting them, and suggest one improved rewrite per \
             correction."
        }
        Subject::General => {
            "You are a friendly, knowledgeable tutor. Answer clearly and \
             accurately, structure longer answers with markdown headings and \
             lists, and use LaTeX $...$ delimiters for any mathematical \
             notation."
        }
    }
}
