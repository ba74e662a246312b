//! Resilience controller: the retry and downgrade loop around one ask
//!
//! One logical operation per user turn. The engine holds no mutable state
//! between calls, so independent invocations are safe to run concurrently;
//! within a call, retries are strictly sequential. Suspension points are the
//! network round-trip and the backoff sleeps only, and abandoning the future
//! simply discards the eventual result.

use crate::config::{self, Credential, ModelChoice};
use crate::error::{TutorError, TutorResult};
use crate::normalize;
use crate::protocol::{AskOptions, Message, ModelTier};
use crate::provider::{GeminiClient, GenerativeClient};
use crate::retry::RetryPolicy;
use crate::translate;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates request translation, submission, failure classification,
/// model downgrade, and backoff retry for a single turn
pub struct ResponseEngine {
    client: Arc<dyn GenerativeClient>,
    credential: Option<Credential>,
    policy: RetryPolicy,
}

impl ResponseEngine {
    /// Create an engine over an arbitrary client, typically a fake in tests
    pub fn new(client: Arc<dyn GenerativeClient>, credential: Option<Credential>) -> Self {
        Self {
            client,
            credential,
            policy: RetryPolicy::default(),
        }
    }

    /// Create an engine backed by the real HTTP client, with the credential
    /// taken from the environment
    pub fn from_env() -> TutorResult<Self> {
        let credential = Credential::from_env()?;
        let client = GeminiClient::new(credential.clone())?;
        Ok(Self::new(Arc::new(client), Some(credential)))
    }

    /// Override the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Ask the model for the next reply in the conversation
    ///
    /// Exactly one of three outcomes: the normalized display text, a
    /// `RateLimited` failure after the retry/downgrade policy is exhausted,
    /// or the original error for any non-transient failure. Configuration
    /// and input problems are rejected before any request goes out.
    pub async fn generate_response(
        &self,
        history: &[Message],
        options: &AskOptions,
    ) -> TutorResult<String> {
        if self.credential.is_none() {
            return Err(TutorError::Configuration(config::ConfigError::Invalid {
                message: format!("no API key configured; set {}", config::API_KEY_VAR),
            }));
        }

        let mut choice = config::model_choice(options.thinking);
        let mut request = translate::build_request(history, options)?;

        let mut attempt: u32 = 0;
        // Retries since the last backoff reset; indexes the policy schedule.
        let mut backoff_step: u32 = 0;

        info!(
            subject = options.subject.as_str(),
            model = %request.model,
            use_search = options.use_search,
            "generating response"
        );

        loop {
            attempt += 1;
            debug!(attempt, model = %request.model, "submitting attempt");

            let error = match self.client.submit(&request).await {
                Ok(response) => return Ok(normalize::display_text(&response)),
                Err(error) => error,
            };

            if !error.is_transient() {
                warn!(attempt, %error, "non-transient provider failure");
                return Err(TutorError::Provider(error));
            }

            // The premium tier has a much lower rate limit; trade reasoning
            // depth for availability instead of surfacing an error. The
            // downgrade resets the backoff delay but not the attempt
            // counter, so total attempts stay bounded by max_attempts.
            if choice.tier == ModelTier::Premium {
                warn!(attempt, %error, "premium tier limited, downgrading to fast tier");
                choice = ModelChoice::downgraded();
                translate::apply_model_choice(&mut request, &choice);
                backoff_step = 0;
                if attempt >= self.policy.max_attempts {
                    return Err(TutorError::RateLimited);
                }
                continue;
            }

            if attempt >= self.policy.max_attempts {
                warn!(attempt, %error, "retries exhausted");
                return Err(TutorError::RateLimited);
            }

            let delay = self.policy.delay_for(backoff_step);
            debug!(attempt, delay_ms = delay.as_millis() as u64, "backing off");
            tokio::time::sleep(delay).await;
            backoff_step += 1;
        }
    }
}
