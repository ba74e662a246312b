//! Tests for the resilience engine against a scripted fake client

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tutor_core::config::{Credential, FAST_MODEL, PREMIUM_MODEL};
use tutor_core::engine::ResponseEngine;
use tutor_core::error::TutorError;
use tutor_core::normalize::FALLBACK_TEXT;
use tutor_core::protocol::{AskOptions, Message, Subject, ThinkingLevel};
use tutor_core::provider::wire::{
    Candidate, Content, GenerateRequest, GenerateResponse, GroundingChunk, GroundingMetadata,
    WebSource, WirePart,
};
use tutor_core::provider::{GenerativeClient, ProviderError, ProviderResult};
use tutor_core::retry::RetryPolicy;

/// Scripted provider: pops outcomes in order, then repeats a standing error.
/// Records every call's target model and a total call counter.
struct FakeClient {
    script: Mutex<VecDeque<ProviderResult<GenerateResponse>>>,
    standing_error: Option<ProviderError>,
    calls: AtomicU32,
    models: Mutex<Vec<String>>,
}

impl FakeClient {
    fn scripted(script: Vec<ProviderResult<GenerateResponse>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            standing_error: None,
            calls: AtomicU32::new(0),
            models: Mutex::new(Vec::new()),
        })
    }

    fn always_failing(error: ProviderError) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            standing_error: Some(error),
            calls: AtomicU32::new(0),
            models: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeClient for FakeClient {
    async fn submit(&self, request: &GenerateRequest) -> ProviderResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.models.lock().unwrap().push(request.model.clone());

        if let Some(outcome) = self.script.lock().unwrap().pop_front() {
            return outcome;
        }
        match &self.standing_error {
            Some(error) => Err(error.clone()),
            None => panic!("fake client called beyond its script"),
        }
    }
}

fn rate_limit() -> ProviderError {
    ProviderError::from_status(429, Some("quota exceeded for this model"))
}

fn overloaded() -> ProviderError {
    ProviderError::from_status(503, Some("The model is overloaded"))
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_delay_ms: 10,
        backoff_multiplier: 1.5,
    }
}

fn engine_over(client: Arc<FakeClient>) -> ResponseEngine {
    ResponseEngine::new(client, Some(Credential::from_key("test-key").unwrap()))
        .with_policy(fast_policy())
}

fn history() -> Vec<Message> {
    vec![Message::user("Differentiate x^2 for me")]
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_success_on_first_attempt() {
    init_tracing();
    let client = FakeClient::scripted(vec![Ok(GenerateResponse::from_text("It is $2x$."))]);
    let engine = engine_over(client.clone());

    let text = engine
        .generate_response(&history(), &AskOptions::for_subject(Subject::Math))
        .await
        .unwrap();

    assert_eq!(text, "It is $2x$.");
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_premium_rate_limit_downgrades_then_succeeds() {
    let client = FakeClient::scripted(vec![
        Err(rate_limit()),
        Ok(GenerateResponse::from_text("fast-tier answer")),
    ]);
    let engine = engine_over(client.clone());
    let options = AskOptions::for_subject(Subject::Physics).with_thinking(ThinkingLevel::Deep);

    let text = engine.generate_response(&history(), &options).await.unwrap();

    assert_eq!(text, "fast-tier answer");
    // Exactly one downgrade: premium first, fast second, no further attempts.
    assert_eq!(client.models(), vec![PREMIUM_MODEL, FAST_MODEL]);
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn test_persistent_overload_exhausts_attempts_as_rate_limited() {
    let client = FakeClient::always_failing(overloaded());
    let engine = engine_over(client.clone());

    let result = engine
        .generate_response(&history(), &AskOptions::default())
        .await;

    assert!(matches!(result, Err(TutorError::RateLimited)));
    assert_eq!(client.calls(), 3);
    assert_eq!(client.models(), vec![FAST_MODEL, FAST_MODEL, FAST_MODEL]);
}

#[tokio::test(start_paused = true)]
async fn test_backoff_delays_grow_between_attempts() {
    let client = FakeClient::always_failing(overloaded());
    let engine = ResponseEngine::new(client.clone(), Some(Credential::from_key("k").unwrap()));

    let started = tokio::time::Instant::now();
    let result = engine
        .generate_response(&history(), &AskOptions::default())
        .await;

    assert!(matches!(result, Err(TutorError::RateLimited)));
    // Default policy: 1000ms before the second attempt, 1500ms before the
    // third, no sleep after the final failure.
    assert_eq!(started.elapsed().as_millis(), 2_500);
    assert_eq!(client.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_downgrade_resets_backoff_to_initial_delay() {
    let client = FakeClient::always_failing(rate_limit());
    let engine = ResponseEngine::new(client.clone(), Some(Credential::from_key("k").unwrap()));
    let options = AskOptions::for_subject(Subject::Math).with_thinking(ThinkingLevel::Deep);

    let started = tokio::time::Instant::now();
    let result = engine.generate_response(&history(), &options).await;

    assert!(matches!(result, Err(TutorError::RateLimited)));
    // The downgrade itself retries without sleeping and resets the backoff,
    // so the only sleep is the schedule's initial 1000ms before the third
    // attempt.
    assert_eq!(started.elapsed().as_millis(), 1_000);
    assert_eq!(client.calls(), 3);
}

#[tokio::test]
async fn test_downgrade_still_bounded_by_max_attempts() {
    let client = FakeClient::always_failing(rate_limit());
    let engine = engine_over(client.clone());
    let options = AskOptions::for_subject(Subject::Math).with_thinking(ThinkingLevel::Deep);

    let result = engine.generate_response(&history(), &options).await;

    assert!(matches!(result, Err(TutorError::RateLimited)));
    // One premium attempt, then the downgraded fast attempts; the downgrade
    // does not reset the attempt counter.
    assert_eq!(client.calls(), 3);
    assert_eq!(client.models(), vec![PREMIUM_MODEL, FAST_MODEL, FAST_MODEL]);
}

#[tokio::test]
async fn test_fatal_error_propagates_without_retry() {
    let client = FakeClient::always_failing(ProviderError::from_status(
        400,
        Some("Unknown field in request"),
    ));
    let engine = engine_over(client.clone());

    let result = engine
        .generate_response(&history(), &AskOptions::default())
        .await;

    match result {
        Err(TutorError::Provider(ProviderError::InvalidRequest(message))) => {
            assert!(message.contains("Unknown field"));
        }
        other => panic!("expected fatal provider error, got {:?}", other.err()),
    }
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_missing_credential_fails_before_any_request() {
    let client = FakeClient::always_failing(overloaded());
    let engine = ResponseEngine::new(client.clone(), None).with_policy(fast_policy());

    let result = engine
        .generate_response(&history(), &AskOptions::default())
        .await;

    assert!(matches!(result, Err(TutorError::Configuration(_))));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_empty_history_rejected_before_any_request() {
    let client = FakeClient::always_failing(overloaded());
    let engine = engine_over(client.clone());

    let result = engine.generate_response(&[], &AskOptions::default()).await;

    assert!(matches!(result, Err(TutorError::InvalidInput(_))));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_empty_response_surfaces_fallback_text() {
    let client = FakeClient::scripted(vec![Ok(GenerateResponse::default())]);
    let engine = engine_over(client);

    let text = engine
        .generate_response(&history(), &AskOptions::default())
        .await
        .unwrap();

    assert_eq!(text, FALLBACK_TEXT);
}

#[tokio::test]
async fn test_grounded_response_includes_sources_section() {
    let response = GenerateResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![WirePart::Text {
                    text: "Grounded answer.".to_string(),
                }],
            }),
            grounding_metadata: Some(GroundingMetadata {
                grounding_chunks: vec![
                    GroundingChunk {
                        web: Some(WebSource {
                            title: Some("Khan Academy".to_string()),
                            uri: Some("https://khanacademy.org".to_string()),
                        }),
                    },
                    GroundingChunk {
                        web: Some(WebSource {
                            title: Some("Khan Academy".to_string()),
                            uri: Some("https://khanacademy.org".to_string()),
                        }),
                    },
                ],
            }),
            finish_reason: Some("STOP".to_string()),
        }],
    };
    let client = FakeClient::scripted(vec![Ok(response)]);
    let engine = engine_over(client);

    let text = engine
        .generate_response(
            &history(),
            &AskOptions::for_subject(Subject::General).with_search(),
        )
        .await
        .unwrap();

    assert!(text.contains("**Sources:**"));
    assert_eq!(text.matches("khanacademy.org").count(), 1);
}
