//! Outbound provider boundary
//!
//! The engine talks to the model API solely through the `GenerativeClient`
//! trait, so the retry and downgrade logic can be exercised against a fake
//! implementation with zero network dependency. `GeminiClient` is the real
//! reqwest-backed implementation.

pub mod error;
pub mod gemini;
pub mod wire;

pub use error::{ProviderError, ProviderResult};
pub use gemini::GeminiClient;
pub use wire::{GenerateRequest, GenerateResponse};

use async_trait::async_trait;

/// Capability interface for submitting one model request
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Submit a single request and return the raw provider response
    async fn submit(&self, request: &GenerateRequest) -> ProviderResult<GenerateResponse>;
}
