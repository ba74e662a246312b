//! Tutor Core Library
//!
//! Response acquisition and resilience layer for the tutoring chat client:
//! translate a conversation history and the user's options into a model
//! request, ride out transient provider failures through model downgrade and
//! backoff retry, and normalize the returned payload into displayable text.
//!
//! The host UI owns message history and persistence; the core is a stateless
//! set of call-scoped operations behind [`engine::ResponseEngine`].

pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod protocol;
pub mod provider;
pub mod retry;
pub mod translate;

pub use engine::ResponseEngine;
pub use error::{TutorError, TutorResult};
pub use protocol::{AskOptions, Message, Part, Subject, ThinkingLevel};
pub use retry::RetryPolicy;

/// Returns the version of the tutor-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
