//! Conversation data model shared between the host UI and the core
//!
//! This module contains the message history types the host passes into the
//! core per call, plus the option and reply types for a single turn. The
//! design prioritizes:
//! - Type safety through enums and strong typing
//! - Immutability of history (the core only reads what it is given)
//! - Zero coupling to any provider wire format

pub mod types;

pub use types::{
    AskOptions, Message, MessageRole, ModelTier, Part, ProviderReply, SourceRef, Subject,
    ThinkingLevel,
};
