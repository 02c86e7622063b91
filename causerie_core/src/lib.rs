#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Shared vocabulary for the causerie workspace: message types, sampling
//! parameters, the completion-provider seam, and the error taxonomy.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod error;

pub use error::{Error, Result};

/// Persona applied to conversations created without an explicit one.
pub const DEFAULT_PERSONA: &str = "You are a compositor: a calm, attentive conversationalist. Answer honestly, keep replies brief, and say how certain you are rather than guessing with confidence.";

/// Nucleus-sampling mass used when the caller omits `randomness`.
pub const DEFAULT_TOP_P: f32 = 0.6;

/// Frequency penalty used when the caller omits `richness`.
pub const DEFAULT_FREQUENCY_PENALTY: f32 = 0.7;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A role-tagged unit sent to the completion provider.
///
/// The `name` speaker label disambiguates multiple human participants and
/// is only ever set on user messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            name: None,
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            name: None,
        }
    }

    /// A user message attributed to a named speaker.
    #[must_use]
    pub fn user_from(content: impl Into<String>, speaker: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            name: Some(speaker.into()),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            name: None,
        }
    }
}

/// Sampling controls forwarded to the provider on every completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub top_p: f32,
    pub frequency_penalty: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            top_p: DEFAULT_TOP_P,
            frequency_penalty: DEFAULT_FREQUENCY_PENALTY,
        }
    }
}

/// Stateless wrapper around one external completion endpoint.
///
/// Implementations issue exactly one call per invocation and own no
/// conversation state.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Execute one completion over the given message sequence and return
    /// the generated text.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: SamplingParams,
    ) -> anyhow::Result<String>;
}

#[async_trait]
impl<T> CompletionProvider for Arc<T>
where
    T: CompletionProvider + ?Sized,
{
    async fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: SamplingParams,
    ) -> anyhow::Result<String> {
        (**self).complete(messages, sampling).await
    }
}
