//! Error taxonomy shared across the workspace.
//!
//! Validation failures carry the offending field so the caller sees a
//! specific message; provider failures wrap the transport error and are
//! never surfaced verbatim to the caller.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("conversation already exists: {0}")]
    DuplicateConversation(String),

    #[error("completion provider error: {0}")]
    Provider(#[from] anyhow::Error),
}

impl Error {
    /// True for failures caused by the caller's input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::InvalidType { .. } | Self::OutOfRange { .. }
        )
    }
}
