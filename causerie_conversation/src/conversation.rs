//! Conversation entity: an append-only turn history plus a persona.

use chrono::{DateTime, Utc};

/// One prompt/response exchange recorded in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub prompt: String,
    pub response: String,
}

/// An ongoing dialogue with a stable identifier.
///
/// The id is assigned at creation and never changes. Turns are only ever
/// appended, and only after the provider call for that turn succeeded.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: String,
    pub turns: Vec<Turn>,
    pub persona: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    #[must_use]
    pub fn new(id: impl Into<String>, persona: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            turns: Vec::new(),
            persona: persona.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a completed exchange.
    pub fn record_turn(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.turns.push(Turn {
            prompt: prompt.into(),
            response: response.into(),
        });
        self.updated_at = Utc::now();
    }

    /// Overwrite the persona instruction.
    ///
    /// Empty instructions are ignored so the persona applied at creation
    /// is never lost to an absent field on a later turn.
    pub fn set_persona(&mut self, persona: impl Into<String>) {
        let persona = persona.into();
        if !persona.is_empty() {
            self.persona = persona;
            self.updated_at = Utc::now();
        }
    }

    #[must_use]
    pub const fn turn_count(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_turn_appends_in_order() {
        let mut conversation = Conversation::new("c1", "persona");

        assert!(conversation.is_empty());

        conversation.record_turn("Hi\n\nResponse:", "Hello!");
        conversation.record_turn("And you?\n\nResponse:", "Fine.");

        assert_eq!(conversation.turn_count(), 2);
        assert_eq!(conversation.turns[0].prompt, "Hi\n\nResponse:");
        assert_eq!(conversation.turns[1].response, "Fine.");
    }

    #[test]
    fn empty_persona_never_overwrites() {
        let mut conversation = Conversation::new("c1", "original persona");

        conversation.set_persona("");
        assert_eq!(conversation.persona, "original persona");

        conversation.set_persona("pirate captain");
        assert_eq!(conversation.persona, "pirate captain");
    }
}
