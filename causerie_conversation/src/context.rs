//! Context assembly: derive the provider message sequence from history.

use causerie_core::ChatMessage;

use crate::conversation::Conversation;

/// Marker appended to every prompt so the model completes after it.
pub const RESPONSE_CUE: &str = "\n\nResponse:";

/// Append the response cue to a raw prompt.
#[must_use]
pub fn prompt_with_cue(prompt: &str) -> String {
    format!("{prompt}{RESPONSE_CUE}")
}

/// Rebuild the ordered message sequence for one completion call.
///
/// A conversation with no recorded turns contributes its persona as the
/// opening system message. Once history exists, the persona is instead
/// re-inserted after the replayed turns so it takes priority over the
/// original seed. The new prompt always goes last, without a speaker
/// label. Deterministic: identical inputs produce an identical sequence.
#[must_use]
pub fn assemble(conversation: &Conversation, prompt_text: &str, pseudo: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(conversation.turns.len() * 2 + 2);

    if conversation.turns.is_empty() {
        messages.push(ChatMessage::system(conversation.persona.clone()));
    }

    for turn in &conversation.turns {
        messages.push(ChatMessage::user_from(turn.prompt.clone(), pseudo));
        messages.push(ChatMessage::assistant(turn.response.clone()));
    }

    if messages.len() > 1 {
        messages.push(ChatMessage::system(conversation.persona.clone()));
    }

    messages.push(ChatMessage::user(prompt_text));
    messages
}

#[cfg(test)]
mod tests {
    use causerie_core::{DEFAULT_PERSONA, Role};

    use super::*;

    #[test]
    fn cue_is_appended() {
        assert_eq!(prompt_with_cue("Hi"), "Hi\n\nResponse:");
    }

    #[test]
    fn first_turn_opens_with_the_persona_seed() {
        let conversation = Conversation::new("c1", DEFAULT_PERSONA);
        let messages = assemble(&conversation, "Hi\n\nResponse:", "alice");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::system(DEFAULT_PERSONA));
        assert_eq!(messages[1], ChatMessage::user("Hi\n\nResponse:"));
    }

    #[test]
    fn later_turns_replay_history_then_reassert_persona() {
        let mut conversation = Conversation::new("c1", DEFAULT_PERSONA);
        conversation.record_turn("Hi\n\nResponse:", "Hello!");

        let messages = assemble(&conversation, "How are you?\n\nResponse:", "alice");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], ChatMessage::user_from("Hi\n\nResponse:", "alice"));
        assert_eq!(messages[1], ChatMessage::assistant("Hello!"));
        assert_eq!(messages[2], ChatMessage::system(DEFAULT_PERSONA));
        assert_eq!(messages[3], ChatMessage::user("How are you?\n\nResponse:"));
    }

    #[test]
    fn replay_keeps_chronological_order() {
        let mut conversation = Conversation::new("c1", "persona");
        conversation.record_turn("one\n\nResponse:", "1");
        conversation.record_turn("two\n\nResponse:", "2");
        conversation.record_turn("three\n\nResponse:", "3");

        let messages = assemble(&conversation, "four\n\nResponse:", "bob");

        assert_eq!(messages.len(), 8);
        let replayed: Vec<&str> = messages[..6]
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(
            replayed,
            [
                "one\n\nResponse:",
                "1",
                "two\n\nResponse:",
                "2",
                "three\n\nResponse:",
                "3"
            ]
        );
        assert!(messages[..6]
            .iter()
            .step_by(2)
            .all(|m| m.role == Role::User && m.name.as_deref() == Some("bob")));
    }

    #[test]
    fn assembly_is_deterministic() {
        let mut conversation = Conversation::new("c1", "persona");
        conversation.record_turn("Hi\n\nResponse:", "Hello!");

        let first = assemble(&conversation, "Again?\n\nResponse:", "alice");
        let second = assemble(&conversation, "Again?\n\nResponse:", "alice");

        assert_eq!(first, second);
    }
}
