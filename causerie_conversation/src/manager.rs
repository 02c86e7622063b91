//! Turn orchestration: validate, resolve, assemble, complete, record.

use std::sync::Arc;

use causerie_core::{CompletionProvider, DEFAULT_PERSONA, Error, Result};
use tracing::{debug, info};

use crate::context::{assemble, prompt_with_cue};
use crate::request::{RawTurnRequest, TurnRequest, validate};
use crate::store::{ConversationHandle, ConversationStore};

/// Successful outcome of one processed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub response: String,
    pub conversation_id: String,
}

/// End-to-end handler for conversational turns.
///
/// Stateless across requests beyond what lives in the store: each call to
/// [`SessionManager::process_turn`] is an independent unit of work.
pub struct SessionManager<P = Arc<dyn CompletionProvider>>
where
    P: Send + Sync,
{
    provider: P,
    store: ConversationStore,
}

impl<P> SessionManager<P>
where
    P: CompletionProvider,
{
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            store: ConversationStore::new(),
        }
    }

    /// The backing conversation store.
    #[must_use]
    pub const fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Process one turn end to end.
    ///
    /// The conversation lock is held from resolution through recording, so
    /// a concurrent request for the same conversation cannot interleave
    /// its turn with this one. The store map lock is never held across the
    /// provider await. The turn is recorded only after the provider call
    /// fully succeeded.
    pub async fn process_turn(&self, raw: &RawTurnRequest) -> Result<TurnOutcome> {
        let request = validate(raw)?;
        let prompt_text = prompt_with_cue(&request.prompt);

        let (conversation_id, handle) = self.resolve_conversation(&request)?;
        let mut conversation = handle.lock().await;

        if let Some(persona) = &request.persona {
            conversation.set_persona(persona.clone());
        }

        let messages = assemble(&conversation, &prompt_text, &request.pseudo);
        debug!(
            "Assembled {} messages for conversation {conversation_id}",
            messages.len()
        );

        let response = self
            .provider
            .complete(&messages, request.sampling)
            .await
            .map_err(Error::Provider)?;

        conversation.record_turn(prompt_text, response.clone());
        info!(
            "Recorded turn {} for conversation {conversation_id}",
            conversation.turn_count()
        );

        Ok(TurnOutcome {
            response,
            conversation_id,
        })
    }

    /// Fetch the addressed conversation, or create one when the caller
    /// asked for a new conversation or supplied no usable id. An unknown
    /// id without the new-conversation flag is a hard failure, never a
    /// silent new conversation.
    fn resolve_conversation(
        &self,
        request: &TurnRequest,
    ) -> Result<(String, ConversationHandle)> {
        match &request.conversation_id {
            Some(id) if !request.new_conversation => {
                let handle = self
                    .store
                    .get(id)
                    .ok_or_else(|| Error::ConversationNotFound(id.clone()))?;
                Ok((id.clone(), handle))
            }
            _ => {
                let persona = request
                    .persona
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PERSONA.to_string());
                Ok(self.store.create_unique(&request.pseudo, persona))
            }
        }
    }
}
