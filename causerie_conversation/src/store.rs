//! Process-wide in-memory conversation store.
//!
//! Lifecycle = process lifetime; nothing is persisted and nothing is
//! evicted. The outer map lock is held only for lookups and insertions,
//! never across an await. Each conversation carries its own async mutex
//! so an in-flight turn serializes later requests for the same id while
//! other conversations proceed concurrently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use causerie_core::{Error, Result};
use tracing::debug;

use crate::conversation::Conversation;
use crate::id::conversation_id;

/// Shared handle to one live conversation.
pub type ConversationHandle = Arc<tokio::sync::Mutex<Conversation>>;

#[derive(Debug, Default)]
pub struct ConversationStore {
    inner: Mutex<HashMap<String, ConversationHandle>>,
}

impl ConversationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<ConversationHandle> {
        self.lock_map().get(id).cloned()
    }

    #[must_use]
    pub fn exists(&self, id: &str) -> bool {
        self.lock_map().contains_key(id)
    }

    /// Number of live conversations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_map().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_map().is_empty()
    }

    /// Insert a conversation under a caller-chosen identifier.
    pub fn create(&self, id: &str, persona: impl Into<String>) -> Result<ConversationHandle> {
        let mut map = self.lock_map();
        if map.contains_key(id) {
            return Err(Error::DuplicateConversation(id.to_string()));
        }

        let handle = Arc::new(tokio::sync::Mutex::new(Conversation::new(id, persona)));
        map.insert(id.to_string(), Arc::clone(&handle));
        Ok(handle)
    }

    /// Create a conversation under a freshly generated identifier.
    ///
    /// Generation, the collision check, and the insertion all happen under
    /// one lock acquisition: two concurrent creators can never both
    /// observe "absent" for the same candidate id.
    pub fn create_unique(
        &self,
        pseudo: &str,
        persona: impl Into<String>,
    ) -> (String, ConversationHandle) {
        let mut map = self.lock_map();

        let id = loop {
            let candidate = conversation_id(pseudo);
            if !map.contains_key(&candidate) {
                break candidate;
            }
        };

        let handle = Arc::new(tokio::sync::Mutex::new(Conversation::new(
            id.clone(),
            persona,
        )));
        map.insert(id.clone(), Arc::clone(&handle));
        debug!("Created conversation {id}");

        (id, handle)
    }

    fn lock_map(&self) -> MutexGuard<'_, HashMap<String, ConversationHandle>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
