use localaitycs_dialogue::ConversationState;
use shared_types::ConversationView;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::warn;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RegistryError {
    #[error("Conversation {0} not found")]
    NotFound(String),
    #[error("Conversation {0} is still processing the previous message")]
    Busy(String),
    #[error("Conversation registry lock poisoned")]
    Poisoned,
}

/// In-process store of live conversations, keyed by id.
///
/// A conversation is claimed for the duration of one turn by setting its
/// `loading` flag; a second turn on the same conversation is refused until the
/// claim is released.
#[derive(Default)]
pub struct ConversationRegistry {
    conversations: Mutex<HashMap<String, ConversationState>>,
}

impl ConversationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, state: ConversationState) -> Result<ConversationView, RegistryError> {
        let view = state.view();
        let mut conversations = self
            .conversations
            .lock()
            .map_err(|_| RegistryError::Poisoned)?;
        conversations.insert(state.id.clone(), state);
        Ok(view)
    }

    pub fn get(&self, id: &str) -> Result<ConversationView, RegistryError> {
        let conversations = self
            .conversations
            .lock()
            .map_err(|_| RegistryError::Poisoned)?;
        conversations
            .get(id)
            .map(ConversationState::view)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Claim a conversation for one turn and hand out its current state.
    pub fn begin_turn(&self, id: &str) -> Result<(ConversationState, TurnClaim<'_>), RegistryError> {
        let mut conversations = self
            .conversations
            .lock()
            .map_err(|_| RegistryError::Poisoned)?;
        let stored = conversations
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        if stored.loading {
            return Err(RegistryError::Busy(id.to_string()));
        }

        let state = stored.clone();
        stored.loading = true;

        Ok((
            state,
            TurnClaim {
                registry: self,
                id: id.to_string(),
                finished: false,
            },
        ))
    }

    /// Replace the stored state of a conversation.
    pub fn publish(&self, state: &ConversationState) -> Result<(), RegistryError> {
        let mut conversations = self
            .conversations
            .lock()
            .map_err(|_| RegistryError::Poisoned)?;
        conversations.insert(state.id.clone(), state.clone());
        Ok(())
    }

    fn release(&self, id: &str) {
        match self.conversations.lock() {
            Ok(mut conversations) => {
                if let Some(stored) = conversations.get_mut(id) {
                    stored.loading = false;
                }
            }
            Err(_) => warn!(conversation_id = %id, "Could not release conversation, lock poisoned"),
        }
    }

    pub fn len(&self) -> usize {
        self.conversations.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive right to run one turn of a conversation.
///
/// Dropping the claim without calling [`finish`](Self::finish) clears the
/// `loading` flag so an abandoned request cannot lock the conversation.
pub struct TurnClaim<'a> {
    registry: &'a ConversationRegistry,
    id: String,
    finished: bool,
}

impl TurnClaim<'_> {
    /// Publish an intermediate state while the turn is still running.
    pub fn progress(&self, state: &ConversationState) {
        if let Err(e) = self.registry.publish(state) {
            warn!(error = %e, conversation_id = %self.id, "Failed to publish in-flight state");
        }
    }

    /// Store the final state of the turn and release the claim.
    pub fn finish(mut self, state: &ConversationState) -> Result<ConversationView, RegistryError> {
        self.finished = true;
        self.registry.publish(state)?;
        Ok(state.view())
    }
}

impl Drop for TurnClaim<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.registry.release(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_conversation() -> (ConversationRegistry, String) {
        let registry = ConversationRegistry::new();
        let state = ConversationState::new();
        let id = state.id.clone();
        registry.insert(state).unwrap();
        (registry, id)
    }

    #[test]
    fn test_unknown_conversation() {
        let registry = ConversationRegistry::new();
        assert_eq!(
            registry.get("missing").unwrap_err(),
            RegistryError::NotFound("missing".to_string())
        );
        assert!(matches!(
            registry.begin_turn("missing"),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn test_second_turn_is_refused_while_claimed() {
        let (registry, id) = registry_with_conversation();

        let (state, _claim) = registry.begin_turn(&id).unwrap();
        assert!(!state.loading);
        assert!(registry.get(&id).unwrap().loading);

        assert!(matches!(
            registry.begin_turn(&id),
            Err(RegistryError::Busy(_))
        ));
    }

    #[test]
    fn test_dropped_claim_releases_conversation() {
        let (registry, id) = registry_with_conversation();

        {
            let _claim = registry.begin_turn(&id).unwrap();
        }

        assert!(!registry.get(&id).unwrap().loading);
        assert!(registry.begin_turn(&id).is_ok());
    }

    #[test]
    fn test_finish_stores_new_state() {
        let (registry, id) = registry_with_conversation();

        let (mut state, claim) = registry.begin_turn(&id).unwrap();
        state.turns.push(shared_types::ConversationTurn::user("1000"));
        claim.progress(&ConversationState {
            loading: true,
            ..state.clone()
        });
        assert_eq!(registry.get(&id).unwrap().turns.len(), 3);

        let view = claim.finish(&state).unwrap();

        assert_eq!(view.turns.len(), 3);
        assert!(!registry.get(&id).unwrap().loading);
        assert_eq!(registry.len(), 1);
    }
}
