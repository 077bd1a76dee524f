use crate::submission::Submission;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// One message in a conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ConversationTurn {
    pub id: String,
    pub text: String,
    pub role: TurnRole,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            role,
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(TurnRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ConversationView {
    pub id: String,
    /// One of `awaiting_budget`, `awaiting_city`, `awaiting_investment_type`,
    /// `awaiting_target_audience`, `completed`.
    pub stage: String,
    pub submission: Submission,
    pub turns: Vec<ConversationTurn>,
    pub loading: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct SendTurnRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct SendTurnResponse {
    pub conversation: ConversationView,
    /// Assistant turns produced by this user turn, in order.
    pub emitted: Vec<ConversationTurn>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_ids_are_unique() {
        let first = ConversationTurn::user("1000");
        let second = ConversationTurn::user("1000");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let turn = ConversationTurn::assistant("Olá");
        let value = serde_json::to_value(&turn).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["text"], "Olá");
    }
}
