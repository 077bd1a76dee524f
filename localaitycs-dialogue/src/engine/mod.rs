use crate::messages;
use crate::state::{ConversationState, Stage};
use crate::storage::RecordStore;
use crate::validation::parse_budget;
use localaitycs_gateway::AiGateway;
use shared_types::{CompleteSubmission, ConversationTurn};
use std::sync::Arc;
use tracing::{debug, error, info};


/// Result of feeding one user turn into the engine.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Replacement for the state that was passed in
    pub state: ConversationState,
    /// Assistant turns produced by this user turn, in order
    pub emitted: Vec<ConversationTurn>,
}

/// Collects budget, city, investment type and target audience in that order,
/// then saves the submission and asks the AI gateway for a recommendation.
///
/// The engine holds no conversation state of its own: every call consumes a
/// [`ConversationState`] and hands back its successor.
pub struct DialogueEngine {
    store: Arc<dyn RecordStore>,
    gateway: Arc<AiGateway>,
}

impl DialogueEngine {
    pub fn new(store: Arc<dyn RecordStore>, gateway: Arc<AiGateway>) -> Self {
        Self { store, gateway }
    }

    /// Start a conversation seeded with the greeting and the first question.
    pub fn start(&self) -> ConversationState {
        let state = ConversationState::new();
        info!(conversation_id = %state.id, "Conversation started");
        state
    }

    pub async fn accept_turn(&self, state: ConversationState, user_text: &str) -> TurnOutcome {
        self.accept_turn_with(state, user_text, |_| {}).await
    }

    /// Like [`accept_turn`](Self::accept_turn), but reports the in-flight state
    /// (processing turn appended, `loading` set) before the record store and
    /// gateway are called. The hook is not invoked for turns without side effects.
    pub async fn accept_turn_with<F>(
        &self,
        state: ConversationState,
        user_text: &str,
        mut on_progress: F,
    ) -> TurnOutcome
    where
        F: FnMut(&ConversationState) + Send,
    {
        let ConversationState {
            id, stage, mut turns, ..
        } = state;

        turns.push(ConversationTurn::user(user_text));
        let answer = user_text.trim();

        debug!(conversation_id = %id, stage = stage.name(), "Accepting user turn");

        if answer.is_empty() {
            if let Some(question) = text_question(&stage) {
                debug!(conversation_id = %id, stage = stage.name(), "Blank answer, asking again");
                let emitted = vec![ConversationTurn::assistant(question)];
                turns.extend(emitted.iter().cloned());
                return TurnOutcome {
                    state: ConversationState {
                        id,
                        stage,
                        turns,
                        loading: false,
                    },
                    emitted,
                };
            }
        }

        let (stage, emitted) = match stage {
            Stage::AwaitingBudget => on_budget(&id, answer),
            Stage::AwaitingCity { budget } => on_city(budget, answer),
            Stage::AwaitingInvestmentType { budget, city } => {
                on_investment_type(budget, city, answer)
            }
            Stage::AwaitingTargetAudience {
                budget,
                city,
                investment_type,
            } => {
                let submission = CompleteSubmission {
                    budget,
                    city,
                    investment_type,
                    target_audience: answer.to_string(),
                };

                let processing = ConversationTurn::assistant(messages::PROCESSING);

                let mut in_flight_turns = turns.clone();
                in_flight_turns.push(processing.clone());
                on_progress(&ConversationState {
                    id: id.clone(),
                    stage: Stage::Completed {
                        submission: submission.clone(),
                        record_id: None,
                    },
                    turns: in_flight_turns,
                    loading: true,
                });

                let (record_id, reply) = self.finalize(&id, &submission).await;
                (
                    Stage::Completed {
                        submission,
                        record_id,
                    },
                    vec![processing, reply],
                )
            }
            completed @ Stage::Completed { .. } => {
                info!(conversation_id = %id, "Turn received after conversation completed");
                (
                    completed,
                    vec![ConversationTurn::assistant(messages::ALREADY_COMPLETED)],
                )
            }
        };

        turns.extend(emitted.iter().cloned());

        TurnOutcome {
            state: ConversationState {
                id,
                stage,
                turns,
                loading: false,
            },
            emitted,
        }
    }

    /// Save, then recommend. Any failure becomes the generic failure turn.
    async fn finalize(
        &self,
        conversation_id: &str,
        submission: &CompleteSubmission,
    ) -> (Option<i64>, ConversationTurn) {
        let stored = match self.store.save(submission).await {
            Ok(stored) => stored,
            Err(e) => {
                error!(error = %e, conversation_id = %conversation_id, "Failed to save submission");
                return (None, ConversationTurn::assistant(messages::GENERIC_FAILURE));
            }
        };

        info!(
            conversation_id = %conversation_id,
            record_id = stored.id,
            "Submission saved"
        );

        match self.gateway.recommend(submission).await {
            Ok(text) => {
                info!(conversation_id = %conversation_id, "Recommendation received");
                (Some(stored.id), ConversationTurn::assistant(text))
            }
            Err(e) => {
                error!(
                    error = %e,
                    details = %e.details(),
                    occurred_at = %e.occurred_at,
                    conversation_id = %conversation_id,
                    "Failed to get recommendation"
                );
                (
                    Some(stored.id),
                    ConversationTurn::assistant(messages::GENERIC_FAILURE),
                )
            }
        }
    }
}

/// Question pending on a free-text stage, repeated when the answer is blank.
fn text_question(stage: &Stage) -> Option<&'static str> {
    match stage {
        Stage::AwaitingCity { .. } => Some(messages::ASK_CITY),
        Stage::AwaitingInvestmentType { .. } => Some(messages::ASK_INVESTMENT_TYPE),
        Stage::AwaitingTargetAudience { .. } => Some(messages::ASK_TARGET_AUDIENCE),
        Stage::AwaitingBudget | Stage::Completed { .. } => None,
    }
}

fn on_budget(conversation_id: &str, answer: &str) -> (Stage, Vec<ConversationTurn>) {
    match parse_budget(answer) {
        Ok(budget) => (
            Stage::AwaitingCity { budget },
            vec![ConversationTurn::assistant(messages::ASK_CITY)],
        ),
        Err(e) => {
            debug!(error = %e, conversation_id = %conversation_id, "Rejected budget answer");
            (
                Stage::AwaitingBudget,
                vec![ConversationTurn::assistant(messages::INVALID_BUDGET)],
            )
        }
    }
}

fn on_city(budget: f64, answer: &str) -> (Stage, Vec<ConversationTurn>) {
    (
        Stage::AwaitingInvestmentType {
            budget,
            city: answer.to_string(),
        },
        vec![ConversationTurn::assistant(messages::ASK_INVESTMENT_TYPE)],
    )
}

fn on_investment_type(budget: f64, city: String, answer: &str) -> (Stage, Vec<ConversationTurn>) {
    (
        Stage::AwaitingTargetAudience {
            budget,
            city,
            investment_type: answer.to_string(),
        },
        vec![ConversationTurn::assistant(messages::ASK_TARGET_AUDIENCE)],
    )
}
