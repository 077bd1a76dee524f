use crate::messages;
use shared_types::{CompleteSubmission, ConversationTurn, ConversationView, Submission};

/// Where a conversation is in the fixed question sequence.
///
/// Each stage carries exactly the answers collected so far, so an answer can
/// only be written once and only in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    AwaitingBudget,
    AwaitingCity {
        budget: f64,
    },
    AwaitingInvestmentType {
        budget: f64,
        city: String,
    },
    AwaitingTargetAudience {
        budget: f64,
        city: String,
        investment_type: String,
    },
    Completed {
        submission: CompleteSubmission,
        /// Id assigned by the record store, absent if the save failed
        record_id: Option<i64>,
    },
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::AwaitingBudget => "awaiting_budget",
            Stage::AwaitingCity { .. } => "awaiting_city",
            Stage::AwaitingInvestmentType { .. } => "awaiting_investment_type",
            Stage::AwaitingTargetAudience { .. } => "awaiting_target_audience",
            Stage::Completed { .. } => "completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Stage::Completed { .. })
    }

    /// The answers collected so far as a partial submission.
    pub fn submission(&self) -> Submission {
        match self {
            Stage::AwaitingBudget => Submission::default(),
            Stage::AwaitingCity { budget } => Submission {
                budget: Some(*budget),
                ..Submission::default()
            },
            Stage::AwaitingInvestmentType { budget, city } => Submission {
                budget: Some(*budget),
                city: Some(city.clone()),
                ..Submission::default()
            },
            Stage::AwaitingTargetAudience {
                budget,
                city,
                investment_type,
            } => Submission {
                budget: Some(*budget),
                city: Some(city.clone()),
                investment_type: Some(investment_type.clone()),
                target_audience: None,
            },
            Stage::Completed { submission, .. } => submission.clone().into(),
        }
    }
}

/// A conversation: current stage plus the append-only turn log.
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub id: String,
    pub stage: Stage,
    pub turns: Vec<ConversationTurn>,
    /// Set while a turn's external calls are in flight
    pub loading: bool,
}

impl ConversationState {
    /// Fresh conversation seeded with the greeting and the budget question.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            stage: Stage::AwaitingBudget,
            turns: vec![
                ConversationTurn::assistant(messages::GREETING),
                ConversationTurn::assistant(messages::ASK_BUDGET),
            ],
            loading: false,
        }
    }

    pub fn submission(&self) -> Submission {
        self.stage.submission()
    }

    pub fn last_turn(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn view(&self) -> ConversationView {
        ConversationView {
            id: self.id.clone(),
            stage: self.stage.name().to_string(),
            submission: self.submission(),
            turns: self.turns.clone(),
            loading: self.loading,
        }
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
