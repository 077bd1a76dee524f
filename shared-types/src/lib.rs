pub mod api;
pub mod conversation;
pub mod submission;
pub mod typescript_gen;

pub use typescript_gen::generate_typescript_definitions;

pub use api::{ErrorResponse, ProxyErrorResponse, RecommendationResponse};
pub use conversation::{
    ConversationTurn, ConversationView, SendTurnRequest, SendTurnResponse, TurnRole,
};
pub use submission::{CompleteSubmission, StoredSubmission, Submission, SubmissionField};

// Shared models for the localaitycs server and the chat UI
