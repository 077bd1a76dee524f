pub mod engine;
pub mod messages;
pub mod state;
pub mod storage;
pub mod validation;

pub use engine::{DialogueEngine, TurnOutcome};
pub use state::{ConversationState, Stage};
pub use storage::{InMemoryRecordStore, RecordStore, StorageError};
pub use validation::{parse_budget, ValidationError};
