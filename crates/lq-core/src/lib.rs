//! Core model for Limit Quiz: authored limit questions, their persistence,
//! and the multiple-choice game played over them.
//!
//! Nothing here touches a terminal. The CLI and TUI in `lq-cli` drive a
//! [`QuestionRepository`] and a [`GameSession`]; other front ends can do the same.

/// Positional list of questions with stable in-memory identities.
pub mod bank;
/// Error types used throughout the crate.
pub mod error;
/// Final tally of a game and its outcome bucket.
pub mod outcome;
/// Questions, drafts, and validation.
pub mod question;
/// The repository: bank plus persistence plus answer visibility.
pub mod repository;
/// The game state machine.
pub mod session;
/// Persistence port, JSON file store, and in-memory store.
pub mod store;
/// Per-question "show answers" flags.
pub mod visibility;

/// Re-export bank types.
pub use bank::{BankEntry, QuestionBank};
/// Re-export error types.
pub use error::{
    RepoError, RepoResult, SessionError, SessionResult, StoreError, StoreResult, ValidationError,
};
/// Re-export outcome types.
pub use outcome::{FinalTally, Outcome};
/// Re-export question types.
pub use question::{LimitSide, Question, QuestionDraft, QuestionId, QuestionKind, Stimulus};
/// Re-export repository types.
pub use repository::{QuestionRepository, RestoreReport};
/// Re-export session types.
pub use session::{Answer, GameSession, Phase, Progress};
/// Re-export store types.
pub use store::{JsonFileStore, MemoryStore, QuestionStore};
