use std::path::PathBuf;

/// Alias for `Result<T, RepoError>`.
pub type RepoResult<T> = Result<T, RepoError>;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Alias for `Result<T, SessionError>`.
pub type SessionResult<T> = Result<T, SessionError>;

/// Reasons a question (or a question draft) is not well-formed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The question statement is blank.
    #[error("the question prompt is required")]
    MissingPrompt,

    /// An expression question has no expression.
    #[error("an expression question needs an expression")]
    MissingExpression,

    /// An expression question has no limit point.
    #[error("an expression question needs a limit point")]
    MissingLimitPoint,

    /// An image question has no image reference.
    #[error("an image question needs an image")]
    MissingImage,

    /// The question has no answer options.
    #[error("add at least one answer option")]
    NoAnswerOptions,

    /// One of the answer options is blank.
    #[error("answer option {0} is blank")]
    BlankOption(usize),

    /// The same answer option appears twice.
    #[error("answer option \"{0}\" appears more than once")]
    DuplicateOption(String),

    /// No correct answer was chosen.
    #[error("choose the correct answer")]
    MissingCorrectAnswer,

    /// The correct answer is not one of the options.
    #[error("the correct answer \"{0}\" is not one of the options")]
    CorrectAnswerNotAnOption(String),
}

/// Errors raised by a [`QuestionStore`](crate::store::QuestionStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("cannot access {path}: {source}")]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The stored data is not valid JSON of the expected shape.
    #[error("stored questions are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored data declares a format version this build cannot read.
    #[error("unsupported question file version {0}")]
    UnsupportedVersion(u32),

    /// The stored data parsed, but one of the questions is malformed.
    #[error("stored question {index} is malformed: {source}")]
    Malformed {
        /// 0-based position of the offending question.
        index: usize,
        /// Why the question was rejected.
        #[source]
        source: ValidationError,
    },

    /// The in-memory store was configured to refuse writes.
    #[error("the store is read-only")]
    ReadOnly,
}

impl StoreError {
    /// Whether the stored bytes themselves are bad, as opposed to the store
    /// being unreachable. Only bad data is quarantined.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(
            self,
            Self::Json(_) | Self::UnsupportedVersion(_) | Self::Malformed { .. }
        )
    }
}

/// Errors returned by the question repository.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The candidate question was rejected. Nothing was changed.
    #[error("invalid question: {0}")]
    Invalid(#[from] ValidationError),

    /// The requested position does not exist. Nothing was changed.
    #[error("no question at position {index} (the bank has {len})")]
    IndexOutOfRange {
        /// The requested 0-based position.
        index: usize,
        /// Number of questions in the bank.
        len: usize,
    },

    /// The change could not be persisted and was rolled back.
    #[error("could not save questions: {0}")]
    Store(#[from] StoreError),

    /// The store could not be read at startup, so writing to it could
    /// destroy data. Nothing was changed.
    #[error("the question file could not be read ({0}); it is left untouched")]
    Unavailable(String),
}

/// Errors returned when a game session is driven out of order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// A session cannot start without questions.
    #[error("there are no questions to play")]
    EmptyBank,

    /// The operation needs a session in the playing phase.
    #[error("no game is in progress")]
    NotPlaying,

    /// The current question was already answered.
    #[error("this question has already been answered")]
    AlreadyAnswered,

    /// The current question must be answered before moving on.
    #[error("answer the question before moving on")]
    NotAnswered,

    /// The selected option position does not exist.
    #[error("there is no option {0}")]
    NoSuchOption(usize),
}
