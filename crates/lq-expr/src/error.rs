use std::fmt;
use std::ops::Range;

/// Alias for `Result<T, ExprError>`.
pub type ExprResult<T> = Result<T, ExprError>;

/// Alias for `Result<T, EvalError>`.
pub type EvalResult<T> = Result<T, EvalError>;

/// A lexer or parser error with its byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Byte range of the offending input.
    pub span: Range<usize>,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {}..{})", self.message, self.span.start, self.span.end)
    }
}

/// Errors raised while reading an expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExprError {
    /// The text is not a well-formed expression. Never empty.
    #[error("invalid expression: {}", first_message(.0))]
    Syntax(Vec<SyntaxError>),

    /// The expression mixes more than one variable.
    #[error("expected at most one variable, found {}", .0.join(", "))]
    TooManyVariables(Vec<String>),

    /// A limit point mentions a variable.
    #[error("a limit point must be a constant, found variable {0}")]
    NotConstant(String),

    /// A constant expression could not be evaluated.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl ExprError {
    /// The syntax errors, if this is one.
    pub fn syntax_errors(&self) -> &[SyntaxError] {
        match self {
            ExprError::Syntax(errors) => errors,
            _ => &[],
        }
    }
}

fn first_message(errors: &[SyntaxError]) -> &str {
    errors.first().map_or("empty input", |e| e.message.as_str())
}

/// Reasons a single evaluation fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// A variable has no value.
    #[error("no value for variable {0}")]
    UnboundVariable(String),

    /// A division by exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The result is not a real number (e.g. `ln(-1)` or an overflow).
    #[error("undefined: {0}")]
    Domain(String),
}
