//! Expressions for limit questions: parsing, evaluation, LaTeX and Unicode
//! rendering, plot sampling, and a numeric approach table.
//!
//! ```
//! use lq_expr::{Domain, Expression};
//!
//! let f = Expression::parse("(x^2 - 1)/(x - 1)").unwrap();
//! assert_eq!(f.evaluate("x", 3.0), Ok(4.0));
//! assert_eq!(f.to_pretty(), "(x² − 1)/(x − 1)");
//! assert_eq!(f.sample(&Domain::default()).len(), 200);
//! ```

/// Expression tree, functions, and constants.
pub mod ast;
/// Ariadne rendering of syntax errors.
pub mod diagnostics;
/// Error types used throughout the crate.
pub mod error;
/// Numeric evaluation.
pub mod eval;
/// Tokenizer.
pub mod lexer;
/// Limit points and the approach table.
pub mod limit;
/// Parser from tokens to [`ast::Expr`].
pub mod parser;
/// Plot sampling.
pub mod plot;
/// Unicode rendering.
pub mod pretty;
/// LaTeX rendering.
pub mod tex;

use std::fmt;

/// Re-export the tree type.
pub use ast::Expr;
/// Re-export error types.
pub use error::{EvalError, EvalResult, ExprError, ExprResult, SyntaxError};
/// Re-export limit types.
pub use limit::{Approach, ApproachRow, Direction, Estimate, LimitPoint, Sample, approach};
/// Re-export plot types.
pub use plot::{Domain, Ordinate, Series};

/// Variable name used when an expression has none.
pub const DEFAULT_VARIABLE: &str = "x";

/// A parsed expression together with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    ast: Expr,
}

impl Expression {
    /// Lex and parse `text`. Lexer and parser errors are reported together.
    pub fn parse(text: &str) -> ExprResult<Self> {
        let (tokens, mut errors) = lexer::lex(text);
        if !errors.is_empty() {
            return Err(ExprError::Syntax(errors));
        }
        match parser::parse(&tokens) {
            Ok(ast) => Ok(Self {
                source: text.to_string(),
                ast,
            }),
            Err(parse_errors) => {
                errors.extend(parse_errors);
                Err(ExprError::Syntax(errors))
            }
        }
    }

    /// The text this was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The expression tree.
    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    /// The single variable to evaluate over: the expression's only variable,
    /// or [`DEFAULT_VARIABLE`] for constant expressions.
    pub fn free_variable(&self) -> ExprResult<String> {
        let mut variables: Vec<String> = self
            .ast
            .variables()
            .into_iter()
            .map(str::to_string)
            .collect();
        match variables.len() {
            0 => Ok(DEFAULT_VARIABLE.to_string()),
            1 => Ok(variables.remove(0)),
            _ => Err(ExprError::TooManyVariables(variables)),
        }
    }

    /// Evaluate with `variable` bound to `value`.
    pub fn evaluate(&self, variable: &str, value: f64) -> EvalResult<f64> {
        self.ast.evaluate(&(variable, value))
    }

    /// LaTeX form.
    pub fn to_tex(&self) -> String {
        tex::to_tex(&self.ast)
    }

    /// Unicode form.
    pub fn to_pretty(&self) -> String {
        pretty::to_pretty(&self.ast)
    }

    /// Sample over `domain`.
    pub fn sample(&self, domain: &Domain) -> Series {
        Series::sample(self, domain)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ast)
    }
}

/// LaTeX for `text`, or `text` itself when it is not a valid expression.
pub fn typeset(text: &str) -> String {
    Expression::parse(text).map_or_else(|_| text.to_string(), |e| e.to_tex())
}

/// Unicode rendering of `text`, or `text` itself when it is not a valid expression.
pub fn pretty(text: &str) -> String {
    Expression::parse(text).map_or_else(|_| text.to_string(), |e| e.to_pretty())
}

/// Sample `text` over `domain`. Unreadable expressions give an empty series.
pub fn sample(text: &str, domain: &Domain) -> Series {
    Expression::parse(text)
        .map(|e| e.sample(domain))
        .unwrap_or_default()
}
