//! Error types for LaTeX rendering.
//!
//! Every failure is raised at the point of detection and returned to the
//! top-level caller; a failed render produces no partial output.
use thiserror::Error;

use crate::ast::Head;

/// Main error type for latexify operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatexifyError {
    /// The multi-argument entry point was called with fewer than two values
    #[error("latexify_args needs at least two values to render as a sequence, got {got}")]
    TooFewArguments { got: usize },

    /// Raw text could not be parsed into an expression
    #[error(
        "could not parse {input:?} as a mathematical expression ({reason}). \
         If the text is already LaTeX, mark it as finished by wrapping it in `LatexString`; \
         if it is plain text such as a table cell, disable math parsing with \
         `LatexifyOptions::with_parse_text(false)`"
    )]
    UnparseableText { input: String, reason: String },

    /// Operator symbol with no rendering rule
    #[error("no LaTeX rule for operator `{0}`")]
    UnsupportedOperator(String),

    /// Structural node head with no rendering rule
    #[error("no LaTeX rule for expression head {0:?}")]
    UnsupportedHead(Head),

    /// Operator applied to an operand count it has no rule for
    #[error("operator `{operator}` expects {expected} operand(s), got {got}")]
    Arity {
        operator: String,
        expected: &'static str,
        got: usize,
    },

    /// Rows of a 2-D array literal differ in length
    #[error("array row {row} has {got} cells, expected {expected}")]
    RaggedArray {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Printf-style number pattern that cannot be parsed
    #[error("invalid number format pattern: {0}")]
    InvalidNumberFormat(String),

    /// Expression nesting deeper than the configured limit
    #[error("expression nesting exceeds the limit of {0} levels")]
    RecursionLimit(usize),

    /// Value kind with no rendering rule
    #[error("cannot render a value of type `{0}` as LaTeX")]
    UnsupportedValue(String),
}

/// Result type for latexify operations.
pub type Result<T> = std::result::Result<T, LatexifyError>;
