//! Text-to-tree parsing for the expression syntax accepted by
//! [`LatexifyOptions::with_parse_text`](crate::LatexifyOptions::with_parse_text).

mod expr;
mod literal;

pub use expr::{DEFAULT_MAX_DEPTH, parse_expression, parse_expression_with_depth};

use thiserror::Error;

/// Failure to read an expression string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at offset {position}: {message}")]
pub struct ParseError {
    /// Character offset into the input
    pub position: usize,
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}
