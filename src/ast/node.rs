// Expression node definitions

use super::types::{Head, Number};
use crate::error::{LatexifyError, Result};
use crate::latex::LatexString;

/// One argument slot of an expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Nested expression node
    Expr(Expr),
    /// Identifier or operator symbol
    Symbol(String),
    /// Numeric literal
    Number(Number),
    /// String literal, emitted verbatim
    Str(String),
    /// Boolean literal
    Bool(bool),
    /// Single character
    Char(char),
    /// Already finished LaTeX
    Latex(LatexString),
    /// Materialised array literal
    Array(Grid),
}

impl Term {
    /// Create a symbol term
    #[inline]
    pub fn sym(name: impl Into<String>) -> Self {
        Term::Symbol(name.into())
    }

    /// Symbol name if this slot holds one
    #[inline]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Term::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Nested node if this slot holds one
    #[inline]
    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            Term::Expr(expr) => Some(expr),
            _ => None,
        }
    }
}

impl From<Expr> for Term {
    fn from(expr: Expr) -> Self {
        Term::Expr(expr)
    }
}

impl From<Number> for Term {
    fn from(number: Number) -> Self {
        Term::Number(number)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Number(Number::Int(value))
    }
}

impl From<i32> for Term {
    fn from(value: i32) -> Self {
        Term::Number(Number::Int(value as i64))
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Number(Number::Float(value))
    }
}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::Bool(value)
    }
}

impl From<char> for Term {
    fn from(value: char) -> Self {
        Term::Char(value)
    }
}

impl From<LatexString> for Term {
    fn from(value: LatexString) -> Self {
        Term::Latex(value)
    }
}

impl From<Grid> for Term {
    fn from(value: Grid) -> Self {
        Term::Array(value)
    }
}

/// Expression node: a head plus ordered argument slots
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub head: Head,
    pub args: Vec<Term>,
}

impl Expr {
    /// Create a node from its head and argument slots
    pub fn new(head: Head, args: Vec<Term>) -> Self {
        Self { head, args }
    }

    /// Create a call node with `op` in slot 0 followed by the operands
    pub fn call<I, T>(op: impl Into<String>, operands: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        let mut args = vec![Term::Symbol(op.into())];
        args.extend(operands.into_iter().map(Into::into));
        Self {
            head: Head::Call,
            args,
        }
    }

    /// Operator symbol of a call node
    #[inline]
    pub fn operator(&self) -> Option<&str> {
        match self.head {
            Head::Call => self.args.first().and_then(Term::as_symbol),
            _ => None,
        }
    }

    /// Operands of a call node (every slot after the operator)
    #[inline]
    pub fn operands(&self) -> &[Term] {
        match self.head {
            Head::Call if !self.args.is_empty() => &self.args[1..],
            _ => &self.args,
        }
    }

    /// Tag the parent uses when deciding whether to parenthesise this node
    ///
    /// Only nodes with more than one slot whose slot 0 is a symbol are tagged;
    /// everything else, including single-slot nodes, is untagged.
    #[inline]
    pub fn operator_tag(&self) -> Option<&str> {
        if self.args.len() > 1 {
            self.args[0].as_symbol()
        } else {
            None
        }
    }
}

/// Ordered grid of array cells
///
/// A 1-D grid keeps its cells in a single row and is laid out as a row or a
/// column at render time; a 2-D grid always has rows of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Term>>,
    vector: bool,
}

impl Grid {
    /// Create a 1-D grid
    pub fn vector(cells: Vec<Term>) -> Self {
        Self {
            rows: vec![cells],
            vector: true,
        }
    }

    /// Create a 2-D grid, rejecting rows of unequal length
    pub fn from_rows(rows: Vec<Vec<Term>>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            for (row, cells) in rows.iter().enumerate() {
                if cells.len() != expected {
                    return Err(LatexifyError::RaggedArray {
                        row,
                        expected,
                        got: cells.len(),
                    });
                }
            }
        }
        Ok(Self {
            rows,
            vector: false,
        })
    }

    /// Whether this grid came from a 1-D literal
    #[inline]
    pub fn is_vector(&self) -> bool {
        self.vector
    }

    /// Rows in storage order
    #[inline]
    pub fn rows(&self) -> &[Vec<Term>] {
        &self.rows
    }

    /// Whether the grid holds no cells
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// Number of columns in the stored layout
    #[inline]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}
