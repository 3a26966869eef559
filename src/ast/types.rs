// Supporting types for the expression tree

use std::fmt;

/// Structural kind of an expression node
///
/// Operator applications are all `Call` nodes; the operator itself is the
/// symbol stored in argument slot 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Head {
    /// Operator or function application: `[op, operands...]`
    Call,
    /// Indexing: `[collection, indices...]`
    Ref,
    /// Assignment: `[lhs, rhs]`
    Assign,
    /// Chained comparison: `[a, op, b, op, c, ...]`
    Comparison,
    /// Parenthesised tuple
    Tuple,
    /// Sequence of statements
    Block,
    /// Conditional: `[condition, then, else]`
    If,
    /// Array literal `[a, b]`
    Vect,
    /// Array literal `[a b]`
    Hcat,
    /// Array literal `[a b; c d]` or `[a; b]`
    Vcat,
    /// One row of a `Vcat` literal
    Row,
}

/// Numeric literal value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Whether the value is strictly below zero
    #[inline]
    pub fn is_negative(self) -> bool {
        match self {
            Number::Int(i) => i < 0,
            Number::Float(f) => f < 0.0,
        }
    }

    /// Value as `f64`
    #[inline]
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(value: $t) -> Self {
                Number::Int(value as i64)
            }
        })*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Matrix fence types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixFence {
    None,
    Paren,
    #[default]
    Bracket,
    Brace,
    Pipe,
    DoublePipe,
}

/// Column alignment for array environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Column specifier letter used by the `array` environment
    #[inline]
    pub fn column_spec(self) -> char {
        match self {
            Alignment::Left => 'l',
            Alignment::Center => 'c',
            Alignment::Right => 'r',
        }
    }
}
