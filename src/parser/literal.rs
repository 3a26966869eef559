//! Literal parsing for expression atoms.

use crate::ast::{Number, Term};

/// Try to parse an atom into a literal slot.
///
/// Supported forms:
/// - Boolean literals: `true` / `false`
/// - Numeric literals: integers, floats, and exponent forms accepted by Rust's parsers
pub fn parse_literal(s: &str) -> Option<Term> {
    match s {
        "true" => return Some(Term::Bool(true)),
        "false" => return Some(Term::Bool(false)),
        _ => {},
    }

    parse_number_literal(s).map(Term::Number)
}

/// Parse a numeric literal.
///
/// Integers that overflow `i64` fall back to floating point.
pub fn parse_number_literal(s: &str) -> Option<Number> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    let is_integer = trimmed.bytes().all(|b| b.is_ascii_digit());
    if is_integer {
        if let Ok(int_val) = trimmed.parse::<i64>() {
            return Some(Number::Int(int_val));
        }
    }

    trimmed.parse::<f64>().ok().map(Number::Float)
}

/// Unescape the body of a `"..."` literal (without the surrounding quotes).
///
/// Recognised escapes are `\"`, `\\`, `\n` and `\t`; any other backslash is kept as is.
pub fn unescape_string_literal(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('"') => {
                out.push('"');
                chars.next();
            },
            Some('\\') => {
                out.push('\\');
                chars.next();
            },
            Some('n') => {
                out.push('\n');
                chars.next();
            },
            Some('t') => {
                out.push('\t');
                chars.next();
            },
            _ => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_float_literals() {
        assert_eq!(parse_number_literal("42"), Some(Number::Int(42)));
        assert_eq!(parse_number_literal("1.5"), Some(Number::Float(1.5)));
        assert_eq!(parse_number_literal(".5"), Some(Number::Float(0.5)));
        assert_eq!(parse_number_literal("1e-3"), Some(Number::Float(0.001)));
        assert_eq!(parse_number_literal("x"), None);
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        assert_eq!(
            parse_number_literal("99999999999999999999"),
            Some(Number::Float(1e20))
        );
    }

    #[test]
    fn test_boolean_literals() {
        assert_eq!(parse_literal("true"), Some(Term::Bool(true)));
        assert_eq!(parse_literal("false"), Some(Term::Bool(false)));
        assert_eq!(parse_literal("True"), None);
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape_string_literal(r#"a\"b\\c"#), "a\"b\\c");
        assert_eq!(unescape_string_literal(r"\alpha"), r"\alpha");
    }
}
