//! Expression parsing (tokens + recursive descent parser).

use super::ParseError;
use super::literal::{parse_literal, parse_number_literal, unescape_string_literal};
use crate::ast::{Expr, Head, Term};

/// Nesting limit used by [`parse_expression`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(String),
    Ident(String),
    Str(String),
    Op(&'static str),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Question,
    Colon,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    /// Character offset of the first character
    pos: usize,
    /// Whether whitespace separates this token from the previous one
    space_before: bool,
}

// Longest operators first so that prefixes never shadow them.
const MULTI_CHAR_OPS: &[&str] = &[
    "===", "==", "!=", "<=", ">=", "&&", "||", "//", ".+", ".-", ".*", "./", ".^",
];

const ADDITIVE_OPS: &[&str] = &["+", "-", "±", "∓", ".+", ".-"];
const MULTIPLICATIVE_OPS: &[&str] = &["*", "/", "//", "%", "\\", "÷", "×", "⋅", ".*", "./"];
const COMPARISON_OPS: &[&str] = &[
    "==", "!=", "≠", "<", ">", "<=", "≤", ">=", "≥", "≈", "===", "≡", "∈", "∉",
];
const POWER_OPS: &[&str] = &["^", ".^"];

/// Parse a full expression string into a tree.
///
/// Supported grammar (lowest precedence first):
///
/// ```text
/// statements  := assignment (";" assignment)*
/// assignment  := ternary ("=" assignment)?
/// ternary     := or ("?" assignment ":" assignment)?
/// or          := and ("||" and)*
/// and         := comparison ("&&" comparison)*
/// comparison  := additive (CMP additive)*
/// additive    := multiplicative (("+" | "-" | "±" | "∓") multiplicative)*
/// multiplicative := unary (("*" | "/" | "//" | "%" | "\" | "÷" | "×" | "⋅") unary)*
/// unary       := ("-" | "+" | "!" | "√" | "±") unary | power
/// power       := juxtaposed ("^" unary)?
/// juxtaposed  := NUMBER power | postfix
/// postfix     := primary ("(" args ")" | "[" args "]")*
/// primary     := NUMBER | IDENT | STRING | "(" ... ")" | "[" ... "]"
/// ```
pub fn parse_expression(input: &str) -> Result<Term, ParseError> {
    parse_expression_with_depth(input, DEFAULT_MAX_DEPTH)
}

/// Parse a full expression string, failing once nesting exceeds `max_depth`.
pub fn parse_expression_with_depth(input: &str, max_depth: usize) -> Result<Term, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::new(0, "empty expression"));
    }

    let mut parser = ExprParser {
        tokens,
        pos: 0,
        depth: 0,
        max_depth,
        space_sensitive: false,
        end: input.chars().count(),
    };

    let term = parser.parse_statements()?;

    // All tokens must be consumed for a valid expression.
    if let Some(tok) = parser.peek() {
        return Err(ParseError::new(
            tok.pos,
            format!("unexpected {}", describe(&tok.kind)),
        ));
    }

    Ok(term)
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let mut space_before = false;

    while i < chars.len() {
        let ch = chars[i];
        if ch.is_whitespace() {
            space_before = true;
            i += 1;
            continue;
        }

        let start = i;
        let kind = if ch.is_ascii_digit()
            || (ch == '.' && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit()))
        {
            let end = scan_number(&chars, i);
            let text: String = chars[i..end].iter().collect();
            i = end;
            TokenKind::Number(text)
        } else if is_ident_start(ch) {
            let mut end = i + 1;
            while end < chars.len() && is_ident_continue(chars[end]) {
                end += 1;
            }
            let text: String = chars[i..end].iter().collect();
            i = end;
            TokenKind::Ident(text)
        } else if ch == '"' {
            // String literal: consume until the closing quote, honouring
            // backslash escapes.
            let mut end = i + 1;
            let mut closed = false;
            while end < chars.len() {
                match chars[end] {
                    '\\' => end += 2,
                    '"' => {
                        closed = true;
                        break;
                    },
                    _ => end += 1,
                }
            }
            if !closed {
                return Err(ParseError::new(start, "unterminated string literal"));
            }
            let body: String = chars[i + 1..end].iter().collect();
            i = end + 1;
            TokenKind::Str(unescape_string_literal(&body))
        } else if let Some(op) = match_multi_char_op(&chars, i) {
            i += op.chars().count();
            TokenKind::Op(op)
        } else {
            i += 1;
            match ch {
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '[' => TokenKind::LBracket,
                ']' => TokenKind::RBracket,
                ',' => TokenKind::Comma,
                ';' => TokenKind::Semicolon,
                '?' => TokenKind::Question,
                ':' => TokenKind::Colon,
                '+' => TokenKind::Op("+"),
                '-' | '−' => TokenKind::Op("-"),
                '*' => TokenKind::Op("*"),
                '/' => TokenKind::Op("/"),
                '%' => TokenKind::Op("%"),
                '\\' => TokenKind::Op("\\"),
                '^' => TokenKind::Op("^"),
                '!' => TokenKind::Op("!"),
                '=' => TokenKind::Op("="),
                '<' => TokenKind::Op("<"),
                '>' => TokenKind::Op(">"),
                '±' => TokenKind::Op("±"),
                '∓' => TokenKind::Op("∓"),
                '×' => TokenKind::Op("×"),
                '÷' => TokenKind::Op("÷"),
                '⋅' | '·' => TokenKind::Op("⋅"),
                '≤' => TokenKind::Op("≤"),
                '≥' => TokenKind::Op("≥"),
                '≠' => TokenKind::Op("≠"),
                '≈' => TokenKind::Op("≈"),
                '≡' => TokenKind::Op("≡"),
                '∈' => TokenKind::Op("∈"),
                '∉' => TokenKind::Op("∉"),
                '√' => TokenKind::Op("√"),
                other => {
                    return Err(ParseError::new(
                        start,
                        format!("unexpected character {:?}", other),
                    ));
                },
            }
        };

        tokens.push(Token {
            kind,
            pos: start,
            space_before,
        });
        space_before = false;
    }

    Ok(tokens)
}

fn scan_number(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    // A dot only belongs to the number when a digit follows, so `2.*x` keeps `.*`.
    if end < chars.len() && chars[end] == '.' && chars.get(end + 1).is_some_and(|c| c.is_ascii_digit())
    {
        end += 1;
        while end < chars.len() && chars[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end < chars.len() && matches!(chars[end], 'e' | 'E') {
        let mut exp = end + 1;
        if exp < chars.len() && matches!(chars[exp], '+' | '-') {
            exp += 1;
        }
        if chars.get(exp).is_some_and(|c| c.is_ascii_digit()) {
            end = exp;
            while end < chars.len() && chars[end].is_ascii_digit() {
                end += 1;
            }
        }
    }
    end
}

fn match_multi_char_op(chars: &[char], i: usize) -> Option<&'static str> {
    MULTI_CHAR_OPS.iter().copied().find(|op| {
        let len = op.chars().count();
        i + len <= chars.len() && op.chars().zip(&chars[i..i + len]).all(|(a, &b)| a == b)
    })
}

#[inline]
fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '∞'
}

#[inline]
fn is_ident_continue(ch: char) -> bool {
    // Alphanumerics cover unicode sub/superscript digits; U+0300..U+036F are combining marks.
    ch.is_alphanumeric() || ch == '_' || ch == '′' || ('\u{0300}'..='\u{036F}').contains(&ch)
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Number(n) => format!("number `{}`", n),
        TokenKind::Ident(name) => format!("identifier `{}`", name),
        TokenKind::Str(_) => "string literal".to_string(),
        TokenKind::Op(op) => format!("operator `{}`", op),
        TokenKind::LParen => "`(`".to_string(),
        TokenKind::RParen => "`)`".to_string(),
        TokenKind::LBracket => "`[`".to_string(),
        TokenKind::RBracket => "`]`".to_string(),
        TokenKind::Comma => "`,`".to_string(),
        TokenKind::Semicolon => "`;`".to_string(),
        TokenKind::Question => "`?`".to_string(),
        TokenKind::Colon => "`:`".to_string(),
    }
}

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
    /// Inside an array literal, whitespace separates elements
    space_sensitive: bool,
    /// Character length of the input, reported for end-of-input errors
    end: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        let pos = self.peek().map_or(self.end, |t| t.pos);
        ParseError::new(pos, message)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        match self.peek_kind() {
            Some(k) if *k == kind => {
                self.pos += 1;
                Ok(())
            },
            Some(k) => Err(self.error_here(format!(
                "expected {}, found {}",
                describe(&kind),
                describe(k)
            ))),
            None => Err(self.error_here(format!(
                "expected {}, found end of input",
                describe(&kind)
            ))),
        }
    }

    /// Run `f` one nesting level deeper
    ///
    /// Each grouping construct, prefix operator and exponent counts as one level.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(self.error_here(format!(
                "expression nested deeper than {} levels",
                self.max_depth
            )));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Operator at the cursor if it is one of `ops` and may act as a binary operator here.
    ///
    /// Inside array literals `[a -b]` is two elements: an operator preceded by
    /// whitespace but glued to its operand starts a new element instead.
    fn binary_op(&self, ops: &[&'static str]) -> Option<&'static str> {
        let tok = self.peek()?;
        let TokenKind::Op(op) = tok.kind else {
            return None;
        };
        if !ops.contains(&op) {
            return None;
        }
        if self.space_sensitive && tok.space_before {
            let space_after = self.tokens.get(self.pos + 1).is_some_and(|t| t.space_before);
            if !space_after {
                return None;
            }
        }
        Some(op)
    }

    /// Run `f` with whitespace-sensitivity switched to `sensitive`, restoring it afterwards.
    fn with_spacing<T>(
        &mut self,
        sensitive: bool,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = std::mem::replace(&mut self.space_sensitive, sensitive);
        let result = f(self);
        self.space_sensitive = saved;
        result
    }

    fn parse_statements(&mut self) -> Result<Term, ParseError> {
        let first = self.parse_assignment()?;
        if !matches!(self.peek_kind(), Some(TokenKind::Semicolon)) {
            return Ok(first);
        }

        let mut statements = vec![first];
        while matches!(self.peek_kind(), Some(TokenKind::Semicolon)) {
            self.next();
            // Trailing semicolons are allowed.
            if self.peek().is_none() || matches!(self.peek_kind(), Some(TokenKind::RParen)) {
                break;
            }
            statements.push(self.parse_assignment()?);
        }
        Ok(Expr::new(Head::Block, statements).into())
    }

    fn parse_assignment(&mut self) -> Result<Term, ParseError> {
        self.nested(Self::parse_assignment_inner)
    }

    fn parse_assignment_inner(&mut self) -> Result<Term, ParseError> {
        let lhs = self.parse_ternary()?;
        if self.binary_op(&["="]).is_some() {
            self.next();
            let rhs = self.parse_assignment()?;
            return Ok(Expr::new(Head::Assign, vec![lhs, rhs]).into());
        }
        Ok(lhs)
    }

    fn parse_ternary(&mut self) -> Result<Term, ParseError> {
        let condition = self.parse_or()?;
        if !matches!(self.peek_kind(), Some(TokenKind::Question)) {
            return Ok(condition);
        }
        self.next();
        let then = self.parse_assignment()?;
        self.expect(TokenKind::Colon)?;
        let otherwise = self.parse_assignment()?;
        Ok(Expr::new(Head::If, vec![condition, then, otherwise]).into())
    }

    fn parse_or(&mut self) -> Result<Term, ParseError> {
        let mut node = self.parse_and()?;
        while self.binary_op(&["||"]).is_some() {
            self.next();
            let rhs = self.parse_and()?;
            node = Expr::call("||", [node, rhs]).into();
        }
        Ok(node)
    }

    fn parse_and(&mut self) -> Result<Term, ParseError> {
        let mut node = self.parse_comparison()?;
        while self.binary_op(&["&&"]).is_some() {
            self.next();
            let rhs = self.parse_comparison()?;
            node = Expr::call("&&", [node, rhs]).into();
        }
        Ok(node)
    }

    fn parse_comparison(&mut self) -> Result<Term, ParseError> {
        let first = self.parse_additive()?;
        let mut slots = vec![first];

        while let Some(op) = self.binary_op(COMPARISON_OPS) {
            self.next();
            slots.push(Term::sym(op));
            slots.push(self.parse_additive()?);
        }

        match slots.len() {
            1 => Ok(slots.remove(0)),
            // A single comparison is an ordinary call: [op, lhs, rhs].
            3 => {
                slots.swap(0, 1);
                Ok(Expr::new(Head::Call, slots).into())
            },
            _ => Ok(Expr::new(Head::Comparison, slots).into()),
        }
    }

    fn parse_additive(&mut self) -> Result<Term, ParseError> {
        let mut node = self.parse_multiplicative()?;
        let mut open_sum = false;

        while let Some(op) = self.binary_op(ADDITIVE_OPS) {
            self.next();
            let rhs = self.parse_multiplicative()?;
            node = extend_chain(node, op, rhs, "+", &mut open_sum);
        }

        Ok(node)
    }

    fn parse_multiplicative(&mut self) -> Result<Term, ParseError> {
        let mut node = self.parse_unary()?;
        let mut open_product = false;

        while let Some(op) = self.binary_op(MULTIPLICATIVE_OPS) {
            self.next();
            let rhs = self.parse_unary()?;
            node = extend_chain(node, op, rhs, "*", &mut open_product);
        }

        Ok(node)
    }

    fn parse_unary(&mut self) -> Result<Term, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Op("+")) => {
                self.next();
                self.nested(Self::parse_unary)
            },
            Some(TokenKind::Op(op @ ("-" | "!" | "√" | "±"))) => {
                let op = *op;
                self.next();
                let operand = self.nested(Self::parse_unary)?;
                Ok(Expr::call(op, [operand]).into())
            },
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Term, ParseError> {
        let base = self.parse_juxtaposed()?;

        if let Some(op) = self.binary_op(POWER_OPS) {
            self.next();
            // Right associative; the exponent may carry its own sign (`x^-1`).
            let exponent = self.nested(Self::parse_unary)?;
            return Ok(Expr::call(op, [base, exponent]).into());
        }

        Ok(base)
    }

    fn parse_juxtaposed(&mut self) -> Result<Term, ParseError> {
        let base = self.parse_postfix()?;

        // A numeric literal glued to an identifier or a parenthesis is a product: `2x`, `3(a+b)`.
        if matches!(base, Term::Number(_)) {
            if let Some(tok) = self.peek() {
                let glued = !tok.space_before
                    && matches!(tok.kind, TokenKind::Ident(_) | TokenKind::LParen);
                if glued {
                    let rhs = self.parse_power()?;
                    return Ok(Expr::call("*", [base, rhs]).into());
                }
            }
        }

        Ok(base)
    }

    fn parse_postfix(&mut self) -> Result<Term, ParseError> {
        let mut node = self.parse_primary()?;

        loop {
            let Some(tok) = self.peek() else { break };
            if tok.space_before {
                break;
            }
            match tok.kind {
                TokenKind::LParen if !matches!(node, Term::Number(_)) => {
                    self.next();
                    let args = self.parse_arguments(TokenKind::RParen)?;
                    let mut slots = vec![node];
                    slots.extend(args);
                    node = Expr::new(Head::Call, slots).into();
                },
                TokenKind::LBracket => {
                    self.next();
                    let args = self.parse_arguments(TokenKind::RBracket)?;
                    let mut slots = vec![node];
                    slots.extend(args);
                    node = Expr::new(Head::Ref, slots).into();
                },
                _ => break,
            }
        }

        Ok(node)
    }

    /// Comma-separated arguments up to and including `close`.
    fn parse_arguments(&mut self, close: TokenKind) -> Result<Vec<Term>, ParseError> {
        self.with_spacing(false, |p| {
            let mut args = Vec::new();
            if p.peek_kind() == Some(&close) {
                p.next();
                return Ok(args);
            }
            loop {
                args.push(p.parse_assignment()?);
                match p.peek_kind() {
                    Some(TokenKind::Comma) => {
                        p.next();
                    },
                    Some(k) if *k == close => {
                        p.next();
                        break;
                    },
                    _ => {
                        return Err(p.error_here(format!(
                            "expected `,` or {}",
                            describe(&close)
                        )));
                    },
                }
            }
            Ok(args)
        })
    }

    fn parse_primary(&mut self) -> Result<Term, ParseError> {
        let Some(tok) = self.next() else {
            return Err(self.error_here("unexpected end of input"));
        };

        match tok.kind {
            TokenKind::Number(text) => parse_number_literal(&text)
                .map(Term::Number)
                .ok_or_else(|| ParseError::new(tok.pos, format!("invalid number `{}`", text))),
            TokenKind::Ident(name) => Ok(match name.as_str() {
                "true" | "false" => parse_literal(&name).unwrap_or(Term::Symbol(name)),
                _ => Term::Symbol(name),
            }),
            TokenKind::Str(text) => Ok(Term::Str(text)),
            TokenKind::LParen => self.with_spacing(false, |p| p.parse_parenthesized()),
            TokenKind::LBracket => self.parse_array_literal(),
            other => Err(ParseError::new(
                tok.pos,
                format!("unexpected {}", describe(&other)),
            )),
        }
    }

    /// Body of `( ... )`: a grouped expression, a tuple, or a block.
    fn parse_parenthesized(&mut self) -> Result<Term, ParseError> {
        if matches!(self.peek_kind(), Some(TokenKind::RParen)) {
            self.next();
            return Ok(Expr::new(Head::Tuple, Vec::new()).into());
        }

        let first = self.parse_assignment()?;
        match self.peek_kind() {
            Some(TokenKind::RParen) => {
                self.next();
                Ok(first)
            },
            Some(TokenKind::Comma) => {
                let mut items = vec![first];
                while matches!(self.peek_kind(), Some(TokenKind::Comma)) {
                    self.next();
                    if matches!(self.peek_kind(), Some(TokenKind::RParen)) {
                        break;
                    }
                    items.push(self.parse_assignment()?);
                }
                self.expect(TokenKind::RParen)?;
                Ok(Expr::new(Head::Tuple, items).into())
            },
            Some(TokenKind::Semicolon) => {
                let mut statements = vec![first];
                while matches!(self.peek_kind(), Some(TokenKind::Semicolon)) {
                    self.next();
                    if matches!(self.peek_kind(), Some(TokenKind::RParen)) {
                        break;
                    }
                    statements.push(self.parse_assignment()?);
                }
                self.expect(TokenKind::RParen)?;
                Ok(Expr::new(Head::Block, statements).into())
            },
            _ => {
                self.expect(TokenKind::RParen)?;
                Ok(first)
            },
        }
    }

    /// Body of `[ ... ]` after the opening bracket.
    fn parse_array_literal(&mut self) -> Result<Term, ParseError> {
        self.nested(|p| p.with_spacing(true, |p| p.parse_array_body()))
    }

    fn parse_array_body(&mut self) -> Result<Term, ParseError> {
        if matches!(self.peek_kind(), Some(TokenKind::RBracket)) {
            self.next();
            return Ok(Expr::new(Head::Vect, Vec::new()).into());
        }

        let mut rows: Vec<Vec<Term>> = vec![Vec::new()];
        let mut saw_comma = false;
        let mut saw_semicolon = false;
        let mut saw_space = false;

        loop {
            let element = self.parse_or()?;
            if let Some(row) = rows.last_mut() {
                row.push(element);
            }

            match self.peek() {
                Some(Token {
                    kind: TokenKind::Comma,
                    ..
                }) => {
                    saw_comma = true;
                    self.next();
                    if matches!(self.peek_kind(), Some(TokenKind::RBracket)) {
                        self.next();
                        break;
                    }
                },
                Some(Token {
                    kind: TokenKind::Semicolon,
                    ..
                }) => {
                    saw_semicolon = true;
                    self.next();
                    if matches!(self.peek_kind(), Some(TokenKind::RBracket)) {
                        self.next();
                        break;
                    }
                    rows.push(Vec::new());
                },
                Some(Token {
                    kind: TokenKind::RBracket,
                    ..
                }) => {
                    self.next();
                    break;
                },
                Some(tok) if tok.space_before => saw_space = true,
                Some(tok) => {
                    return Err(ParseError::new(
                        tok.pos,
                        format!("unexpected {} in array literal", describe(&tok.kind)),
                    ));
                },
                None => return Err(self.error_here("unterminated array literal")),
            }
        }

        if saw_comma {
            if saw_semicolon || saw_space {
                return Err(self.error_here("cannot mix `,` with `;` or spaces in an array literal"));
            }
            let cells = rows.into_iter().flatten().collect();
            return Ok(Expr::new(Head::Vect, cells).into());
        }

        if !saw_semicolon {
            let cells = rows.into_iter().flatten().collect::<Vec<_>>();
            let head = if cells.len() > 1 { Head::Hcat } else { Head::Vect };
            return Ok(Expr::new(head, cells).into());
        }

        // `[a; b]` is a column of cells, `[a b; c d]` a list of rows.
        let args = if saw_space {
            rows.into_iter()
                .map(|cells| Expr::new(Head::Row, cells).into())
                .collect()
        } else {
            rows.into_iter().flatten().collect()
        };
        Ok(Expr::new(Head::Vcat, args).into())
    }
}

/// Fold `node op rhs` into a chain, appending to an open n-ary node for `flat_op`.
fn extend_chain(node: Term, op: &'static str, rhs: Term, flat_op: &str, open: &mut bool) -> Term {
    if op == flat_op && *open {
        if let Term::Expr(mut expr) = node {
            expr.args.push(rhs);
            return Term::Expr(expr);
        }
        *open = false;
        return Expr::call(op, [node, rhs]).into();
    }
    *open = op == flat_op;
    Expr::call(op, [node, rhs]).into()
}
