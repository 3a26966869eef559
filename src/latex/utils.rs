// Text helpers for identifier rendering
//
// Special-character scanning uses memchr so that the common case (plain
// identifiers) is a handful of byte scans with no allocation.

use memchr::{memchr, memchr3};
use std::borrow::Cow;

/// Check if a string contains characters that must be escaped inside LaTeX text
#[inline]
pub fn contains_latex_special(text: &str) -> bool {
    let bytes = text.as_bytes();

    memchr3(b'#', b'$', b'%', bytes).is_some()
        || memchr3(b'&', b'_', b'~', bytes).is_some()
        || memchr3(b'{', b'}', b'^', bytes).is_some()
}

/// Escape LaTeX special characters, borrowing when nothing needs escaping
pub fn escape_latex_special_chars(text: &str) -> Cow<'_, str> {
    if !contains_latex_special(text) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '#' | '$' | '%' | '&' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            },
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Rewrite underscore notation in an identifier.
///
/// `x_1` becomes `x_{1}` and `x_a_b` becomes `x_{a\_b}`: everything after the
/// first underscore is the subscript, later underscores are escaped. With
/// `snakecase` every underscore is escaped instead (`my_var` → `my\_var`).
/// An underscore that is already escaped (`\_`) counts as a separator too.
pub fn convert_subscript(name: &str, snakecase: bool) -> Cow<'_, str> {
    if memchr(b'_', name.as_bytes()).is_none() {
        return Cow::Borrowed(name);
    }

    let parts = split_underscores(name);
    if parts.len() == 1 {
        return Cow::Borrowed(name);
    }

    // A leading, trailing or doubled underscore has no sensible subscript reading.
    if snakecase || parts.iter().any(|part| part.is_empty()) {
        return Cow::Owned(parts.join("\\_"));
    }

    let (main, subscript) = parts.split_at(1);
    let mut out = String::with_capacity(name.len() + 4);
    out.push_str(main[0]);
    out.push_str("_{");
    out.push_str(&subscript.join("\\_"));
    out.push('}');
    Cow::Owned(out)
}

/// Split at `_` and `\_`
fn split_underscores(name: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let bytes = name.as_bytes();
    let mut offset = 0;

    while let Some(pos) = memchr(b'_', &bytes[offset..]) {
        let at = offset + pos;
        let end = if at > 0 && bytes[at - 1] == b'\\' { at - 1 } else { at };
        parts.push(&name[start..end]);
        start = at + 1;
        offset = at + 1;
    }
    parts.push(&name[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscript_conversion() {
        assert_eq!(convert_subscript("x", false), "x");
        assert_eq!(convert_subscript("x_1", false), "x_{1}");
        assert_eq!(convert_subscript("x_ab", false), "x_{ab}");
        assert_eq!(convert_subscript("x_a_b", false), "x_{a\\_b}");
        assert_eq!(convert_subscript("x\\_1", false), "x_{1}");
        assert!(matches!(convert_subscript("plain", false), Cow::Borrowed(_)));
    }

    #[test]
    fn test_snakecase() {
        assert_eq!(convert_subscript("my_var", true), "my\\_var");
        assert_eq!(convert_subscript("a_b_c", true), "a\\_b\\_c");
        assert_eq!(convert_subscript("_x", false), "\\_x");
        assert_eq!(convert_subscript("x__y", false), "x\\_\\_y");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_latex_special_chars("my_func"), "my\\_func");
        assert_eq!(escape_latex_special_chars("50%"), "50\\%");
        assert!(matches!(escape_latex_special_chars("plain"), Cow::Borrowed(_)));
        assert!(contains_latex_special("a{b}"));
        assert!(!contains_latex_special("abc"));
    }
}
