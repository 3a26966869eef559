// Finished LaTeX text
//
// Output of every conversion is wrapped in `LatexString` so that downstream
// callers (and this crate itself) can tell finished markup apart from raw text
// that still needs parsing.

use std::fmt;
use std::ops::Deref;

/// Text that is already valid LaTeX and must not be processed again
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LatexString(String);

impl LatexString {
    /// Mark `text` as finished LaTeX
    #[inline]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for LatexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for LatexString {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LatexString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for LatexString {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for LatexString {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<LatexString> for String {
    fn from(latex: LatexString) -> Self {
        latex.0
    }
}

impl PartialEq<&str> for LatexString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<str> for LatexString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
