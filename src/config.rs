//! Configuration types for LaTeX rendering.
//!
//! Options are immutable once built and are threaded unchanged through every
//! recursive call of a conversion.
//!
//! # Examples
//!
//! ```rust
//! use latexify::{LatexifyOptions, MathEnv, MultSymbol};
//!
//! // Create with defaults
//! let options = LatexifyOptions::default();
//!
//! // Or customize
//! let options = LatexifyOptions::new()
//!     .with_convert_unicode(false)
//!     .with_mult_symbol(MultSymbol::Times)
//!     .with_env(MathEnv::Inline);
//! ```
use crate::ast::{Alignment, MatrixFence};
use crate::latex::NumberFormat;
use crate::parser::DEFAULT_MAX_DEPTH;

/// Options controlling LaTeX output.
#[derive(Debug, Clone, PartialEq)]
pub struct LatexifyOptions {
    /// Replace unicode characters in leaf text with LaTeX commands
    pub convert_unicode: bool,
    /// Number formatting strategy
    pub number_format: NumberFormat,
    /// Parse raw text into an expression; when disabled text is passed through
    pub parse_text: bool,
    /// Escape underscores in identifiers instead of treating them as subscripts
    pub snakecase: bool,
    /// How indexing is rendered
    pub index_style: IndexStyle,
    /// Symbol placed between factors of a product
    pub mult_symbol: MultSymbol,
    /// Math environment wrapped around each top-level result
    pub env: MathEnv,
    /// Array and matrix layout
    pub array: ArrayOptions,
    /// Nesting limit for trees and parsed text
    pub max_depth: usize,
}

impl Default for LatexifyOptions {
    fn default() -> Self {
        Self {
            convert_unicode: true,
            number_format: NumberFormat::Plain,
            parse_text: true,
            snakecase: false,
            index_style: IndexStyle::Bracket,
            mult_symbol: MultSymbol::Cdot,
            env: MathEnv::Raw,
            array: ArrayOptions::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LatexifyOptions {
    /// Create a new `LatexifyOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether unicode characters are replaced with LaTeX commands.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use latexify::{latexify_with, LatexifyOptions, Value};
    ///
    /// let options = LatexifyOptions::new().with_convert_unicode(false);
    /// let latex = latexify_with(Value::symbol("α"), &options).unwrap();
    /// assert_eq!(latex, "α");
    /// ```
    #[inline]
    pub fn with_convert_unicode(mut self, convert: bool) -> Self {
        self.convert_unicode = convert;
        self
    }

    /// Set the number formatting strategy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use latexify::{latexify_with, LatexifyOptions, NumberFormat, Value};
    ///
    /// let options = LatexifyOptions::new()
    ///     .with_number_format(NumberFormat::pattern("%.2f").unwrap());
    /// let latex = latexify_with(Value::from(3.14159), &options).unwrap();
    /// assert_eq!(latex, "3.14");
    /// ```
    #[inline]
    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    /// Set whether raw text is parsed as a mathematical expression.
    ///
    /// Disable this for plain text such as table cells.
    #[inline]
    pub fn with_parse_text(mut self, parse: bool) -> Self {
        self.parse_text = parse;
        self
    }

    /// Set whether underscores in identifiers are escaped rather than subscripted.
    #[inline]
    pub fn with_snakecase(mut self, snakecase: bool) -> Self {
        self.snakecase = snakecase;
        self
    }

    #[inline]
    pub fn with_index_style(mut self, style: IndexStyle) -> Self {
        self.index_style = style;
        self
    }

    #[inline]
    pub fn with_mult_symbol(mut self, symbol: MultSymbol) -> Self {
        self.mult_symbol = symbol;
        self
    }

    /// Set the math environment wrapped around each top-level result.
    ///
    /// Finished LaTeX passed in as input is never wrapped.
    #[inline]
    pub fn with_env(mut self, env: MathEnv) -> Self {
        self.env = env;
        self
    }

    #[inline]
    pub fn with_array(mut self, array: ArrayOptions) -> Self {
        self.array = array;
        self
    }

    /// Set the nesting limit for trees and parsed text.
    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Rendering of indexing expressions such as `a[i, j]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexStyle {
    /// `a\left[i, j\right]`
    #[default]
    Bracket,
    /// `a_{i,j}`
    Subscript,
}

/// Symbol placed between the factors of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultSymbol {
    /// ` \cdot `
    #[default]
    Cdot,
    /// ` \times `
    Times,
    /// A plain space
    Space,
}

impl MultSymbol {
    /// Separator including its surrounding spaces
    #[inline]
    pub fn separator(self) -> &'static str {
        match self {
            MultSymbol::Cdot => " \\cdot ",
            MultSymbol::Times => " \\times ",
            MultSymbol::Space => " ",
        }
    }
}

/// Math environment wrapped around a top-level result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MathEnv {
    /// No wrapping
    #[default]
    Raw,
    /// `$...$`
    Inline,
    /// `\[...\]`
    Display,
    /// `\begin{equation}...\end{equation}`
    Equation,
}

impl MathEnv {
    /// Wrap `latex` in this environment
    pub fn wrap(self, latex: &str) -> String {
        match self {
            MathEnv::Raw => latex.to_string(),
            MathEnv::Inline => format!("${}$", latex),
            MathEnv::Display => format!("\\[{}\\]", latex),
            MathEnv::Equation => format!("\\begin{{equation}}\n{}\n\\end{{equation}}", latex),
        }
    }
}

/// Layout of a 1-D array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VectorOrientation {
    /// All cells in one row
    #[default]
    Row,
    /// One cell per row
    Column,
}

/// Options consumed only by the array renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayOptions {
    /// Environment selected by its fence (`bmatrix` by default)
    pub fence: MatrixFence,
    /// Column alignment; when set an `array` environment with `\left`/`\right` fences is used
    pub alignment: Option<Alignment>,
    /// Separator between cells of a row
    pub column_delimiter: String,
    /// Separator between rows
    pub row_delimiter: String,
    /// Layout of 1-D arrays
    pub vector: VectorOrientation,
    /// Swap rows and columns before rendering
    pub transpose: bool,
}

impl Default for ArrayOptions {
    fn default() -> Self {
        Self {
            fence: MatrixFence::Bracket,
            alignment: None,
            column_delimiter: "&".to_string(),
            row_delimiter: "\\\\".to_string(),
            vector: VectorOrientation::Row,
            transpose: false,
        }
    }
}

impl ArrayOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_fence(mut self, fence: MatrixFence) -> Self {
        self.fence = fence;
        self
    }

    #[inline]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    #[inline]
    pub fn with_column_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.column_delimiter = delimiter.into();
        self
    }

    #[inline]
    pub fn with_row_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.row_delimiter = delimiter.into();
        self
    }

    #[inline]
    pub fn with_vector(mut self, vector: VectorOrientation) -> Self {
        self.vector = vector;
        self
    }

    #[inline]
    pub fn with_transpose(mut self, transpose: bool) -> Self {
        self.transpose = transpose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LatexifyOptions::default();
        assert!(options.convert_unicode);
        assert!(options.parse_text);
        assert!(!options.snakecase);
        assert_eq!(options.number_format, NumberFormat::Plain);
        assert_eq!(options.array.column_delimiter, "&");
        assert_eq!(options.array.row_delimiter, "\\\\");
        assert_eq!(options.array.fence, MatrixFence::Bracket);
        assert_eq!(options.array.vector, VectorOrientation::Row);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_builder_chain() {
        let options = LatexifyOptions::new()
            .with_snakecase(true)
            .with_index_style(IndexStyle::Subscript)
            .with_array(ArrayOptions::new().with_fence(MatrixFence::Paren).with_transpose(true));
        assert!(options.snakecase);
        assert_eq!(options.index_style, IndexStyle::Subscript);
        assert_eq!(options.array.fence, MatrixFence::Paren);
        assert!(options.array.transpose);
    }

    #[test]
    fn test_env_wrapping() {
        assert_eq!(MathEnv::Raw.wrap("x"), "x");
        assert_eq!(MathEnv::Inline.wrap("x"), "$x$");
        assert_eq!(MathEnv::Display.wrap("x"), "\\[x\\]");
        assert_eq!(
            MathEnv::Equation.wrap("x"),
            "\\begin{equation}\nx\n\\end{equation}"
        );
    }
}
