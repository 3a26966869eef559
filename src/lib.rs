//! Latexify - Render mathematical expressions as LaTeX
//!
//! This library turns expression trees, raw expression text, numbers,
//! symbols and arrays into LaTeX markup suitable for documents, notebooks
//! and tables.
//!
//! # Features
//!
//! - **Expression trees**: Operator-aware rendering with minimal parentheses
//! - **Text input**: Raw text is parsed into a tree before rendering
//! - **Arrays**: Vectors and matrices become matrix environments
//! - **Number formatting**: Plain, printf-style, scientific or `\num{}` output
//! - **Unicode**: Greek letters and math symbols become LaTeX commands
//!
//! # Example - Rendering text
//!
//! ```
//! use latexify::latexify;
//!
//! let latex = latexify("x/(y+x)").unwrap();
//! assert_eq!(latex, "\\frac{x}{y + x}");
//!
//! let latex = latexify("x^2 + α").unwrap();
//! assert_eq!(latex, "x^{2} + \\alpha");
//! ```
//!
//! # Example - Building a tree
//!
//! ```
//! use latexify::{latexify, ExprBuilder};
//!
//! let b = ExprBuilder::new();
//! let tree = b.mul(vec![b.sym("A"), b.vect(vec![b.sym("x"), b.sym("y")])]);
//! let latex = latexify(tree).unwrap();
//! assert_eq!(latex, "A \\cdot \\begin{bmatrix}x & y\\end{bmatrix}");
//! ```
//!
//! # Example - Options
//!
//! ```
//! use latexify::{latexify_with, LatexifyOptions, MathEnv, MultSymbol};
//!
//! let options = LatexifyOptions::new()
//!     .with_mult_symbol(MultSymbol::Times)
//!     .with_env(MathEnv::Inline);
//! let latex = latexify_with("2*x", &options).unwrap();
//! assert_eq!(latex, "$2 \\times x$");
//! ```

/// Expression tree types
///
/// Nodes carry a head and ordered argument slots; call nodes keep the
/// operator symbol in slot 0.
pub mod ast;

/// Rendering options
pub mod config;

/// Error types
pub mod error;

/// LaTeX rendering
///
/// The tree walker, the operator and array renderers, number formatting and
/// unicode substitution.
pub mod latex;

/// Parser for raw expression text
pub mod parser;

pub use ast::{Alignment, Expr, ExprBuilder, Grid, Head, MatrixFence, Number, Term};
pub use config::{ArrayOptions, IndexStyle, LatexifyOptions, MathEnv, MultSymbol, VectorOrientation};
pub use error::{LatexifyError, Result};
pub use latex::{
    FancyNumberFormatter, LatexConverter, LatexString, NumberFormat, NumberFormatter, PrintfNumberFormatter,
    Rendered, Value,
};
pub use parser::{ParseError, parse_expression};

/// Render a value with the default options
///
/// Sequences render to [`Rendered::Seq`], every other value to a single
/// [`Rendered::Latex`].
pub fn latexify(value: impl Into<Value>) -> Result<Rendered> {
    latexify_with(value, &LatexifyOptions::default())
}

/// Render a value with the given options
pub fn latexify_with(value: impl Into<Value>, options: &LatexifyOptions) -> Result<Rendered> {
    latex::render_value(&value.into(), options)
}

/// Render two or more independent values as a sequence
///
/// # Example
/// ```
/// use latexify::{latexify_args, LatexifyOptions};
///
/// let rendered = latexify_args(["x+y", "x*y"], &LatexifyOptions::default()).unwrap();
/// let items = rendered.as_seq().unwrap();
/// assert_eq!(items[0], "x + y");
/// assert_eq!(items[1], "x \\cdot y");
/// ```
pub fn latexify_args<I, V>(values: I, options: &LatexifyOptions) -> Result<Rendered>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    latex::render_args(values.into_iter().map(Into::into).collect(), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use num_rational::Ratio;
    use proptest::prelude::*;

    fn ident() -> impl Strategy<Value = String> {
        "[a-z]".prop_map(String::from)
    }

    fn operand() -> impl Strategy<Value = Term> {
        prop_oneof![
            ident().prop_map(Term::Symbol),
            (0i64..1000).prop_map(Term::from),
            (ident(), ident()).prop_map(|(a, b)| Expr::call("+", [Term::sym(a), Term::sym(b)]).into()),
            (ident(), ident()).prop_map(|(a, b)| Expr::call("*", [Term::sym(a), Term::sym(b)]).into()),
            (ident(), 1i64..9).prop_map(|(a, n)| Expr::call("^", [Term::sym(a), Term::from(n)]).into()),
        ]
    }

    fn render(term: &Term) -> String {
        latexify(term.clone()).unwrap().to_string()
    }

    #[test]
    fn test_fraction_text() {
        assert_eq!(latexify("x/(y+x)").unwrap(), "\\frac{x}{y + x}");
    }

    #[test]
    fn test_power_text() {
        assert_eq!(latexify("x^2").unwrap(), "x^{2}");
    }

    #[test]
    fn test_array_inside_expression() {
        let rendered = latexify("A*[x, y]").unwrap().to_string();
        assert!(rendered.contains("\\begin{bmatrix}"));
        assert!(rendered.contains("x & y"));
    }

    #[test]
    fn test_unparseable_text_names_remedies() {
        let err = latexify("x/(y+").unwrap_err();
        assert!(matches!(err, LatexifyError::UnparseableText { .. }));
        let msg = err.to_string();
        assert!(msg.contains("LatexString"));
        assert!(msg.contains("with_parse_text(false)"));
    }

    #[test]
    fn test_logical_text_keeps_grouping() {
        assert_eq!(latexify("!(p && q)").unwrap(), "\\neg \\left( p \\wedge q \\right)");
        assert_eq!(latexify("(p || q) && r").unwrap(), "\\left( p \\vee q \\right) \\wedge r");
        assert_eq!(latexify("-(p || q)").unwrap(), "-\\left( p \\vee q \\right)");
    }

    #[test]
    fn test_complex_value() {
        assert_eq!(latexify(Complex64::new(2.0, -3.0)).unwrap(), "2-3\\textit{i}");
    }

    #[test]
    fn test_args_render_as_sequence() {
        let rendered = latexify_args(["x+y", "x*y"], &LatexifyOptions::default()).unwrap();
        let Rendered::Seq(items) = rendered else {
            panic!("expected a sequence");
        };
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.as_latex().is_some()));

        assert_eq!(
            latexify_args(["x"], &LatexifyOptions::default()).unwrap_err(),
            LatexifyError::TooFewArguments { got: 1 }
        );
    }

    proptest! {
        #[test]
        fn prop_division_is_a_fraction(a in operand(), b in operand()) {
            let tree: Term = Expr::call("/", [a.clone(), b.clone()]).into();
            let expected = format!("\\frac{{{}}}{{{}}}", render(&a), render(&b));
            prop_assert_eq!(render(&tree), expected);
        }

        #[test]
        fn prop_sum_operands_are_never_parenthesized(a in operand(), b in operand()) {
            let tree: Term = Expr::call("+", [a.clone(), b.clone()]).into();
            let expected = format!("{} + {}", render(&a), render(&b));
            prop_assert_eq!(render(&tree), expected);
        }

        #[test]
        fn prop_compound_power_base_is_parenthesized(a in ident(), b in ident(), n in 2i64..9) {
            let base: Term = Expr::call("+", [Term::sym(a.as_str()), Term::sym(b.as_str())]).into();
            let tree: Term = Expr::call("^", [base, Term::from(n)]).into();
            let expected = format!("\\left( {} + {} \\right)^{{{}}}", a, b, n);
            prop_assert_eq!(render(&tree), expected);
        }

        #[test]
        fn prop_latex_passes_through(text in "\\PC*") {
            let latex = LatexString::new(text.as_str());
            let options = LatexifyOptions::new().with_env(MathEnv::Display);
            prop_assert_eq!(
                latexify_with(latex.clone(), &options).unwrap(),
                Rendered::Latex(latex)
            );
        }

        #[test]
        fn prop_whole_rational_renders_as_integer(n in -10_000i64..10_000) {
            prop_assert_eq!(
                latexify(Ratio::new(n, 1)).unwrap(),
                latexify(n).unwrap()
            );
        }
    }
}
