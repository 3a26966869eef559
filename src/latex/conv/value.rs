// Top-level dispatch by input kind
//
// `Value` is the closed set of inputs the crate accepts. Each kind has one
// rendering path; trees (and text that parses into one) go through the
// converter, everything else is rendered directly.

use super::converter::LatexConverter;
use crate::ast::{Expr, Number, Term};
use crate::config::LatexifyOptions;
use crate::error::{LatexifyError, Result};
use crate::latex::LatexString;
use crate::latex::number::NumberFormatter;
use crate::latex::symbols::substitute_unicode;
use crate::latex::utils::convert_subscript;
use crate::parser::parse_expression_with_depth;
use log::debug;
use num_complex::Complex64;
use num_rational::Ratio;
use std::fmt;

/// A value to render
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Expression tree or single tree leaf
    Expr(Term),
    /// Raw text of unknown provenance, parsed as an expression
    Text(String),
    /// Finished LaTeX, returned unchanged
    Latex(LatexString),
    Number(Number),
    Rational(Ratio<i64>),
    Complex(Complex64),
    Bool(bool),
    Char(char),
    /// Identifier
    Symbol(String),
    /// Collection of independent values, rendered one by one
    Seq(Vec<Value>),
    /// Absent value
    None,
    /// Value of a kind with no rendering rule, named by its type
    Other(String),
}

impl Value {
    /// Identifier value
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    /// Raw text value
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    /// Name of the value kind, used in log messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Expr(Term::Expr(_)) => "tree",
            Value::Expr(_) => "tree leaf",
            Value::Text(_) => "text",
            Value::Latex(_) => "latex",
            Value::Number(_) => "number",
            Value::Rational(_) => "rational",
            Value::Complex(_) => "complex",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Symbol(_) => "symbol",
            Value::Seq(_) => "sequence",
            Value::None => "none",
            Value::Other(_) => "other",
        }
    }
}

impl From<Term> for Value {
    fn from(term: Term) -> Self {
        Value::Expr(term)
    }
}

impl From<Expr> for Value {
    fn from(expr: Expr) -> Self {
        Value::Expr(Term::Expr(expr))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<LatexString> for Value {
    fn from(latex: LatexString) -> Self {
        Value::Latex(latex)
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        Value::Number(number)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Int(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Int(value as i64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Ratio<i64>> for Value {
    fn from(value: Ratio<i64>) -> Self {
        Value::Rational(value)
    }
}

impl From<Complex64> for Value {
    fn from(value: Complex64) -> Self {
        Value::Complex(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

/// Result of rendering a value
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Latex(LatexString),
    /// One entry per element of a sequence input
    Seq(Vec<Rendered>),
}

impl Rendered {
    /// Rendered LaTeX of a single value
    pub fn as_latex(&self) -> Option<&LatexString> {
        match self {
            Rendered::Latex(latex) => Some(latex),
            Rendered::Seq(_) => None,
        }
    }

    /// Owned LaTeX of a single value
    pub fn into_latex(self) -> Option<LatexString> {
        match self {
            Rendered::Latex(latex) => Some(latex),
            Rendered::Seq(_) => None,
        }
    }

    /// Entries of a sequence result
    pub fn as_seq(&self) -> Option<&[Rendered]> {
        match self {
            Rendered::Latex(_) => None,
            Rendered::Seq(items) => Some(items),
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Latex(latex) => f.write_str(latex),
            Rendered::Seq(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            },
        }
    }
}

impl PartialEq<&str> for Rendered {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Rendered::Latex(latex) if latex == other)
    }
}

/// Render any value
///
/// Sequences produce one entry per element. Every single result except
/// pass-through LaTeX and empty output is wrapped in the configured math
/// environment.
pub fn render_value(value: &Value, options: &LatexifyOptions) -> Result<Rendered> {
    debug!("rendering {} value", value.kind());

    match value {
        Value::Seq(items) => items
            .iter()
            .map(|item| render_value(item, options))
            .collect::<Result<Vec<_>>>()
            .map(Rendered::Seq),
        Value::Latex(latex) => Ok(Rendered::Latex(latex.clone())),
        Value::Text(text) if !options.parse_text => {
            Ok(Rendered::Latex(LatexString::new(text.as_str())))
        },
        _ => {
            let latex = render_single(value, options)?;
            if latex.is_empty() {
                return Ok(Rendered::Latex(LatexString::default()));
            }
            Ok(Rendered::Latex(LatexString::from(options.env.wrap(&latex))))
        },
    }
}

/// Render several independent values as one sequence
pub fn render_args(values: Vec<Value>, options: &LatexifyOptions) -> Result<Rendered> {
    if values.len() < 2 {
        return Err(LatexifyError::TooFewArguments { got: values.len() });
    }
    render_value(&Value::Seq(values), options)
}

fn render_single(value: &Value, options: &LatexifyOptions) -> Result<String> {
    match value {
        Value::None => Ok(String::new()),
        Value::Expr(term) => convert_term(term, options),
        Value::Text(text) => render_text(text, options),
        Value::Latex(latex) => Ok(latex.as_str().to_string()),
        Value::Number(number) => Ok(render_number(*number, options)),
        Value::Rational(ratio) => {
            if *ratio.denom() == 1 {
                return Ok(render_number(Number::Int(*ratio.numer()), options));
            }
            let division = Expr::call("/", [Term::from(*ratio.numer()), Term::from(*ratio.denom())]);
            convert_term(&Term::Expr(division), options)
        },
        Value::Complex(z) => Ok(render_complex(*z, options)),
        Value::Bool(value) => Ok(value.to_string()),
        Value::Char(ch) => {
            let text = ch.to_string();
            if options.convert_unicode {
                Ok(substitute_unicode(&text).into_owned())
            } else {
                Ok(text)
            }
        },
        Value::Symbol(name) => Ok(render_symbol(name, options)),
        // Sequences are split into entries by `render_value`.
        Value::Seq(_) => Err(LatexifyError::UnsupportedValue(value.kind().to_string())),
        Value::Other(type_name) => Err(LatexifyError::UnsupportedValue(type_name.clone())),
    }
}

fn convert_term(term: &Term, options: &LatexifyOptions) -> Result<String> {
    LatexConverter::new(options)
        .convert(term)
        .map(LatexString::into_string)
}

fn render_text(text: &str, options: &LatexifyOptions) -> Result<String> {
    if text.trim().is_empty() {
        return Ok(String::new());
    }

    let term = parse_expression_with_depth(text, options.max_depth).map_err(|err| {
        debug!("failed to parse {:?}: {}", text, err);
        LatexifyError::UnparseableText {
            input: text.to_string(),
            reason: err.to_string(),
        }
    })?;
    convert_term(&term, options)
}

/// Number leaf through the configured formatter
pub(crate) fn render_number(number: Number, options: &LatexifyOptions) -> String {
    options.number_format.format(number)
}

/// Identifier leaf: subscript notation first, then unicode substitution
pub(crate) fn render_symbol(name: &str, options: &LatexifyOptions) -> String {
    if name == "Inf" {
        return "\\infty".to_string();
    }

    let converted = convert_subscript(name, options.snakecase);
    if options.convert_unicode {
        substitute_unicode(&converted).into_owned()
    } else {
        converted.into_owned()
    }
}

/// `{re}{+|-}{|im|}\textit{i}`
fn render_complex(z: Complex64, options: &LatexifyOptions) -> String {
    let real = render_number(Number::Float(z.re), options);
    let sign = if z.im < 0.0 { '-' } else { '+' };
    let imag = render_number(Number::Float(z.im.abs()), options);
    format!("{}{}{}\\textit{{i}}", real, sign, imag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MathEnv;
    use crate::latex::NumberFormat;

    fn render(value: impl Into<Value>) -> Rendered {
        render_value(&value.into(), &LatexifyOptions::default()).unwrap()
    }

    #[test]
    fn test_none_and_blank_text_render_empty() {
        assert_eq!(render(Value::None), "");
        assert_eq!(render(Option::<i64>::None), "");
        assert_eq!(render("   "), "");
    }

    #[test]
    fn test_latex_pass_through_is_unchanged() {
        let latex = LatexString::new("\\frac{α}{x_1} $");
        let options = LatexifyOptions::default().with_env(MathEnv::Inline);
        let rendered = render_value(&Value::from(latex.clone()), &options).unwrap();
        assert_eq!(rendered, Rendered::Latex(latex));
    }

    #[test]
    fn test_text_is_parsed() {
        assert_eq!(render("x/(y+x)"), "\\frac{x}{y + x}");
        assert_eq!(render("x^2"), "x^{2}");
    }

    #[test]
    fn test_text_parsing_can_be_disabled() {
        let options = LatexifyOptions::default().with_parse_text(false);
        let rendered = render_value(&Value::text("Total (kg)"), &options).unwrap();
        assert_eq!(rendered, "Total (kg)");
    }

    #[test]
    fn test_unparseable_text() {
        let err = render_value(&Value::text("x/(y+"), &LatexifyOptions::default()).unwrap_err();
        let LatexifyError::UnparseableText { input, .. } = &err else {
            panic!("unexpected error {err:?}");
        };
        assert_eq!(input, "x/(y+");
        let msg = err.to_string();
        assert!(msg.contains("LatexString"));
        assert!(msg.contains("with_parse_text(false)"));
    }

    #[test]
    fn test_rationals() {
        assert_eq!(render(Ratio::<i64>::new(3, 1)), "3");
        assert_eq!(render(Ratio::<i64>::new(1, 2)), "\\frac{1}{2}");
        assert_eq!(render(Ratio::<i64>::new(2, -4)), "\\frac{-1}{2}");
    }

    #[test]
    fn test_complex() {
        assert_eq!(render(Complex64::new(2.0, -3.0)), "2-3\\textit{i}");
        assert_eq!(render(Complex64::new(1.5, 2.0)), "1.5+2\\textit{i}");
    }

    #[test]
    fn test_numbers_use_formatter() {
        let options = LatexifyOptions::default()
            .with_number_format(NumberFormat::pattern("%.2f").unwrap());
        assert_eq!(render_value(&Value::from(3.14159), &options).unwrap(), "3.14");
        assert_eq!(render(42), "42");
    }

    #[test]
    fn test_symbols_and_chars() {
        assert_eq!(render(Value::symbol("x_1")), "x_{1}");
        assert_eq!(render(Value::symbol("α_max")), "\\alpha_{max}");
        assert_eq!(render(Value::symbol("Inf")), "\\infty");
        assert_eq!(render('β'), "\\beta");
        assert_eq!(render(true), "true");

        let options = LatexifyOptions::default().with_snakecase(true);
        assert_eq!(
            render_value(&Value::symbol("my_var"), &options).unwrap(),
            "my\\_var"
        );
    }

    #[test]
    fn test_sequences() {
        let rendered = render(vec!["x+y", "x*y"]);
        let items = rendered.as_seq().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], "x + y");
        assert_eq!(items[1], "x \\cdot y");
    }

    #[test]
    fn test_render_args_needs_two_values() {
        let options = LatexifyOptions::default();
        assert_eq!(
            render_args(vec![Value::from(1)], &options).unwrap_err(),
            LatexifyError::TooFewArguments { got: 1 }
        );
        assert!(render_args(vec![Value::from(1), Value::from(2)], &options).is_ok());
    }

    #[test]
    fn test_env_wrapping() {
        let options = LatexifyOptions::default().with_env(MathEnv::Inline);
        assert_eq!(render_value(&Value::text("x^2"), &options).unwrap(), "$x^{2}$");
    }

    #[test]
    fn test_nested_sequences_render_per_entry() {
        let rendered = render(Value::Seq(vec![Value::from("x^2"), Value::Seq(vec![Value::from(1)])]));
        assert_eq!(
            rendered,
            Rendered::Seq(vec![
                Rendered::Latex(LatexString::new("x^{2}")),
                Rendered::Seq(vec![Rendered::Latex(LatexString::new("1"))]),
            ])
        );
        assert_eq!(
            render_single(&Value::Seq(Vec::new()), &LatexifyOptions::default()).unwrap_err(),
            LatexifyError::UnsupportedValue("sequence".to_string())
        );
    }

    #[test]
    fn test_into_latex() {
        assert_eq!(render(Value::symbol("x")).into_latex(), Some(LatexString::new("x")));
        assert_eq!(render(vec![1, 2]).into_latex(), None);
    }

    #[test]
    fn test_unsupported_value() {
        let err = render_value(&Value::Other("HashMap".to_string()), &LatexifyOptions::default())
            .unwrap_err();
        assert_eq!(err, LatexifyError::UnsupportedValue("HashMap".to_string()));
    }
}
