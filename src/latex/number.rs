// Number formatting strategies
//
// A formatter turns a numeric leaf into its textual LaTeX form. The set of
// strategies is closed and selected through `NumberFormat`; printf-style
// patterns are parsed once up front into a `PrintfNumberFormatter`.

use crate::ast::Number;
use crate::error::{LatexifyError, Result};
use memchr::memchr;

/// Strategy turning a number into LaTeX text
pub trait NumberFormatter {
    fn format(&self, value: Number) -> String;
}

/// Selected number formatting strategy
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NumberFormat {
    /// Shortest round-trip form (`1.5`, `42`)
    #[default]
    Plain,
    /// printf-style pattern such as `%.3f`
    Printf(PrintfNumberFormatter),
    /// printf-style pattern with the exponent rewritten as `\cdot 10^{e}`
    Fancy(FancyNumberFormatter),
    /// Plain form wrapped in siunitx's `\num{...}`
    Siunitx,
}

impl NumberFormat {
    /// Build a printf-style formatter from `pattern`
    pub fn pattern(pattern: &str) -> Result<Self> {
        PrintfNumberFormatter::new(pattern).map(NumberFormat::Printf)
    }

    /// Build a fancy formatter from `pattern`
    pub fn fancy(pattern: &str) -> Result<Self> {
        FancyNumberFormatter::new(pattern).map(NumberFormat::Fancy)
    }
}

impl NumberFormatter for NumberFormat {
    fn format(&self, value: Number) -> String {
        match self {
            NumberFormat::Plain => format_plain(value),
            NumberFormat::Printf(formatter) => formatter.format(value),
            NumberFormat::Fancy(formatter) => formatter.format(value),
            NumberFormat::Siunitx => format!("\\num{{{}}}", format_plain(value)),
        }
    }
}

/// Shortest textual form of a number
pub fn format_plain(value: Number) -> String {
    match value {
        Number::Int(i) => {
            let mut buffer = itoa::Buffer::new();
            buffer.format(i).to_string()
        },
        Number::Float(f) => {
            if let Some(special) = format_non_finite(f) {
                return special.to_string();
            }
            let mut buffer = ryu::Buffer::new();
            let text = buffer.format_finite(f);
            // ryu keeps a trailing ".0" on integral values
            text.strip_suffix(".0").unwrap_or(text).to_string()
        },
    }
}

fn format_non_finite(f: f64) -> Option<&'static str> {
    if f.is_nan() {
        Some("\\mathrm{NaN}")
    } else if f == f64::INFINITY {
        Some("\\infty")
    } else if f == f64::NEG_INFINITY {
        Some("-\\infty")
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Int,
    Fixed,
    Exp { upper: bool },
    General { upper: bool },
}

/// Largest accepted width or precision of a printf directive
const MAX_FIELD_LEN: usize = 1024;

/// Append decimal digit `d` to `value`, failing past [`MAX_FIELD_LEN`]
fn push_digit(value: usize, d: u32) -> Option<usize> {
    value
        .checked_mul(10)
        .and_then(|v| v.checked_add(d as usize))
        .filter(|&v| v <= MAX_FIELD_LEN)
}

/// Parsed printf-style pattern (`%[flags][width][.precision]conversion`)
///
/// Literal text around the directive is kept; `%%` is a literal percent sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintfNumberFormatter {
    prefix: String,
    suffix: String,
    left_align: bool,
    plus_sign: bool,
    space_sign: bool,
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
    conversion: Conversion,
}

impl PrintfNumberFormatter {
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| LatexifyError::InvalidNumberFormat(format!("{pattern:?}: {reason}"));

        let (prefix, rest) = split_literal(pattern).ok_or_else(|| invalid("missing `%` directive"))?;
        let mut chars = rest.chars().peekable();

        let mut formatter = Self {
            prefix,
            suffix: String::new(),
            left_align: false,
            plus_sign: false,
            space_sign: false,
            zero_pad: false,
            width: 0,
            precision: None,
            conversion: Conversion::Fixed,
        };

        while let Some(&c) = chars.peek() {
            match c {
                '-' => formatter.left_align = true,
                '+' => formatter.plus_sign = true,
                ' ' => formatter.space_sign = true,
                '0' => formatter.zero_pad = true,
                '#' => {},
                _ => break,
            }
            chars.next();
        }

        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            formatter.width = push_digit(formatter.width, d).ok_or_else(|| invalid("width too large"))?;
            chars.next();
        }

        if chars.peek() == Some(&'.') {
            chars.next();
            let mut precision = 0usize;
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                precision = push_digit(precision, d).ok_or_else(|| invalid("precision too large"))?;
                chars.next();
            }
            formatter.precision = Some(precision);
        }

        // Length modifiers carry no meaning here.
        while matches!(chars.peek(), Some('l' | 'h' | 'L' | 'q' | 'j' | 'z' | 't')) {
            chars.next();
        }

        formatter.conversion = match chars.next() {
            Some('d' | 'i' | 'u') => Conversion::Int,
            Some('f' | 'F') => Conversion::Fixed,
            Some('e') => Conversion::Exp { upper: false },
            Some('E') => Conversion::Exp { upper: true },
            Some('g') => Conversion::General { upper: false },
            Some('G') => Conversion::General { upper: true },
            Some(other) => return Err(invalid(&format!("unsupported conversion `{other}`"))),
            None => return Err(invalid("missing conversion character")),
        };

        let tail: String = chars.collect();
        if memchr(b'%', tail.replace("%%", "").as_bytes()).is_some() {
            return Err(invalid("more than one `%` directive"));
        }
        formatter.suffix = tail.replace("%%", "%");

        Ok(formatter)
    }

    fn format_body(&self, value: Number) -> (bool, String) {
        let negative = value.is_negative();
        let body = match (self.conversion, value) {
            (Conversion::Int, Number::Int(i)) => {
                let mut buffer = itoa::Buffer::new();
                buffer.format(i.unsigned_abs()).to_string()
            },
            (_, v) => {
                let f = v.to_f64().abs();
                if f.is_nan() {
                    return (false, "NaN".to_string());
                }
                if f.is_infinite() {
                    return (negative, "Inf".to_string());
                }
                match self.conversion {
                    Conversion::Int => format!("{:.0}", f),
                    Conversion::Fixed => format!("{:.*}", self.precision.unwrap_or(6), f),
                    Conversion::Exp { upper } => {
                        format_exponent(f, self.precision.unwrap_or(6), upper)
                    },
                    Conversion::General { upper } => {
                        format_general(f, self.precision.unwrap_or(6), upper)
                    },
                }
            },
        };
        (negative, body)
    }
}

impl NumberFormatter for PrintfNumberFormatter {
    fn format(&self, value: Number) -> String {
        let (negative, body) = self.format_body(value);
        let sign = if negative {
            "-"
        } else if self.plus_sign {
            "+"
        } else if self.space_sign {
            " "
        } else {
            ""
        };

        let len = sign.len() + body.chars().count();
        let pad = self.width.saturating_sub(len);

        let mut out = String::with_capacity(self.prefix.len() + self.width.max(len) + self.suffix.len());
        out.push_str(&self.prefix);
        if self.left_align {
            out.push_str(sign);
            out.push_str(&body);
            out.extend(std::iter::repeat_n(' ', pad));
        } else if self.zero_pad && body.starts_with(|c: char| c.is_ascii_digit()) {
            out.push_str(sign);
            out.extend(std::iter::repeat_n('0', pad));
            out.push_str(&body);
        } else {
            out.extend(std::iter::repeat_n(' ', pad));
            out.push_str(sign);
            out.push_str(&body);
        }
        out.push_str(&self.suffix);
        out
    }
}

/// printf formatter whose exponent is typeset as a power of ten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FancyNumberFormatter {
    inner: PrintfNumberFormatter,
}

impl FancyNumberFormatter {
    pub fn new(pattern: &str) -> Result<Self> {
        PrintfNumberFormatter::new(pattern).map(|inner| Self { inner })
    }
}

impl Default for FancyNumberFormatter {
    fn default() -> Self {
        Self {
            inner: PrintfNumberFormatter {
                prefix: String::new(),
                suffix: String::new(),
                left_align: false,
                plus_sign: false,
                space_sign: false,
                zero_pad: false,
                width: 0,
                precision: Some(4),
                conversion: Conversion::General { upper: false },
            },
        }
    }
}

impl NumberFormatter for FancyNumberFormatter {
    fn format(&self, value: Number) -> String {
        if let Number::Float(f) = value {
            if let Some(special) = format_non_finite(f) {
                return special.to_string();
            }
        }

        let text = self.inner.format(value);
        let Some(pos) = text.find(['e', 'E']) else {
            return text;
        };
        let (mantissa, exponent) = (&text[..pos], &text[pos + 1..]);
        let (exp_sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ("-", digits),
            None => ("", exponent.trim_start_matches('+')),
        };
        let digits = match digits.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed,
        };
        format!("{} \\cdot 10^{{{}{}}}", mantissa.trim_end(), exp_sign, digits)
    }
}

/// Split `pattern` at its directive, returning the literal prefix and the directive body
fn split_literal(pattern: &str) -> Option<(String, &str)> {
    let mut prefix = String::new();
    let mut rest = pattern;
    loop {
        let pos = memchr(b'%', rest.as_bytes())?;
        prefix.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if let Some(stripped) = after.strip_prefix('%') {
            prefix.push('%');
            rest = stripped;
        } else {
            return Some((prefix, after));
        }
    }
}

/// `%e` body of a non-negative finite value: `1.500000e+03`
fn format_exponent(f: f64, precision: usize, upper: bool) -> String {
    let text = format!("{:.*e}", precision, f);
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    let marker = if upper { 'E' } else { 'e' };
    format!("{mantissa}{marker}{sign}{:02}", exponent.unsigned_abs())
}

/// `%g` body of a non-negative finite value
fn format_general(f: f64, precision: usize, upper: bool) -> String {
    let precision = precision.max(1);
    if f == 0.0 {
        return "0".to_string();
    }

    // Decimal exponent after rounding to `precision` significant digits.
    let rounded = format!("{:.*e}", precision - 1, f);
    let exponent: i32 = rounded
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let text = format_exponent(f, precision - 1, upper);
        let marker = if upper { 'E' } else { 'e' };
        match text.split_once(marker) {
            Some((mantissa, exp)) => format!("{}{marker}{exp}", trim_fraction(mantissa)),
            None => text,
        }
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, f)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printf(pattern: &str, value: impl Into<Number>) -> String {
        PrintfNumberFormatter::new(pattern).unwrap().format(value.into())
    }

    #[test]
    fn test_plain() {
        assert_eq!(format_plain(Number::Int(-42)), "-42");
        assert_eq!(format_plain(Number::Float(1.5)), "1.5");
        assert_eq!(format_plain(Number::Float(2.0)), "2");
        assert_eq!(format_plain(Number::Float(f64::INFINITY)), "\\infty");
        assert_eq!(format_plain(Number::Float(f64::NAN)), "\\mathrm{NaN}");
    }

    #[test]
    fn test_printf_fixed_and_int() {
        assert_eq!(printf("%.3f", 3.14159), "3.142");
        assert_eq!(printf("%.2f", 2), "2.00");
        assert_eq!(printf("%d", 42), "42");
        assert_eq!(printf("%5d", 42), "   42");
        assert_eq!(printf("%-5d|", 42), "42   |");
        assert_eq!(printf("%05.1f", -2.5), "-02.5");
        assert_eq!(printf("%+d", 7), "+7");
        assert_eq!(printf("%d", 2.6), "3");
    }

    #[test]
    fn test_printf_exponent() {
        assert_eq!(printf("%.2e", 1234.5), "1.23e+03");
        assert_eq!(printf("%.1E", 0.00012), "1.2E-04");
    }

    #[test]
    fn test_printf_general() {
        assert_eq!(printf("%g", 0.0001), "0.0001");
        assert_eq!(printf("%g", 100000.0), "100000");
        assert_eq!(printf("%g", 1000000.0), "1e+06");
        assert_eq!(printf("%.3g", 3.14159), "3.14");
        assert_eq!(printf("%.4g", 0.00001234), "1.234e-05");
    }

    #[test]
    fn test_printf_literal_text() {
        assert_eq!(printf("%.1f%%", 12.34), "12.3%");
        assert_eq!(printf("x = %d", 3), "x = 3");
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            PrintfNumberFormatter::new("abc"),
            Err(LatexifyError::InvalidNumberFormat(_))
        ));
        assert!(PrintfNumberFormatter::new("%.2q").is_err());
        assert!(matches!(
            NumberFormat::pattern("%99999999999999999999999d"),
            Err(LatexifyError::InvalidNumberFormat(msg)) if msg.contains("width too large")
        ));
        assert!(matches!(
            NumberFormat::pattern("%.99999999999999999999999f"),
            Err(LatexifyError::InvalidNumberFormat(msg)) if msg.contains("precision too large")
        ));
        assert!(NumberFormat::fancy("%.5000g").is_err());
        assert_eq!(printf("%1024d", 1).len(), 1024);
        assert!(PrintfNumberFormatter::new("%d %d").is_err());
        assert!(NumberFormat::pattern("%.2f").is_ok());
    }

    #[test]
    fn test_fancy() {
        let fancy = FancyNumberFormatter::default();
        assert_eq!(fancy.format(Number::Float(123456.0)), "1.235 \\cdot 10^{5}");
        assert_eq!(fancy.format(Number::Float(0.00001234)), "1.234 \\cdot 10^{-5}");
        assert_eq!(fancy.format(Number::Float(3.5)), "3.5");
        assert_eq!(fancy.format(Number::Int(12)), "12");
    }

    #[test]
    fn test_siunitx() {
        assert_eq!(NumberFormat::Siunitx.format(Number::Float(1.5)), "\\num{1.5}");
    }
}
