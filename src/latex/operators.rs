// Operator and function lookup tables

/// Binding strength of infix operators; higher binds tighter
///
/// Operators missing from the table never force parentheses.
static PRECEDENCE: phf::Map<&'static str, u8> = phf::phf_map! {
    "=" => 1,
    "||" => 3,
    "&&" => 4,
    "==" => 6,
    "!=" => 6,
    "≠" => 6,
    "<" => 6,
    ">" => 6,
    "<=" => 6,
    "≤" => 6,
    ">=" => 6,
    "≥" => 6,
    "≈" => 6,
    "===" => 6,
    "≡" => 6,
    "∈" => 6,
    "∉" => 6,
    "+" => 11,
    "-" => 11,
    "±" => 11,
    "∓" => 11,
    ".+" => 11,
    ".-" => 11,
    "*" => 12,
    "/" => 12,
    "//" => 12,
    "%" => 12,
    "\\" => 12,
    "÷" => 12,
    "×" => 12,
    "⋅" => 12,
    ".*" => 12,
    "./" => 12,
    "^" => 15,
    ".^" => 15,
};

/// Relational operators and their LaTeX symbol
static COMPARISON_SYMBOLS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "==" => "=",
    "=" => "=",
    "!=" => "\\neq",
    "≠" => "\\neq",
    "<" => "<",
    ">" => ">",
    "<=" => "\\leq",
    "≤" => "\\leq",
    ">=" => "\\geq",
    "≥" => "\\geq",
    "≈" => "\\approx",
    "===" => "\\equiv",
    "≡" => "\\equiv",
    "∈" => "\\in",
    "∉" => "\\notin",
};

/// Functions with a dedicated LaTeX operator name
static FUNCTION_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "sin" => "\\sin",
    "cos" => "\\cos",
    "tan" => "\\tan",
    "sec" => "\\sec",
    "csc" => "\\csc",
    "cot" => "\\cot",
    "asin" => "\\arcsin",
    "acos" => "\\arccos",
    "atan" => "\\arctan",
    "asec" => "\\mathrm{arcsec}",
    "acsc" => "\\mathrm{arccsc}",
    "acot" => "\\mathrm{arccot}",
    "sinh" => "\\sinh",
    "cosh" => "\\cosh",
    "tanh" => "\\tanh",
    "coth" => "\\coth",
    "sech" => "\\mathrm{sech}",
    "csch" => "\\mathrm{csch}",
    "asinh" => "\\mathrm{arcsinh}",
    "acosh" => "\\mathrm{arccosh}",
    "atanh" => "\\mathrm{arctanh}",
    "log" => "\\log",
    "ln" => "\\ln",
    "min" => "\\min",
    "max" => "\\max",
    "det" => "\\det",
    "dim" => "\\dim",
    "ker" => "\\ker",
    "arg" => "\\arg",
    "gcd" => "\\gcd",
    "log10" => "\\log_{10}",
    "log2" => "\\log_{2}",
};

/// Binding strength of `op`, if it is an infix operator
#[inline]
pub fn precedence(op: &str) -> Option<u8> {
    PRECEDENCE.get(op).copied()
}

/// Whether an operand tagged `tag` needs parentheses under an operator of strength `parent`
///
/// Untagged operands and operators outside the table never need them. With
/// `inclusive` set, equal strength also parenthesises (right operand of `-`,
/// base of `^`).
#[inline]
pub fn needs_parens(tag: Option<&str>, parent: &str, inclusive: bool) -> bool {
    let (Some(child), Some(parent)) = (tag.and_then(precedence), precedence(parent)) else {
        return false;
    };
    if inclusive { child <= parent } else { child < parent }
}

/// LaTeX symbol of a relational operator
#[inline]
pub fn comparison_symbol(op: &str) -> Option<&'static str> {
    COMPARISON_SYMBOLS.get(op).copied()
}

/// LaTeX operator name for a known function
#[inline]
pub fn function_alias(name: &str) -> Option<&'static str> {
    FUNCTION_ALIASES.get(name).copied()
}

/// Whether `name` reads as a function identifier rather than an operator symbol
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {},
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '′')
}
