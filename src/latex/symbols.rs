// Unicode substitution
//
// Maps unicode characters in leaf text to LaTeX commands, including Greek
// letters, operators, arrows, set and logic symbols, blackboard letters,
// sub/superscript runs and combining accents.

use std::borrow::Cow;

/// Unicode to LaTeX mapping for common mathematical symbols
static UNICODE_TO_LATEX: phf::Map<char, &'static str> = phf::phf_map! {
    // Greek letters
    'α' => "\\alpha",
    'β' => "\\beta",
    'γ' => "\\gamma",
    'δ' => "\\delta",
    'ε' => "\\varepsilon",
    'ϵ' => "\\epsilon",
    'ζ' => "\\zeta",
    'η' => "\\eta",
    'θ' => "\\theta",
    'ϑ' => "\\vartheta",
    'ι' => "\\iota",
    'κ' => "\\kappa",
    'λ' => "\\lambda",
    'μ' => "\\mu",
    'ν' => "\\nu",
    'ξ' => "\\xi",
    'π' => "\\pi",
    'ϖ' => "\\varpi",
    'ρ' => "\\rho",
    'ϱ' => "\\varrho",
    'σ' => "\\sigma",
    'ς' => "\\varsigma",
    'τ' => "\\tau",
    'υ' => "\\upsilon",
    'φ' => "\\varphi",
    'ϕ' => "\\phi",
    'χ' => "\\chi",
    'ψ' => "\\psi",
    'ω' => "\\omega",

    // Uppercase Greek
    'Γ' => "\\Gamma",
    'Δ' => "\\Delta",
    'Θ' => "\\Theta",
    'Λ' => "\\Lambda",
    'Ξ' => "\\Xi",
    'Π' => "\\Pi",
    'Σ' => "\\Sigma",
    'Υ' => "\\Upsilon",
    'Φ' => "\\Phi",
    'Ψ' => "\\Psi",
    'Ω' => "\\Omega",

    // Operators and symbols
    '∑' => "\\sum",
    '∏' => "\\prod",
    '∫' => "\\int",
    '∬' => "\\iint",
    '∭' => "\\iiint",
    '∮' => "\\oint",
    '√' => "\\surd",
    '∂' => "\\partial",
    '∇' => "\\nabla",
    '∞' => "\\infty",
    '∅' => "\\emptyset",
    '∀' => "\\forall",
    '∃' => "\\exists",
    '∄' => "\\nexists",
    '∴' => "\\therefore",
    '∵' => "\\because",
    '⊂' => "\\subset",
    '⊃' => "\\supset",
    '⊆' => "\\subseteq",
    '⊇' => "\\supseteq",
    '∈' => "\\in",
    '∉' => "\\notin",
    '∋' => "\\ni",
    '∩' => "\\cap",
    '∪' => "\\cup",
    '≠' => "\\neq",
    '≤' => "\\leq",
    '≥' => "\\geq",
    '≈' => "\\approx",
    '∼' => "\\sim",
    '≃' => "\\simeq",
    '≅' => "\\cong",
    '∝' => "\\propto",
    '≡' => "\\equiv",
    '≪' => "\\ll",
    '≫' => "\\gg",
    '→' => "\\to",
    '←' => "\\gets",
    '↔' => "\\leftrightarrow",
    '↦' => "\\mapsto",
    '↑' => "\\uparrow",
    '↓' => "\\downarrow",
    '⇑' => "\\Uparrow",
    '⇓' => "\\Downarrow",
    '⇒' => "\\Rightarrow",
    '⇐' => "\\Leftarrow",
    '⇔' => "\\Leftrightarrow",
    '±' => "\\pm",
    '∓' => "\\mp",
    '×' => "\\times",
    '÷' => "\\div",
    '⋅' => "\\cdot",
    '·' => "\\cdot",
    '−' => "-",
    '∗' => "\\ast",
    '∘' => "\\circ",
    '∧' => "\\wedge",
    '∨' => "\\vee",
    '¬' => "\\neg",
    '⊕' => "\\oplus",
    '⊗' => "\\otimes",
    '⊙' => "\\odot",
    '⊥' => "\\perp",
    '∥' => "\\parallel",
    '∠' => "\\angle",
    '△' => "\\triangle",
    '□' => "\\square",
    '◇' => "\\diamond",
    '†' => "\\dagger",
    '‡' => "\\ddagger",
    '…' => "\\ldots",
    '⋯' => "\\cdots",
    '⋮' => "\\vdots",
    '⋱' => "\\ddots",
    '°' => "^{\\circ}",
    '′' => "'",
    '″' => "''",
    '‴' => "'''",
    'ℵ' => "\\aleph",
    'ℶ' => "\\beth",
    'ℷ' => "\\gimel",
    'ℸ' => "\\daleth",
    'ℏ' => "\\hbar",
    'ℓ' => "\\ell",
    '℘' => "\\wp",
    'ℜ' => "\\Re",
    'ℑ' => "\\Im",
    'ℕ' => "\\mathbb{N}",
    'ℤ' => "\\mathbb{Z}",
    'ℚ' => "\\mathbb{Q}",
    'ℝ' => "\\mathbb{R}",
    'ℂ' => "\\mathbb{C}",
    'ℍ' => "\\mathbb{H}",
    'ℙ' => "\\mathbb{P}",
};

static SUBSCRIPTS: phf::Map<char, char> = phf::phf_map! {
    '₀' => '0', '₁' => '1', '₂' => '2', '₃' => '3', '₄' => '4',
    '₅' => '5', '₆' => '6', '₇' => '7', '₈' => '8', '₉' => '9',
    '₊' => '+', '₋' => '-', '₌' => '=', '₍' => '(', '₎' => ')',
    'ₐ' => 'a', 'ₑ' => 'e', 'ₒ' => 'o', 'ₓ' => 'x', 'ₕ' => 'h',
    'ₖ' => 'k', 'ₗ' => 'l', 'ₘ' => 'm', 'ₙ' => 'n', 'ₚ' => 'p',
    'ₛ' => 's', 'ₜ' => 't', 'ᵢ' => 'i', 'ⱼ' => 'j', 'ᵣ' => 'r',
    'ᵤ' => 'u', 'ᵥ' => 'v',
};

static SUPERSCRIPTS: phf::Map<char, char> = phf::phf_map! {
    '⁰' => '0', '¹' => '1', '²' => '2', '³' => '3', '⁴' => '4',
    '⁵' => '5', '⁶' => '6', '⁷' => '7', '⁸' => '8', '⁹' => '9',
    '⁺' => '+', '⁻' => '-', '⁼' => '=', '⁽' => '(', '⁾' => ')',
    'ⁱ' => 'i', 'ⁿ' => 'n',
};

/// Combining marks rendered as accents over the preceding character
static COMBINING_ACCENTS: phf::Map<char, &'static str> = phf::phf_map! {
    '\u{0300}' => "\\grave",
    '\u{0301}' => "\\acute",
    '\u{0302}' => "\\hat",
    '\u{0303}' => "\\tilde",
    '\u{0304}' => "\\bar",
    '\u{0306}' => "\\breve",
    '\u{0307}' => "\\dot",
    '\u{0308}' => "\\ddot",
    '\u{030C}' => "\\check",
    '\u{20D7}' => "\\vec",
};

/// LaTeX command for a single character, if it has one
#[inline]
pub fn unicode_to_latex(ch: char) -> Option<&'static str> {
    UNICODE_TO_LATEX.get(&ch).copied()
}

/// Replace unicode characters in `text` with their LaTeX equivalents.
///
/// Runs of subscript characters become `_{...}` and runs of superscripts
/// `^{...}`. A command that ends in a letter is separated from a following
/// ASCII letter by a space (`αx` becomes `\alpha x`). Pure ASCII input is
/// returned without allocating.
pub fn substitute_unicode(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    let mut open_command = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if let Some(&first) = SUBSCRIPTS.get(&ch) {
            out.push_str("_{");
            out.push(first);
            while let Some(&next) = chars.peek().and_then(|c| SUBSCRIPTS.get(c)) {
                out.push(next);
                chars.next();
            }
            out.push('}');
            open_command = false;
            continue;
        }

        if let Some(&first) = SUPERSCRIPTS.get(&ch) {
            out.push_str("^{");
            out.push(first);
            while let Some(&next) = chars.peek().and_then(|c| SUPERSCRIPTS.get(c)) {
                out.push(next);
                chars.next();
            }
            out.push('}');
            open_command = false;
            continue;
        }

        let accent = chars.peek().and_then(|c| COMBINING_ACCENTS.get(c)).copied();
        if let Some(accent) = accent {
            chars.next();
            out.push_str(accent);
            out.push('{');
            match UNICODE_TO_LATEX.get(&ch) {
                Some(latex) => out.push_str(latex),
                None => out.push(ch),
            }
            out.push('}');
            open_command = false;
            continue;
        }

        match UNICODE_TO_LATEX.get(&ch) {
            Some(latex) => {
                if open_command && latex.starts_with(|c: char| c.is_ascii_alphabetic()) {
                    out.push(' ');
                }
                out.push_str(latex);
                open_command = latex.starts_with('\\') && latex.ends_with(|c: char| c.is_ascii_alphabetic());
            },
            None => {
                if open_command && ch.is_ascii_alphabetic() {
                    out.push(' ');
                }
                out.push(ch);
                open_command = false;
            },
        }
    }

    Cow::Owned(out)
}
