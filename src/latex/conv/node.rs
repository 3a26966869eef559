// Node rendering for LaTeX conversion
//
// Turns one expression node plus its already rendered slots into a LaTeX
// fragment. Parenthesisation is decided from the operator tag each slot
// carries; untagged slots are never wrapped.

use super::converter::{Fragment, LatexConverter};
use crate::ast::{Expr, Head};
use crate::config::IndexStyle;
use crate::error::{LatexifyError, Result};
use crate::latex::operators::{comparison_symbol, function_alias, is_identifier, needs_parens, precedence};
use crate::latex::symbols::substitute_unicode;
use crate::latex::utils::escape_latex_special_chars;

/// Wrap a fragment in auto-sized parentheses
#[inline]
fn paren(latex: &str) -> String {
    format!("\\left( {} \\right)", latex)
}

/// Operand text, parenthesised when its tag binds looser than `parent`
fn operand(slot: &Fragment<'_>, parent: &str, inclusive: bool) -> String {
    if needs_parens(slot.prev_op, parent, inclusive) {
        paren(&slot.latex)
    } else {
        slot.latex.clone()
    }
}

fn arity(operator: &str, expected: &'static str, got: usize) -> LatexifyError {
    LatexifyError::Arity {
        operator: operator.to_string(),
        expected,
        got,
    }
}

fn join_args(slots: &[Fragment<'_>]) -> String {
    let mut out = String::new();
    for (i, slot) in slots.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&slot.latex);
    }
    out
}

impl LatexConverter<'_> {
    /// Render a node whose slots have all been rendered
    pub(super) fn render_node(&self, expr: &Expr, slots: &[Fragment<'_>]) -> Result<String> {
        match expr.head {
            Head::Call => match expr.operator() {
                Some(op) => self.render_call(op, &slots[1..]),
                None => self.render_callee_call(slots),
            },
            Head::Ref => self.render_index(slots),
            Head::Assign => match slots {
                [lhs, rhs] => Ok(format!("{} = {}", lhs.latex, rhs.latex)),
                _ => Err(arity("=", "2", slots.len())),
            },
            Head::Comparison => render_comparison_chain(expr, slots),
            Head::Tuple => Ok(paren(&join_args(slots))),
            Head::Block => Ok(slots
                .iter()
                .map(|slot| slot.latex.as_str())
                .collect::<Vec<_>>()
                .join(" \\\\ ")),
            Head::If => render_cases(slots),
            head @ (Head::Vect | Head::Hcat | Head::Vcat | Head::Row) => {
                Err(LatexifyError::UnsupportedHead(head))
            },
        }
    }

    fn render_call(&self, op: &str, args: &[Fragment<'_>]) -> Result<String> {
        match op {
            "/" | "./" | "//" => match args {
                [numerator, denominator] => {
                    Ok(format!("\\frac{{{}}}{{{}}}", numerator.latex, denominator.latex))
                },
                _ => Err(arity(op, "2", args.len())),
            },
            "*" | ".*" => {
                if args.is_empty() {
                    return Err(arity(op, "at least 1", 0));
                }
                let separator = self.options.mult_symbol.separator();
                Ok(args
                    .iter()
                    .map(|slot| operand(slot, "*", false))
                    .collect::<Vec<_>>()
                    .join(separator))
            },
            "+" | ".+" => render_sum(op, args),
            "-" | ".-" => match args {
                [x] => Ok(format!("-{}", operand(x, "-", true))),
                [lhs, rhs] => Ok(format!(
                    "{} - {}",
                    operand(lhs, "-", false),
                    signed_operand(rhs, "-")
                )),
                _ => Err(arity(op, "1 or 2", args.len())),
            },
            "±" | "∓" => {
                let symbol = if op == "±" { "\\pm" } else { "\\mp" };
                match args {
                    [x] => Ok(format!("{}{}", symbol, operand(x, op, true))),
                    [lhs, rhs] => Ok(format!(
                        "{} {} {}",
                        operand(lhs, op, false),
                        symbol,
                        signed_operand(rhs, op)
                    )),
                    _ => Err(arity(op, "1 or 2", args.len())),
                }
            },
            "^" | ".^" => match args {
                [base, exponent] => {
                    let base = if base.latex.starts_with('-') {
                        paren(&base.latex)
                    } else {
                        operand(base, "^", true)
                    };
                    Ok(format!("{}^{{{}}}", base, exponent.latex))
                },
                _ => Err(arity(op, "2", args.len())),
            },
            "%" | "\\" | "÷" | "×" | "⋅" => {
                let symbol = match op {
                    "%" => "\\%",
                    "\\" => "\\backslash",
                    "÷" => "\\div",
                    "×" => "\\times",
                    _ => "\\cdot",
                };
                match args {
                    [lhs, rhs] => Ok(format!(
                        "{} {} {}",
                        operand(lhs, op, false),
                        symbol,
                        signed_operand(rhs, op)
                    )),
                    _ => Err(arity(op, "2", args.len())),
                }
            },
            "&&" => render_logical(op, "\\wedge", args),
            "||" => render_logical(op, "\\vee", args),
            "!" => match args {
                [x] => {
                    let inner = if x.prev_op.and_then(precedence).is_some() {
                        paren(&x.latex)
                    } else {
                        x.latex.clone()
                    };
                    Ok(format!("\\neg {}", inner))
                },
                _ => Err(arity(op, "1", args.len())),
            },
            "√" => match args {
                [x] => Ok(format!("\\sqrt{{{}}}", x.latex)),
                _ => Err(arity(op, "1", args.len())),
            },
            _ => {
                if let Some(symbol) = comparison_symbol(op) {
                    return match args {
                        [lhs, rhs] => Ok(format!("{} {} {}", lhs.latex, symbol, rhs.latex)),
                        _ => Err(arity(op, "2", args.len())),
                    };
                }
                if is_identifier(op) {
                    return self.render_function(op, args);
                }
                Err(LatexifyError::UnsupportedOperator(op.to_string()))
            },
        }
    }

    /// Named function application
    fn render_function(&self, name: &str, args: &[Fragment<'_>]) -> Result<String> {
        let single = || match args {
            [x] => Ok(x),
            _ => Err(arity(name, "1", args.len())),
        };

        match name {
            "sqrt" => Ok(format!("\\sqrt{{{}}}", single()?.latex)),
            "cbrt" => Ok(format!("\\sqrt[3]{{{}}}", single()?.latex)),
            "exp" => Ok(format!("e^{{{}}}", single()?.latex)),
            "abs" => Ok(format!("\\left| {} \\right|", single()?.latex)),
            "norm" => Ok(format!("\\left\\| {} \\right\\|", single()?.latex)),
            "floor" => Ok(format!("\\left\\lfloor {} \\right\\rfloor", single()?.latex)),
            "ceil" => Ok(format!("\\left\\lceil {} \\right\\rceil", single()?.latex)),
            "conj" => Ok(format!("\\overline{{{}}}", single()?.latex)),
            "factorial" => {
                let x = single()?;
                let inner = if x.prev_op.and_then(precedence).is_some() {
                    paren(&x.latex)
                } else {
                    x.latex.clone()
                };
                Ok(format!("{}!", inner))
            },
            "log" if args.len() == 2 => Ok(format!(
                "\\log_{{{}}}\\left( {} \\right)",
                args[0].latex, args[1].latex
            )),
            _ => {
                let head = match function_alias(name) {
                    Some(alias) => alias.to_string(),
                    None if name.chars().count() == 1 => {
                        if self.options.convert_unicode {
                            substitute_unicode(name).into_owned()
                        } else {
                            name.to_string()
                        }
                    },
                    None => format!("\\mathrm{{{}}}", escape_latex_special_chars(name)),
                };
                Ok(format!("{}\\left( {} \\right)", head, join_args(args)))
            },
        }
    }

    /// Call whose callee is itself an expression, e.g. `(f + g)(x)`
    fn render_callee_call(&self, slots: &[Fragment<'_>]) -> Result<String> {
        let Some((callee, args)) = slots.split_first() else {
            return Err(arity("call", "at least 1", 0));
        };
        let callee = if callee.prev_op.and_then(precedence).is_some() {
            paren(&callee.latex)
        } else {
            callee.latex.clone()
        };
        Ok(format!("{}\\left( {} \\right)", callee, join_args(args)))
    }

    fn render_index(&self, slots: &[Fragment<'_>]) -> Result<String> {
        let Some((collection, indices)) = slots.split_first() else {
            return Err(arity("[]", "at least 1", 0));
        };
        let collection = if collection.prev_op.and_then(precedence).is_some() {
            paren(&collection.latex)
        } else {
            collection.latex.clone()
        };

        match self.options.index_style {
            IndexStyle::Bracket => Ok(format!("{}\\left[{}\\right]", collection, join_args(indices))),
            IndexStyle::Subscript => {
                let indices = indices
                    .iter()
                    .map(|slot| slot.latex.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                Ok(format!("{}_{{{}}}", collection, indices))
            },
        }
    }
}

/// `a + b + c`; a following operand that starts with `-` becomes a subtraction
fn render_sum(op: &str, args: &[Fragment<'_>]) -> Result<String> {
    let Some((first, rest)) = args.split_first() else {
        return Err(arity(op, "at least 1", 0));
    };

    let mut out = operand(first, "+", false);
    for slot in rest {
        let text = operand(slot, "+", false);
        match text.strip_prefix('-') {
            Some(negated) => {
                out.push_str(" - ");
                out.push_str(negated);
            },
            None => {
                out.push_str(" + ");
                out.push_str(&text);
            },
        }
    }
    Ok(out)
}

/// Right operand of a non-commutative operator
///
/// Parenthesised at equal strength (`a - (b - c)`) and when it carries its own sign.
fn signed_operand(slot: &Fragment<'_>, parent: &str) -> String {
    if slot.latex.starts_with('-') || needs_parens(slot.prev_op, parent, true) {
        paren(&slot.latex)
    } else {
        slot.latex.clone()
    }
}

/// `[a, op, b, op, c, ...]` with every operator slot a relational symbol
fn render_comparison_chain(expr: &Expr, slots: &[Fragment<'_>]) -> Result<String> {
    if slots.len() < 3 || slots.len() % 2 == 0 {
        return Err(arity("comparison", "an odd number of at least 3", slots.len()));
    }

    let mut out = String::new();
    for (i, slot) in slots.iter().enumerate() {
        if i % 2 == 0 {
            out.push_str(&slot.latex);
            continue;
        }
        let op = expr.args[i].as_symbol().unwrap_or_default();
        let symbol = comparison_symbol(op)
            .ok_or_else(|| LatexifyError::UnsupportedOperator(op.to_string()))?;
        out.push(' ');
        out.push_str(symbol);
        out.push(' ');
    }
    Ok(out)
}

fn render_logical(op: &str, symbol: &str, slots: &[Fragment<'_>]) -> Result<String> {
    match slots {
        [lhs, rhs] => Ok(format!(
            "{} {} {}",
            operand(lhs, op, false),
            symbol,
            operand(rhs, op, false)
        )),
        _ => Err(arity(op, "2", slots.len())),
    }
}

/// `cond ? a : b` as a `cases` environment
fn render_cases(slots: &[Fragment<'_>]) -> Result<String> {
    match slots {
        [condition, then] => Ok(format!(
            "\\begin{{cases}}\n{} & \\text{{if }} {}\n\\end{{cases}}",
            then.latex, condition.latex
        )),
        [condition, then, otherwise] => Ok(format!(
            "\\begin{{cases}}\n{} & \\text{{if }} {}\\\\\n{} & \\text{{otherwise}}\n\\end{{cases}}",
            then.latex, condition.latex, otherwise.latex
        )),
        _ => Err(arity("if", "2 or 3", slots.len())),
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, ExprBuilder, Head, Term};
    use crate::config::{IndexStyle, LatexifyOptions, MultSymbol};
    use crate::error::LatexifyError;
    use crate::latex::LatexConverter;

    fn render(term: &Term) -> String {
        render_with(term, &LatexifyOptions::default())
    }

    fn render_with(term: &Term, options: &LatexifyOptions) -> String {
        LatexConverter::new(options).convert(term).unwrap().into_string()
    }

    fn render_err(term: &Term) -> LatexifyError {
        LatexConverter::new(&LatexifyOptions::default())
            .convert(term)
            .unwrap_err()
    }

    #[test]
    fn test_fraction_never_parenthesised() {
        let b = ExprBuilder::new();
        let tree = b.div(b.add(vec![b.sym("a"), b.sym("b")]), b.mul(vec![b.sym("c"), b.sym("d")]));
        assert_eq!(render(&tree), "\\frac{a + b}{c \\cdot d}");
    }

    #[test]
    fn test_product_parenthesises_sums() {
        let b = ExprBuilder::new();
        let tree = b.mul(vec![b.num(2), b.add(vec![b.sym("x"), b.num(1)])]);
        assert_eq!(render(&tree), "2 \\cdot \\left( x + 1 \\right)");

        let options = LatexifyOptions::default().with_mult_symbol(MultSymbol::Times);
        assert_eq!(render_with(&tree, &options), "2 \\times \\left( x + 1 \\right)");
    }

    #[test]
    fn test_sum_collapses_negative_operands() {
        let b = ExprBuilder::new();
        let tree = b.add(vec![b.sym("x"), b.neg(b.sym("y")), b.num(-3)]);
        assert_eq!(render(&tree), "x - y - 3");

        let nested = b.add(vec![b.sym("a"), b.sub(b.sym("b"), b.sym("c"))]);
        assert_eq!(render(&nested), "a + b - c");
    }

    #[test]
    fn test_subtraction_and_negation() {
        let b = ExprBuilder::new();
        let tree = b.sub(b.sym("a"), b.sub(b.sym("b"), b.sym("c")));
        assert_eq!(render(&tree), "a - \\left( b - c \\right)");

        let tree = b.neg(b.add(vec![b.sym("a"), b.sym("b")]));
        assert_eq!(render(&tree), "-\\left( a + b \\right)");

        let tree = b.neg(b.mul(vec![b.sym("a"), b.sym("b")]));
        assert_eq!(render(&tree), "-a \\cdot b");
    }

    #[test]
    fn test_power() {
        let b = ExprBuilder::new();
        assert_eq!(render(&b.pow(b.sym("x"), b.num(2))), "x^{2}");
        assert_eq!(
            render(&b.pow(b.add(vec![b.sym("x"), b.num(1)]), b.num(2))),
            "\\left( x + 1 \\right)^{2}"
        );
        assert_eq!(render(&b.pow(b.sym("x"), b.neg(b.num(1)))), "x^{-1}");
        assert_eq!(
            render(&b.pow(b.pow(b.sym("x"), b.num(2)), b.num(3))),
            "\\left( x^{2} \\right)^{3}"
        );
        assert_eq!(render(&b.pow(b.num(-2), b.num(2))), "\\left( -2 \\right)^{2}");
    }

    #[test]
    fn test_single_slot_nodes_are_never_tagged() {
        // A nullary call has one slot and therefore no tag: never wrapped.
        let b = ExprBuilder::new();
        let tree = b.mul(vec![b.sym("a"), b.func("f", vec![])]);
        assert_eq!(render(&tree), "a \\cdot f\\left(  \\right)");
    }

    #[test]
    fn test_functions() {
        let b = ExprBuilder::new();
        assert_eq!(render(&b.func("sin", vec![b.sym("x")])), "\\sin\\left( x \\right)");
        assert_eq!(render(&b.func("asin", vec![b.sym("x")])), "\\arcsin\\left( x \\right)");
        assert_eq!(render(&b.func("sqrt", vec![b.sym("x")])), "\\sqrt{x}");
        assert_eq!(render(&b.func("cbrt", vec![b.sym("x")])), "\\sqrt[3]{x}");
        assert_eq!(render(&b.func("exp", vec![b.sym("x")])), "e^{x}");
        assert_eq!(render(&b.func("abs", vec![b.sym("x")])), "\\left| x \\right|");
        assert_eq!(
            render(&b.func("f", vec![b.sym("x"), b.sym("y")])),
            "f\\left( x, y \\right)"
        );
        assert_eq!(
            render(&b.func("my_func", vec![b.sym("x")])),
            "\\mathrm{my\\_func}\\left( x \\right)"
        );
        assert_eq!(
            render(&b.func("log", vec![b.num(2), b.sym("x")])),
            "\\log_{2}\\left( x \\right)"
        );
        assert_eq!(
            render(&b.func("factorial", vec![b.add(vec![b.sym("n"), b.num(1)])])),
            "\\left( n + 1 \\right)!"
        );
    }

    #[test]
    fn test_comparisons_and_assignment() {
        let b = ExprBuilder::new();
        assert_eq!(render(&b.func("<=", vec![b.sym("x"), b.num(1)])), "x \\leq 1");
        assert_eq!(render(&b.func("≠", vec![b.sym("x"), b.num(1)])), "x \\neq 1");
        assert_eq!(render(&b.assign(b.sym("y"), b.pow(b.sym("x"), b.num(2)))), "y = x^{2}");

        let chain: Term = Expr::new(
            Head::Comparison,
            vec![b.sym("a"), b.sym("<"), b.sym("b"), b.sym("<="), b.sym("c")],
        )
        .into();
        assert_eq!(render(&chain), "a < b \\leq c");
    }

    #[test]
    fn test_indexing_styles() {
        let b = ExprBuilder::new();
        let tree = b.index(b.sym("A"), vec![b.sym("i"), b.sym("j")]);
        assert_eq!(render(&tree), "A\\left[i, j\\right]");

        let options = LatexifyOptions::default().with_index_style(IndexStyle::Subscript);
        assert_eq!(render_with(&tree, &options), "A_{i,j}");
    }

    #[test]
    fn test_structural_heads() {
        let b = ExprBuilder::new();
        let tuple: Term = Expr::new(Head::Tuple, vec![b.sym("a"), b.sym("b")]).into();
        assert_eq!(render(&tuple), "\\left( a, b \\right)");

        let block: Term = Expr::new(Head::Block, vec![b.sym("a"), b.sym("b")]).into();
        assert_eq!(render(&block), "a \\\\ b");

        assert_eq!(render(&b.and(b.sym("p"), b.sym("q"))), "p \\wedge q");

        let cases: Term = Expr::new(
            Head::If,
            vec![b.func(">", vec![b.sym("x"), b.num(0)]), b.sym("x"), b.neg(b.sym("x"))],
        )
        .into();
        assert_eq!(
            render(&cases),
            "\\begin{cases}\nx & \\text{if } x > 0\\\\\n-x & \\text{otherwise}\n\\end{cases}"
        );
    }

    #[test]
    fn test_logical_operators_keep_grouping() {
        let b = ExprBuilder::new();
        let tree = b.func("!", vec![b.and(b.sym("p"), b.sym("q"))]);
        assert_eq!(render(&tree), "\\neg \\left( p \\wedge q \\right)");

        let tree = b.and(b.or(b.sym("p"), b.sym("q")), b.sym("r"));
        assert_eq!(render(&tree), "\\left( p \\vee q \\right) \\wedge r");

        let tree = b.or(b.sym("p"), b.and(b.sym("q"), b.sym("r")));
        assert_eq!(render(&tree), "p \\vee q \\wedge r");

        let tree = b.neg(b.or(b.sym("p"), b.sym("q")));
        assert_eq!(render(&tree), "-\\left( p \\vee q \\right)");

        let tree = b.and(b.func(">", vec![b.sym("x"), b.num(0)]), b.sym("p"));
        assert_eq!(render(&tree), "x > 0 \\wedge p");
    }

    #[test]
    fn test_misc_operators() {
        let b = ExprBuilder::new();
        assert_eq!(render(&b.func("%", vec![b.sym("a"), b.sym("b")])), "a \\% b");
        assert_eq!(render(&b.func("÷", vec![b.sym("a"), b.sym("b")])), "a \\div b");
        assert_eq!(render(&b.func("!", vec![b.sym("p")])), "\\neg p");
        assert_eq!(render(&b.func("√", vec![b.sym("x")])), "\\sqrt{x}");
        assert_eq!(render(&b.func("±", vec![b.sym("a"), b.sym("b")])), "a \\pm b");
    }

    #[test]
    fn test_errors() {
        let b = ExprBuilder::new();
        assert_eq!(
            render_err(&b.func("/", vec![b.sym("a"), b.sym("b"), b.sym("c")])),
            LatexifyError::Arity {
                operator: "/".to_string(),
                expected: "2",
                got: 3
            }
        );
        assert_eq!(
            render_err(&b.func("⊕", vec![b.sym("a"), b.sym("b")])),
            LatexifyError::UnsupportedOperator("⊕".to_string())
        );
        let row: Term = Expr::new(Head::Row, vec![b.sym("a"), b.sym("b")]).into();
        assert_eq!(render_err(&row), LatexifyError::UnsupportedHead(Head::Row));
    }
}
