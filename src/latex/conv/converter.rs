// LaTeX Converter Implementation
//
// This module contains the LatexConverter struct: the array-literal pre-pass
// and the bottom-up tree walk that feeds the operator renderer.

use super::value::{render_number, render_symbol};
use crate::ast::{Expr, Grid, Head, Term};
use crate::config::LatexifyOptions;
use crate::error::{LatexifyError, Result};
use crate::latex::LatexString;
use crate::latex::symbols::substitute_unicode;
use log::trace;
use smallvec::SmallVec;

/// Rendered argument slot together with the operator tag of the node it came from
///
/// The tag is what the parent consults when deciding on parentheses; leaves
/// and single-slot nodes carry no tag.
#[derive(Debug, Clone)]
pub(crate) struct Fragment<'e> {
    pub latex: String,
    pub prev_op: Option<&'e str>,
}

impl<'e> Fragment<'e> {
    #[inline]
    pub fn leaf(latex: String) -> Self {
        Self {
            latex,
            prev_op: None,
        }
    }
}

pub(crate) type Fragments<'e> = SmallVec<[Fragment<'e>; 4]>;

/// Converter from expression trees to LaTeX strings
///
/// Holds the options for one conversion and the current nesting depth; a
/// converter is cheap to create and is not meant to be reused across threads.
pub struct LatexConverter<'o> {
    pub(super) options: &'o LatexifyOptions,
    pub(super) depth: usize,
}

impl<'o> LatexConverter<'o> {
    /// Create a converter for the given options
    pub fn new(options: &'o LatexifyOptions) -> Self {
        Self { options, depth: 0 }
    }

    /// Options this converter renders with
    #[inline]
    pub fn options(&self) -> &LatexifyOptions {
        self.options
    }

    /// Convert a tree (or a single leaf) to LaTeX
    ///
    /// Array literals are materialised first; the caller's tree is left untouched.
    ///
    /// # Example
    /// ```
    /// use latexify::{parse_expression, LatexConverter, LatexifyOptions};
    ///
    /// let options = LatexifyOptions::default();
    /// let tree = parse_expression("x/(y+x)").unwrap();
    /// let latex = LatexConverter::new(&options).convert(&tree).unwrap();
    /// assert_eq!(latex.as_str(), "\\frac{x}{y + x}");
    /// ```
    pub fn convert(&mut self, term: &Term) -> Result<LatexString> {
        self.depth = 0;
        let materialized = materialize_arrays(term, 0, self.options.max_depth)?;
        let fragment = self.render_term(&materialized)?;

        let latex = if self.options.convert_unicode {
            substitute_unicode(&fragment.latex).into_owned()
        } else {
            fragment.latex
        };
        Ok(LatexString::from(latex))
    }

    /// Render one argument slot
    pub(super) fn render_term<'e>(&mut self, term: &'e Term) -> Result<Fragment<'e>> {
        match term {
            Term::Expr(expr) => {
                let latex = self.render_expr(expr)?;
                Ok(Fragment {
                    latex,
                    prev_op: expr.operator_tag(),
                })
            },
            Term::Array(grid) => self.render_grid(grid).map(Fragment::leaf),
            leaf => Ok(Fragment::leaf(self.render_leaf(leaf))),
        }
    }

    /// Render a node: every slot first, then the node itself
    pub(super) fn render_expr(&mut self, expr: &Expr) -> Result<String> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(LatexifyError::RecursionLimit(self.options.max_depth));
        }

        let mut slots: Fragments<'_> = SmallVec::with_capacity(expr.args.len());
        for arg in &expr.args {
            slots.push(self.render_term(arg)?);
        }

        let latex = self.render_node(expr, &slots)?;
        trace!(
            "rendered {:?} node (tag {:?}) to {} bytes",
            expr.head,
            expr.operator_tag(),
            latex.len()
        );

        self.depth -= 1;
        Ok(latex)
    }

    fn render_leaf(&self, term: &Term) -> String {
        match term {
            Term::Symbol(name) => render_symbol(name, self.options),
            Term::Number(number) => render_number(*number, self.options),
            Term::Str(text) => text.clone(),
            Term::Bool(value) => value.to_string(),
            Term::Char(ch) => {
                let mut buffer = [0u8; 4];
                let text = ch.encode_utf8(&mut buffer);
                if self.options.convert_unicode {
                    substitute_unicode(text).into_owned()
                } else {
                    text.to_string()
                }
            },
            Term::Latex(latex) => latex.as_str().to_string(),
            Term::Expr(_) | Term::Array(_) => String::new(),
        }
    }
}

/// Replace every array-literal node with its materialised grid
///
/// `Vect` becomes a 1-D grid, `Hcat` a single row, `Vcat` of `Row`s a 2-D grid
/// and `Vcat` of plain cells a column. Rows of unequal length are rejected.
pub(crate) fn materialize_arrays(term: &Term, depth: usize, max_depth: usize) -> Result<Term> {
    let Term::Expr(expr) = term else {
        return Ok(term.clone());
    };
    if depth >= max_depth {
        return Err(LatexifyError::RecursionLimit(max_depth));
    }

    let materialize_all = |args: &[Term]| -> Result<Vec<Term>> {
        args.iter()
            .map(|arg| materialize_arrays(arg, depth + 1, max_depth))
            .collect()
    };

    match expr.head {
        Head::Vect => Ok(Term::Array(Grid::vector(materialize_all(&expr.args)?))),
        Head::Hcat => Ok(Term::Array(Grid::from_rows(vec![materialize_all(&expr.args)?])?)),
        Head::Vcat => {
            let has_rows = expr
                .args
                .iter()
                .any(|arg| matches!(arg, Term::Expr(e) if e.head == Head::Row));
            if !has_rows {
                let cells = materialize_all(&expr.args)?;
                return Ok(Term::Array(Grid::from_rows(
                    cells.into_iter().map(|cell| vec![cell]).collect(),
                )?));
            }

            let rows = expr
                .args
                .iter()
                .map(|arg| match arg {
                    Term::Expr(row) if row.head == Head::Row => materialize_all(&row.args),
                    cell => Ok(vec![materialize_arrays(cell, depth + 1, max_depth)?]),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Term::Array(Grid::from_rows(rows)?))
        },
        head => Ok(Term::Expr(Expr::new(head, materialize_all(&expr.args)?))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprBuilder;

    #[test]
    fn test_materialize_nested_vector() {
        let b = ExprBuilder::new();
        let tree = b.mul(vec![b.sym("A"), b.vect(vec![b.sym("x"), b.sym("y")])]);
        let materialized = materialize_arrays(&tree, 0, 64).unwrap();
        let expr = materialized.as_expr().unwrap();
        assert!(matches!(&expr.args[2], Term::Array(grid) if grid.is_vector() && grid.width() == 2));
        // the input is not modified
        assert!(matches!(&tree.as_expr().unwrap().args[2], Term::Expr(e) if e.head == Head::Vect));
    }

    #[test]
    fn test_materialize_matrix_and_column() {
        let b = ExprBuilder::new();
        let matrix = b.matrix(vec![vec![b.num(1), b.num(2)], vec![b.num(3), b.num(4)]]);
        let Term::Array(grid) = materialize_arrays(&matrix, 0, 64).unwrap() else {
            panic!("expected a grid");
        };
        assert_eq!(grid.rows().len(), 2);
        assert_eq!(grid.width(), 2);

        let column = Expr::new(Head::Vcat, vec![b.sym("a"), b.sym("b")]).into();
        let Term::Array(grid) = materialize_arrays(&column, 0, 64).unwrap() else {
            panic!("expected a grid");
        };
        assert_eq!(grid.rows().len(), 2);
        assert_eq!(grid.width(), 1);
    }

    #[test]
    fn test_materialize_rejects_ragged_rows() {
        let b = ExprBuilder::new();
        let ragged = b.matrix(vec![vec![b.num(1), b.num(2)], vec![b.num(3)]]);
        assert!(matches!(
            materialize_arrays(&ragged, 0, 64),
            Err(LatexifyError::RaggedArray { row: 1, expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let b = ExprBuilder::new();
        let mut tree = b.sym("x");
        for _ in 0..20 {
            tree = b.neg(tree);
        }
        let options = LatexifyOptions::default().with_max_depth(8);
        let err = LatexConverter::new(&options).convert(&tree).unwrap_err();
        assert_eq!(err, LatexifyError::RecursionLimit(8));
    }

    #[test]
    fn test_final_unicode_pass_covers_string_literals() {
        let tree: Term = Expr::call("+", [Term::sym("x"), Term::Str("α".to_string())]).into();
        let options = LatexifyOptions::default();
        let latex = LatexConverter::new(&options).convert(&tree).unwrap();
        assert_eq!(latex, "x + \\alpha");

        let options = LatexifyOptions::default().with_convert_unicode(false);
        let latex = LatexConverter::new(&options).convert(&tree).unwrap();
        assert_eq!(latex, "x + α");
    }
}
