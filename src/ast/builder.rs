use super::node::{Expr, Term};
use super::types::{Head, Number};

/// Builder for constructing expression trees without going through the parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprBuilder;

impl ExprBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self
    }

    /// Create an identifier slot
    pub fn sym(&self, name: &str) -> Term {
        Term::Symbol(name.to_string())
    }

    /// Create a numeric slot
    pub fn num(&self, value: impl Into<Number>) -> Term {
        Term::Number(value.into())
    }

    /// Create an n-ary sum
    pub fn add(&self, operands: Vec<Term>) -> Term {
        Expr::call("+", operands).into()
    }

    /// Create a binary difference
    pub fn sub(&self, lhs: Term, rhs: Term) -> Term {
        Expr::call("-", [lhs, rhs]).into()
    }

    /// Create a unary negation
    pub fn neg(&self, operand: Term) -> Term {
        Expr::call("-", [operand]).into()
    }

    /// Create an n-ary product
    pub fn mul(&self, operands: Vec<Term>) -> Term {
        Expr::call("*", operands).into()
    }

    /// Create a division
    pub fn div(&self, numerator: Term, denominator: Term) -> Term {
        Expr::call("/", [numerator, denominator]).into()
    }

    /// Create a power
    pub fn pow(&self, base: Term, exponent: Term) -> Term {
        Expr::call("^", [base, exponent]).into()
    }

    /// Create a function call
    pub fn func(&self, name: &str, arguments: Vec<Term>) -> Term {
        Expr::call(name, arguments).into()
    }

    /// Create a logical conjunction
    pub fn and(&self, lhs: Term, rhs: Term) -> Term {
        Expr::call("&&", [lhs, rhs]).into()
    }

    /// Create a logical disjunction
    pub fn or(&self, lhs: Term, rhs: Term) -> Term {
        Expr::call("||", [lhs, rhs]).into()
    }

    /// Create an indexing node
    pub fn index(&self, collection: Term, indices: Vec<Term>) -> Term {
        let mut args = vec![collection];
        args.extend(indices);
        Expr::new(Head::Ref, args).into()
    }

    /// Create an assignment
    pub fn assign(&self, lhs: Term, rhs: Term) -> Term {
        Expr::new(Head::Assign, vec![lhs, rhs]).into()
    }

    /// Create a `[a, b, ...]` array literal
    pub fn vect(&self, cells: Vec<Term>) -> Term {
        Expr::new(Head::Vect, cells).into()
    }

    /// Create a `[a b; c d]` array literal from rows
    pub fn matrix(&self, rows: Vec<Vec<Term>>) -> Term {
        let rows = rows
            .into_iter()
            .map(|cells| Expr::new(Head::Row, cells).into())
            .collect();
        Expr::new(Head::Vcat, rows).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let b = ExprBuilder::new();
        let node = b.div(b.sym("x"), b.add(vec![b.sym("y"), b.num(1)]));
        let expr = node.as_expr().expect("division node");
        assert_eq!(expr.operator(), Some("/"));
        assert_eq!(expr.operands().len(), 2);
        assert_eq!(expr.operands()[1].as_expr().and_then(Expr::operator), Some("+"));
    }

    #[test]
    fn test_logical_nodes_carry_their_operator() {
        let b = ExprBuilder::new();
        let node = b.or(b.sym("p"), b.and(b.sym("q"), b.sym("r")));
        let expr = node.as_expr().expect("disjunction node");
        assert_eq!(expr.operator_tag(), Some("||"));
        assert_eq!(expr.operands()[1].as_expr().and_then(Expr::operator_tag), Some("&&"));
    }

    #[test]
    fn test_matrix_rows_are_row_nodes() {
        let b = ExprBuilder::new();
        let node = b.matrix(vec![vec![b.num(1), b.num(2)], vec![b.num(3), b.num(4)]]);
        let expr = node.as_expr().expect("vcat node");
        assert_eq!(expr.head, Head::Vcat);
        assert!(expr.args.iter().all(|row| matches!(row, Term::Expr(e) if e.head == Head::Row)));
    }
}
