// Expression tree for LaTeX rendering
//
// Nodes follow an s-expression layout: a structural head plus ordered
// argument slots. Operator applications are `Call` nodes whose slot 0 holds
// the operator symbol, so the head and arity of a node fully determine how it
// is rendered. Leaves (numbers, identifiers, literals) terminate recursion.

mod builder;
mod node;
mod types;

pub use builder::ExprBuilder;
pub use node::{Expr, Grid, Term};
pub use types::*;
