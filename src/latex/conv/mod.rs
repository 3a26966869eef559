// Conversion logic module
//
// This module contains the core conversion logic for LaTeX conversion,
// split into the tree walker, the per-node renderer, the array renderer
// and the top-level value dispatcher.

pub mod converter;
pub mod matrix;
pub mod node;
pub mod value;
