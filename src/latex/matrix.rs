// Matrix environment helpers

use crate::ast::MatrixFence;

/// Convert matrix fence type to LaTeX environment name
#[inline]
pub fn matrix_fence_to_env(fence_type: MatrixFence) -> &'static str {
    match fence_type {
        MatrixFence::None => "matrix",
        MatrixFence::Paren => "pmatrix",
        MatrixFence::Bracket => "bmatrix",
        MatrixFence::Brace => "Bmatrix",
        MatrixFence::Pipe => "vmatrix",
        MatrixFence::DoublePipe => "Vmatrix",
    }
}

/// Opening and closing `\left`/`\right` pair used around an `array` environment
#[inline]
pub fn matrix_fence_delimiters(fence_type: MatrixFence) -> (&'static str, &'static str) {
    match fence_type {
        MatrixFence::None => ("", ""),
        MatrixFence::Paren => ("\\left(", "\\right)"),
        MatrixFence::Bracket => ("\\left[", "\\right]"),
        MatrixFence::Brace => ("\\left\\{", "\\right\\}"),
        MatrixFence::Pipe => ("\\left|", "\\right|"),
        MatrixFence::DoublePipe => ("\\left\\|", "\\right\\|"),
    }
}

/// Estimate capacity needed for a grid of rendered cells
pub fn estimate_matrix_capacity(rows: usize, cols: usize, content: usize) -> usize {
    // \begin{bmatrix}\end{bmatrix}
    let env_overhead = 28;
    let row_separators = rows.saturating_sub(1) * 4;
    let col_separators = rows * cols.saturating_sub(1) * 3;
    env_overhead + row_separators + col_separators + content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_fence_to_env() {
        assert_eq!(matrix_fence_to_env(MatrixFence::None), "matrix");
        assert_eq!(matrix_fence_to_env(MatrixFence::Paren), "pmatrix");
        assert_eq!(matrix_fence_to_env(MatrixFence::Bracket), "bmatrix");
        assert_eq!(matrix_fence_to_env(MatrixFence::Brace), "Bmatrix");
        assert_eq!(matrix_fence_to_env(MatrixFence::Pipe), "vmatrix");
        assert_eq!(matrix_fence_to_env(MatrixFence::DoublePipe), "Vmatrix");
    }

    #[test]
    fn test_fence_delimiters() {
        assert_eq!(matrix_fence_delimiters(MatrixFence::Bracket), ("\\left[", "\\right]"));
        assert_eq!(matrix_fence_delimiters(MatrixFence::None), ("", ""));
    }
}
