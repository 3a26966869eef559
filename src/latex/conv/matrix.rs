// Matrix conversion logic for LaTeX conversion
//
// This module contains the array renderer: each cell is rendered through the
// walker, then laid out in a matrix environment (or an `array` environment
// with explicit fences when a column alignment is configured).

use super::converter::LatexConverter;
use crate::ast::Grid;
use crate::config::VectorOrientation;
use crate::error::Result;
use crate::latex::matrix::{estimate_matrix_capacity, matrix_fence_delimiters, matrix_fence_to_env};

impl LatexConverter<'_> {
    /// Render a grid of cells as a matrix environment
    ///
    /// An empty grid renders to the empty string.
    pub(super) fn render_grid(&mut self, grid: &Grid) -> Result<String> {
        if grid.is_empty() {
            return Ok(String::new());
        }

        let mut rendered: Vec<Vec<String>> = Vec::with_capacity(grid.rows().len());
        let mut content = 0;
        for row in grid.rows() {
            let mut cells = Vec::with_capacity(row.len());
            for cell in row {
                let latex = self.render_term(cell)?.latex;
                content += latex.len();
                cells.push(latex);
            }
            rendered.push(cells);
        }

        let array = &self.options.array;
        let mut rows = if grid.is_vector() && array.vector == VectorOrientation::Column {
            transpose(rendered)
        } else {
            rendered
        };
        if array.transpose {
            rows = transpose(rows);
        }

        let cols = rows.first().map_or(0, Vec::len);
        let column_delimiter = format!(" {} ", array.column_delimiter);
        let row_delimiter = format!(" {} ", array.row_delimiter);

        let mut buffer = String::with_capacity(estimate_matrix_capacity(rows.len(), cols, content));

        match array.alignment {
            Some(alignment) => {
                let (open, close) = matrix_fence_delimiters(array.fence);
                buffer.push_str(open);
                buffer.push_str("\\begin{array}{");
                buffer.extend(std::iter::repeat_n(alignment.column_spec(), cols));
                buffer.push('}');
                push_rows(&mut buffer, &rows, &column_delimiter, &row_delimiter);
                buffer.push_str("\\end{array}");
                buffer.push_str(close);
            },
            None => {
                let env = matrix_fence_to_env(array.fence);
                buffer.push_str("\\begin{");
                buffer.push_str(env);
                buffer.push('}');
                push_rows(&mut buffer, &rows, &column_delimiter, &row_delimiter);
                buffer.push_str("\\end{");
                buffer.push_str(env);
                buffer.push('}');
            },
        }

        Ok(buffer)
    }
}

fn push_rows(buffer: &mut String, rows: &[Vec<String>], column_delimiter: &str, row_delimiter: &str) {
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            buffer.push_str(row_delimiter);
        }
        for (j, cell) in row.iter().enumerate() {
            if j > 0 {
                buffer.push_str(column_delimiter);
            }
            buffer.push_str(cell);
        }
    }
}

/// Swap rows and columns of a rectangular grid
fn transpose(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let cols = rows.first().map_or(0, Vec::len);
    let mut out: Vec<Vec<String>> = (0..cols).map(|_| Vec::with_capacity(rows.len())).collect();
    for row in rows {
        for (j, cell) in row.into_iter().enumerate() {
            out[j].push(cell);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::ast::{Alignment, ExprBuilder, MatrixFence, Term};
    use crate::config::{ArrayOptions, LatexifyOptions, VectorOrientation};
    use crate::latex::LatexConverter;

    fn render_with(term: &Term, options: &LatexifyOptions) -> String {
        LatexConverter::new(options).convert(term).unwrap().into_string()
    }

    #[test]
    fn test_row_vector_default() {
        let b = ExprBuilder::new();
        let tree = b.vect(vec![b.sym("x"), b.sym("y")]);
        assert_eq!(
            render_with(&tree, &LatexifyOptions::default()),
            "\\begin{bmatrix}x & y\\end{bmatrix}"
        );
    }

    #[test]
    fn test_column_vector() {
        let b = ExprBuilder::new();
        let tree = b.vect(vec![b.sym("x"), b.sym("y")]);
        let options = LatexifyOptions::default()
            .with_array(ArrayOptions::new().with_vector(VectorOrientation::Column));
        assert_eq!(render_with(&tree, &options), "\\begin{bmatrix}x \\\\ y\\end{bmatrix}");
    }

    #[test]
    fn test_matrix_cells_are_full_expressions() {
        let b = ExprBuilder::new();
        let tree = b.matrix(vec![
            vec![b.div(b.num(1), b.num(2)), b.num(0)],
            vec![b.num(0), b.pow(b.sym("x"), b.num(2))],
        ]);
        assert_eq!(
            render_with(&tree, &LatexifyOptions::default()),
            "\\begin{bmatrix}\\frac{1}{2} & 0 \\\\ 0 & x^{2}\\end{bmatrix}"
        );
    }

    #[test]
    fn test_fence_alignment_and_delimiters() {
        let b = ExprBuilder::new();
        let tree = b.matrix(vec![vec![b.num(1), b.num(2)], vec![b.num(3), b.num(4)]]);

        let options = LatexifyOptions::default()
            .with_array(ArrayOptions::new().with_fence(MatrixFence::Paren));
        assert_eq!(
            render_with(&tree, &options),
            "\\begin{pmatrix}1 & 2 \\\\ 3 & 4\\end{pmatrix}"
        );

        let options = LatexifyOptions::default()
            .with_array(ArrayOptions::new().with_alignment(Alignment::Right));
        assert_eq!(
            render_with(&tree, &options),
            "\\left[\\begin{array}{rr}1 & 2 \\\\ 3 & 4\\end{array}\\right]"
        );

        let options = LatexifyOptions::default().with_array(
            ArrayOptions::new()
                .with_transpose(true)
                .with_column_delimiter("&&"),
        );
        assert_eq!(
            render_with(&tree, &options),
            "\\begin{bmatrix}1 && 3 \\\\ 2 && 4\\end{bmatrix}"
        );
    }

    #[test]
    fn test_vector_inside_product() {
        let b = ExprBuilder::new();
        let tree = b.mul(vec![b.sym("A"), b.vect(vec![b.sym("x"), b.sym("y")])]);
        assert_eq!(
            render_with(&tree, &LatexifyOptions::default()),
            "A \\cdot \\begin{bmatrix}x & y\\end{bmatrix}"
        );
    }

    #[test]
    fn test_empty_array() {
        let b = ExprBuilder::new();
        assert_eq!(render_with(&b.vect(vec![]), &LatexifyOptions::default()), "");
    }
}
