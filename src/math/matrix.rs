use serde::{Serialize, Deserialize};

/// Dense row-major matrix of `f64`.
///
/// `rows` and `cols` are tracked separately from `data` so that a matrix with
/// zero rows still knows its width (an empty label batch encodes to
/// `0 × n_labels`, not `0 × 0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Square identity matrix of size `n`.
    pub fn identity(n: usize) -> Matrix {
        let mut res = Matrix::zeros(n, n);
        for i in 0..n {
            res.data[i][i] = 1.0;
        }
        res
    }

    /// Builds a matrix from row vectors. Width is taken from the first row;
    /// an empty `data` gives a `0 × 0` matrix.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |row| row.len()),
            data
        }
    }

    /// Gathers rows by index, in the order given. Returns `None` if any index
    /// is out of bounds.
    pub fn select_rows(&self, indices: &[usize]) -> Option<Matrix> {
        let mut res = Matrix::zeros(0, self.cols);
        for &i in indices {
            res.data.push(self.data.get(i)?.clone());
            res.rows += 1;
        }
        Some(res)
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        self.data.get(i).map(|row| row.as_slice())
    }

    pub fn row_sums(&self) -> Vec<f64> {
        self.data.iter().map(|row| row.iter().sum()).collect()
    }

    /// Column index of the largest entry in each row, `None` for an empty
    /// row. Ties resolve to the first maximum; NaN entries are never selected
    /// over a number.
    pub fn argmax_rows(&self) -> Vec<Option<usize>> {
        self.data.iter().map(|row| argmax(row)).collect()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

fn argmax(v: &[f64]) -> Option<usize> {
    if v.is_empty() {
        return None;
    }
    let mut best = 0;
    for (i, &x) in v.iter().enumerate() {
        if x > v[best] || (v[best].is_nan() && !x.is_nan()) {
            best = i;
        }
    }
    Some(best)
}
