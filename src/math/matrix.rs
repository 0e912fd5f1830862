use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};

/// Dense row-major matrix.  A layer's incoming weights are stored with one row per
/// neuron, so `data[j][k]` is the weight from input `k` to neuron `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Wraps row data, rejecting ragged rows.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map_or(0, Vec::len);
        for row in &data {
            NetError::check_len("matrix row", cols, row.len())?;
        }
        Ok(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// `self · x`, one dot product per row.
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.cols);
        self.data.iter().map(|row| dot(row, x)).collect()
    }

    /// `selfᵀ · d`, i.e. `out[k] = Σ_j data[j][k] * d[j]`.
    pub fn transpose_mul_vec(&self, d: &[f64]) -> Vec<f64> {
        debug_assert_eq!(d.len(), self.rows);
        let mut out = vec![0.0; self.cols];
        for (row, &dj) in self.data.iter().zip(d) {
            for (o, &w) in out.iter_mut().zip(row) {
                *o += w * dj;
            }
        }
        out
    }

    /// Outer product `a ⊗ b`: `a.len()` rows, `b.len()` columns.
    pub fn outer(a: &[f64], b: &[f64]) -> Matrix {
        Matrix {
            rows: a.len(),
            cols: b.len(),
            data: a.iter().map(|&ai| b.iter().map(|&bk| ai * bk).collect()).collect(),
        }
    }

    /// Applies `f` to every element in place.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut f64),
    {
        self.data.iter_mut().flatten().for_each(|x| f(x));
    }

    /// `self -= scale * other`, element-wise.
    pub fn sub_scaled(&mut self, other: &Matrix, scale: f64) {
        assert_eq!((self.rows, self.cols), (other.rows, other.cols), "Matrices are of incorrect sizes");
        for (row, other_row) in self.data.iter_mut().zip(&other.data) {
            for (x, &g) in row.iter_mut().zip(other_row) {
                *x -= scale * g;
            }
        }
    }
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_data(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, NetError::DimensionMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn mul_vec_dots_each_row() {
        assert_eq!(sample().mul_vec(&[1.0, 0.0, -1.0]), vec![-2.0, -2.0]);
    }

    #[test]
    fn transpose_mul_vec_sums_columns() {
        assert_eq!(sample().transpose_mul_vec(&[1.0, 2.0]), vec![9.0, 12.0, 15.0]);
    }

    #[test]
    fn outer_product_shape() {
        let m = Matrix::outer(&[1.0, 2.0], &[3.0, 4.0, 5.0]);
        assert_eq!((m.rows, m.cols), (2, 3));
        assert_eq!(m.data[1], vec![6.0, 8.0, 10.0]);
    }

    #[test]
    fn sub_scaled_updates_in_place() {
        let mut m = sample();
        m.sub_scaled(&Matrix::outer(&[1.0, 1.0], &[1.0, 1.0, 1.0]), 0.5);
        assert_eq!(m.data[0], vec![0.5, 1.5, 2.5]);
    }

    #[test]
    fn clone_is_deep() {
        let original = sample();
        let mut copy = original.clone();
        copy.for_each_mut(|x| *x = 0.0);
        assert_eq!(original, sample());
    }
}
