use serde::{Serialize, Deserialize};
use std::ops::{Add, Mul};

/// Dense row-major matrix used for the weights and activations of the
/// feed-forward backend. Stored as nested rows so model files stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Wraps a single vector as a 1×n row matrix.
    pub fn row(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: vec![values],
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let cols = data.first().map_or(0, |r| r.len());
        Matrix {
            rows: data.len(),
            cols,
            data
        }
    }

    /// True when `rows`/`cols` agree with the stored data. Model files are
    /// hand-editable, so this is checked on load rather than trusted.
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|r| r.len() == self.cols)
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix::from_data(
            self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect()
        )
    }

    /// Consumes a 1×n matrix and returns its only row.
    pub fn into_row(self) -> Vec<f64> {
        self.data.into_iter().next().unwrap_or_default()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Add<&Matrix> for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul<&Matrix> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        // i-k-j order walks both operands row-wise, which matters for the
        // very wide first layer of an image model.
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i][k];
                if a == 0.0 {
                    continue;
                }
                for j in 0..rhs.cols {
                    res.data[i][j] += a * rhs.data[k][j];
                }
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_times_matrix() {
        let x = Matrix::row(vec![1.0, 2.0]);
        let w = Matrix::from_data(vec![vec![1.0, 0.0, 2.0], vec![0.5, 1.0, -1.0]]);
        let out = &x * &w;
        assert_eq!(out.rows, 1);
        assert_eq!(out.into_row(), vec![2.0, 2.0, 0.0]);
    }

    #[test]
    fn add_and_map() {
        let a = Matrix::row(vec![1.0, -1.0]);
        let b = Matrix::row(vec![0.5, 0.5]);
        let sum = (&a + &b).map(|v| v * 2.0);
        assert_eq!(sum.data, vec![vec![3.0, -1.0]]);
    }

    #[test]
    #[should_panic(expected = "incorrect sizes")]
    fn mul_rejects_mismatched_shapes() {
        let _ = &Matrix::zeros(1, 3) * &Matrix::zeros(2, 2);
    }

    #[test]
    fn detects_ragged_data() {
        let mut m = Matrix::zeros(2, 2);
        assert!(m.is_consistent());
        m.data[1].push(1.0);
        assert!(!m.is_consistent());
    }
}
