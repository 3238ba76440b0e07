use rand::prelude::*;
use std::fmt;
use std::ops::{AddAssign, MulAssign};

use crate::error::{NetworkError, Result};

/// Dense row-major matrix of `f64`.
///
/// The shape is fixed at construction. Operations that combine two matrices
/// check shapes and return `NetworkError::ShapeMismatch` instead of touching
/// any data.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    pub fn random(rows: usize, cols: usize) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        res.randomize();
        res
    }

    /// Builds a matrix from row vectors. Every row must have the length of the first.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);

        if let Some((row, found)) = data
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(NetworkError::RaggedRows { row, expected: cols, found });
        }

        Ok(Matrix { rows, cols, data })
    }

    /// Column matrix (`values.len()` x 1) holding `values` in order.
    pub fn from_array(values: &[f64]) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&v| vec![v]).collect(),
        }
    }

    /// Flattens the matrix in row-major order.
    pub fn to_array(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[Vec<f64>] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Sets every entry to a uniform sample in [-1, 1) drawn from the thread RNG.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Same as `randomize`, drawing from `rng`.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in self.data.iter_mut() {
            for value in row.iter_mut() {
                *value = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Element-wise `self += other`.
    pub fn add(&mut self, other: &Matrix) -> Result<()> {
        self.check_same_shape("add", other)?;
        self.zip_apply(other, |a, b| a + b);
        Ok(())
    }

    pub fn add_scalar(&mut self, n: f64) {
        self.apply(|x| x + n);
    }

    /// Element-wise (Hadamard) `self *= other`.
    pub fn multiply(&mut self, other: &Matrix) -> Result<()> {
        self.check_same_shape("multiply", other)?;
        self.zip_apply(other, |a, b| a * b);
        Ok(())
    }

    pub fn multiply_scalar(&mut self, n: f64) {
        self.apply(|x| x * n);
    }

    /// Returns `self - other` as a new matrix.
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape("subtract", other)?;
        let mut res = self.clone();
        res.zip_apply(other, |a, b| a - b);
        Ok(res)
    }

    /// Matrix product `self * other`; requires `self.cols() == other.rows()`.
    pub fn product(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(NetworkError::ShapeMismatch {
                op: "multiply matrices",
                left: self.shape(),
                right: other.shape(),
            });
        }

        let mut res = Matrix::zeros(self.rows, other.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * other.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    fn check_same_shape(&self, op: &'static str, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(NetworkError::ShapeMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    fn apply<F: Fn(f64) -> f64>(&mut self, f: F) {
        for value in self.data.iter_mut().flatten() {
            *value = f(*value);
        }
    }

    // Callers must have checked shapes.
    fn zip_apply<F: Fn(f64, f64) -> f64>(&mut self, other: &Matrix, f: F) {
        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (a, &b) in row.iter_mut().zip(other_row.iter()) {
                *a = f(*a, b);
            }
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl AddAssign<f64> for Matrix {
    fn add_assign(&mut self, rhs: f64) {
        self.add_scalar(rhs);
    }
}

impl MulAssign<f64> for Matrix {
    fn mul_assign(&mut self, rhs: f64) {
        self.multiply_scalar(rhs);
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .data
            .iter()
            .map(|row| {
                row.iter()
                    .map(|x| format!("{:<5}", x))
                    .collect::<Vec<_>>()
                    .join(" ")
                    .trim_end()
                    .to_string()
            })
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}
