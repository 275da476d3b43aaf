//! # Dense Matrix Module (`mat`)
//!
//! The numeric container consumed by the graph and the operators.
//!
//! - [`Dense`]: a row-major `f64` matrix. Vectors are column matrices (`n x 1`),
//!   scalars are `1 x 1` matrices.
//! - [`arithmetic`]: element-wise and linear-algebra methods on `Dense`.
//! - [`serialize`]: the self-describing binary stream format.
//! - [`pool`]: the explicit scratch-buffer pool owned by each graph.
//! - [`numeric`]: generic element kernels bounded on `num_traits::Float`.

pub mod arithmetic;
pub mod numeric;
pub mod pool;
pub mod serialize;

use crate::error::{NeuraGradError, Result};

pub use pool::{MatrixPool, PoolStats};

/// A dense, row-major matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Dense {
    /// Creates a new matrix from row-major data.
    ///
    /// # Errors
    /// Returns `NeuraGradError::MatrixCreationError` if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(NeuraGradError::MatrixCreationError {
                data_len: data.len(),
                rows,
                cols,
            });
        }
        Ok(Dense { rows, cols, data })
    }

    /// Creates a column vector holding `data`.
    pub fn new_vec(data: Vec<f64>) -> Self {
        Dense {
            rows: data.len(),
            cols: 1,
            data,
        }
    }

    /// Creates a `1 x 1` matrix.
    pub fn new_scalar(value: f64) -> Self {
        Dense {
            rows: 1,
            cols: 1,
            data: vec![value],
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::full(rows, cols, 0.0)
    }

    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::full(rows, cols, 1.0)
    }

    pub fn full(rows: usize, cols: usize, value: f64) -> Self {
        Dense {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Zero-initialized matrix with the same shape as `self`.
    pub fn zeros_like(&self) -> Self {
        Self::zeros(self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_vector(&self) -> bool {
        self.cols == 1 || self.rows == 1
    }

    pub fn is_scalar(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    /// Returns the single value of a `1 x 1` matrix.
    ///
    /// # Errors
    /// Returns `NeuraGradError::NotScalar` for any other shape.
    pub fn scalar(&self) -> Result<f64> {
        if !self.is_scalar() {
            return Err(NeuraGradError::NotScalar {
                shape: self.dims(),
                operation: "scalar".to_string(),
            });
        }
        Ok(self.data[0])
    }

    /// Row-major raw elements.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Element at row `i`, column `j`. Panics when out of bounds.
    pub fn at(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.rows && j < self.cols,
            "Index ({}, {}) is out of bounds for shape ({}, {})",
            i,
            j,
            self.rows,
            self.cols
        );
        self.data[i * self.cols + j]
    }

    /// Element at linear index `i`.
    pub fn at_vec(&self, i: usize) -> Result<f64> {
        self.data
            .get(i)
            .copied()
            .ok_or(NeuraGradError::IndexOutOfBounds {
                index: i,
                len: self.data.len(),
            })
    }

    /// Copy of row `i` as a column vector.
    pub fn row(&self, i: usize) -> Result<Dense> {
        if i >= self.rows {
            return Err(NeuraGradError::IndexOutOfBounds {
                index: i,
                len: self.rows,
            });
        }
        let start = i * self.cols;
        Ok(Dense::new_vec(self.data[start..start + self.cols].to_vec()))
    }

    pub fn same_dims(&self, other: &Dense) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Both matrices are vectors (row or column) holding the same number of elements.
    pub fn vectors_of_same_size(&self, other: &Dense) -> bool {
        self.is_vector() && other.is_vector() && self.size() == other.size()
    }

    /// Shape compatibility accepted by element-wise operators.
    pub fn compatible(&self, other: &Dense) -> bool {
        self.same_dims(other) || self.vectors_of_same_size(other)
    }

    pub(crate) fn check_compatible(&self, other: &Dense, operation: &str) -> Result<()> {
        if !self.compatible(other) {
            return Err(NeuraGradError::IncompatibleShapes {
                shape1: self.dims(),
                shape2: other.dims(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }
}

#[cfg(test)]
#[path = "dense_test.rs"]
mod tests;
