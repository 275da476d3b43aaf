// src/mat/arithmetic.rs

use super::Dense;
use crate::error::{NeuraGradError, Result};

// --- Element-wise helpers ---

fn zip_with(a: &Dense, b: &Dense, operation: &str, f: impl Fn(f64, f64) -> f64) -> Result<Dense> {
    a.check_compatible(b, operation)?;
    let data = a
        .data()
        .iter()
        .zip(b.data().iter())
        .map(|(&x, &y)| f(x, y))
        .collect();
    Dense::new(a.rows(), a.cols(), data)
}

impl Dense {
    /// Returns a new matrix with `f` applied to every element.
    pub fn apply(&self, f: impl Fn(f64) -> f64) -> Dense {
        Dense {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    pub fn prod_scalar(&self, k: f64) -> Dense {
        self.apply(|x| x * k)
    }

    pub fn add_scalar(&self, k: f64) -> Dense {
        self.apply(|x| x + k)
    }

    pub fn add(&self, other: &Dense) -> Result<Dense> {
        zip_with(self, other, "add", |x, y| x + y)
    }

    pub fn sub(&self, other: &Dense) -> Result<Dense> {
        zip_with(self, other, "sub", |x, y| x - y)
    }

    /// Element-wise (Hadamard) product.
    pub fn prod(&self, other: &Dense) -> Result<Dense> {
        zip_with(self, other, "prod", |x, y| x * y)
    }

    /// Element-wise division.
    pub fn div(&self, other: &Dense) -> Result<Dense> {
        zip_with(self, other, "div", |x, y| x / y)
    }

    pub fn minimum(&self, other: &Dense) -> Result<Dense> {
        zip_with(self, other, "minimum", f64::min)
    }

    pub fn maximum(&self, other: &Dense) -> Result<Dense> {
        zip_with(self, other, "maximum", f64::max)
    }

    /// Matrix product `self · other`.
    ///
    /// # Errors
    /// Returns `NeuraGradError::IncompatibleShapes` if `self.cols() != other.rows()`.
    pub fn mul(&self, other: &Dense) -> Result<Dense> {
        if self.cols != other.rows {
            return Err(NeuraGradError::IncompatibleShapes {
                shape1: self.dims(),
                shape2: other.dims(),
                operation: "mul".to_string(),
            });
        }
        let (m, k, n) = (self.rows, self.cols, other.cols);
        let mut out = vec![0.0; m * n];
        for i in 0..m {
            for p in 0..k {
                let a = self.data[i * k + p];
                if a == 0.0 {
                    continue;
                }
                let b_row = &other.data[p * n..(p + 1) * n];
                let out_row = &mut out[i * n..(i + 1) * n];
                for (o, &b) in out_row.iter_mut().zip(b_row.iter()) {
                    *o += a * b;
                }
            }
        }
        Dense::new(m, n, out)
    }

    /// Sum of the element-wise products of two compatible matrices.
    pub fn dot(&self, other: &Dense) -> Result<f64> {
        self.check_compatible(other, "dot")?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&x, &y)| x * y)
            .sum())
    }

    /// Transpose.
    pub fn t(&self) -> Dense {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j]);
            }
        }
        Dense {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Largest element (`-inf` for an empty matrix).
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    // --- In-place variants ---

    pub fn add_in_place(&mut self, other: &Dense) -> Result<()> {
        self.check_compatible(other, "add_in_place")?;
        for (x, &y) in self.data.iter_mut().zip(other.data.iter()) {
            *x += y;
        }
        Ok(())
    }

    pub fn sub_in_place(&mut self, other: &Dense) -> Result<()> {
        self.check_compatible(other, "sub_in_place")?;
        for (x, &y) in self.data.iter_mut().zip(other.data.iter()) {
            *x -= y;
        }
        Ok(())
    }

    pub fn prod_scalar_in_place(&mut self, k: f64) {
        for x in self.data.iter_mut() {
            *x *= k;
        }
    }
}

#[cfg(test)]
#[path = "arithmetic_test.rs"]
mod tests;
