//! Structural operators combining several vectors.

use crate::autograd::{Function, Operands};
use crate::error::{NeuraGradError, Result};
use crate::mat::Dense;

/// Checks that `xs` is a non-empty list of vectors, all of one size if `equal_sizes`.
fn expect_vectors(operation: &str, xs: &[&Dense], equal_sizes: bool) -> Result<()> {
    let Some(first) = xs.first() else {
        return Err(NeuraGradError::ArityMismatch {
            operation: operation.to_string(),
            expected: 1,
            actual: 0,
        });
    };
    for x in xs {
        if !x.is_vector() {
            return Err(NeuraGradError::ShapeMismatch {
                expected: (x.size(), 1),
                actual: x.dims(),
                operation: operation.to_string(),
            });
        }
        if equal_sizes && x.size() != first.size() {
            return Err(NeuraGradError::IncompatibleShapes {
                shape1: first.dims(),
                shape2: x.dims(),
                operation: operation.to_string(),
            });
        }
    }
    Ok(())
}

// --- Stack ---

/// Stacks `n` vectors of size `d` as the rows of an `n x d` matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stack;

impl Function for Stack {
    fn name(&self) -> &'static str {
        "stack"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        expect_vectors(self.name(), xs, true)?;
        let cols = xs[0].size();
        let data = xs.iter().flat_map(|x| x.data().iter().copied()).collect();
        Dense::new(xs.len(), cols, data)
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        let cols = gy.cols();
        for i in 0..xs.len() {
            xs.propagate_with(i, |gx, _| {
                gx.data_mut()
                    .copy_from_slice(&gy.data()[i * cols..(i + 1) * cols]);
            });
        }
    }
}

// --- Concat ---

/// Concatenates vectors into one column vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct Concat;

impl Function for Concat {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        expect_vectors(self.name(), xs, false)?;
        Ok(Dense::new_vec(
            xs.iter().flat_map(|x| x.data().iter().copied()).collect(),
        ))
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        let mut offset = 0;
        for i in 0..xs.len() {
            let n = xs.value(i).size();
            xs.propagate_with(i, |gx, _| {
                gx.data_mut().copy_from_slice(&gy.data()[offset..offset + n]);
            });
            offset += n;
        }
    }
}

#[cfg(test)]
#[path = "shape_test.rs"]
mod tests;
