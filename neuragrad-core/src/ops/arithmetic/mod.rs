//! Element-wise arithmetic operators.
//!
//! Binary operators accept operands with identical dimensions or two vectors of
//! the same size; the output takes the shape of the first operand. The
//! `*Scalar` operators take a `1 x 1` matrix as second operand.

pub mod add;
pub mod div;
pub mod div_scalar;
pub mod max;
pub mod min;
pub mod prod;
pub mod scalar;
pub mod sub;

pub use add::Add;
pub use div::Div;
pub use div_scalar::DivScalar;
pub use max::Max;
pub use min::Min;
pub use prod::Prod;
pub use scalar::{AddScalar, ProdScalar, SubScalar};
pub use sub::Sub;

use crate::autograd::function::expect_arity;
use crate::error::Result;
use crate::mat::Dense;

/// Forward helper shared by the binary element-wise operators.
pub(crate) fn binary_forward(
    operation: &str,
    xs: &[&Dense],
    kernel: impl Fn(f64, f64) -> f64,
) -> Result<Dense> {
    expect_arity(operation, xs, 2)?;
    let (x1, x2) = (xs[0], xs[1]);
    x1.check_compatible(x2, operation)?;
    let data = x1
        .data()
        .iter()
        .zip(x2.data().iter())
        .map(|(&a, &b)| kernel(a, b))
        .collect();
    Dense::new(x1.rows(), x1.cols(), data)
}

#[cfg(test)]
#[path = "elementwise_test.rs"]
mod elementwise_tests;
