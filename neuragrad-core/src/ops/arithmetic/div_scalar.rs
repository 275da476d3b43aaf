use crate::autograd::function::{expect_arity, expect_scalar};
use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::Dense;

/// `y = x1 * (1 / s)`.
///
/// Only `x1` is differentiated: the divisor never receives a gradient, so it is
/// meant to be a constant (e.g. from [`Graph::new_scalar`](crate::autograd::Graph::new_scalar)).
#[derive(Debug, Clone, Copy, Default)]
pub struct DivScalar;

impl Function for DivScalar {
    fn name(&self) -> &'static str {
        "div_scalar"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        expect_arity(self.name(), xs, 2)?;
        let s = expect_scalar(self.name(), xs[1])?;
        Ok(xs[0].prod_scalar(1.0 / s))
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        xs.propagate_with(0, |gx, values| {
            let inv = 1.0 / values[1].data()[0];
            for (g, &dy) in gx.data_mut().iter_mut().zip(gy.data()) {
                *g = dy * inv;
            }
        });
    }
}
