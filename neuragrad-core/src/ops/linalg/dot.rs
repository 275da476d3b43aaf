use crate::autograd::function::expect_arity;
use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::Dense;

/// Dot product of two compatible operands, producing a `1 x 1` matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dot;

impl Function for Dot {
    fn name(&self) -> &'static str {
        "dot"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        expect_arity(self.name(), xs, 2)?;
        Ok(Dense::new_scalar(xs[0].dot(xs[1])?))
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        let g = gy.data()[0];
        for (i, other) in [(0, 1), (1, 0)] {
            xs.propagate_with(i, |gx, values| {
                for (d, &v) in gx.data_mut().iter_mut().zip(values[other].data()) {
                    *d = g * v;
                }
            });
        }
    }
}
