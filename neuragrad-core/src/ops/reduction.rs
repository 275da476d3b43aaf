use crate::autograd::function::expect_arity;
use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::Dense;

/// Sum of all the elements, as a `1 x 1` matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReduceSum;

impl Function for ReduceSum {
    fn name(&self) -> &'static str {
        "reduce_sum"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        expect_arity(self.name(), xs, 1)?;
        Ok(Dense::new_scalar(xs[0].sum()))
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        let g = gy.data()[0];
        xs.propagate_with(0, |gx, _| gx.fill(g));
    }
}
