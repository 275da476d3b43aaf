use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::Dense;

/// Element-wise maximum. Ties propagate to neither operand, as for [`super::Min`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

impl Function for Max {
    fn name(&self) -> &'static str {
        "max"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        super::binary_forward(self.name(), xs, f64::max)
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        super::min::select_backward(gy, xs, |a, b| a > b);
    }
}
