use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::Dense;

/// Element-wise addition: `y = x1 + x2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Add;

impl Function for Add {
    fn name(&self) -> &'static str {
        "add"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        super::binary_forward(self.name(), xs, |a, b| a + b)
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        for i in 0..2 {
            xs.propagate_with(i, |gx, _| gx.data_mut().copy_from_slice(gy.data()));
        }
    }
}
