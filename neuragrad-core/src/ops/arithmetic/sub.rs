use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::Dense;

/// Element-wise subtraction: `y = x1 - x2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sub;

impl Function for Sub {
    fn name(&self) -> &'static str {
        "sub"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        super::binary_forward(self.name(), xs, |a, b| a - b)
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        xs.propagate_with(0, |gx, _| gx.data_mut().copy_from_slice(gy.data()));
        xs.propagate_with(1, |gx, _| {
            for (g, &dy) in gx.data_mut().iter_mut().zip(gy.data().iter()) {
                *g = -dy;
            }
        });
    }
}
