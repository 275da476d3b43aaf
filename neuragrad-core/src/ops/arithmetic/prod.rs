use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::Dense;

/// Element-wise (Hadamard) product: `y = x1 ⊙ x2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prod;

impl Function for Prod {
    fn name(&self) -> &'static str {
        "prod"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        super::binary_forward(self.name(), xs, |a, b| a * b)
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        // dx1 = gy ⊙ x2, dx2 = gy ⊙ x1
        for (i, other) in [(0, 1), (1, 0)] {
            xs.propagate_with(i, |gx, values| {
                let o = values[other].data();
                for ((g, &dy), &v) in gx.data_mut().iter_mut().zip(gy.data()).zip(o) {
                    *g = dy * v;
                }
            });
        }
    }
}
