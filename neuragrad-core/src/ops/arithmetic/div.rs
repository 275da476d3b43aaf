use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::Dense;

/// Element-wise division: `y = x1 / x2`.
///
/// No zero check is performed; dividing by zero follows IEEE-754 semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Div;

impl Function for Div {
    fn name(&self) -> &'static str {
        "div"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        super::binary_forward(self.name(), xs, |a, b| a / b)
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        // grad(x1) = gy / x2
        // grad(x2) = -gy * x1 / x2^2
        xs.propagate_with(0, |gx, values| {
            let x2 = values[1].data();
            for ((g, &dy), &b) in gx.data_mut().iter_mut().zip(gy.data()).zip(x2) {
                *g = dy / b;
            }
        });
        xs.propagate_with(1, |gx, values| {
            let (x1, x2) = (values[0].data(), values[1].data());
            for (k, g) in gx.data_mut().iter_mut().enumerate() {
                *g = -gy.data()[k] * x1[k] / (x2[k] * x2[k]);
            }
        });
    }
}
