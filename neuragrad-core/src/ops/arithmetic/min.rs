use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::Dense;

/// Element-wise minimum.
///
/// The gradient flows to the strictly smaller operand; on ties neither operand
/// receives anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

impl Function for Min {
    fn name(&self) -> &'static str {
        "min"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        super::binary_forward(self.name(), xs, f64::min)
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        select_backward(gy, xs, |a, b| a < b);
    }
}

/// Routes `gy[k]` to operand 0 where `wins(x1[k], x2[k])`, to operand 1 where
/// `wins(x2[k], x1[k])`.
pub(crate) fn select_backward(gy: &Dense, xs: &mut Operands<'_>, wins: fn(f64, f64) -> bool) {
    for (i, other) in [(0, 1), (1, 0)] {
        xs.propagate_with(i, |gx, values| {
            let (me, them) = (values[i].data(), values[other].data());
            for (k, g) in gx.data_mut().iter_mut().enumerate() {
                if wins(me[k], them[k]) {
                    *g = gy.data()[k];
                }
            }
        });
    }
}

#[cfg(test)]
#[path = "min_max_test.rs"]
mod tests;
