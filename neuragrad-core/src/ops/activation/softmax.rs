use crate::autograd::function::expect_arity;
use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::numeric::stable_softmax;
use crate::mat::Dense;

/// Softmax over all the elements of the operand (normally a vector).
#[derive(Debug, Clone, Copy, Default)]
pub struct Softmax;

impl Function for Softmax {
    fn name(&self) -> &'static str {
        "softmax"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        expect_arity(self.name(), xs, 1)?;
        let x = xs[0];
        Dense::new(x.rows(), x.cols(), stable_softmax(x.data()))
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        // gx = y ⊙ (gy - Σ gy ⊙ y)
        xs.propagate_with(0, |gx, values| {
            let y = stable_softmax(values[0].data());
            let s: f64 = gy.data().iter().zip(y.iter()).map(|(a, b)| a * b).sum();
            for ((g, &dy), &yk) in gx.data_mut().iter_mut().zip(gy.data()).zip(y.iter()) {
                *g = yk * (dy - s);
            }
        });
    }
}
