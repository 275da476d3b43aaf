use crate::autograd::function::expect_arity;
use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::Dense;

/// Matrix transpose. Turns a column vector into a row vector and back.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transpose;

impl Function for Transpose {
    fn name(&self) -> &'static str {
        "t"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        expect_arity(self.name(), xs, 1)?;
        Ok(xs[0].t())
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        xs.propagate_with(0, |gx, _| {
            let (rows, cols) = gx.dims();
            let out = gx.data_mut();
            for i in 0..rows {
                for j in 0..cols {
                    out[i * cols + j] = gy.at(j, i);
                }
            }
        });
    }
}
