use crate::autograd::function::expect_arity;
use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::Dense;

fn row(x: &Dense, i: usize) -> &[f64] {
    let cols = x.cols();
    &x.data()[i * cols..(i + 1) * cols]
}

/// Matrix product `y = x1 · x2`.
///
/// With `x1: m x k` and `x2: k x n` the output is `m x n`. A matrix times a
/// column vector is the usual way to apply a weight matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mul;

impl Function for Mul {
    fn name(&self) -> &'static str {
        "mul"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        expect_arity(self.name(), xs, 2)?;
        xs[0].mul(xs[1])
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        let (m, n) = gy.dims();

        // grad(x1) = gy · x2^T
        xs.propagate_with(0, |gx, values| {
            let x2 = values[1];
            let k = x2.rows();
            let out = gx.data_mut();
            for i in 0..m {
                let g = row(gy, i);
                for (p, o) in out[i * k..(i + 1) * k].iter_mut().enumerate() {
                    let b = row(x2, p);
                    *o = g.iter().zip(b).map(|(&u, &v)| u * v).sum();
                }
            }
        });

        // grad(x2) = x1^T · gy
        xs.propagate_with(1, |gx, values| {
            let x1 = values[0];
            let k = x1.cols();
            let out = gx.data_mut();
            for i in 0..m {
                let g = row(gy, i);
                for (p, &a) in row(x1, i).iter().enumerate() {
                    if a == 0.0 {
                        continue;
                    }
                    for (o, &v) in out[p * n..(p + 1) * n].iter_mut().zip(g) {
                        *o += a * v;
                    }
                }
            }
        });
    }
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
