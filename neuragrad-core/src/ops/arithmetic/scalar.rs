use crate::autograd::function::{expect_arity, expect_scalar};
use crate::autograd::{Function, Operands};
use crate::error::Result;
use crate::mat::Dense;

// --- AddScalar ---

/// `y = x1 + s`, where `s` is a `1 x 1` operand.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddScalar;

impl Function for AddScalar {
    fn name(&self) -> &'static str {
        "add_scalar"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        expect_arity(self.name(), xs, 2)?;
        let s = expect_scalar(self.name(), xs[1])?;
        Ok(xs[0].add_scalar(s))
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        xs.propagate_with(0, |gx, _| gx.data_mut().copy_from_slice(gy.data()));
        xs.propagate_with(1, |gs, _| gs.data_mut()[0] = gy.sum());
    }
}

// --- SubScalar ---

/// `y = x1 - s`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubScalar;

impl Function for SubScalar {
    fn name(&self) -> &'static str {
        "sub_scalar"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        expect_arity(self.name(), xs, 2)?;
        let s = expect_scalar(self.name(), xs[1])?;
        Ok(xs[0].add_scalar(-s))
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        xs.propagate_with(0, |gx, _| gx.data_mut().copy_from_slice(gy.data()));
        xs.propagate_with(1, |gs, _| gs.data_mut()[0] = -gy.sum());
    }
}

// --- ProdScalar ---

/// `y = x1 * s`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProdScalar;

impl Function for ProdScalar {
    fn name(&self) -> &'static str {
        "prod_scalar"
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        expect_arity(self.name(), xs, 2)?;
        let s = expect_scalar(self.name(), xs[1])?;
        Ok(xs[0].prod_scalar(s))
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        xs.propagate_with(0, |gx, values| {
            let s = values[1].data()[0];
            for (g, &dy) in gx.data_mut().iter_mut().zip(gy.data()) {
                *g = dy * s;
            }
        });
        xs.propagate_with(1, |gs, values| {
            gs.data_mut()[0] = gy
                .data()
                .iter()
                .zip(values[0].data())
                .map(|(dy, x)| dy * x)
                .sum();
        });
    }
}

#[cfg(test)]
#[path = "scalar_test.rs"]
mod tests;
