//! Parameter initialization.
//!
//! Every initializer overwrites the value of a [`Param`] in place. Passing a
//! seeded RNG (e.g. `StdRng::seed_from_u64`) makes initialization reproducible.

use super::param::Param;
use crate::error::{NeuraGradError, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

/// Fills `param` with `value`.
pub fn constant(param: &Param, value: f64) {
    param.write_data().value.fill(value);
}

/// Samples every element uniformly from `[low, high)`.
///
/// # Errors
/// Returns `NeuraGradError::InvalidConfig` unless `low < high` with a finite range.
pub fn uniform<R: Rng + ?Sized>(param: &Param, low: f64, high: f64, rng: &mut R) -> Result<()> {
    if !(low < high && (high - low).is_finite()) {
        return Err(NeuraGradError::InvalidConfig(format!(
            "uniform init needs low < high, got [{}, {})",
            low, high
        )));
    }
    let dist = Uniform::new(low, high);
    fill_from(param, &dist, rng);
    Ok(())
}

/// Samples every element from `N(mean, std²)`.
///
/// # Errors
/// Returns `NeuraGradError::InvalidConfig` if `std` is negative or not finite.
pub fn normal<R: Rng + ?Sized>(param: &Param, mean: f64, std: f64, rng: &mut R) -> Result<()> {
    let dist = Normal::new(mean, std)
        .map_err(|e| NeuraGradError::InvalidConfig(format!("normal init: {}", e)))?;
    fill_from(param, &dist, rng);
    Ok(())
}

/// Glorot/Xavier uniform initialization: `U(-a, a)` with
/// `a = gain * sqrt(6 / (fan_in + fan_out))`, where `fan_in` is the number of
/// columns and `fan_out` the number of rows. An empty parameter is left as is.
pub fn xavier_uniform<R: Rng + ?Sized>(param: &Param, gain: f64, rng: &mut R) -> Result<()> {
    let (fan_out, fan_in) = param.dims();
    if fan_in + fan_out == 0 {
        return Ok(());
    }
    let a = gain * (6.0 / (fan_in + fan_out) as f64).sqrt();
    if a == 0.0 {
        constant(param, 0.0);
        return Ok(());
    }
    uniform(param, -a, a, rng)
}

fn fill_from<D, R>(param: &Param, dist: &D, rng: &mut R)
where
    D: Distribution<f64>,
    R: Rng + ?Sized,
{
    let mut data = param.write_data();
    for x in data.value.data_mut() {
        *x = dist.sample(rng);
    }
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
