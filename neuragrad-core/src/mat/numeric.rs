use num_traits::{Float, NumAssignOps};
use std::fmt::Debug;

/// A trait representing the floating-point types usable by the element kernels.
///
/// The dense container stores `f64`, but the kernels below are written against
/// this bound so they can be reused on `f32` slices as well.
pub trait Numeric: Float + NumAssignOps + Debug + Send + Sync + 'static {}

impl Numeric for f32 {}
impl Numeric for f64 {}

/// Numerically stable softmax: `exp(x_i - max) / Σ exp(x_j - max)`.
pub fn stable_softmax<T: Numeric>(xs: &[T]) -> Vec<T> {
    let max = xs.iter().copied().fold(T::neg_infinity(), T::max);
    let mut out: Vec<T> = xs.iter().map(|&x| (x - max).exp()).collect();
    let sum = out.iter().copied().fold(T::zero(), |acc, x| acc + x);
    for y in out.iter_mut() {
        *y /= sum;
    }
    out
}

/// Exponential linear unit.
#[inline]
pub fn elu<T: Numeric>(x: T, alpha: T) -> T {
    if x > T::zero() {
        x
    } else {
        alpha * (x.exp() - T::one())
    }
}

/// Derivative of [`elu`] with respect to its input.
#[inline]
pub fn elu_deriv<T: Numeric>(x: T, alpha: T) -> T {
    if x > T::zero() {
        T::one()
    } else {
        alpha * x.exp()
    }
}

#[inline]
pub fn sigmoid<T: Numeric>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stable_softmax_sums_to_one() {
        let probs = stable_softmax(&[1000.0f64, 1001.0, 1002.0]);
        let sum: f64 = probs.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn test_stable_softmax_f32() {
        let probs = stable_softmax(&[0.0f32, 0.0]);
        assert_relative_eq!(probs[0], 0.5f32, epsilon = 1e-6);
    }

    #[test]
    fn test_elu_and_deriv() {
        assert_eq!(elu(2.0f64, 1.0), 2.0);
        assert_relative_eq!(elu(-1.0f64, 1.0), (-1.0f64).exp() - 1.0);
        assert_eq!(elu_deriv(3.0f64, 1.0), 1.0);
        assert_relative_eq!(elu_deriv(-2.0f64, 0.5), 0.5 * (-2.0f64).exp());
    }

    #[test]
    fn test_sigmoid_midpoint() {
        assert_relative_eq!(sigmoid(0.0f64), 0.5);
    }
}
