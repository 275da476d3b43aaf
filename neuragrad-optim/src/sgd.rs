use crate::error::{OptimError, Result};
use crate::gd::{expect_support, Method};
use neuragrad_core::nn::Payload;
use neuragrad_core::Dense;

/// Hyper-parameters of [`Sgd`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdConfig {
    pub learning_rate: f64,
    /// Velocity decay in `[0, 1)`; `0` disables momentum.
    pub momentum: f64,
    pub nesterov: bool,
}

impl Default for SgdConfig {
    fn default() -> Self {
        SgdConfig {
            learning_rate: 0.01,
            momentum: 0.0,
            nesterov: false,
        }
    }
}

impl SgdConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(OptimError::InvalidLearningRate(self.learning_rate));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(OptimError::InvalidMomentum(self.momentum));
        }
        if self.nesterov && self.momentum == 0.0 {
            return Err(OptimError::NesterovWithoutMomentum);
        }
        Ok(())
    }
}

/// Stochastic gradient descent with optional (Nesterov) momentum.
///
/// `v = momentum * v + lr * g`; the delta is `v`, or `momentum * v + lr * g`
/// with Nesterov. The support payload holds `v`.
#[derive(Debug, Clone)]
pub struct Sgd {
    config: SgdConfig,
}

impl Sgd {
    pub fn new(config: SgdConfig) -> Result<Self> {
        config.validate()?;
        Ok(Sgd { config })
    }

    pub fn config(&self) -> &SgdConfig {
        &self.config
    }
}

impl Method for Sgd {
    fn label(&self) -> &'static str {
        "sgd"
    }

    fn new_support(&self, (rows, cols): (usize, usize)) -> Payload {
        Payload::new(self.label(), vec![Dense::zeros(rows, cols)])
    }

    fn delta(&self, grad: &Dense, support: &mut Payload) -> Result<Dense> {
        expect_support(support, &[grad.dims()])?;
        let SgdConfig {
            learning_rate: lr,
            momentum: mu,
            nesterov,
        } = self.config;
        let v = &mut support.data[0];
        let mut delta = grad.zeros_like();
        for ((d, vk), &g) in delta.data_mut().iter_mut().zip(v.data_mut()).zip(grad.data()) {
            *vk = mu * *vk + lr * g;
            *d = if nesterov { mu * *vk + lr * g } else { *vk };
        }
        Ok(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gd::GradientDescent;
    use approx::assert_relative_eq;
    use neuragrad_core::nn::{track_params, Linear};
    use neuragrad_core::Activation;

    #[test]
    fn test_config_validation() {
        assert!(Sgd::new(SgdConfig::default()).is_ok());
        let bad = |c: SgdConfig| Sgd::new(c).unwrap_err();
        assert!(matches!(
            bad(SgdConfig { learning_rate: -1.0, ..Default::default() }),
            OptimError::InvalidLearningRate(_)
        ));
        assert!(matches!(
            bad(SgdConfig { momentum: 1.0, ..Default::default() }),
            OptimError::InvalidMomentum(_)
        ));
        assert!(matches!(
            bad(SgdConfig { nesterov: true, ..Default::default() }),
            OptimError::NesterovWithoutMomentum
        ));
    }

    #[test]
    fn test_plain_step() {
        let sgd = Sgd::new(SgdConfig { learning_rate: 0.1, ..Default::default() }).unwrap();
        let grad = Dense::new_vec(vec![10.0, -20.0]);
        let mut support = sgd.new_support(grad.dims());
        let delta = sgd.delta(&grad, &mut support).unwrap();
        assert_eq!(delta.data(), &[1.0, -2.0]);
    }

    #[test]
    fn test_momentum_accumulates() {
        let sgd = Sgd::new(SgdConfig {
            learning_rate: 0.1,
            momentum: 0.9,
            nesterov: false,
        })
        .unwrap();
        let grad = Dense::new_scalar(1.0);
        let mut support = sgd.new_support((1, 1));
        sgd.delta(&grad, &mut support).unwrap();
        let second = sgd.delta(&grad, &mut support).unwrap();
        // v1 = 0.1, v2 = 0.9 * 0.1 + 0.1
        assert_relative_eq!(second.data()[0], 0.19, epsilon = 1e-12);

        let nesterov = Sgd::new(SgdConfig {
            learning_rate: 0.1,
            momentum: 0.9,
            nesterov: true,
        })
        .unwrap();
        let mut support = nesterov.new_support((1, 1));
        let first = nesterov.delta(&grad, &mut support).unwrap();
        assert_relative_eq!(first.data()[0], 0.19, epsilon = 1e-12);
    }

    #[test]
    fn test_malformed_support() {
        let sgd = Sgd::new(SgdConfig::default()).unwrap();
        let mut support = sgd.new_support((3, 1));
        let err = sgd.delta(&Dense::zeros(2, 1), &mut support).unwrap_err();
        assert!(matches!(err, OptimError::MalformedSupport { .. }));
    }

    #[test]
    fn test_descends_on_model() {
        let model = Linear::new(2, 1, Activation::Identity);
        let mut gd = GradientDescent::new(
            Sgd::new(SgdConfig { learning_rate: 0.1, ..Default::default() }).unwrap(),
        );
        track_params(&model, &mut gd);
        model.w.accumulate_grad(&Dense::new(1, 2, vec![1.0, -2.0]).unwrap());
        assert_eq!(gd.step().unwrap(), 1);
        let w = model.w.value();
        assert_relative_eq!(w.data()[0], -0.1);
        assert_relative_eq!(w.data()[1], 0.2);
    }
}
