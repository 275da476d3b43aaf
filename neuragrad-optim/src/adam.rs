use crate::error::{OptimError, Result};
use crate::gd::{expect_support, Method};
use neuragrad_core::nn::Payload;
use neuragrad_core::Dense;

/// Hyper-parameters of [`Adam`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            learning_rate: 0.001,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
        }
    }
}

impl AdamConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(OptimError::InvalidLearningRate(self.learning_rate));
        }
        for (name, value) in [("beta1", self.beta1), ("beta2", self.beta2)] {
            if !(0.0..1.0).contains(&value) {
                return Err(OptimError::InvalidBeta { name, value });
            }
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(OptimError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}

/// Adam (Kingma & Ba, 2014).
///
/// The support payload holds the first moment, the second moment and a `1 x 1`
/// step counter, so every parameter carries its own bias correction.
#[derive(Debug, Clone)]
pub struct Adam {
    config: AdamConfig,
}

impl Adam {
    pub fn new(config: AdamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Adam { config })
    }

    pub fn config(&self) -> &AdamConfig {
        &self.config
    }
}

impl Method for Adam {
    fn label(&self) -> &'static str {
        "adam"
    }

    fn new_support(&self, (rows, cols): (usize, usize)) -> Payload {
        Payload::new(
            self.label(),
            vec![
                Dense::zeros(rows, cols),
                Dense::zeros(rows, cols),
                Dense::new_scalar(0.0),
            ],
        )
    }

    fn delta(&self, grad: &Dense, support: &mut Payload) -> Result<Dense> {
        expect_support(support, &[grad.dims(), grad.dims(), (1, 1)])?;
        let AdamConfig {
            learning_rate: lr,
            beta1: b1,
            beta2: b2,
            epsilon: eps,
        } = self.config;

        let t = support.data[2].data()[0] + 1.0;
        support.data[2].data_mut()[0] = t;
        let alpha = lr * (1.0 - b2.powf(t)).sqrt() / (1.0 - b1.powf(t));

        let (m, rest) = support.data.split_at_mut(1);
        let (m, v) = (&mut m[0], &mut rest[0]);
        let mut delta = grad.zeros_like();
        for (k, d) in delta.data_mut().iter_mut().enumerate() {
            let g = grad.data()[k];
            let mk = &mut m.data_mut()[k];
            *mk = b1 * *mk + (1.0 - b1) * g;
            let vk = &mut v.data_mut()[k];
            *vk = b2 * *vk + (1.0 - b2) * g * g;
            *d = alpha * m.data()[k] / (v.data()[k].sqrt() + eps);
        }
        Ok(delta)
    }
}
