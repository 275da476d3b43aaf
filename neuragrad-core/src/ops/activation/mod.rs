//! Activation functions.
//!
//! Every element-wise activation is a variant of the closed [`Activation`]
//! enum and is evaluated by the single [`Unary`] operator. Models store an
//! `Activation` value and the graph dispatches through one exhaustive match.

pub mod softmax;

pub use softmax::Softmax;

use crate::autograd::function::expect_arity;
use crate::autograd::{Function, Operands};
use crate::error::{NeuraGradError, Result};
use crate::mat::numeric::{elu, elu_deriv, sigmoid};
use crate::mat::Dense;
use std::fmt;
use std::str::FromStr;

/// Element-wise activation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Activation {
    #[default]
    Identity,
    Tanh,
    Sigmoid,
    ReLU,
    /// ELU with the given `alpha`.
    Elu(f64),
    /// `ELU(x, 1) + 1`, strictly positive. Default feature map of linear attention.
    PositiveElu,
    Exp,
    Log,
    Neg,
    Abs,
    /// `x / (1 + |x|)`.
    Softsign,
}

impl Activation {
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Identity => "identity",
            Activation::Tanh => "tanh",
            Activation::Sigmoid => "sigmoid",
            Activation::ReLU => "relu",
            Activation::Elu(_) => "elu",
            Activation::PositiveElu => "positive_elu",
            Activation::Exp => "exp",
            Activation::Log => "log",
            Activation::Neg => "neg",
            Activation::Abs => "abs",
            Activation::Softsign => "softsign",
        }
    }

    /// Evaluates the activation at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            Activation::Identity => x,
            Activation::Tanh => x.tanh(),
            Activation::Sigmoid => sigmoid(x),
            Activation::ReLU => x.max(0.0),
            Activation::Elu(alpha) => elu(x, alpha),
            Activation::PositiveElu => elu(x, 1.0) + 1.0,
            Activation::Exp => x.exp(),
            Activation::Log => x.ln(),
            Activation::Neg => -x,
            Activation::Abs => x.abs(),
            Activation::Softsign => x / (1.0 + x.abs()),
        }
    }

    /// Derivative at `x`, given the already computed output `y = eval(x)`.
    pub fn derivative(&self, x: f64, y: f64) -> f64 {
        match *self {
            Activation::Identity => 1.0,
            Activation::Tanh => 1.0 - y * y,
            Activation::Sigmoid => y * (1.0 - y),
            Activation::ReLU => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Elu(alpha) => elu_deriv(x, alpha),
            Activation::PositiveElu => elu_deriv(x, 1.0),
            Activation::Exp => y,
            Activation::Log => 1.0 / x,
            Activation::Neg => -1.0,
            Activation::Abs => {
                if x > 0.0 {
                    1.0
                } else if x < 0.0 {
                    -1.0
                } else {
                    0.0
                }
            }
            Activation::Softsign => {
                let d = 1.0 + x.abs();
                1.0 / (d * d)
            }
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Elu(alpha) => write!(f, "elu({})", alpha),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Activation {
    type Err = NeuraGradError;

    /// Parses the names produced by [`Activation::name`]; `elu` uses `alpha = 1`.
    fn from_str(s: &str) -> Result<Self> {
        let activation = match s.to_ascii_lowercase().as_str() {
            "identity" => Activation::Identity,
            "tanh" => Activation::Tanh,
            "sigmoid" => Activation::Sigmoid,
            "relu" => Activation::ReLU,
            "elu" => Activation::Elu(1.0),
            "positive_elu" => Activation::PositiveElu,
            "exp" => Activation::Exp,
            "log" => Activation::Log,
            "neg" => Activation::Neg,
            "abs" => Activation::Abs,
            "softsign" => Activation::Softsign,
            other => {
                return Err(NeuraGradError::InvalidConfig(format!(
                    "unknown activation '{}'",
                    other
                )))
            }
        };
        Ok(activation)
    }
}

/// Applies an [`Activation`] element-wise.
#[derive(Debug, Clone, Copy)]
pub struct Unary(pub Activation);

impl Function for Unary {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn forward(&self, xs: &[&Dense]) -> Result<Dense> {
        expect_arity(self.name(), xs, 1)?;
        let act = self.0;
        Ok(xs[0].apply(|x| act.eval(x)))
    }

    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>) {
        let act = self.0;
        xs.propagate_with(0, |gx, values| {
            let x = values[0].data();
            for (k, g) in gx.data_mut().iter_mut().enumerate() {
                *g = gy.data()[k] * act.derivative(x[k], act.eval(x[k]));
            }
        });
    }
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
