use neuragrad_core::NeuraGradError;
use thiserror::Error;

/// Errors raised by the optimizers.
#[derive(Error, Debug)]
pub enum OptimError {
    #[error("Invalid learning rate {0}: must be finite and non-negative")]
    InvalidLearningRate(f64),

    #[error("Invalid momentum {0}: must be in [0, 1)")]
    InvalidMomentum(f64),

    #[error("Invalid {name} {value}: must be in [0, 1)")]
    InvalidBeta { name: &'static str, value: f64 },

    #[error("Invalid epsilon {0}: must be finite and greater than zero")]
    InvalidEpsilon(f64),

    #[error("Nesterov momentum requires a momentum greater than zero")]
    NesterovWithoutMomentum,

    #[error("Support payload '{label}' is malformed for parameter {param:?}")]
    MalformedSupport { label: String, param: Option<String> },

    #[error(transparent)]
    Core(#[from] NeuraGradError),
}

pub type Result<T> = std::result::Result<T, OptimError>;
