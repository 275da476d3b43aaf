//! Gradient descent optimizers for `neuragrad-core` models.
//!
//! [`GradientDescent`] implements the core [`Tracker`](neuragrad_core::nn::Tracker)
//! trait: register a model with [`neuragrad_core::nn::track_params`], run
//! forward/backward passes, then call [`GradientDescent::step`]. The update
//! rule is a [`Method`]: [`Sgd`] or [`Adam`]. Per-parameter optimizer state is
//! kept in the parameter's support payload.

pub mod adam;
pub mod error;
pub mod gd;
pub mod sgd;

pub use adam::{Adam, AdamConfig};
pub use error::OptimError;
pub use gd::{GradientDescent, Method};
pub use sgd::{Sgd, SgdConfig};
