//! # neuragrad-core
//!
//! Reverse-mode automatic differentiation over dense `f64` matrices.
//!
//! - [`mat`]: the [`Dense`] container, its binary format and scratch pool.
//! - [`autograd`]: the computational [`Graph`], the [`Function`] operator
//!   contract and a finite-difference gradient checker.
//! - [`ops`]: the primitive operators and the graph convenience builders.
//! - [`attention`]: scaled dot-product and linear attention.
//! - [`nn`]: parameters, models (linear, IndRNN, bidirectional RNN), processors
//!   and model serialization.
//!
//! ```
//! use neuragrad_core::{Dense, Graph};
//!
//! let g = Graph::new();
//! let x = g.new_variable(Dense::new_vec(vec![1.0, 2.0]), true);
//! let y = g.reduce_sum(g.prod(x, x));
//! g.backward(y, &Dense::new_scalar(1.0));
//! assert_eq!(g.grad(x).unwrap().data(), &[2.0, 4.0]);
//! ```

pub mod attention;
pub mod autograd;
pub mod error;
pub mod mat;
pub mod nn;
pub mod ops;
pub mod utils;

pub use autograd::{Function, Graph, NodeId, Operands};
pub use error::{NeuraGradError, Result};
pub use mat::Dense;
pub use ops::Activation;

// Re-export traits required by public functions.
pub use num_traits;
