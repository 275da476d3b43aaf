//! # Automatic Differentiation Module (`autograd`)
//!
//! - [`Graph`]: append-only arena of nodes, eager forward evaluation and the
//!   backward pass in descending creation order.
//! - [`Function`]: the contract every differentiable operator implements.
//! - [`Operands`]: the view of a node's operands handed to `Function::backward`.
//! - [`grad_check`]: finite-difference verification of analytical gradients.

pub mod function;
pub mod grad_check;
pub mod graph;
pub mod node;

pub use function::{Function, Operands};
pub use graph::Graph;
pub use node::{GraphId, NodeId};
