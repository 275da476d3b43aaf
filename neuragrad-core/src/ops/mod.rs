//! # Operator library (`ops`)
//!
//! Every differentiable primitive is a small stateless struct implementing
//! [`Function`](crate::autograd::Function). Operators are grouped by concern:
//!
//! - [`arithmetic`]: element-wise binary operators and their scalar variants.
//! - [`linalg`]: matrix product, dot product, transpose.
//! - [`activation`]: the closed [`Activation`] set and softmax.
//! - [`reduction`] and [`shape`]: sums and vector stacking.
//!
//! The [`Graph`](crate::autograd::Graph) convenience builders in `graph_ops`
//! wrap each primitive in a single `apply` call; composite operators such as
//! attention are built from those.

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod reduction;
pub mod shape;

mod graph_ops;

pub use activation::{Activation, Softmax, Unary};
pub use arithmetic::{Add, AddScalar, Div, DivScalar, Max, Min, Prod, ProdScalar, Sub, SubScalar};
pub use linalg::{Dot, Mul, Transpose};
pub use reduction::ReduceSum;
pub use shape::{Concat, Stack};
