//! Linear algebra operators.

pub mod dot;
pub mod matmul;
pub mod transpose;

pub use dot::Dot;
pub use matmul::Mul;
pub use transpose::Transpose;
