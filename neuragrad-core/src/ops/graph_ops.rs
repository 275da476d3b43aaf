use super::*;
use crate::autograd::{Graph, NodeId};

/// Convenience builders. Each one applies a single primitive operator and
/// panics on a forward error, like [`Graph::apply`].
impl Graph {
    // --- Element-wise ---

    pub fn add(&self, x1: NodeId, x2: NodeId) -> NodeId {
        self.apply(Add, &[x1, x2])
    }

    pub fn sub(&self, x1: NodeId, x2: NodeId) -> NodeId {
        self.apply(Sub, &[x1, x2])
    }

    /// Element-wise product.
    pub fn prod(&self, x1: NodeId, x2: NodeId) -> NodeId {
        self.apply(Prod, &[x1, x2])
    }

    pub fn div(&self, x1: NodeId, x2: NodeId) -> NodeId {
        self.apply(Div, &[x1, x2])
    }

    pub fn min(&self, x1: NodeId, x2: NodeId) -> NodeId {
        self.apply(Min, &[x1, x2])
    }

    pub fn max(&self, x1: NodeId, x2: NodeId) -> NodeId {
        self.apply(Max, &[x1, x2])
    }

    // --- Scalar second operand ---

    pub fn add_scalar(&self, x: NodeId, s: NodeId) -> NodeId {
        self.apply(AddScalar, &[x, s])
    }

    pub fn sub_scalar(&self, x: NodeId, s: NodeId) -> NodeId {
        self.apply(SubScalar, &[x, s])
    }

    pub fn prod_scalar(&self, x: NodeId, s: NodeId) -> NodeId {
        self.apply(ProdScalar, &[x, s])
    }

    /// `x / s`. The divisor receives no gradient.
    pub fn div_scalar(&self, x: NodeId, s: NodeId) -> NodeId {
        self.apply(DivScalar, &[x, s])
    }

    // --- Linear algebra ---

    /// Matrix product.
    pub fn mul(&self, x1: NodeId, x2: NodeId) -> NodeId {
        self.apply(Mul, &[x1, x2])
    }

    pub fn dot(&self, x1: NodeId, x2: NodeId) -> NodeId {
        self.apply(Dot, &[x1, x2])
    }

    pub fn t(&self, x: NodeId) -> NodeId {
        self.apply(Transpose, &[x])
    }

    // --- Structural ---

    pub fn stack(&self, xs: &[NodeId]) -> NodeId {
        self.apply(Stack, xs)
    }

    pub fn concat(&self, xs: &[NodeId]) -> NodeId {
        self.apply(Concat, xs)
    }

    pub fn reduce_sum(&self, x: NodeId) -> NodeId {
        self.apply(ReduceSum, &[x])
    }

    pub fn softmax(&self, x: NodeId) -> NodeId {
        self.apply(Softmax, &[x])
    }

    // --- Activations ---

    /// Applies `activation` element-wise. `Identity` returns `x` unchanged
    /// without creating a node.
    pub fn invoke(&self, activation: Activation, x: NodeId) -> NodeId {
        match activation {
            Activation::Identity => x,
            other => self.apply(Unary(other), &[x]),
        }
    }

    pub fn tanh(&self, x: NodeId) -> NodeId {
        self.invoke(Activation::Tanh, x)
    }

    pub fn sigmoid(&self, x: NodeId) -> NodeId {
        self.invoke(Activation::Sigmoid, x)
    }

    pub fn relu(&self, x: NodeId) -> NodeId {
        self.invoke(Activation::ReLU, x)
    }

    pub fn exp(&self, x: NodeId) -> NodeId {
        self.invoke(Activation::Exp, x)
    }

    pub fn log(&self, x: NodeId) -> NodeId {
        self.invoke(Activation::Log, x)
    }

    pub fn elu(&self, x: NodeId, alpha: f64) -> NodeId {
        self.invoke(Activation::Elu(alpha), x)
    }

    pub fn positive_elu(&self, x: NodeId) -> NodeId {
        self.invoke(Activation::PositiveElu, x)
    }

    pub fn neg(&self, x: NodeId) -> NodeId {
        self.invoke(Activation::Neg, x)
    }
}
