use crate::autograd::node::{NodeEntry, NodeId};
use crate::error::{NeuraGradError, Result};
use crate::mat::{Dense, MatrixPool};
use std::fmt::Debug;

/// Defines the interface of a differentiable operator.
///
/// A `Function` is a stateless descriptor: the graph stores it next to the node it
/// produced, together with the operand handles, and calls it again during the
/// backward pass.
///
/// Contract:
/// - `forward` is a pure function of the operand values. It must validate shape
///   compatibility and report violations as errors instead of computing.
/// - `backward` receives the fully accumulated gradient of the output and must
///   propagate a correctly shaped contribution to every operand that requires a
///   gradient, through [`Operands::propagate_with`]. Operands that do not require a
///   gradient are skipped by `propagate_with` itself, without allocating.
///
/// Because the graph evaluates `forward` eagerly when the node is created,
/// `backward` can never run before `forward`.
pub trait Function: Debug {
    /// Operator name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Computes the output value from the operand values.
    fn forward(&self, xs: &[&Dense]) -> Result<Dense>;

    /// Propagates `gy`, the gradient of the output, to the operands.
    fn backward(&self, gy: &Dense, xs: &mut Operands<'_>);
}

/// Checks the number of operands handed to `forward`.
pub(crate) fn expect_arity(operation: &str, xs: &[&Dense], expected: usize) -> Result<()> {
    if xs.len() != expected {
        return Err(NeuraGradError::ArityMismatch {
            operation: operation.to_string(),
            expected,
            actual: xs.len(),
        });
    }
    Ok(())
}

/// Checks that `x` is a `1 x 1` matrix.
pub(crate) fn expect_scalar(operation: &str, x: &Dense) -> Result<f64> {
    if !x.is_scalar() {
        return Err(NeuraGradError::NotScalar {
            shape: x.dims(),
            operation: operation.to_string(),
        });
    }
    Ok(x.data()[0])
}

/// The operands of a node, as seen by [`Function::backward`].
///
/// Gives read access to the operand values and write access to their gradients
/// through scratch buffers borrowed from the graph's [`MatrixPool`].
pub struct Operands<'g> {
    ids: &'g [NodeId],
    nodes: &'g mut [NodeEntry],
    pool: &'g mut MatrixPool,
}

impl<'g> Operands<'g> {
    /// `nodes` must contain every operand, i.e. all nodes created before the consumer.
    pub(crate) fn new(ids: &'g [NodeId], nodes: &'g mut [NodeEntry], pool: &'g mut MatrixPool) -> Self {
        Operands { ids, nodes, pool }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Forward value of operand `i`.
    pub fn value(&self, i: usize) -> &Dense {
        &self.nodes[self.ids[i].index].value
    }

    pub fn requires_grad(&self, i: usize) -> bool {
        self.nodes[self.ids[i].index].requires_grad
    }

    /// Propagates a gradient contribution to operand `i`.
    ///
    /// If the operand requires a gradient, a zero-filled scratch buffer shaped like
    /// the operand is taken from the pool and handed to `fill` together with all
    /// operand values. The filled buffer is added into the operand's gradient and
    /// returned to the pool before this method returns. Otherwise nothing happens.
    pub fn propagate_with<F>(&mut self, i: usize, fill: F)
    where
        F: FnOnce(&mut Dense, &[&Dense]),
    {
        if !self.requires_grad(i) {
            return;
        }
        let (rows, cols) = self.value(i).dims();
        let mut gx = self.pool.acquire_zeros(rows, cols);
        {
            let values: Vec<&Dense> = self
                .ids
                .iter()
                .map(|id| &self.nodes[id.index].value)
                .collect();
            fill(&mut gx, &values);
        }
        self.nodes[self.ids[i].index].accumulate_grad(&gx);
        self.pool.release(gx);
    }
}
