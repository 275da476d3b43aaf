use crate::autograd::function::Function;
use crate::mat::Dense;
use crate::nn::Param;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_GRAPH_ID: AtomicUsize = AtomicUsize::new(1);

/// Identity of one graph instance (changes when the graph is cleared).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphId(usize);

impl GraphId {
    pub(crate) fn next() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a node of a [`Graph`](crate::autograd::Graph).
///
/// Handles are only meaningful for the graph that created them; passing one to
/// another graph (or to the same graph after `clear`) is a contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) graph: GraphId,
    pub(crate) index: usize,
}

impl NodeId {
    /// Creation order of the node inside its graph.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn graph_id(&self) -> GraphId {
        self.graph
    }
}

/// What produced a node.
#[derive(Debug)]
pub(crate) enum Origin {
    /// Leaf created with `new_variable` or `new_scalar`.
    Variable,
    /// Leaf bound to a model parameter; its gradient is flushed into the parameter.
    Param(Param),
    /// Result of an operator application.
    Op(Box<dyn Function>),
}

/// One entry of the graph's arena.
#[derive(Debug)]
pub(crate) struct NodeEntry {
    pub(crate) value: Dense,
    pub(crate) grad: Option<Dense>,
    pub(crate) requires_grad: bool,
    pub(crate) operands: Vec<NodeId>,
    pub(crate) origin: Origin,
}

impl NodeEntry {
    pub(crate) fn leaf(value: Dense, requires_grad: bool, origin: Origin) -> Self {
        NodeEntry {
            value,
            grad: None,
            requires_grad,
            operands: Vec::new(),
            origin,
        }
    }

    /// Adds `gx` into the node's gradient. Element counts must match.
    pub(crate) fn accumulate_grad(&mut self, gx: &Dense) {
        assert_eq!(
            self.value.size(),
            gx.size(),
            "Gradient of shape {:?} cannot be accumulated into a node of shape {:?}",
            gx.dims(),
            self.value.dims()
        );
        match self.grad.as_mut() {
            Some(grad) => {
                for (g, &x) in grad.data_mut().iter_mut().zip(gx.data().iter()) {
                    *g += x;
                }
            }
            None => {
                let mut grad = self.value.zeros_like();
                grad.data_mut().copy_from_slice(gx.data());
                self.grad = Some(grad);
            }
        }
    }
}
