use crate::autograd::function::{Function, Operands};
use crate::autograd::node::{GraphId, NodeEntry, NodeId, Origin};
use crate::error::Result;
use crate::mat::{Dense, MatrixPool, PoolStats};
use crate::nn::Param;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Internal state of a [`Graph`]: the node arena in creation order and the
/// scratch pool used by backward passes.
#[derive(Debug)]
pub struct GraphData {
    id: GraphId,
    nodes: Vec<NodeEntry>,
    pool: MatrixPool,
}

/// A computational graph.
///
/// `Graph` uses `Rc<RefCell<GraphData>>` internally so that processors and
/// composite operators can hold cheap clones of the same graph. It is
/// deliberately not `Send`: a graph and its nodes belong to a single thread.
/// Independent graphs can run on separate threads and still share model
/// parameters ([`Param`] is thread-safe).
///
/// Nodes are appended in creation order and every operand precedes its consumer,
/// so the graph is acyclic by construction and a backward pass in descending
/// creation order visits each node only after all of its consumers.
#[derive(Clone)]
pub struct Graph {
    data: Rc<RefCell<GraphData>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.read_data();
        f.debug_struct("Graph")
            .field("id", &data.id)
            .field("nodes", &data.nodes.len())
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            data: Rc::new(RefCell::new(GraphData {
                id: GraphId::next(),
                nodes: Vec::new(),
                pool: MatrixPool::new(),
            })),
        }
    }

    pub fn id(&self) -> GraphId {
        self.read_data().id
    }

    /// Borrows the graph data immutably. Panics if a mutable borrow is active.
    pub(crate) fn read_data(&self) -> Ref<'_, GraphData> {
        self.data.borrow()
    }

    /// Borrows the graph data mutably. Panics if any other borrow is active.
    pub(crate) fn write_data(&self) -> RefMut<'_, GraphData> {
        self.data.borrow_mut()
    }

    /// Number of nodes currently in the graph.
    pub fn len(&self) -> usize {
        self.read_data().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- Leaves ---

    /// Registers a leaf node holding `value`.
    pub fn new_variable(&self, value: Dense, requires_grad: bool) -> NodeId {
        self.push(NodeEntry::leaf(value, requires_grad, Origin::Variable))
    }

    /// Registers a constant scalar leaf (never requires a gradient).
    pub fn new_scalar(&self, value: f64) -> NodeId {
        self.new_variable(Dense::new_scalar(value), false)
    }

    /// Registers a leaf bound to a model parameter.
    ///
    /// The node holds a snapshot of the parameter value taken now. During
    /// [`Graph::backward_all`] its fully accumulated gradient is added to the
    /// parameter's own gradient.
    pub fn new_param(&self, param: &Param) -> NodeId {
        let value = param.value();
        let requires_grad = param.requires_grad();
        self.push(NodeEntry::leaf(
            value,
            requires_grad,
            Origin::Param(param.clone()),
        ))
    }

    fn push(&self, entry: NodeEntry) -> NodeId {
        let mut data = self.write_data();
        let id = NodeId {
            graph: data.id,
            index: data.nodes.len(),
        };
        data.nodes.push(entry);
        id
    }

    // --- Operators ---

    /// Applies `f` to `operands`, evaluating the forward pass immediately.
    ///
    /// The new node requires a gradient if any operand does.
    ///
    /// # Errors
    /// Returns the forward error (e.g. incompatible shapes); no node is registered.
    ///
    /// # Panics
    /// Panics if an operand belongs to another graph.
    pub fn try_apply<F>(&self, f: F, operands: &[NodeId]) -> Result<NodeId>
    where
        F: Function + 'static,
    {
        let (value, requires_grad) = {
            let data = self.read_data();
            for &x in operands {
                data.check_owner(x);
            }
            let values: Vec<&Dense> = operands
                .iter()
                .map(|x| &data.nodes[x.index].value)
                .collect();
            let value = f.forward(&values)?;
            let requires_grad = operands.iter().any(|x| data.nodes[x.index].requires_grad);
            (value, requires_grad)
        };
        log::trace!(
            "{} -> {:?} (requires_grad = {})",
            f.name(),
            value.dims(),
            requires_grad
        );
        Ok(self.push(NodeEntry {
            value,
            grad: None,
            requires_grad,
            operands: operands.to_vec(),
            origin: Origin::Op(Box::new(f)),
        }))
    }

    /// Like [`Graph::try_apply`], but a forward failure is a fatal contract
    /// violation and panics with the error message.
    pub fn apply<F>(&self, f: F, operands: &[NodeId]) -> NodeId
    where
        F: Function + 'static,
    {
        let name = f.name();
        match self.try_apply(f, operands) {
            Ok(id) => id,
            Err(e) => panic!("{}: {}", name, e),
        }
    }

    // --- Accessors ---

    /// Copy of the forward value of `x`.
    pub fn value(&self, x: NodeId) -> Dense {
        let data = self.read_data();
        data.check_owner(x);
        data.nodes[x.index].value.clone()
    }

    /// Copy of the accumulated gradient of `x`, or `None` if nothing reached it.
    pub fn grad(&self, x: NodeId) -> Option<Dense> {
        let data = self.read_data();
        data.check_owner(x);
        data.nodes[x.index].grad.clone()
    }

    pub fn requires_grad(&self, x: NodeId) -> bool {
        let data = self.read_data();
        data.check_owner(x);
        data.nodes[x.index].requires_grad
    }

    /// Operands `x` was derived from (empty for leaves).
    pub fn operands(&self, x: NodeId) -> Vec<NodeId> {
        let data = self.read_data();
        data.check_owner(x);
        data.nodes[x.index].operands.clone()
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.read_data().pool.stats()
    }

    // --- Backward ---

    /// Adds `gy` to the gradient of `x`. Call it on the output nodes before
    /// [`Graph::backward_all`]. Ignored for nodes that do not require a gradient.
    ///
    /// # Panics
    /// Panics if `gy` does not have as many elements as the value of `x`.
    pub fn propagate_grad(&self, x: NodeId, gy: &Dense) {
        let mut data = self.write_data();
        data.check_owner(x);
        let node = &mut data.nodes[x.index];
        if !node.requires_grad {
            log::warn!(
                "Gradient injected into node {} which does not require grad; ignored",
                x.index
            );
            return;
        }
        node.accumulate_grad(gy);
    }

    /// Runs the backward pass over every node holding a gradient, in strictly
    /// descending creation order.
    pub fn backward_all(&self) {
        let mut data = self.write_data();
        let GraphData { nodes, pool, .. } = &mut *data;
        log::debug!("Backward pass over {} nodes", nodes.len());
        for i in (0..nodes.len()).rev() {
            let (before, rest) = nodes.split_at_mut(i);
            let node = &rest[0];
            if !node.requires_grad {
                continue;
            }
            let Some(gy) = node.grad.as_ref() else {
                continue;
            };
            match &node.origin {
                Origin::Variable => {}
                Origin::Param(param) => param.accumulate_grad(gy),
                Origin::Op(f) => {
                    let mut xs = Operands::new(&node.operands, before, pool);
                    f.backward(gy, &mut xs);
                }
            }
        }
        log::debug!("Backward pass done, scratch pool: {:?}", pool.stats());
    }

    /// Injects `gy` into `x` and runs [`Graph::backward_all`].
    pub fn backward(&self, x: NodeId, gy: &Dense) {
        self.propagate_grad(x, gy);
        self.backward_all();
    }

    /// Drops the gradient of every node.
    pub fn zero_grad(&self) {
        for node in self.write_data().nodes.iter_mut() {
            node.grad = None;
        }
    }

    /// Releases every node. Handles created before the call become invalid.
    pub fn clear(&self) {
        let mut data = self.write_data();
        data.nodes.clear();
        data.pool.clear();
        data.id = GraphId::next();
    }
}

impl GraphData {
    fn check_owner(&self, x: NodeId) {
        assert!(
            x.graph == self.id && x.index < self.nodes.len(),
            "Node {:?} does not belong to graph {:?}",
            x,
            self.id
        );
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
