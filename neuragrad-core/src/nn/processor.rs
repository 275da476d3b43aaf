use super::model::Model;
use crate::autograd::{Graph, NodeId};

/// Runs a model's forward computation on a graph.
///
/// A processor is bound to one model and one graph. Feed-forward processors
/// treat every input independently; recurrent ones treat the inputs of
/// successive `forward` calls as one sequence until `reset`.
pub trait Processor {
    fn model(&self) -> &dyn Model;

    fn graph(&self) -> &Graph;

    /// Back to the initial configuration (clears recurrent states).
    fn reset(&mut self);

    /// Whether the whole sequence must be given in a single `forward` call
    /// (bidirectional models).
    fn requires_full_seq(&self) -> bool;

    /// One output node per input node.
    fn forward(&mut self, xs: &[NodeId]) -> Vec<NodeId>;
}
