use super::indrnn::{IndRnn, IndRnnProcessor};
use super::model::{Field, Model, ProcessorBuilder};
use super::processor::Processor;
use crate::autograd::{Graph, NodeId};

/// How the outputs of the two directions are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeKind {
    #[default]
    Concat,
    Sum,
    Prod,
    Avg,
}

/// Bidirectional recurrent network: one [`IndRnn`] reads the sequence left to
/// right, the other right to left, and their outputs at each position are merged.
#[derive(Debug)]
pub struct BiRnn {
    pub positive: IndRnn,
    pub negative: IndRnn,
    pub merge: MergeKind,
}

impl BiRnn {
    pub fn new(positive: IndRnn, negative: IndRnn, merge: MergeKind) -> Self {
        BiRnn {
            positive,
            negative,
            merge,
        }
    }
}

impl Model for BiRnn {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::Model {
                name: "Positive",
                model: &self.positive,
            },
            Field::Model {
                name: "Negative",
                model: &self.negative,
            },
        ]
    }
}

impl ProcessorBuilder for BiRnn {
    type Proc<'a> = BiRnnProcessor<'a>;

    fn new_proc<'a>(&'a self, g: &Graph) -> BiRnnProcessor<'a> {
        BiRnnProcessor {
            model: self,
            g: g.clone(),
            positive: self.positive.new_proc(g),
            negative: self.negative.new_proc(g),
        }
    }
}

#[derive(Debug)]
pub struct BiRnnProcessor<'a> {
    model: &'a BiRnn,
    g: Graph,
    positive: IndRnnProcessor<'a>,
    negative: IndRnnProcessor<'a>,
}

impl BiRnnProcessor<'_> {
    fn merge(&self, pos: NodeId, neg: NodeId) -> NodeId {
        let g = &self.g;
        match self.model.merge {
            MergeKind::Concat => g.concat(&[pos, neg]),
            MergeKind::Sum => g.add(pos, neg),
            MergeKind::Prod => g.prod(pos, neg),
            MergeKind::Avg => g.prod_scalar(g.add(pos, neg), g.new_scalar(0.5)),
        }
    }
}

impl Processor for BiRnnProcessor<'_> {
    fn model(&self) -> &dyn Model {
        self.model
    }

    fn graph(&self) -> &Graph {
        &self.g
    }

    fn reset(&mut self) {
        self.positive.reset();
        self.negative.reset();
    }

    fn requires_full_seq(&self) -> bool {
        true
    }

    /// Processes `xs` as a complete sequence. Both directions are reset first.
    fn forward(&mut self, xs: &[NodeId]) -> Vec<NodeId> {
        self.reset();
        let pos = self.positive.forward(xs);
        let reversed: Vec<NodeId> = xs.iter().rev().copied().collect();
        let mut neg = self.negative.forward(&reversed);
        neg.reverse();
        pos.iter()
            .zip(neg.iter())
            .map(|(&p, &n)| self.merge(p, n))
            .collect()
    }
}

#[cfg(test)]
#[path = "birnn_test.rs"]
mod tests;
