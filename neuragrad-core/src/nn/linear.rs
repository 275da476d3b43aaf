use super::affine::affine;
use super::model::{Field, Model, ProcessorBuilder};
use super::param::{Param, ParamKind};
use super::processor::Processor;
use crate::autograd::{Graph, NodeId};
use crate::mat::Dense;
use crate::ops::Activation;

/// Fully connected feed-forward layer: `y = act(W · x + B)`.
#[derive(Debug)]
pub struct Linear {
    pub w: Param,
    pub b: Param,
    pub activation: Activation,
}

impl Linear {
    /// Creates a layer mapping `input`-sized vectors to `output`-sized ones,
    /// with zero-initialized parameters.
    pub fn new(input: usize, output: usize, activation: Activation) -> Self {
        Linear {
            w: Param::new(Dense::zeros(output, input)),
            b: Param::new(Dense::zeros(output, 1)),
            activation,
        }
    }
}

impl Model for Linear {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::Param {
                name: "W",
                kind: ParamKind::Weights,
                param: &self.w,
            },
            Field::Param {
                name: "B",
                kind: ParamKind::Biases,
                param: &self.b,
            },
        ]
    }
}

impl ProcessorBuilder for Linear {
    type Proc<'a> = LinearProcessor<'a>;

    fn new_proc<'a>(&'a self, g: &Graph) -> LinearProcessor<'a> {
        LinearProcessor {
            model: self,
            g: g.clone(),
            w: g.new_param(&self.w),
            b: g.new_param(&self.b),
        }
    }
}

/// Stateless processor of a [`Linear`] layer.
#[derive(Debug)]
pub struct LinearProcessor<'a> {
    model: &'a Linear,
    g: Graph,
    w: NodeId,
    b: NodeId,
}

impl Processor for LinearProcessor<'_> {
    fn model(&self) -> &dyn Model {
        self.model
    }

    fn graph(&self) -> &Graph {
        &self.g
    }

    fn reset(&mut self) {}

    fn requires_full_seq(&self) -> bool {
        false
    }

    fn forward(&mut self, xs: &[NodeId]) -> Vec<NodeId> {
        xs.iter()
            .map(|&x| {
                let h = affine(&self.g, self.b, &[(self.w, x)]);
                self.g.invoke(self.model.activation, h)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
