use super::affine::affine;
use super::model::{Field, Model, ProcessorBuilder};
use super::param::{Param, ParamKind};
use super::processor::Processor;
use crate::autograd::{Graph, NodeId};
use crate::mat::Dense;
use crate::ops::Activation;

/// Independently recurrent neural network (IndRNN).
///
/// `y_t = act(W · x_t + B + WRec ⊙ y_{t-1})`: each unit only sees its own
/// previous output. The recurrent term is dropped at the first step.
#[derive(Debug)]
pub struct IndRnn {
    pub w: Param,
    pub w_rec: Param,
    pub b: Param,
    pub activation: Activation,
}

/// Output of one recurrent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub y: NodeId,
}

impl IndRnn {
    /// Zero-initialized model with `input` inputs and `output` units.
    pub fn new(input: usize, output: usize, activation: Activation) -> Self {
        IndRnn {
            w: Param::new(Dense::zeros(output, input)),
            w_rec: Param::new(Dense::zeros(output, 1)),
            b: Param::new(Dense::zeros(output, 1)),
            activation,
        }
    }
}

impl Model for IndRnn {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::Param {
                name: "W",
                kind: ParamKind::Weights,
                param: &self.w,
            },
            Field::Param {
                name: "WRec",
                kind: ParamKind::Weights,
                param: &self.w_rec,
            },
            Field::Param {
                name: "B",
                kind: ParamKind::Biases,
                param: &self.b,
            },
        ]
    }
}

impl ProcessorBuilder for IndRnn {
    type Proc<'a> = IndRnnProcessor<'a>;

    fn new_proc<'a>(&'a self, g: &Graph) -> IndRnnProcessor<'a> {
        IndRnnProcessor {
            model: self,
            g: g.clone(),
            w: g.new_param(&self.w),
            w_rec: g.new_param(&self.w_rec),
            b: g.new_param(&self.b),
            states: Vec::new(),
        }
    }
}

/// Recurrent processor of an [`IndRnn`]. Successive `forward` calls continue
/// the same sequence until [`Processor::reset`].
#[derive(Debug)]
pub struct IndRnnProcessor<'a> {
    model: &'a IndRnn,
    g: Graph,
    w: NodeId,
    w_rec: NodeId,
    b: NodeId,
    states: Vec<State>,
}

impl IndRnnProcessor<'_> {
    /// Seeds the recurrence with an initial state.
    ///
    /// # Panics
    /// Panics if any state already exists.
    pub fn set_initial_state(&mut self, state: State) {
        assert!(
            self.states.is_empty(),
            "indrnn: the initial state must be set before any input"
        );
        self.states.push(state);
    }

    pub fn last_state(&self) -> Option<State> {
        self.states.last().copied()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    fn step(&self, x: NodeId) -> State {
        let g = &self.g;
        let mut h = affine(g, self.b, &[(self.w, x)]);
        if let Some(prev) = self.last_state() {
            h = g.add(h, g.prod(self.w_rec, prev.y));
        }
        State {
            y: g.invoke(self.model.activation, h),
        }
    }
}

impl Processor for IndRnnProcessor<'_> {
    fn model(&self) -> &dyn Model {
        self.model
    }

    fn graph(&self) -> &Graph {
        &self.g
    }

    fn reset(&mut self) {
        log::debug!("indrnn: reset after {} states", self.states.len());
        self.states.clear();
    }

    fn requires_full_seq(&self) -> bool {
        false
    }

    fn forward(&mut self, xs: &[NodeId]) -> Vec<NodeId> {
        xs.iter()
            .map(|&x| {
                let s = self.step(x);
                self.states.push(s);
                s.y
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "indrnn_test.rs"]
mod tests;
