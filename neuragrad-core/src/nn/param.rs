use crate::error::Result;
use crate::mat::Dense;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Role of a parameter inside its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamKind {
    Weights,
    Biases,
    #[default]
    Undefined,
}

impl FromStr for ParamKind {
    type Err = std::convert::Infallible;

    /// `"weights"` and `"biases"` (any case) map to their kind, anything else to `Undefined`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "weights" => ParamKind::Weights,
            "biases" => ParamKind::Biases,
            _ => ParamKind::Undefined,
        })
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamKind::Weights => "weights",
            ParamKind::Biases => "biases",
            ParamKind::Undefined => "undefined",
        })
    }
}

/// Optimizer scratch state attached to a parameter (e.g. momentum buffers).
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    /// Identifies the optimizer method that created the payload.
    pub label: String,
    pub data: Vec<Dense>,
}

impl Payload {
    pub fn new(label: impl Into<String>, data: Vec<Dense>) -> Self {
        Payload {
            label: label.into(),
            data,
        }
    }
}

/// Internal state of a [`Param`].
#[derive(Debug)]
pub struct ParamData {
    pub(crate) name: Option<String>,
    pub(crate) kind: ParamKind,
    pub(crate) value: Dense,
    pub(crate) grad: Option<Dense>,
    pub(crate) requires_grad: bool,
    pub(crate) support: Option<Payload>,
}

/// A learnable parameter.
///
/// `Param` is a shared handle (`Arc<RwLock<ParamData>>`): clones refer to the
/// same parameter. Models own their parameters; graphs reference them through
/// [`Graph::new_param`](crate::autograd::Graph::new_param), which snapshots the
/// value, and give the accumulated gradient back at the end of a backward pass.
/// Several graphs on different threads may use the same parameters concurrently.
#[derive(Clone)]
pub struct Param {
    data: Arc<RwLock<ParamData>>,
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.read_data();
        f.debug_struct("Param")
            .field("name", &data.name)
            .field("kind", &data.kind)
            .field("dims", &data.value.dims())
            .field("requires_grad", &data.requires_grad)
            .finish()
    }
}

impl Param {
    /// Creates a parameter requiring a gradient.
    pub fn new(value: Dense) -> Self {
        Param {
            data: Arc::new(RwLock::new(ParamData {
                name: None,
                kind: ParamKind::Undefined,
                value,
                grad: None,
                requires_grad: true,
                support: None,
            })),
        }
    }

    pub(crate) fn read_data(&self) -> RwLockReadGuard<'_, ParamData> {
        self.data.read().expect("RwLock poisoned")
    }

    pub(crate) fn write_data(&self) -> RwLockWriteGuard<'_, ParamData> {
        self.data.write().expect("RwLock poisoned")
    }

    /// True if both handles refer to the same parameter.
    pub fn same_as(&self, other: &Param) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    // --- Metadata ---

    /// Name assigned by the first traversal of the owning model.
    pub fn name(&self) -> Option<String> {
        self.read_data().name.clone()
    }

    pub fn kind(&self) -> ParamKind {
        self.read_data().kind
    }

    /// Sets name and kind unless they were already assigned.
    pub(crate) fn describe(&self, name: &str, kind: ParamKind) {
        let mut data = self.write_data();
        if data.name.is_none() {
            data.name = Some(name.to_lowercase());
        }
        if data.kind == ParamKind::Undefined {
            data.kind = kind;
        }
    }

    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    pub fn set_requires_grad(&self, requires_grad: bool) {
        self.write_data().requires_grad = requires_grad;
    }

    // --- Value ---

    /// Copy of the current value.
    pub fn value(&self) -> Dense {
        self.read_data().value.clone()
    }

    pub fn dims(&self) -> (usize, usize) {
        self.read_data().value.dims()
    }

    /// Subtracts `delta` from the value.
    ///
    /// # Errors
    /// Returns `NeuraGradError::IncompatibleShapes` if the shapes differ.
    pub fn apply_delta(&self, delta: &Dense) -> Result<()> {
        self.write_data().value.sub_in_place(delta)
    }

    // --- Gradient ---

    /// Copy of the accumulated gradient, `None` if nothing was accumulated.
    pub fn grad(&self) -> Option<Dense> {
        self.read_data().grad.clone()
    }

    pub fn has_grad(&self) -> bool {
        self.read_data().grad.is_some()
    }

    /// Adds `gx` into the gradient.
    ///
    /// # Panics
    /// Panics if `gx` does not have as many elements as the value.
    pub fn accumulate_grad(&self, gx: &Dense) {
        let mut data = self.write_data();
        assert_eq!(
            data.value.size(),
            gx.size(),
            "Gradient of shape {:?} cannot be accumulated into parameter {:?} of shape {:?}",
            gx.dims(),
            data.name,
            data.value.dims()
        );
        match data.grad.as_mut() {
            Some(grad) => {
                for (g, &x) in grad.data_mut().iter_mut().zip(gx.data()) {
                    *g += x;
                }
            }
            None => {
                let mut grad = data.value.zeros_like();
                grad.data_mut().copy_from_slice(gx.data());
                data.grad = Some(grad);
            }
        }
    }

    /// Drops the accumulated gradient.
    pub fn zero_grad(&self) {
        self.write_data().grad = None;
    }

    // --- Optimizer support ---

    pub fn support(&self) -> Option<Payload> {
        self.read_data().support.clone()
    }

    pub fn set_support(&self, payload: Payload) {
        self.write_data().support = Some(payload);
    }

    pub fn clear_support(&self) {
        self.write_data().support = None;
    }
}

#[cfg(test)]
#[path = "param_test.rs"]
mod tests;
