use super::param::{Param, ParamKind};
use super::processor::Processor;
use crate::autograd::Graph;
use crate::error::Result;
use std::fmt::Debug;
use std::io::{Read, Write};

/// One serializable member of a [`Model`].
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    Param {
        name: &'static str,
        kind: ParamKind,
        param: &'a Param,
    },
    /// A nested model, traversed recursively.
    Model {
        name: &'static str,
        model: &'a dyn Model,
    },
}

/// A container of learnable parameters.
///
/// `fields` lists the parameters and nested models in a fixed order. That
/// order drives every traversal ([`for_each_param`]), hence the layout of the
/// serialized form. Processor-scoped state (e.g. recurrent states) is never a
/// field.
pub trait Model: Debug + Send + Sync {
    fn fields(&self) -> Vec<Field<'_>>;
}

/// A model that can build processors on a graph.
pub trait ProcessorBuilder: Model {
    type Proc<'a>: Processor
    where
        Self: 'a;

    /// Registers the model parameters on `g` and returns a fresh processor.
    fn new_proc<'a>(&'a self, g: &Graph) -> Self::Proc<'a>;
}

/// Receiver of model parameters, implemented by optimizers.
pub trait Tracker {
    fn track(&mut self, param: Param);
}

// --- Traversal ---

/// Calls `f` on every parameter of `model`, depth-first in field order.
///
/// On the way, each parameter gets its field name (lowercased) and kind unless
/// it already has them.
pub fn for_each_param<F>(model: &dyn Model, mut f: F)
where
    F: FnMut(&Param),
{
    let _ = try_for_each_param(model, |p| {
        f(p);
        Ok::<(), std::convert::Infallible>(())
    });
}

/// Like [`for_each_param`], stopping at the first error.
pub fn try_for_each_param<F, E>(model: &dyn Model, mut f: F) -> std::result::Result<(), E>
where
    F: FnMut(&Param) -> std::result::Result<(), E>,
{
    visit(model, &mut f)
}

fn visit<E>(
    model: &dyn Model,
    f: &mut dyn FnMut(&Param) -> std::result::Result<(), E>,
) -> std::result::Result<(), E> {
    for field in model.fields() {
        match field {
            Field::Param { name, kind, param } => {
                param.describe(name, kind);
                f(param)?;
            }
            Field::Model { model, .. } => visit(model, f)?,
        }
    }
    Ok(())
}

/// Handles of every parameter, in traversal order.
pub fn params(model: &dyn Model) -> Vec<Param> {
    let mut out = Vec::new();
    for_each_param(model, |p| out.push(p.clone()));
    out
}

/// Drops the gradient of every parameter.
pub fn zero_grad(model: &dyn Model) {
    for_each_param(model, Param::zero_grad);
}

/// Discards the optimizer payload of every parameter.
pub fn clear_support(model: &dyn Model) {
    for_each_param(model, Param::clear_support);
}

/// Hands every parameter to `tracker`.
pub fn track_params(model: &dyn Model, tracker: &mut dyn Tracker) {
    for_each_param(model, |p| tracker.track(p.clone()));
}

// --- Serialization ---

/// Writes the value of every parameter, in traversal order, with the matrix
/// binary format. There is no header: reading back requires a model with the
/// same parameter shapes.
///
/// # Returns
/// The number of bytes written.
///
/// # Errors
/// Stops at the first failure; the error's `transferred()` is the total number
/// of bytes written before and during the failing parameter.
pub fn serialize<W: Write + ?Sized>(model: &dyn Model, w: &mut W) -> Result<usize> {
    let mut n = 0;
    try_for_each_param(model, |p| {
        let base = n;
        n += p
            .read_data()
            .value
            .marshal_binary_to(&mut *w)
            .map_err(|e| e.after(base))?;
        Ok(())
    })?;
    log::debug!("Serialized model: {} bytes", n);
    Ok(n)
}

/// Reads every parameter value back, in traversal order.
///
/// The stream must hold matrices with exactly the parameter shapes.
///
/// # Errors
/// Same reporting as [`serialize`]. Parameters read before the failure keep
/// their new values; the failing one is left unchanged.
pub fn deserialize<R: Read + ?Sized>(model: &dyn Model, r: &mut R) -> Result<usize> {
    let mut n = 0;
    try_for_each_param(model, |p| {
        let base = n;
        n += p
            .write_data()
            .value
            .unmarshal_binary_from(&mut *r)
            .map_err(|e| e.after(base))?;
        Ok(())
    })?;
    log::debug!("Deserialized model: {} bytes", n);
    Ok(n)
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
