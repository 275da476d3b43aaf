//! Models, parameters and processors.
//!
//! A [`Model`] owns [`Param`]s (and possibly nested models) and lists them
//! through [`Model::fields`]; the free functions in [`model`] traverse that
//! list for serialization, gradient zeroing and optimizer tracking. A
//! [`Processor`] runs the model on a [`Graph`](crate::autograd::Graph).

pub mod affine;
pub mod birnn;
pub mod indrnn;
pub mod init;
pub mod linear;
pub mod model;
pub mod param;
pub mod processor;

pub use affine::affine;
pub use birnn::{BiRnn, BiRnnProcessor, MergeKind};
pub use indrnn::{IndRnn, IndRnnProcessor, State};
pub use linear::{Linear, LinearProcessor};
pub use model::{
    clear_support, deserialize, for_each_param, params, serialize, track_params,
    try_for_each_param, zero_grad, Field, Model, ProcessorBuilder, Tracker,
};
pub use param::{Param, ParamKind, Payload};
pub use processor::Processor;
