//! Composite attention operators.
//!
//! Both variants take a [`Qkv`] triple of equally long node sequences and are
//! built entirely from primitive graph operators, so gradients flow back to
//! every query, key and value without dedicated backward code.

pub mod linear;
pub mod scaled_dot_product;

pub use linear::{linear_attention, FeatureMap, LinearAttentionConfig};
pub use scaled_dot_product::{
    scaled_dot_product_attention, AttentionOutput, Mask, ScaledDotProductConfig,
};

use crate::autograd::NodeId;
use crate::error::{NeuraGradError, Result};

/// Queries, keys and values of an attention call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Qkv {
    pub queries: Vec<NodeId>,
    pub keys: Vec<NodeId>,
    pub values: Vec<NodeId>,
}

impl Qkv {
    pub fn new(queries: Vec<NodeId>, keys: Vec<NodeId>, values: Vec<NodeId>) -> Self {
        Qkv {
            queries,
            keys,
            values,
        }
    }

    /// Common sequence length.
    ///
    /// # Errors
    /// Returns `NeuraGradError::SequenceLengthMismatch` unless the three
    /// sequences have the same length.
    pub fn seq_len(&self) -> Result<usize> {
        let (q, k, v) = (self.queries.len(), self.keys.len(), self.values.len());
        if q != k || k != v {
            return Err(NeuraGradError::SequenceLengthMismatch {
                queries: q,
                keys: k,
                values: v,
            });
        }
        Ok(q)
    }
}
