use super::Qkv;
use crate::autograd::{Graph, NodeId};
use crate::error::{NeuraGradError, Result};
use std::fmt;

/// Non-negative feature map applied to queries and keys.
#[derive(Clone, Copy, Default)]
pub enum FeatureMap {
    /// `ELU(x) + 1`.
    #[default]
    PositiveElu,
    Relu,
    Custom(fn(&Graph, NodeId) -> NodeId),
}

impl FeatureMap {
    fn apply(&self, g: &Graph, x: NodeId) -> NodeId {
        match self {
            FeatureMap::PositiveElu => g.positive_elu(x),
            FeatureMap::Relu => g.relu(x),
            FeatureMap::Custom(f) => f(g, x),
        }
    }
}

impl fmt::Debug for FeatureMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureMap::PositiveElu => f.write_str("PositiveElu"),
            FeatureMap::Relu => f.write_str("Relu"),
            FeatureMap::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Configuration of [`linear_attention`].
#[derive(Debug, Clone, Copy)]
pub struct LinearAttentionConfig {
    pub mapping: FeatureMap,
    /// Added to the normalizer of every query.
    pub epsilon: f64,
}

impl Default for LinearAttentionConfig {
    fn default() -> Self {
        LinearAttentionConfig {
            mapping: FeatureMap::PositiveElu,
            epsilon: 1e-12,
        }
    }
}

impl LinearAttentionConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(NeuraGradError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}

/// Linear attention.
///
/// With `φ` the feature map, `KV = Σ_j v_j · φ(k_j)ᵀ` and `z = Σ_j φ(k_j)` are
/// computed once, then every query gets
/// `context = KV · φ(q) / (φ(q) · z + epsilon)`.
/// Cost is linear in the sequence length.
///
/// The normalizer is a divisor of [`Graph::div_scalar`] and therefore receives
/// no gradient; gradients reach queries and keys through the numerator only.
///
/// # Errors
/// Returns an error if the sequence lengths differ or `epsilon` is invalid.
pub fn linear_attention(
    g: &Graph,
    qkv: &Qkv,
    config: &LinearAttentionConfig,
) -> Result<Vec<NodeId>> {
    config.validate()?;
    let n = qkv.seq_len()?;
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut kv: Option<NodeId> = None;
    let mut k_sum: Option<NodeId> = None;
    for (&k, &v) in qkv.keys.iter().zip(qkv.values.iter()) {
        let mk = config.mapping.apply(g, k);
        let term = g.mul(v, g.t(mk));
        kv = Some(kv.map_or(term, |acc| g.add(acc, term)));
        k_sum = Some(k_sum.map_or(mk, |acc| g.add(acc, mk)));
    }
    let (Some(kv), Some(k_sum)) = (kv, k_sum) else {
        return Ok(Vec::new());
    };

    let eps = g.new_scalar(config.epsilon);
    let context = qkv
        .queries
        .iter()
        .map(|&q| {
            let mq = config.mapping.apply(g, q);
            let num = g.mul(kv, mq);
            let den = g.add_scalar(g.dot(mq, k_sum), eps);
            g.div_scalar(num, den)
        })
        .collect();
    Ok(context)
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
