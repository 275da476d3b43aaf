use super::Qkv;
use crate::autograd::{Graph, NodeId};
use crate::error::{NeuraGradError, Result};
use crate::mat::Dense;

/// Score added to suppressed key positions before the softmax.
pub const MASK_SCORE: f64 = -1.0e9;

/// Which key positions a query may attend to.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Mask {
    /// Every query sees every key.
    #[default]
    None,
    /// Query `i` only sees keys `0..=i`.
    Causal,
    /// The listed key positions are hidden from every query.
    Keys(Vec<usize>),
}

impl Mask {
    /// Additive mask for query `i` over `n` keys, or `None` if nothing is hidden.
    fn scores(&self, i: usize, n: usize) -> Option<Dense> {
        let hidden: Vec<usize> = match self {
            Mask::None => return None,
            Mask::Causal => (i + 1..n).collect(),
            Mask::Keys(keys) => keys.clone(),
        };
        if hidden.is_empty() {
            return None;
        }
        let mut m = Dense::zeros(n, 1);
        for j in hidden {
            m.data_mut()[j] = MASK_SCORE;
        }
        Some(m)
    }
}

/// Configuration of [`scaled_dot_product_attention`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledDotProductConfig {
    /// Multiplier applied to every `q · k` score.
    pub scale_factor: f64,
    pub mask: Mask,
}

impl Default for ScaledDotProductConfig {
    fn default() -> Self {
        ScaledDotProductConfig {
            scale_factor: 1.0,
            mask: Mask::None,
        }
    }
}

impl ScaledDotProductConfig {
    /// Unmasked configuration with the conventional `1 / sqrt(dim)` scaling.
    pub fn for_dim(dim: usize) -> Self {
        ScaledDotProductConfig {
            scale_factor: 1.0 / (dim as f64).sqrt(),
            mask: Mask::None,
        }
    }

    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = mask;
        self
    }

    /// Checks the configuration against a sequence of `seq_len` keys.
    pub fn validate(&self, seq_len: usize) -> Result<()> {
        if !self.scale_factor.is_finite() {
            return Err(NeuraGradError::InvalidScaleFactor(self.scale_factor));
        }
        if let Mask::Keys(keys) = &self.mask {
            if let Some(&index) = keys.iter().find(|&&j| j >= seq_len) {
                return Err(NeuraGradError::IndexOutOfBounds {
                    index,
                    len: seq_len,
                });
            }
        }
        Ok(())
    }
}

/// Result of [`scaled_dot_product_attention`]: one context vector and one
/// probability vector (over the keys) per query.
#[derive(Debug, Clone, PartialEq)]
pub struct AttentionOutput {
    pub context: Vec<NodeId>,
    pub probs: Vec<NodeId>,
}

/// Scaled dot-product attention.
///
/// For every query `q`: `probs = softmax(K · q * scale + mask)` and
/// `context = Vᵀ · probs`, where `K` and `V` stack the keys and values as rows.
///
/// # Arguments
/// * `g` - Graph owning every node of `qkv`.
/// * `qkv` - Equally long sequences of column vectors. Queries and keys share a
///   dimension; values may have another one.
/// * `config` - Scale factor and mask.
///
/// # Errors
/// Returns an error if the sequence lengths differ or the configuration is
/// invalid. Dimension mismatches between vectors are contract violations and panic.
pub fn scaled_dot_product_attention(
    g: &Graph,
    qkv: &Qkv,
    config: &ScaledDotProductConfig,
) -> Result<AttentionOutput> {
    let n = qkv.seq_len()?;
    config.validate(n)?;
    if n == 0 {
        return Ok(AttentionOutput {
            context: Vec::new(),
            probs: Vec::new(),
        });
    }

    let keys = g.stack(&qkv.keys);
    let values = g.t(g.stack(&qkv.values));
    let scale = g.new_scalar(config.scale_factor);

    let mut context = Vec::with_capacity(n);
    let mut probs = Vec::with_capacity(n);
    for (i, &q) in qkv.queries.iter().enumerate() {
        let mut scores = g.prod_scalar(g.mul(keys, q), scale);
        if let Some(mask) = config.mask.scores(i, n) {
            scores = g.add(scores, g.new_variable(mask, false));
        }
        let p = g.softmax(scores);
        context.push(g.mul(values, p));
        probs.push(p);
    }
    Ok(AttentionOutput { context, probs })
}

#[cfg(test)]
#[path = "scaled_dot_product_test.rs"]
mod tests;
