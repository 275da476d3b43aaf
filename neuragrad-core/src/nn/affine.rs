use crate::autograd::{Graph, NodeId};

/// `b + Σ w_i · x_i`, where each product is a matrix product.
///
/// # Panics
/// Panics on incompatible shapes, like every graph builder.
pub fn affine(g: &Graph, b: NodeId, terms: &[(NodeId, NodeId)]) -> NodeId {
    terms
        .iter()
        .fold(b, |acc, &(w, x)| g.add(acc, g.mul(w, x)))
}
