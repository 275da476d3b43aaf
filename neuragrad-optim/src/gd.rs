use crate::error::{OptimError, Result};
use neuragrad_core::nn::{Param, Payload, Tracker};
use neuragrad_core::Dense;

/// An update rule.
///
/// The method is stateless; whatever it needs to remember between steps lives
/// in the [`Payload`] of each parameter, created by [`Method::new_support`].
pub trait Method {
    /// Tags the payloads created by this method.
    fn label(&self) -> &'static str;

    /// Fresh optimizer state for a parameter of shape `dims`.
    fn new_support(&self, dims: (usize, usize)) -> Payload;

    /// Computes the delta subtracted from the parameter value, updating `support`.
    fn delta(&self, grad: &Dense, support: &mut Payload) -> Result<Dense>;
}

/// Gradient descent over a set of tracked parameters.
#[derive(Debug)]
pub struct GradientDescent<M: Method> {
    method: M,
    params: Vec<Param>,
}

impl<M: Method> GradientDescent<M> {
    pub fn new(method: M) -> Self {
        GradientDescent {
            method,
            params: Vec::new(),
        }
    }

    pub fn method(&self) -> &M {
        &self.method
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Updates every tracked parameter that has a gradient.
    ///
    /// Gradients are left in place; call [`GradientDescent::zero_grad`] before
    /// the next accumulation.
    ///
    /// # Returns
    /// The number of parameters updated.
    pub fn step(&mut self) -> Result<usize> {
        let mut updated = 0;
        for param in &self.params {
            let Some(grad) = param.grad() else {
                continue;
            };
            let mut support = match param.support() {
                Some(s) if s.label == self.method.label() => s,
                _ => self.method.new_support(param.dims()),
            };
            let delta = self.method.delta(&grad, &mut support).map_err(|e| match e {
                OptimError::MalformedSupport { label, .. } => OptimError::MalformedSupport {
                    label,
                    param: param.name(),
                },
                other => other,
            })?;
            param.apply_delta(&delta)?;
            param.set_support(support);
            updated += 1;
        }
        log::debug!(
            "{} step: updated {} of {} parameters",
            self.method.label(),
            updated,
            self.params.len()
        );
        Ok(updated)
    }

    /// Drops the gradient of every tracked parameter.
    pub fn zero_grad(&self) {
        for p in &self.params {
            p.zero_grad();
        }
    }

    /// Discards the optimizer state of every tracked parameter.
    pub fn clear_support(&self) {
        for p in &self.params {
            p.clear_support();
        }
    }
}

impl<M: Method> Tracker for GradientDescent<M> {
    /// Registers `param`. Tracking the same parameter twice has no effect.
    fn track(&mut self, param: Param) {
        if !self.params.iter().any(|p| p.same_as(&param)) {
            self.params.push(param);
        }
    }
}

/// Checks that `support` holds matrices with exactly the shapes in `layout`.
pub(crate) fn expect_support(support: &Payload, layout: &[(usize, usize)]) -> Result<()> {
    let ok = support.data.len() == layout.len()
        && support.data.iter().zip(layout).all(|(d, &dims)| d.dims() == dims);
    if !ok {
        return Err(OptimError::MalformedSupport {
            label: support.label.clone(),
            param: None,
        });
    }
    Ok(())
}
