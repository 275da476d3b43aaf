use crate::autograd::{Graph, NodeId};
use approx::relative_eq;
use crate::mat::Dense;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical:?} != numerical {numerical:?} (difference {difference:?})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Input {input_index} requires grad but has no gradient after the backward pass")]
    MissingAnalyticalGrad { input_index: usize },

    #[error("Input {input_index} does not require grad but received a gradient")]
    UnexpectedGrad { input_index: usize },

    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}")]
    NumericalGradNotFinite {
        input_index: usize,
        element_index: usize,
    },

    #[error("Output gradient has shape {actual:?}, output has shape {expected:?}")]
    OutputGradShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Got {masks} requires_grad flags for {inputs} inputs")]
    MaskLength { inputs: usize, masks: usize },
}

/// Evaluates `func` on fresh leaves and returns `Σ output ⊙ output_grad`.
fn weighted_output<F>(func: &F, inputs: &[Dense], output_grad: &Dense) -> f64
where
    F: Fn(&Graph, &[NodeId]) -> NodeId,
{
    let g = Graph::new();
    let xs: Vec<NodeId> = inputs
        .iter()
        .map(|x| g.new_variable(x.clone(), false))
        .collect();
    let y = func(&g, &xs);
    g.value(y)
        .data()
        .iter()
        .zip(output_grad.data().iter())
        .map(|(a, b)| a * b)
        .sum()
}

/// Checks analytical gradients against central finite differences, with every
/// input requiring a gradient.
///
/// `func` builds the computation on the given graph from the input leaves and
/// returns the output node; `output_grad` is injected into that output.
pub fn check_grad<F>(
    func: F,
    inputs: &[Dense],
    output_grad: &Dense,
    epsilon: f64,
    abs_tol: f64,
    rel_tol: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&Graph, &[NodeId]) -> NodeId,
{
    let mask = vec![true; inputs.len()];
    check_grad_masked(func, inputs, &mask, output_grad, epsilon, abs_tol, rel_tol)
}

/// Like [`check_grad`], but only inputs whose flag in `requires_grad` is set are
/// created as differentiable leaves and checked; the others must end up without
/// a gradient.
pub fn check_grad_masked<F>(
    func: F,
    inputs: &[Dense],
    requires_grad: &[bool],
    output_grad: &Dense,
    epsilon: f64,
    abs_tol: f64,
    rel_tol: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&Graph, &[NodeId]) -> NodeId,
{
    if requires_grad.len() != inputs.len() {
        return Err(GradCheckError::MaskLength {
            inputs: inputs.len(),
            masks: requires_grad.len(),
        });
    }

    // --- Analytical gradients ---
    let g = Graph::new();
    let xs: Vec<NodeId> = inputs
        .iter()
        .zip(requires_grad.iter())
        .map(|(x, &rg)| g.new_variable(x.clone(), rg))
        .collect();
    let y = func(&g, &xs);
    let y_dims = g.value(y).dims();
    if y_dims != output_grad.dims() {
        return Err(GradCheckError::OutputGradShape {
            expected: y_dims,
            actual: output_grad.dims(),
        });
    }
    g.backward(y, output_grad);

    // --- Numerical gradients ---
    for (input_index, &x) in xs.iter().enumerate() {
        let analytical = g.grad(x);
        if !requires_grad[input_index] {
            if analytical.is_some() {
                return Err(GradCheckError::UnexpectedGrad { input_index });
            }
            continue;
        }
        let analytical = analytical.ok_or(GradCheckError::MissingAnalyticalGrad { input_index })?;

        for element_index in 0..inputs[input_index].size() {
            let mut plus = inputs.to_vec();
            plus[input_index].data_mut()[element_index] += epsilon;
            let mut minus = inputs.to_vec();
            minus[input_index].data_mut()[element_index] -= epsilon;

            let loss_plus = weighted_output(&func, &plus, output_grad);
            let loss_minus = weighted_output(&func, &minus, output_grad);
            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNotFinite {
                    input_index,
                    element_index,
                });
            }

            let a = analytical.data()[element_index];
            if !relative_eq!(a, numerical, epsilon = abs_tol, max_relative = rel_tol) {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical: a,
                    numerical,
                    difference: (a - numerical).abs(),
                });
            }
        }
    }
    Ok(())
}
