use crate::autograd::grad_check::{check_grad, check_grad_masked};
use crate::autograd::Graph;
use crate::error::NeuraGradError;
use crate::mat::Dense;
use crate::ops::arithmetic::{AddScalar, DivScalar, ProdScalar, SubScalar};
use approx::assert_relative_eq;

fn inputs() -> Vec<Dense> {
    vec![
        Dense::new(2, 2, vec![1.0, -2.0, 0.5, 3.0]).unwrap(),
        Dense::new_scalar(1.7),
    ]
}

fn gy() -> Dense {
    Dense::new(2, 2, vec![0.4, -0.1, 1.2, 0.3]).unwrap()
}

#[test]
fn test_scalar_forward() {
    let g = Graph::new();
    let x = g.new_variable(Dense::new_vec(vec![1.0, 2.0]), false);
    let s = g.new_scalar(4.0);
    assert_eq!(g.value(g.apply(AddScalar, &[x, s])).data(), &[5.0, 6.0]);
    assert_eq!(g.value(g.apply(SubScalar, &[x, s])).data(), &[-3.0, -2.0]);
    assert_eq!(g.value(g.apply(ProdScalar, &[x, s])).data(), &[4.0, 8.0]);
    assert_eq!(g.value(g.apply(DivScalar, &[x, s])).data(), &[0.25, 0.5]);
}

#[test]
fn test_second_operand_must_be_scalar() {
    let g = Graph::new();
    let x = g.new_variable(Dense::new_vec(vec![1.0, 2.0]), false);
    let err = g.try_apply(AddScalar, &[x, x]).unwrap_err();
    assert!(matches!(err, NeuraGradError::NotScalar { shape: (2, 1), .. }));
}

#[test]
fn test_add_sub_prod_scalar_backward() {
    check_grad(|g, xs| g.apply(AddScalar, xs), &inputs(), &gy(), 1e-6, 1e-7, 1e-5).unwrap();
    check_grad(|g, xs| g.apply(SubScalar, xs), &inputs(), &gy(), 1e-6, 1e-7, 1e-5).unwrap();
    check_grad(|g, xs| g.apply(ProdScalar, xs), &inputs(), &gy(), 1e-6, 1e-7, 1e-5).unwrap();
}

#[test]
fn test_scalar_operand_gradient() {
    let g = Graph::new();
    let x = g.new_variable(Dense::new_vec(vec![2.0, -3.0]), true);
    let s = g.new_variable(Dense::new_scalar(0.5), true);
    let y = g.apply(ProdScalar, &[x, s]);
    g.backward(y, &Dense::new_vec(vec![1.0, 2.0]));
    assert_relative_eq!(g.grad(s).unwrap().data()[0], -4.0);
    assert_eq!(g.grad(x).unwrap().data(), &[0.5, 1.0]);
}

#[test]
fn test_div_scalar_backward_skips_divisor() {
    check_grad_masked(
        |g, xs| g.apply(DivScalar, xs),
        &inputs(),
        &[true, false],
        &gy(),
        1e-6,
        1e-7,
        1e-5,
    )
    .unwrap();

    let g = Graph::new();
    let x = g.new_variable(Dense::new_vec(vec![2.0, -3.0]), true);
    let s = g.new_variable(Dense::new_scalar(4.0), true);
    let y = g.apply(DivScalar, &[x, s]);
    g.backward(y, &Dense::new_vec(vec![1.0, 1.0]));
    assert_eq!(g.grad(x).unwrap().data(), &[0.25, 0.25]);
    assert!(g.grad(s).is_none());
}
