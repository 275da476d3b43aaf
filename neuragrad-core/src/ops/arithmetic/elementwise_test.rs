use crate::autograd::grad_check::check_grad;
use crate::autograd::Graph;
use crate::error::NeuraGradError;
use crate::mat::Dense;
use crate::ops::arithmetic::{Add, Div, Prod, Sub};
use approx::assert_relative_eq;

fn m(rows: usize, cols: usize, data: Vec<f64>) -> Dense {
    Dense::new(rows, cols, data).unwrap()
}

#[test]
fn test_add_forward() {
    let g = Graph::new();
    let a = g.new_variable(m(2, 2, vec![1.0, 2.0, 3.0, 4.0]), false);
    let b = g.new_variable(m(2, 2, vec![0.5, -2.0, 1.0, 0.0]), false);
    let y = g.apply(Add, &[a, b]);
    assert_eq!(g.value(y).data(), &[1.5, 0.0, 4.0, 4.0]);
}

#[test]
fn test_vectors_of_same_size_take_first_shape() {
    let g = Graph::new();
    let col = g.new_variable(Dense::new_vec(vec![1.0, 2.0, 3.0]), true);
    let row = g.new_variable(m(1, 3, vec![10.0, 20.0, 30.0]), true);
    let y = g.apply(Sub, &[col, row]);
    assert_eq!(g.value(y).dims(), (3, 1));
    assert_eq!(g.value(y).data(), &[-9.0, -18.0, -27.0]);

    g.backward(y, &Dense::new_vec(vec![1.0, 1.0, 1.0]));
    assert_eq!(g.grad(col).unwrap().dims(), (3, 1));
    assert_eq!(g.grad(row).unwrap().dims(), (1, 3));
    assert_eq!(g.grad(row).unwrap().data(), &[-1.0, -1.0, -1.0]);
}

#[test]
fn test_incompatible_shapes() {
    let g = Graph::new();
    let a = g.new_variable(Dense::zeros(2, 3), false);
    let b = g.new_variable(Dense::zeros(3, 2), false);
    let err = g.try_apply(Prod, &[a, b]).unwrap_err();
    assert!(matches!(err, NeuraGradError::IncompatibleShapes { .. }));
    // Nothing was registered for the failed application.
    assert_eq!(g.len(), 2);
}

#[test]
#[should_panic(expected = "prod")]
fn test_apply_panics_on_incompatible_shapes() {
    let g = Graph::new();
    let a = g.new_variable(Dense::zeros(2, 3), false);
    let b = g.new_variable(Dense::zeros(3, 2), false);
    g.apply(Prod, &[a, b]);
}

#[test]
fn test_add_backward() {
    let inputs = vec![
        m(2, 3, vec![1.0, -2.0, 3.0, 0.5, 0.1, -0.7]),
        m(2, 3, vec![0.3, 0.2, -1.0, 2.0, 1.5, 0.9]),
    ];
    let gy = m(2, 3, vec![0.1, 0.2, 0.3, -0.4, 0.5, -0.6]);
    check_grad(|g, xs| g.apply(Add, xs), &inputs, &gy, 1e-6, 1e-7, 1e-5).unwrap();
}

#[test]
fn test_sub_backward() {
    let inputs = vec![
        Dense::new_vec(vec![1.0, 2.0, -3.0]),
        Dense::new_vec(vec![-0.5, 0.25, 4.0]),
    ];
    let gy = Dense::new_vec(vec![1.0, -2.0, 0.5]);
    check_grad(|g, xs| g.apply(Sub, xs), &inputs, &gy, 1e-6, 1e-7, 1e-5).unwrap();
}

#[test]
fn test_prod_backward() {
    let inputs = vec![
        m(2, 2, vec![1.0, -2.0, 3.0, 0.5]),
        m(2, 2, vec![0.3, 0.2, -1.0, 2.0]),
    ];
    let gy = m(2, 2, vec![0.7, -0.3, 0.2, 1.0]);
    check_grad(|g, xs| g.apply(Prod, xs), &inputs, &gy, 1e-6, 1e-7, 1e-5).unwrap();
}

#[test]
fn test_div_backward() {
    let inputs = vec![
        m(2, 2, vec![1.0, -2.0, 3.0, 0.5]),
        m(2, 2, vec![0.8, 1.5, -2.0, 4.0]),
    ];
    let gy = m(2, 2, vec![0.7, -0.3, 0.2, 1.0]);
    check_grad(|g, xs| g.apply(Div, xs), &inputs, &gy, 1e-6, 1e-7, 1e-5).unwrap();
}

#[test]
fn test_div_by_zero_is_ieee() {
    let g = Graph::new();
    let a = g.new_variable(Dense::new_vec(vec![1.0, -1.0]), false);
    let b = g.new_variable(Dense::new_vec(vec![0.0, 0.0]), false);
    let y = g.value(g.apply(Div, &[a, b]));
    assert_eq!(y.data()[0], f64::INFINITY);
    assert_eq!(y.data()[1], f64::NEG_INFINITY);
}

#[test]
fn test_shared_operand_accumulates() {
    // y = x ⊙ x, dy/dx = 2x
    let g = Graph::new();
    let x = g.new_variable(Dense::new_vec(vec![1.5, -2.0]), true);
    let y = g.apply(Prod, &[x, x]);
    g.backward(y, &Dense::new_vec(vec![1.0, 1.0]));
    let gx = g.grad(x).unwrap();
    assert_relative_eq!(gx.data()[0], 3.0);
    assert_relative_eq!(gx.data()[1], -4.0);
}
