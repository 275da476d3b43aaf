use approx::assert_relative_eq;
use neuragrad_core::autograd::grad_check::check_grad;
use neuragrad_core::{Activation, Dense, Graph};

mod common;
use common::init_logger;

#[test]
fn test_diamond_gradient_is_sum_of_paths() {
    init_logger();
    // x feeds both tanh(x) and exp(x); y = tanh(x) ⊙ exp(x).
    let g = Graph::new();
    let x = g.new_variable(Dense::new_vec(vec![0.3, -0.8]), true);
    let a = g.tanh(x);
    let b = g.exp(x);
    let y = g.prod(a, b);
    g.backward(y, &Dense::new_vec(vec![1.0, 1.0]));

    let gx = g.grad(x).unwrap();
    for (i, &v) in [0.3f64, -0.8].iter().enumerate() {
        let expected = (1.0 - v.tanh().powi(2)) * v.exp() + v.tanh() * v.exp();
        assert_relative_eq!(gx.data()[i], expected, epsilon = 1e-12);
    }
}

#[test]
fn test_composite_expression_matches_finite_differences() {
    init_logger();
    let inputs = vec![
        Dense::new(2, 3, vec![0.2, -0.4, 0.9, 1.1, 0.05, -0.6]).unwrap(),
        Dense::new_vec(vec![0.7, -1.3, 0.4]),
        Dense::new_vec(vec![0.1, 0.2]),
    ];
    let gy = Dense::new_scalar(1.0);
    check_grad(
        |g, xs| {
            let h = g.add(g.mul(xs[0], xs[1]), xs[2]);
            let p = g.softmax(g.invoke(Activation::Elu(0.7), h));
            let s = g.dot(p, g.sigmoid(h));
            g.reduce_sum(g.sub(s, g.max(g.min(s, g.new_scalar(0.9)), g.new_scalar(-0.9))))
        },
        &inputs,
        &gy,
        1e-6,
        1e-6,
        1e-5,
    )
    .unwrap();
}

#[test]
fn test_multiple_outputs_then_backward_all() {
    init_logger();
    let g = Graph::new();
    let x = g.new_variable(Dense::new_vec(vec![1.0, 2.0]), true);
    let two = g.new_scalar(2.0);
    let y1 = g.prod_scalar(x, two);
    let y2 = g.neg(x);
    g.propagate_grad(y1, &Dense::new_vec(vec![1.0, 1.0]));
    g.propagate_grad(y2, &Dense::new_vec(vec![0.5, 0.5]));
    g.backward_all();
    assert_eq!(g.grad(x).unwrap().data(), &[1.5, 1.5]);
}
