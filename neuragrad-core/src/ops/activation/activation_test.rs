use crate::autograd::grad_check::check_grad;
use crate::autograd::Graph;
use crate::mat::Dense;
use crate::ops::activation::{Activation, Softmax, Unary};
use approx::assert_relative_eq;

const ALL: [Activation; 11] = [
    Activation::Identity,
    Activation::Tanh,
    Activation::Sigmoid,
    Activation::ReLU,
    Activation::Elu(0.5),
    Activation::PositiveElu,
    Activation::Exp,
    Activation::Log,
    Activation::Neg,
    Activation::Abs,
    Activation::Softsign,
];

#[test]
fn test_forward_values() {
    assert_eq!(Activation::ReLU.eval(-1.0), 0.0);
    assert_eq!(Activation::ReLU.eval(2.5), 2.5);
    assert_relative_eq!(Activation::PositiveElu.eval(-1.0), (-1.0f64).exp());
    assert_eq!(Activation::PositiveElu.eval(2.0), 3.0);
    assert_relative_eq!(Activation::Softsign.eval(3.0), 0.75);
    assert_eq!(Activation::Neg.eval(4.0), -4.0);
    assert_relative_eq!(Activation::Sigmoid.eval(0.0), 0.5);
}

#[test]
fn test_backward_matches_finite_differences() {
    // Strictly positive inputs away from kinks keep Log and ReLU/Abs differentiable.
    let positive = vec![Dense::new_vec(vec![0.3, 1.7, 0.9, 2.4])];
    // Mixed signs for the activations defined everywhere.
    let mixed = vec![Dense::new_vec(vec![-1.3, 0.4, -0.2, 2.1])];
    let gy = Dense::new_vec(vec![0.5, -1.0, 2.0, 0.25]);
    for act in ALL {
        let inputs = if act == Activation::Log { &positive } else { &mixed };
        check_grad(
            |g, xs| g.apply(Unary(act), xs),
            inputs,
            &gy,
            1e-6,
            1e-6,
            1e-5,
        )
        .unwrap_or_else(|e| panic!("{}: {}", act, e));
    }
}

#[test]
fn test_parse_names() {
    for act in ALL {
        let parsed: Activation = act.name().parse().unwrap();
        match act {
            Activation::Elu(_) => assert_eq!(parsed, Activation::Elu(1.0)),
            _ => assert_eq!(parsed, act),
        }
    }
    assert_eq!("ReLU".parse::<Activation>().unwrap(), Activation::ReLU);
    assert!("swish".parse::<Activation>().is_err());
}

#[test]
fn test_softmax_forward() {
    let g = Graph::new();
    let x = g.new_variable(Dense::new_vec(vec![1.0, 2.0, 3.0]), false);
    let y = g.value(g.apply(Softmax, &[x]));
    assert_eq!(y.dims(), (3, 1));
    assert_relative_eq!(y.sum(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(y.data()[0], 0.09003057317038046, epsilon = 1e-12);
    assert_relative_eq!(y.data()[2], 0.6652409557748219, epsilon = 1e-12);
}

#[test]
fn test_softmax_backward() {
    let inputs = vec![Dense::new_vec(vec![0.2, -1.0, 0.7, 1.5])];
    let gy = Dense::new_vec(vec![0.3, -0.4, 1.2, 0.1]);
    check_grad(|g, xs| g.apply(Softmax, xs), &inputs, &gy, 1e-6, 1e-7, 1e-5).unwrap();
}
