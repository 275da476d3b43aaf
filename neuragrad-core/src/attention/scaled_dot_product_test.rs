use super::*;
use crate::attention::Qkv;
use crate::utils::testing::{check_data_near, vec_of};
use approx::assert_relative_eq;

fn variables(g: &Graph, rows: &[&[f64]]) -> Vec<NodeId> {
    rows.iter().map(|r| g.new_variable(vec_of(r), true)).collect()
}

fn fixture_dim3(g: &Graph) -> Qkv {
    Qkv::new(
        variables(g, &[&[1.1, 0.0, 2.3], &[2.2, -0.5, 0.3], &[3.2, 0.5, 0.4]]),
        variables(g, &[&[0.0, 1.2, 1.3], &[4.5, 4.3, 0.2], &[2.7, 3.6, 2.1]]),
        variables(g, &[&[1.2, 2.3, 3.4], &[2.2, 8.5, 0.0], &[2.3, 6.5, 3.5]]),
    )
}

fn fixture_dim2(g: &Graph) -> Qkv {
    Qkv::new(
        variables(g, &[&[0.22, 0.3], &[-0.17, 0.24], &[-0.15, 0.23]]),
        variables(g, &[&[1.66, 0.12], &[0.88, -0.02], &[-0.3, -0.46]]),
        variables(
            g,
            &[
                &[0.83, 0.7, -0.25, -0.58],
                &[0.0, 0.2, 0.57, -2.08],
                &[-0.07, 0.0, 0.29, 0.5],
            ],
        ),
    )
}

#[test]
fn test_forward() {
    let g = Graph::new();
    let qkv = fixture_dim3(&g);
    let out = scaled_dot_product_attention(&g, &qkv, &ScaledDotProductConfig::for_dim(3)).unwrap();
    assert_eq!(out.context.len(), 3);
    assert_eq!(out.probs.len(), 3);

    check_data_near(
        g.value(out.context[0]).data(),
        &[2.22875441063165, 6.68411289826994, 2.82497984315079],
        1e-6,
    );
    check_data_near(
        g.value(out.context[1]).data(),
        &[2.20637295180029, 8.15650999969648, 0.539678848469417],
        1e-6,
    );
    check_data_near(
        g.value(out.context[2]).data(),
        &[2.20423303670527, 8.41210390591632, 0.152898186332002],
        1e-6,
    );
    check_data_near(g.value(out.probs[0]).data(), &[0.0473587, 0.1915098, 0.7611315], 1e-6);
    for &p in &out.probs {
        assert_relative_eq!(g.value(p).sum(), 1.0, epsilon = 1e-6);
    }
}

#[test]
fn test_forward_and_backward() {
    let g = Graph::new();
    let qkv = fixture_dim2(&g);
    let out = scaled_dot_product_attention(&g, &qkv, &ScaledDotProductConfig::for_dim(2)).unwrap();

    check_data_near(g.value(out.context[0]).data(), &[0.312291, 0.347165, 0.170855, -0.813202], 1e-6);
    check_data_near(g.value(out.context[1]).data(), &[0.232861, 0.284047, 0.21555, -0.694914], 1e-6);
    check_data_near(g.value(out.context[2]).data(), &[0.236194, 0.28672, 0.21373, -0.700304], 1e-6);
    check_data_near(g.value(out.probs[0]).data(), &[0.398142, 0.342329, 0.259529], 1e-6);
    check_data_near(g.value(out.probs[1]).data(), &[0.310603, 0.333125, 0.356272], 1e-6);
    check_data_near(g.value(out.probs[2]).data(), &[0.314262, 0.333682, 0.352055], 1e-6);

    g.propagate_grad(out.context[0], &vec_of(&[0.7, -0.3, -0.7, -0.5]));
    g.propagate_grad(out.context[1], &vec_of(&[-0.8, -0.5, -0.5, 0.1]));
    g.propagate_grad(out.context[2], &vec_of(&[-0.6, -0.5, 0.2, -0.9]));
    g.backward_all();

    let grad = |x: NodeId| g.grad(x).unwrap();
    check_data_near(grad(qkv.queries[0]).data(), &[0.291064, 0.090078], 1e-6);
    check_data_near(grad(qkv.queries[1]).data(), &[-0.214319, -0.065291], 1e-6);
    check_data_near(grad(qkv.queries[2]).data(), &[0.084357, 0.057063], 1e-6);

    check_data_near(grad(qkv.keys[0]).data(), &[0.06886, -0.025612], 1e-6);
    check_data_near(grad(qkv.keys[1]).data(), &[-0.039958, 0.089393], 1e-6);
    check_data_near(grad(qkv.keys[2]).data(), &[-0.028902, -0.063781], 1e-6);

    check_data_near(
        grad(qkv.values[0]).data(),
        &[-0.15834, -0.431875, -0.371149, -0.450847],
        1e-6,
    );
    check_data_near(
        grad(qkv.values[1]).data(),
        &[-0.22708, -0.436103, -0.339456, -0.438166],
        1e-6,
    );
    check_data_near(
        grad(qkv.values[2]).data(),
        &[-0.31458, -0.432022, -0.289395, -0.410987],
        1e-6,
    );
}

#[test]
fn test_causal_mask() {
    let g = Graph::new();
    let qkv = fixture_dim3(&g);
    let config = ScaledDotProductConfig::for_dim(3).with_mask(Mask::Causal);
    let out = scaled_dot_product_attention(&g, &qkv, &config).unwrap();

    // The first query only sees the first key, so it copies the first value.
    check_data_near(g.value(out.context[0]).data(), &[1.2, 2.3, 3.4], 1e-9);
    check_data_near(
        g.value(out.context[1]).data(),
        &[2.1903428168728465, 8.440125464611649, 0.03283442263232137],
        1e-6,
    );
    check_data_near(
        g.value(out.context[2]).data(),
        &[2.20423303670527, 8.41210390591632, 0.152898186332002],
        1e-6,
    );
    assert!(g.value(out.probs[0]).data()[2] < 1e-12);
}

#[test]
fn test_masking_every_key_stays_finite() {
    let g = Graph::new();
    let qkv = fixture_dim3(&g);
    let config = ScaledDotProductConfig::for_dim(3).with_mask(Mask::Keys(vec![0, 1, 2]));
    let out = scaled_dot_product_attention(&g, &qkv, &config).unwrap();
    for &c in &out.context {
        assert!(g.value(c).data().iter().all(|x| x.is_finite()));
    }
}

#[test]
fn test_invalid_inputs() {
    let g = Graph::new();
    let mut qkv = fixture_dim3(&g);
    let config = ScaledDotProductConfig::for_dim(3).with_mask(Mask::Keys(vec![3]));
    assert!(matches!(
        scaled_dot_product_attention(&g, &qkv, &config),
        Err(NeuraGradError::IndexOutOfBounds { index: 3, len: 3 })
    ));

    let config = ScaledDotProductConfig {
        scale_factor: f64::NAN,
        mask: Mask::None,
    };
    assert!(matches!(
        scaled_dot_product_attention(&g, &qkv, &config),
        Err(NeuraGradError::InvalidScaleFactor(_))
    ));

    qkv.values.pop();
    assert!(matches!(
        scaled_dot_product_attention(&g, &qkv, &ScaledDotProductConfig::default()),
        Err(NeuraGradError::SequenceLengthMismatch { queries: 3, keys: 3, values: 2 })
    ));
}

#[test]
fn test_empty_sequence() {
    let g = Graph::new();
    let out =
        scaled_dot_product_attention(&g, &Qkv::default(), &ScaledDotProductConfig::default()).unwrap();
    assert!(out.context.is_empty() && out.probs.is_empty());
    assert!(g.is_empty());
}
