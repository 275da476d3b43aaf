use neuragrad_core::nn::{
    deserialize, params, serialize, zero_grad, BiRnn, IndRnn, MergeKind, Processor,
    ProcessorBuilder,
};
use neuragrad_core::nn::init::xavier_uniform;
use neuragrad_core::{Activation, Dense, Graph};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Cursor;

mod common;
use common::{init_logger, variables};

fn birnn(seed: u64) -> BiRnn {
    let m = BiRnn::new(
        IndRnn::new(3, 4, Activation::Tanh),
        IndRnn::new(3, 4, Activation::Tanh),
        MergeKind::Concat,
    );
    let mut rng = StdRng::seed_from_u64(seed);
    for p in params(&m) {
        xavier_uniform(&p, 1.0, &mut rng).unwrap();
    }
    m
}

fn run(m: &BiRnn) -> Vec<Dense> {
    let g = Graph::new();
    let xs = variables(&g, &[&[0.1, 0.2, 0.3], &[-0.4, 0.5, 0.0], &[0.9, -0.1, 0.2]], false);
    let mut p = m.new_proc(&g);
    p.forward(&xs).into_iter().map(|y| g.value(y)).collect()
}

#[test]
fn test_serialized_model_reproduces_outputs() {
    init_logger();
    let src = birnn(42);
    let mut buf = Vec::new();
    let written = serialize(&src, &mut buf).unwrap();

    let dst = birnn(7);
    assert_ne!(run(&src), run(&dst));
    let read = deserialize(&dst, &mut Cursor::new(&buf)).unwrap();
    assert_eq!(read, written);
    assert_eq!(run(&src), run(&dst));
    assert_eq!(run(&src)[0].dims(), (8, 1));
}

#[test]
fn test_backward_fills_every_param_then_zero_grad() {
    init_logger();
    let m = birnn(1);
    let g = Graph::new();
    let xs = variables(&g, &[&[0.1, 0.2, 0.3], &[-0.4, 0.5, 0.0]], false);
    let mut p = m.new_proc(&g);
    let ys = p.forward(&xs);
    for &y in &ys {
        g.propagate_grad(y, &Dense::ones(8, 1));
    }
    g.backward_all();
    assert!(params(&m).iter().all(|p| p.has_grad()));

    zero_grad(&m);
    assert!(params(&m).iter().all(|p| !p.has_grad()));
}
