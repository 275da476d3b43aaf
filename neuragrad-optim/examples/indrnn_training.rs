//! Trains a small IndRNN + linear read-out to output the running mean of a
//! scalar sequence.
//!
//! Run with `RUST_LOG=info cargo run -p neuragrad-optim --example indrnn_training`.

use neuragrad_core::nn::init::xavier_uniform;
use neuragrad_core::nn::{
    params, track_params, Field, IndRnn, Linear, Model, Processor, ProcessorBuilder,
};
use neuragrad_core::{Activation, Dense, Graph, NodeId};
use neuragrad_optim::{Adam, AdamConfig, GradientDescent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HIDDEN: usize = 8;
const SEQ_LEN: usize = 5;
const EPOCHS: usize = 300;

#[derive(Debug)]
struct Net {
    rnn: IndRnn,
    out: Linear,
}

impl Model for Net {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::Model {
                name: "Rnn",
                model: &self.rnn,
            },
            Field::Model {
                name: "Out",
                model: &self.out,
            },
        ]
    }
}

/// Squared error between the last read-out and `target`.
fn loss(g: &Graph, net: &Net, xs: &[f64], target: f64) -> NodeId {
    let mut rnn = net.rnn.new_proc(g);
    let mut out = net.out.new_proc(g);
    let inputs: Vec<NodeId> = xs.iter().map(|&x| g.new_scalar(x)).collect();
    let hidden = rnn.forward(&inputs);
    let last = hidden[hidden.len() - 1];
    let y = out.forward(&[last])[0];
    let diff = g.sub(y, g.new_scalar(target));
    g.reduce_sum(g.prod(diff, diff))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut rng = StdRng::seed_from_u64(2024);

    let net = Net {
        rnn: IndRnn::new(1, HIDDEN, Activation::Tanh),
        out: Linear::new(HIDDEN, 1, Activation::Identity),
    };
    for p in params(&net) {
        xavier_uniform(&p, 1.0, &mut rng)?;
    }

    let mut optimizer = GradientDescent::new(Adam::new(AdamConfig {
        learning_rate: 0.01,
        ..Default::default()
    })?);
    track_params(&net, &mut optimizer);

    for epoch in 0..EPOCHS {
        let xs: Vec<f64> = (0..SEQ_LEN).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let target = xs.iter().sum::<f64>() / SEQ_LEN as f64;

        let g = Graph::new();
        let l = loss(&g, &net, &xs, target);
        g.backward(l, &Dense::new_scalar(1.0));
        optimizer.step()?;
        optimizer.zero_grad();

        if epoch % 50 == 0 {
            log::info!("epoch {epoch}: loss {:.6}", g.value(l).scalar()?);
        }
    }

    let g = Graph::new();
    let xs = [0.5, -0.2, 0.9, 0.1, -0.3];
    let l = loss(&g, &net, &xs, xs.iter().sum::<f64>() / xs.len() as f64);
    println!("final loss on a held-out sequence: {:.6}", g.value(l).scalar()?);
    Ok(())
}
