use neuragrad_core::{Dense, Graph, NodeId};

/// Initializes `env_logger` once per test binary.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Registers each slice as a column-vector variable.
#[allow(dead_code)]
pub fn variables(g: &Graph, rows: &[&[f64]], requires_grad: bool) -> Vec<NodeId> {
    rows.iter()
        .map(|r| g.new_variable(Dense::new_vec(r.to_vec()), requires_grad))
        .collect()
}
