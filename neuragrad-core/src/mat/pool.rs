use super::Dense;
use std::collections::HashMap;

/// Maximum number of idle buffers kept per shape.
const MAX_IDLE_PER_SHAPE: usize = 16;

/// Counters describing a [`MatrixPool`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Buffers created because no idle buffer of the right shape existed.
    pub allocated: usize,
    /// Buffers handed out again after being released.
    pub reused: usize,
    /// Idle buffers currently held by the pool.
    pub available: usize,
}

/// Scratch-buffer pool owned by a graph.
///
/// Buffers are keyed by shape. `acquire_zeros` always returns a zero-filled matrix;
/// `release` gives a buffer back. The pool is never shared between graphs.
#[derive(Debug, Default)]
pub struct MatrixPool {
    idle: HashMap<(usize, usize), Vec<Dense>>,
    stats: PoolStats,
}

impl MatrixPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a zero-filled `rows x cols` matrix, reusing an idle buffer when possible.
    pub fn acquire_zeros(&mut self, rows: usize, cols: usize) -> Dense {
        match self.idle.get_mut(&(rows, cols)).and_then(Vec::pop) {
            Some(mut m) => {
                m.fill(0.0);
                self.stats.reused += 1;
                self.stats.available -= 1;
                m
            }
            None => {
                self.stats.allocated += 1;
                Dense::zeros(rows, cols)
            }
        }
    }

    /// Gives `m` back to the pool. Buffers beyond the per-shape limit are dropped.
    pub fn release(&mut self, m: Dense) {
        let bucket = self.idle.entry(m.dims()).or_default();
        if bucket.len() < MAX_IDLE_PER_SHAPE {
            bucket.push(m);
            self.stats.available += 1;
        }
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Drops every idle buffer.
    pub fn clear(&mut self) {
        self.idle.clear();
        self.stats.available = 0;
    }
}
