use std::io;
use thiserror::Error;

/// Custom error type for the NeuraGrad framework.
///
/// Shape errors are reported by the container and by `Function::forward`; the graph
/// turns them into a fatal contract violation unless the checked `Graph::try_apply`
/// is used. Stream errors always carry the number of bytes already transferred.
#[derive(Error, Debug)]
pub enum NeuraGradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
        operation: String,
    },

    #[error("Incompatible shapes for operation {operation}: {shape1:?} and {shape2:?}")]
    IncompatibleShapes {
        shape1: (usize, usize),
        shape2: (usize, usize),
        operation: String,
    },

    #[error("Operation {operation} expects a scalar operand, got shape {shape:?}")]
    NotScalar {
        shape: (usize, usize),
        operation: String,
    },

    #[error("Operation {operation} expects {expected} operands, got {actual}")]
    ArityMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Matrix creation error: data length {data_len} does not match shape ({rows}, {cols})")]
    MatrixCreationError {
        data_len: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Sequence length mismatch: {queries} queries, {keys} keys, {values} values")]
    SequenceLengthMismatch {
        queries: usize,
        keys: usize,
        values: usize,
    },

    #[error("Invalid epsilon {0}: must be finite and greater than zero")]
    InvalidEpsilon(f64),

    #[error("Invalid scale factor {0}: must be finite")]
    InvalidScaleFactor(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O failure after {transferred} bytes: {source}")]
    Io {
        transferred: usize,
        #[source]
        source: io::Error,
    },

    #[error("Stream holds a {actual:?} matrix, expected {expected:?} (after {transferred} bytes)")]
    StreamShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
        transferred: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NeuraGradError>;

impl NeuraGradError {
    /// Number of bytes moved before a stream error occurred.
    /// Returns `None` for errors unrelated to (de)serialization.
    pub fn transferred(&self) -> Option<usize> {
        match self {
            NeuraGradError::Io { transferred, .. }
            | NeuraGradError::StreamShapeMismatch { transferred, .. } => Some(*transferred),
            _ => None,
        }
    }

    /// Shifts the byte count of a stream error by `base`, the bytes transferred by
    /// earlier successful writes/reads on the same stream.
    pub(crate) fn after(self, base: usize) -> Self {
        match self {
            NeuraGradError::Io {
                transferred,
                source,
            } => NeuraGradError::Io {
                transferred: base + transferred,
                source,
            },
            NeuraGradError::StreamShapeMismatch {
                expected,
                actual,
                transferred,
            } => NeuraGradError::StreamShapeMismatch {
                expected,
                actual,
                transferred: base + transferred,
            },
            other => other,
        }
    }
}
