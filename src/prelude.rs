use thiserror::Error;

/// Error type for chain_nn
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Indicates some dimension is incorrect in a Matrix operation.
    #[error("dimension mismatch in {op}: {lhs:?} vs {rhs:?}")]
    Dimension {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("layer `{label}` must have at least one unit")]
    InvalidSize { label: String },

    #[error("invalid weight bounds [{min}, {max})")]
    InvalidBounds { min: f64, max: f64 },

    #[error("layer `{label}` has non-positive learning rate {rate}")]
    InvalidLearningRate { label: String, rate: f64 },

    /// A buffer was read before the call order wrote it.
    #[error("layer `{label}` read `{field}` before it was written")]
    Unset {
        label: String,
        field: &'static str,
    },

    #[error("layer `{label}` has no outgoing weights")]
    Unconnected { label: String },

    #[error("layer `{label}` has no predecessor")]
    NoPredecessor { label: String },

    #[error("layer `{label}` is not an input layer")]
    NotInput { label: String },

    #[error("need {needed} weights, got {got}")]
    NotEnoughWeights { needed: usize, got: usize },

    #[error("a network needs at least 2 layers, got {0}")]
    TooFewLayers(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
