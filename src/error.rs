use thiserror::Error;

/// Fatal construction-time failures: bad annealing parameters or problem
/// data the solver cannot run on. Per-iteration outcomes (discarded moves,
/// infeasible candidates) are handled inside the search and never surface
/// here.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid annealing parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("cost matrix must be {expected}x{expected}: {detail}")]
    MalformedCostMatrix { expected: usize, detail: String },

    #[error("edge cost {from}->{to} must be finite and non-negative, got {value}")]
    InvalidEdgeCost { from: usize, to: usize, value: f64 },

    #[error("demand table covers {got} nodes, instance has {expected}")]
    DemandTableMismatch { expected: usize, got: usize },

    #[error("node index {index} is out of range for {nodes} nodes")]
    NodeOutOfRange { index: usize, nodes: usize },

    #[error("node index {index} is listed as depot or customer more than once")]
    DuplicateNodeRole { index: usize },

    #[error("vehicle capacity must be positive")]
    ZeroCapacity,
}
