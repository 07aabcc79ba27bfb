use thiserror::Error;

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: std::error::Error> {
    fn is_correct(&self) -> Result<(), E>;
}

/// Errors surfaced by the solving pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The input violates a structural requirement (self-loop, endpoint out
    /// of range, empty vertex or edge set)
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// The backend terminated without an optimal solution
    #[error("unsolvable model: {0}")]
    UnsolvableModel(String),

    /// The backend cannot be used at all (not compiled in, instance over its
    /// limits)
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
}
