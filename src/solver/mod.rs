use std::time::Duration;

use crate::{
    errors::SolverError,
    model::{ModelSolution, ParityModel},
};

#[cfg(feature = "goodlp")]
pub mod goodlp;
pub mod highs;
pub mod naive;

#[cfg(feature = "goodlp")]
pub use self::goodlp::GoodLpBackend;
pub use self::highs::HighsBackend;
pub use self::naive::NaiveBackend;

/// A pluggable integer-program backend. An implementation either returns a
/// provably optimal assignment of all model columns or reports why none was
/// obtained. Timeouts and interrupts surface as
/// [`SolverError::UnsolvableModel`], a backend that cannot run at all as
/// [`SolverError::BackendUnavailable`].
pub trait IlpBackend {
    fn name(&self) -> &'static str;

    fn solve_model(
        &self,
        model: &ParityModel,
        timeout: Option<Duration>,
    ) -> Result<ModelSolution, SolverError>;
}
