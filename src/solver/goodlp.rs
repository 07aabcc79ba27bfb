use std::time::Duration;

use good_lp::{
    default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
};
use itertools::Itertools;
use log::warn;

use crate::{
    errors::SolverError,
    model::{ModelSolution, ParityModel, RowKind},
    solver::IlpBackend,
};

/// Backend driving whatever solver the `good_lp` facade selects at compile
/// time. Only available with the `goodlp` feature.
#[derive(Clone, Copy, Debug, Default)]
pub struct GoodLpBackend;

impl IlpBackend for GoodLpBackend {
    fn name(&self) -> &'static str {
        "goodlp"
    }

    fn solve_model(
        &self,
        model: &ParityModel,
        timeout: Option<Duration>,
    ) -> Result<ModelSolution, SolverError> {
        // the facade exposes no portable time limit
        if timeout.is_some() {
            warn!("the good_lp backend ignores the requested time limit");
        }

        let mut vars = ProblemVariables::new();
        let columns = (0..model.number_of_columns())
            .map(|_| vars.add(variable().integer().min(0)))
            .collect_vec();

        let objective: Expression = columns
            .iter()
            .enumerate()
            .map(|(var, &col)| model.objective_coefficient(var) * col)
            .sum();

        let mut problem = vars.minimise(objective).using(default_solver);

        for row in model.rows() {
            let lhs: Expression = row
                .terms
                .iter()
                .map(|&(var, coeff)| coeff * columns[var])
                .sum();

            problem = match row.kind {
                RowKind::Parity => problem.with(lhs.eq(2)),
                RowKind::Coverage => problem.with(lhs.geq(1)),
            };
        }

        let solved = problem.solve().map_err(|err| match err {
            ResolutionError::Infeasible => {
                SolverError::UnsolvableModel("good_lp reports the model as infeasible".to_string())
            }
            ResolutionError::Unbounded => {
                SolverError::UnsolvableModel("good_lp reports the model as unbounded".to_string())
            }
            other => SolverError::UnsolvableModel(format!("good_lp resolution failed: {other}")),
        })?;

        let raw = columns.iter().map(|&col| solved.value(col)).collect_vec();
        Ok(ModelSolution::from_float_columns(model, &raw))
    }
}
