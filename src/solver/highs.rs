use std::time::Duration;

use highs::{HighsModelStatus, Model, RowProblem};
use itertools::Itertools;

use crate::{
    errors::SolverError,
    model::{ModelSolution, ParityModel, RowKind},
    solver::IlpBackend,
};

/// Backend driving the bundled HiGHS solver
#[derive(Clone, Copy, Debug, Default)]
pub struct HighsBackend;

impl IlpBackend for HighsBackend {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve_model(
        &self,
        model: &ParityModel,
        timeout: Option<Duration>,
    ) -> Result<ModelSolution, SolverError> {
        // TODO: RowProblem gets converted into a ColProblem internally --- encode it directly as such
        let mut pb = RowProblem::default();

        let vars = (0..model.number_of_columns())
            .map(|var| pb.add_integer_column(model.objective_coefficient(var), 0..))
            .collect_vec();

        for row in model.rows() {
            let terms = row.terms.iter().map(|&(var, coeff)| (vars[var], coeff));
            match row.kind {
                RowKind::Parity => pb.add_row(2..=2, terms),
                RowKind::Coverage => pb.add_row(1.., terms),
            };
        }

        let mut ilp = Model::new(pb);
        ilp.make_quiet();
        if let Some(tme) = timeout {
            ilp.set_option("time_limit", tme.as_secs_f64());
        }

        #[cfg(not(feature = "par"))]
        {
            ilp.set_option("parallel", "off");
            ilp.set_option("threads", "1");
        }
        ilp.set_sense(highs::Sense::Minimise);

        let solved = ilp.solve();
        match solved.status() {
            HighsModelStatus::Optimal => {}
            HighsModelStatus::Infeasible => {
                return Err(SolverError::UnsolvableModel(
                    "highs reports the model as infeasible".to_string(),
                ));
            }
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                return Err(SolverError::UnsolvableModel(
                    "highs reports the model as unbounded".to_string(),
                ));
            }
            HighsModelStatus::ReachedTimeLimit => {
                return Err(SolverError::UnsolvableModel(
                    "time limit reached before proving optimality".to_string(),
                ));
            }
            e => {
                return Err(SolverError::UnsolvableModel(format!(
                    "unhandled highs status: {e:?}"
                )));
            }
        };

        Ok(ModelSolution::from_float_columns(
            model,
            solved.get_solution().columns(),
        ))
    }
}
