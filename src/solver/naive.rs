use std::time::{Duration, Instant};

use itertools::Itertools;

use crate::{
    errors::SolverError,
    graph::Weight,
    model::{ModelSolution, ParityModel, RowKind},
    solver::IlpBackend,
    utils::signal_handling,
};

/// Exhaustive reference backend intended for cross-checking on tiny
/// instances. It enumerates all assignments traversing every edge once or
/// twice in forward direction; reducing any column by two keeps all rows
/// satisfied, so this box always contains an optimal assignment. Ties are
/// broken towards the first assignment found, i.e. the lowest mask.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaiveBackend;

/// The enumeration visits 2^m assignments
const MAX_EDGES: usize = 25;

impl IlpBackend for NaiveBackend {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn solve_model(
        &self,
        model: &ParityModel,
        timeout: Option<Duration>,
    ) -> Result<ModelSolution, SolverError> {
        let m = model.number_of_edges();
        if m > MAX_EDGES {
            return Err(SolverError::BackendUnavailable(format!(
                "the naive backend refuses to enumerate 2^{m} assignments (limit: {MAX_EDGES} edges)"
            )));
        }

        let start = Instant::now();

        let edge_weights = (0..m)
            .map(|i| model.column_weight(model.forward_column(i)))
            .collect_vec();
        let base_objective: Weight = edge_weights.iter().sum();

        let mut best: Option<Vec<u64>> = None;
        let mut best_objective = Weight::MAX;

        'assignments: for mask in 0u64..(1u64 << m) {
            if mask % 1024 == 0
                && (signal_handling::received_ctrl_c()
                    || timeout.is_some_and(|tme| start.elapsed() > tme))
            {
                return Err(SolverError::UnsolvableModel(
                    "the enumeration was interrupted before completing".to_string(),
                ));
            }

            let mut objective = base_objective;
            {
                let mut bits = mask;
                while bits != 0 {
                    objective += edge_weights[bits.trailing_zeros() as usize];
                    bits &= bits - 1;
                }
            }

            if objective >= best_objective {
                continue;
            }

            let mut values = vec![0u64; model.number_of_columns()];
            for i in 0..m {
                values[model.forward_column(i)] = 1 + ((mask >> i) & 1);
            }

            for row in model.rows() {
                match row.kind {
                    RowKind::Parity => {
                        let incidence: u64 = row
                            .terms
                            .iter()
                            .filter(|&&(_, coeff)| coeff > 0.0)
                            .map(|&(var, _)| values[var])
                            .sum();

                        if incidence < 2 || incidence % 2 == 1 {
                            continue 'assignments;
                        }

                        let slack = row
                            .terms
                            .iter()
                            .find(|&&(_, coeff)| coeff < 0.0)
                            .map(|&(var, _)| var)
                            .expect("parity rows carry a slack term");
                        values[slack] = incidence / 2 - 1;
                    }
                    // one or two traversals always cover the edge
                    RowKind::Coverage => {}
                }
            }

            debug_assert_eq!(model.objective_value(&values), objective);

            best_objective = objective;
            best = Some(values);
        }

        let values = best.expect("traversing every edge twice is always feasible");
        Ok(ModelSolution::new(model, values))
    }
}
