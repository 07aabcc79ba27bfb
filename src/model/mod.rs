//! Integer program deciding how often each edge is traversed in each
//! direction.
//!
//! Per edge instance there are two non-negative integer columns, one per
//! direction, both carrying the edge weight as objective coefficient.
//! Behind them sit `n + 2` slack columns with objective zero; the two
//! trailing ones are reserved by the solution layout and never referenced
//! by any row. A vertex of odd degree `u` contributes the equality
//!
//! ```text
//!   sum of direction columns incident to u  -  2 k_u  =  2
//! ```
//!
//! forcing an even incidence of at least two, while vertices of even degree
//! stay unconstrained. Every edge instance contributes the coverage row
//! `forward + backward >= 1`.

use crate::{
    errors::{InvariantCheck, SolverError},
    graph::*,
};

pub type VarId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// Equality with right-hand side 2
    Parity,
    /// Lower bound with right-hand side 1
    Coverage,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinearRow {
    pub kind: RowKind,
    pub terms: Vec<(VarId, f64)>,
}

/// The assembled program. Column order is fixed: the two direction columns
/// of edge `i` are `2i` (forward) and `2i + 1` (backward), followed by one
/// slack column per vertex and the two reserved ones.
pub struct ParityModel {
    column_weights: Vec<Weight>,
    rows: Vec<LinearRow>,
    num_edges: usize,
    num_slack_columns: usize,
}

impl ParityModel {
    pub fn try_new<G>(graph: &G) -> Result<Self, SolverError>
    where
        G: GraphNodeOrder + GraphDegrees + WeightedEdgeList,
    {
        if graph.is_empty() {
            return Err(SolverError::InvalidGraph(
                "the vertex set is empty".to_string(),
            ));
        }

        if graph.has_no_edges() {
            return Err(SolverError::InvalidGraph(
                "the edge set is empty".to_string(),
            ));
        }

        let num_edges = graph.edges().len();
        let num_slack_columns = graph.len() + 2;

        let mut column_weights = Vec::with_capacity(2 * num_edges + num_slack_columns);
        for e in graph.edges() {
            column_weights.push(e.weight);
            column_weights.push(e.weight);
        }
        column_weights.resize(2 * num_edges + num_slack_columns, 0);

        let mut model = Self {
            column_weights,
            rows: Vec::with_capacity(num_edges + graph.len()),
            num_edges,
            num_slack_columns,
        };

        for u in graph.odd_vertices() {
            let mut terms = Vec::new();
            for (i, e) in graph.edges().iter().enumerate() {
                if e.u == u || e.v == u {
                    terms.push((model.forward_column(i), 1.0));
                    terms.push((model.backward_column(i), 1.0));
                }
            }
            terms.push((model.slack_column(u), -2.0));

            model.rows.push(LinearRow {
                kind: RowKind::Parity,
                terms,
            });
        }

        for i in 0..num_edges {
            model.rows.push(LinearRow {
                kind: RowKind::Coverage,
                terms: vec![(model.forward_column(i), 1.0), (model.backward_column(i), 1.0)],
            });
        }

        Ok(model)
    }

    pub fn forward_column(&self, edge_index: usize) -> VarId {
        2 * edge_index
    }

    pub fn backward_column(&self, edge_index: usize) -> VarId {
        2 * edge_index + 1
    }

    pub fn slack_column(&self, u: Node) -> VarId {
        2 * self.num_edges + u as usize
    }

    pub fn number_of_edges(&self) -> usize {
        self.num_edges
    }

    pub fn number_of_columns(&self) -> usize {
        self.column_weights.len()
    }

    pub fn number_of_direction_columns(&self) -> usize {
        2 * self.num_edges
    }

    pub fn number_of_slack_columns(&self) -> usize {
        self.num_slack_columns
    }

    pub fn column_weight(&self, var: VarId) -> Weight {
        self.column_weights[var]
    }

    pub fn objective_coefficient(&self, var: VarId) -> f64 {
        self.column_weights[var] as f64
    }

    pub fn rows(&self) -> &[LinearRow] {
        &self.rows
    }

    /// Recomputes the objective of an assignment in exact integer arithmetic
    pub fn objective_value(&self, values: &[u64]) -> Weight {
        self.column_weights
            .iter()
            .zip(values)
            .map(|(&w, &x)| w * x)
            .sum()
    }
}

impl InvariantCheck<SolverError> for ParityModel {
    fn is_correct(&self) -> Result<(), SolverError> {
        let fail = |msg: String| Err(SolverError::UnsolvableModel(msg));

        if self.number_of_columns() != 2 * self.num_edges + self.num_slack_columns {
            return fail("column count does not match the layout".to_string());
        }

        let mut coverage_rows = 0usize;
        for row in &self.rows {
            if row.terms.iter().any(|&(var, _)| var >= self.number_of_columns()) {
                return fail("row references a column out of range".to_string());
            }

            match row.kind {
                RowKind::Parity => {
                    let negatives = row
                        .terms
                        .iter()
                        .filter(|&&(var, coeff)| {
                            coeff < 0.0
                                && (coeff != -2.0 || var < self.number_of_direction_columns())
                        })
                        .count();
                    if negatives > 0 {
                        return fail(
                            "parity row carries a negative term besides its slack".to_string(),
                        );
                    }
                }
                RowKind::Coverage => {
                    coverage_rows += 1;
                    if row.terms.len() != 2
                        || row.terms.iter().any(|&(_, coeff)| coeff != 1.0)
                        || row.terms[0].0 + 1 != row.terms[1].0
                        || row.terms[0].0 % 2 != 0
                        || row.terms[1].0 >= self.number_of_direction_columns()
                    {
                        return fail(
                            "coverage row does not bound the direction pair of one edge"
                                .to_string(),
                        );
                    }
                }
            }
        }

        if coverage_rows != self.num_edges {
            return fail("expected one coverage row per edge".to_string());
        }

        Ok(())
    }
}

/// An integral assignment to all model columns together with its exactly
/// recomputed objective. Backends report their raw column values through
/// [`ModelSolution::from_float_columns`], which rounds to the nearest
/// integer; the floating-point objective of the backend is discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSolution {
    values: Vec<u64>,
    objective: Weight,
}

impl ModelSolution {
    pub fn new(model: &ParityModel, values: Vec<u64>) -> Self {
        debug_assert_eq!(values.len(), model.number_of_columns());
        let objective = model.objective_value(&values);
        Self { values, objective }
    }

    pub fn from_float_columns(model: &ParityModel, columns: &[f64]) -> Self {
        Self::new(model, columns.iter().map(|&x| x.round() as u64).collect())
    }

    pub fn value(&self, var: VarId) -> u64 {
        self.values[var]
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn objective(&self) -> Weight {
        self.objective
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    fn path_graph() -> Multigraph {
        Multigraph::test_only_from([(0, 1, 3), (1, 2, 4)])
    }

    #[test]
    fn column_layout() {
        let graph = path_graph();
        let model = ParityModel::try_new(&graph).unwrap();

        assert_eq!(model.number_of_columns(), 2 * 2 + 3 + 2);
        assert_eq!(model.number_of_direction_columns(), 4);
        assert_eq!(model.number_of_slack_columns(), 5);

        assert_eq!(model.forward_column(1), 2);
        assert_eq!(model.backward_column(1), 3);
        assert_eq!(model.slack_column(0), 4);
        assert_eq!(model.slack_column(2), 6);

        assert_eq!(model.column_weight(0), 3);
        assert_eq!(model.column_weight(3), 4);
        assert_eq!(model.column_weight(model.slack_column(1)), 0);

        model.is_correct().unwrap();
    }

    #[test]
    fn parity_rows_only_for_odd_vertices() {
        let graph = path_graph();
        let model = ParityModel::try_new(&graph).unwrap();

        let parity_rows = model
            .rows()
            .iter()
            .filter(|r| r.kind == RowKind::Parity)
            .collect_vec();

        // vertices 0 and 2 have degree one, vertex 1 is even
        assert_eq!(parity_rows.len(), 2);
        assert_eq!(
            parity_rows[0].terms,
            vec![(0, 1.0), (1, 1.0), (model.slack_column(0), -2.0)]
        );
        assert_eq!(
            parity_rows[1].terms,
            vec![(2, 1.0), (3, 1.0), (model.slack_column(2), -2.0)]
        );
    }

    #[test]
    fn even_graphs_have_no_parity_rows() {
        let triangle = Multigraph::test_only_from([(0, 1, 1), (1, 2, 1), (0, 2, 1)]);
        let model = ParityModel::try_new(&triangle).unwrap();

        assert!(model.rows().iter().all(|r| r.kind == RowKind::Coverage));
        assert_eq!(model.rows().len(), 3);
        model.is_correct().unwrap();
    }

    #[test]
    fn parallel_edges_have_distinct_columns() {
        let graph = Multigraph::test_only_from([(0, 1, 2), (0, 1, 9), (1, 2, 1)]);
        let model = ParityModel::try_new(&graph).unwrap();

        let coverage = model
            .rows()
            .iter()
            .filter(|r| r.kind == RowKind::Coverage)
            .collect_vec();
        assert_eq!(coverage.len(), 3);
        assert_eq!(coverage[0].terms, vec![(0, 1.0), (1, 1.0)]);
        assert_eq!(coverage[1].terms, vec![(2, 1.0), (3, 1.0)]);

        // vertex 1 is odd and touches all three instances, so both columns
        // of every instance appear in its parity row
        let parity_at_one = model
            .rows()
            .iter()
            .find(|r| r.kind == RowKind::Parity)
            .unwrap();
        assert_eq!(
            parity_at_one.terms,
            vec![
                (0, 1.0),
                (1, 1.0),
                (2, 1.0),
                (3, 1.0),
                (4, 1.0),
                (5, 1.0),
                (model.slack_column(1), -2.0)
            ]
        );
    }

    #[test]
    fn rejects_empty_inputs() {
        assert!(matches!(
            ParityModel::try_new(&Multigraph::new(0)),
            Err(SolverError::InvalidGraph(_))
        ));

        assert!(matches!(
            ParityModel::try_new(&Multigraph::new(5)),
            Err(SolverError::InvalidGraph(_))
        ));
    }

    #[test]
    fn objective_is_recomputed_exactly() {
        let graph = path_graph();
        let model = ParityModel::try_new(&graph).unwrap();

        let mut values = vec![0; model.number_of_columns()];
        values[model.forward_column(0)] = 2;
        values[model.backward_column(1)] = 1;
        values[model.slack_column(0)] = 7;

        let solution = ModelSolution::new(&model, values);
        assert_eq!(solution.objective(), 2 * 3 + 4);

        let floats = solution
            .values()
            .iter()
            .map(|&x| x as f64 + 1e-9)
            .collect_vec();
        assert_eq!(ModelSolution::from_float_columns(&model, &floats), solution);
    }
}
