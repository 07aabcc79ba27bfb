use std::io::Write;

use fxhash::FxHashMap;

use crate::{
    graph::*,
    model::{ModelSolution, ParityModel},
};

/// Returns *true* exactly if every edge instance of `graph` is matched by at
/// least one entry. Entries and edges are compared by value after
/// normalization, so identical parallel instances pool their coverage.
pub(crate) fn entries_cover_all_edges(
    entries: &[Traversal],
    graph: &impl WeightedEdgeList,
) -> bool {
    let mut required: FxHashMap<WeightedEdge, i64> = FxHashMap::default();
    for e in graph.edges() {
        *required.entry(e.normalized()).or_insert(0) += 1;
    }

    for t in entries {
        if let Some(remaining) = required.get_mut(&t.normalized().as_edge()) {
            *remaining -= 1;
        }
    }

    required.values().all(|&remaining| remaining <= 0)
}

/// The closed traversal plan of a model solution. Each edge instance appears
/// once per unit of its direction columns, forward copies first, then
/// backward copies, in edge list order; `total_weight` is the model
/// objective. Expansion is a pure function of its inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraversalMultiset {
    entries: Vec<Traversal>,
    total_weight: Weight,
}

impl TraversalMultiset {
    pub fn from_solution<G>(graph: &G, model: &ParityModel, solution: &ModelSolution) -> Self
    where
        G: WeightedEdgeList,
    {
        let mut entries = Vec::new();
        for (i, edge) in graph.edges().iter().enumerate() {
            for _ in 0..solution.value(model.forward_column(i)) {
                entries.push(edge.forward_traversal());
            }
            for _ in 0..solution.value(model.backward_column(i)) {
                entries.push(edge.backward_traversal());
            }
        }

        Self {
            entries,
            total_weight: solution.objective(),
        }
    }

    pub fn entries(&self) -> &[Traversal] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the edge weights over all entries
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Number of entries with `u` as an endpoint
    pub fn incidence_of(&self, u: Node) -> NumEdges {
        self.entries
            .iter()
            .filter(|t| t.from == u || t.to == u)
            .count() as NumEdges
    }

    pub fn covers_all_edges<G: WeightedEdgeList>(&self, graph: &G) -> bool {
        entries_cover_all_edges(&self.entries, graph)
    }

    pub(crate) fn into_parts(self) -> (Vec<Traversal>, Weight) {
        (self.entries, self.total_weight)
    }

    /// Writes the plan using 1-based vertex indexing: a header line with the
    /// number of entries and the total weight, then one line per entry.
    ///
    /// ```
    /// use ris::graph::Multigraph;
    /// use ris::model::ParityModel;
    /// use ris::route::TraversalMultiset;
    /// use ris::solver::{IlpBackend, NaiveBackend};
    ///
    /// let graph = Multigraph::test_only_from([(0, 1, 1), (1, 2, 1), (0, 2, 1)]);
    /// let model = ParityModel::try_new(&graph).unwrap();
    /// let solution = NaiveBackend.solve_model(&model, None).unwrap();
    /// let multiset = TraversalMultiset::from_solution(&graph, &model, &solution);
    ///
    /// let mut buffer: Vec<u8> = Vec::new(); // implements Write
    /// multiset.write(&mut buffer).unwrap();
    /// assert_eq!(buffer, b"3 3\n1 2\n2 3\n1 3\n");
    /// ```
    pub fn write<W: Write>(&self, mut writer: W) -> anyhow::Result<()> {
        writeln!(&mut writer, "{} {}", self.entries.len(), self.total_weight)?;
        for t in &self.entries {
            writeln!(&mut writer, "{} {}", t.from + 1, t.to + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn path_solution() -> (Multigraph, ParityModel, ModelSolution) {
        let graph = Multigraph::test_only_from([(0, 1, 3), (1, 2, 4)]);
        let model = ParityModel::try_new(&graph).unwrap();

        let mut values = vec![0; model.number_of_columns()];
        values[model.forward_column(0)] = 2;
        values[model.backward_column(0)] = 1;
        values[model.forward_column(1)] = 1;
        let solution = ModelSolution::new(&model, values);

        (graph, model, solution)
    }

    #[test]
    fn expansion_order() {
        let (graph, model, solution) = path_solution();

        let multiset = TraversalMultiset::from_solution(&graph, &model, &solution);

        let e0 = graph.edge(0);
        let e1 = graph.edge(1);
        assert_eq!(
            multiset.entries(),
            [
                e0.forward_traversal(),
                e0.forward_traversal(),
                e0.backward_traversal(),
                e1.forward_traversal(),
            ]
        );
        assert_eq!(multiset.total_weight(), 3 * 3 + 4);

        let again = TraversalMultiset::from_solution(&graph, &model, &solution);
        assert_eq!(multiset, again);
    }

    #[test]
    fn incidences() {
        let (graph, model, solution) = path_solution();
        let multiset = TraversalMultiset::from_solution(&graph, &model, &solution);

        assert_eq!(multiset.incidence_of(0), 3);
        assert_eq!(multiset.incidence_of(1), 4);
        assert_eq!(multiset.incidence_of(2), 1);
    }

    #[test]
    fn coverage_check() {
        let (graph, model, solution) = path_solution();
        let multiset = TraversalMultiset::from_solution(&graph, &model, &solution);
        assert!(multiset.covers_all_edges(&graph));

        let mut values = vec![0; model.number_of_columns()];
        values[model.forward_column(0)] = 2;
        let uncovering = ModelSolution::new(&model, values);
        let multiset = TraversalMultiset::from_solution(&graph, &model, &uncovering);
        assert!(!multiset.covers_all_edges(&graph));
    }

    #[test]
    fn identical_parallel_instances_pool_their_coverage() {
        let graph = Multigraph::test_only_from([(0, 1, 1), (0, 1, 1)]);
        let model = ParityModel::try_new(&graph).unwrap();

        // both units sit on the first instance; by value that still covers
        // the identical twin
        let mut values = vec![0; model.number_of_columns()];
        values[model.forward_column(0)] = 2;
        let solution = ModelSolution::new(&model, values);

        let multiset = TraversalMultiset::from_solution(&graph, &model, &solution);
        assert!(multiset.covers_all_edges(&graph));

        let mut values = vec![0; model.number_of_columns()];
        values[model.forward_column(0)] = 1;
        let solution = ModelSolution::new(&model, values);

        let multiset = TraversalMultiset::from_solution(&graph, &model, &solution);
        assert!(!multiset.covers_all_edges(&graph));
    }
}
