use std::time::Duration;

use log::{info, warn};

use crate::{errors::SolverError, graph::*, model::ParityModel, solver::IlpBackend};

pub mod multiset;
pub mod open_path;

pub use multiset::TraversalMultiset;
pub use open_path::{OpenPath, RemovedTraversal};

/// Runs the whole pipeline: assembles the parity model of `graph`, solves it
/// with `backend`, expands the solution into the closed plan and opens the
/// plan by removing at most one duplicated entry.
///
/// ```
/// use ris::graph::Multigraph;
/// use ris::route::solve_open_path;
/// use ris::solver::NaiveBackend;
///
/// // a triangle has even degrees everywhere and passes through unchanged
/// let graph = Multigraph::test_only_from([(0, 1, 1), (1, 2, 1), (0, 2, 1)]);
/// let path = solve_open_path(&graph, &NaiveBackend, None).unwrap();
///
/// assert_eq!(path.total_weight(), 3);
/// assert!(path.removed().is_none());
/// ```
pub fn solve_open_path<G>(
    graph: &G,
    backend: &impl IlpBackend,
    timeout: Option<Duration>,
) -> Result<OpenPath, SolverError>
where
    G: GraphNodeOrder + GraphDegrees + WeightedEdgeList,
{
    if !graph.is_edge_connected() {
        warn!("the edges span more than one component; no single route can traverse all of them");
    }

    let model = ParityModel::try_new(graph)?;
    info!(
        "assembled model with {} columns and {} rows for backend {}",
        model.number_of_columns(),
        model.rows().len(),
        backend.name()
    );

    let solution = backend.solve_model(&model, timeout)?;
    let multiset = TraversalMultiset::from_solution(graph, &model, &solution);

    debug_assert!(multiset.covers_all_edges(graph));
    debug_assert!(graph.odd_vertices().all(|u| {
        let incidence = multiset.incidence_of(u);
        incidence % 2 == 0 && incidence > graph.degree_of(u) as NumEdges
    }));

    info!(
        "closed plan with {} entries and total weight {}",
        multiset.len(),
        multiset.total_weight()
    );

    Ok(multiset.into_open_path(graph.edges()))
}
