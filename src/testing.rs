use rand::Rng;

use crate::graph::*;

/// Endless stream of random weighted multigraphs with roughly three
/// incident edges per vertex, cycling through parallel edge densities.
/// Edgeless samples are rejected.
pub fn generate_random_graph_stream(
    rng: &mut impl Rng,
    n: NumNodes,
) -> impl Iterator<Item = Multigraph> {
    (0..).filter_map(move |i: usize| {
        let parallel_p = [0.0, 0.2, 0.5][i % 3];
        let graph =
            Multigraph::random_weighted_multigraph(rng, n, 3. / n as f64, parallel_p, 1..50);

        if graph.has_no_edges() {
            return None;
        }

        Some(graph)
    })
}
