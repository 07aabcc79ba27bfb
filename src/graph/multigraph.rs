use std::fmt;

use super::*;
use crate::errors::SolverError;

/// Edge-list representation of a weighted undirected multigraph. Edges keep
/// their insertion order and parallel edges remain distinct instances; only
/// self-loops are rejected. Vertex degrees are maintained incrementally.
#[derive(Clone, Default)]
pub struct Multigraph {
    edges: Vec<WeightedEdge>,
    degrees: Vec<NumNodes>,
}

impl GraphNew for Multigraph {
    fn new(n: NumNodes) -> Self {
        Self {
            edges: Vec::new(),
            degrees: vec![0; n as usize],
        }
    }
}

impl GraphNodeOrder for Multigraph {
    fn number_of_nodes(&self) -> Node {
        self.degrees.len() as Node
    }
}

impl GraphEdgeOrder for Multigraph {
    fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }
}

impl GraphDegrees for Multigraph {
    fn degree_of(&self, u: Node) -> NumNodes {
        self.degrees[u as usize]
    }
}

impl WeightedEdgeList for Multigraph {
    fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }
}

impl GraphEdgeAppend for Multigraph {
    fn try_add_edge(&mut self, edge: impl Into<WeightedEdge>) -> Result<(), SolverError> {
        let edge = edge.into();
        let n = self.number_of_nodes();

        if edge.is_loop() {
            return Err(SolverError::InvalidGraph(format!(
                "edge {{{}, {}}} is a self-loop",
                edge.u, edge.v
            )));
        }

        if edge.u >= n || edge.v >= n {
            return Err(SolverError::InvalidGraph(format!(
                "edge {{{}, {}}} has an endpoint outside of 0..{n}",
                edge.u, edge.v
            )));
        }

        self.degrees[edge.u as usize] += 1;
        self.degrees[edge.v as usize] += 1;
        self.edges.push(edge);

        Ok(())
    }
}

impl Multigraph {
    /// Builds a graph on `n` vertices from an edge list, rejecting self-loops
    /// and out-of-range endpoints
    pub fn try_from_edges(
        n: NumNodes,
        edges: impl IntoIterator<Item = impl Into<WeightedEdge>>,
    ) -> Result<Self, SolverError> {
        let mut graph = Self::new(n);
        for e in edges {
            graph.try_add_edge(e)?;
        }
        Ok(graph)
    }

    pub fn test_only_from(edges: impl Clone + IntoIterator<Item = impl Into<WeightedEdge>>) -> Self {
        let n = edges
            .clone()
            .into_iter()
            .map(|e| e.into())
            .map(|e| e.u.max(e.v) + 1)
            .max()
            .unwrap_or(0);
        let mut graph = Self::new(n);

        graph.add_edges(edges);

        graph
    }
}

impl fmt::Debug for Multigraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use super::super::io::DotWriter;
        use std::str;

        let mut buf = Vec::new();
        if self.try_write_dot(&mut buf).is_ok() {
            f.write_str(str::from_utf8(&buf).unwrap().trim())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn degrees_count_parallel_edges() {
        let graph = Multigraph::test_only_from([(0, 1, 2), (0, 1, 5), (1, 2, 1)]);

        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(graph.degrees().collect_vec(), vec![2, 3, 1]);
        assert_eq!(graph.total_edge_weight(), 8);
    }

    #[test]
    fn odd_vertices_ascending() {
        // star around vertex 0 plus one parallel spoke
        let graph = Multigraph::test_only_from([(0, 1, 1), (0, 2, 1), (0, 3, 1), (0, 3, 1)]);

        assert_eq!(graph.odd_vertices().collect_vec(), vec![0, 1, 2]);
        assert!(graph.has_odd_degree(1));
        assert!(!graph.has_odd_degree(3));
    }

    #[test]
    fn rejects_self_loop() {
        let res = Multigraph::try_from_edges(3, [(0, 1, 1), (2, 2, 1)]);
        assert!(matches!(res, Err(SolverError::InvalidGraph(_))));
    }

    #[test]
    fn rejects_endpoint_out_of_range() {
        let res = Multigraph::try_from_edges(2, [(0, 1, 1), (1, 2, 1)]);
        assert!(matches!(res, Err(SolverError::InvalidGraph(_))));
    }

    #[test]
    fn edge_list_keeps_insertion_order() {
        let edges = [(1, 0, 3), (0, 1, 7), (1, 2, 2)]
            .into_iter()
            .map(WeightedEdge::from)
            .collect_vec();
        let graph = Multigraph::try_from_edges(3, edges.iter().copied()).unwrap();

        assert_eq!(graph.edges(), edges.as_slice());
        assert_eq!(graph.edge(1), edges[1]);
    }
}
