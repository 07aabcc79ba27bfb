pub mod connectivity;
pub mod edge;
pub mod multigraph;
pub mod random;

pub type Node = u32;
pub type NumNodes = Node;
pub type NumEdges = u64;
pub type Weight = u64;

use std::ops::Range;

pub use connectivity::*;
pub use edge::*;
pub use multigraph::*;
pub use random::*;

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> Node;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns true if the graph has no edges
    fn has_no_edges(&self) -> bool {
        self.number_of_edges() == 0
    }
}

#[macro_export]
macro_rules! node_iterator {
    ($iter : ident, $single : ident, $type : ty) => {
        fn $iter(&self) -> impl Iterator<Item = $type> + '_ {
            self.vertices().map(|u| self.$single(u))
        }
    };
}

/// Exposes the number of edge endpoints at each vertex. Every parallel edge
/// contributes to both of its endpoints separately.
pub trait GraphDegrees: GraphNodeOrder + Sized {
    /// Returns the number of edge endpoints at [`u`].
    /// ** Panics if u >= n **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns *true* exactly if the degree of [`u`] is odd
    fn has_odd_degree(&self, u: Node) -> bool {
        self.degree_of(u) % 2 == 1
    }

    /// Iterator over all vertices with an odd number of edge endpoints,
    /// in ascending order
    fn odd_vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices().filter(|&u| self.has_odd_degree(u))
    }

    node_iterator!(degrees, degree_of, NumNodes);
}

/// Read access to the underlying edge list. The list keeps edges in insertion
/// order and retains parallel edges as separate instances.
pub trait WeightedEdgeList: GraphEdgeOrder {
    fn edges(&self) -> &[WeightedEdge];

    fn edge(&self, index: usize) -> WeightedEdge {
        self.edges()[index]
    }

    /// Sum of the weights of all edge instances
    fn total_edge_weight(&self) -> Weight {
        self.edges().iter().map(|e| e.weight).sum()
    }
}

pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to append edges
pub trait GraphEdgeAppend: GraphNew {
    /// Adds the undirected edge *{u,v}* to the graph. Parallel edges are
    /// allowed and kept as separate instances.
    /// ** Panics if the edge is a self-loop or u, v >= n **
    fn add_edge(&mut self, edge: impl Into<WeightedEdge>) {
        assert!(self.try_add_edge(edge).is_ok())
    }

    /// Adds the undirected edge *{u,v}* to the graph. Returns an error if the
    /// edge is a self-loop or an endpoint is out of range.
    fn try_add_edge(&mut self, edge: impl Into<WeightedEdge>) -> Result<(), crate::errors::SolverError>;

    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<WeightedEdge>>) {
        for e in edges {
            self.add_edge(e);
        }
    }
}
