use super::*;

pub trait EdgeConnectivity {
    /// Returns *true* exactly if all edges lie in a single connected
    /// component. Isolated vertices are ignored; a graph without edges is
    /// considered edge-connected.
    fn is_edge_connected(&self) -> bool;
}

impl<G> EdgeConnectivity for G
where
    G: GraphNodeOrder + GraphDegrees + WeightedEdgeList,
{
    fn is_edge_connected(&self) -> bool {
        let Some(start_node) = self.vertices().find(|&u| self.degree_of(u) > 0) else {
            return true;
        };

        let mut adj = vec![Vec::new(); self.len()];
        for e in self.edges() {
            adj[e.u as usize].push(e.v);
            adj[e.v as usize].push(e.u);
        }

        let mut visited = vec![false; self.len()];
        let mut stack = vec![start_node];
        visited[start_node as usize] = true;

        while let Some(u) = stack.pop() {
            for &v in &adj[u as usize] {
                if !visited[v as usize] {
                    visited[v as usize] = true;
                    stack.push(v);
                }
            }
        }

        self.vertices()
            .all(|u| visited[u as usize] || self.degree_of(u) == 0)
    }
}
