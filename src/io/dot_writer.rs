use std::io::Write;

use super::super::graph::*;

/// produces a minimalistic DOT representation of the graph
pub trait DotWriter {
    fn try_write_dot<W: Write>(&self, writer: W) -> Result<(), std::io::Error>;
}

impl<T> DotWriter for T
where
    T: WeightedEdgeList,
{
    fn try_write_dot<W: Write>(&self, mut writer: W) -> Result<(), std::io::Error> {
        write!(writer, "graph G {{")?;
        for edge in self.edges() {
            write!(writer, "v{}--v{}[label={}]; ", edge.u, edge.v, edge.weight)?;
        }
        write!(writer, r"}}")
    }
}
