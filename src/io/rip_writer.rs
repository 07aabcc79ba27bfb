use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use super::Result;
use crate::graph::{GraphNodeOrder, WeightedEdgeList};

pub trait RipWriter {
    fn try_write_rip<W: Write>(&self, writer: W) -> Result<()>;

    fn try_write_rip_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = File::create(path)?;
        let buf_writer = BufWriter::new(writer);
        self.try_write_rip(buf_writer)
    }
}

impl<G> RipWriter for G
where
    G: GraphNodeOrder + WeightedEdgeList,
{
    /// Writes the graph in 1-based indexing; edges always carry all five values
    fn try_write_rip<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(
            writer,
            "p rip {} {}",
            self.number_of_nodes(),
            self.number_of_edges()
        )?;

        for edge in self.edges() {
            writeln!(
                writer,
                "{} {} {} {} {}",
                edge.u + 1,
                edge.v + 1,
                edge.weight,
                edge.cost_forward,
                edge.cost_backward
            )?;
        }

        Ok(())
    }
}
