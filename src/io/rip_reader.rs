use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Lines},
    path::Path,
};

use crate::graph::{GraphEdgeAppend, GraphNew, Node, NumEdges, NumNodes, Weight, WeightedEdge};

pub type Result<T> = std::io::Result<T>;

pub trait GraphRipReader: Sized {
    fn try_read_rip<R: BufRead>(reader: R) -> Result<Self>;
    fn try_read_rip_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl<G> GraphRipReader for G
where
    G: GraphNew + GraphEdgeAppend,
{
    fn try_read_rip<R: BufRead>(reader: R) -> Result<Self> {
        let rip_reader = RipReader::try_new(reader)?;
        let mut graph = Self::new(rip_reader.number_of_nodes());
        for edge in rip_reader {
            graph
                .try_add_edge(edge?)
                .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;
        }
        Ok(graph)
    }

    fn try_read_rip_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = File::open(path)?;
        let buf_reader = BufReader::new(reader);
        Self::try_read_rip(buf_reader)
    }
}

pub struct RipReader<R> {
    lines: Lines<R>,
    number_of_nodes: NumNodes,
    number_of_edges: NumEdges,
}

impl<R: BufRead> RipReader<R> {
    pub fn try_new(reader: R) -> Result<Self> {
        let mut rip_reader = Self {
            lines: reader.lines(),
            number_of_nodes: 0,
            number_of_edges: 0,
        };

        (rip_reader.number_of_nodes, rip_reader.number_of_edges) = rip_reader.parse_header()?;
        Ok(rip_reader)
    }

    pub fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }
}

impl<R: BufRead> Iterator for RipReader<R> {
    type Item = Result<WeightedEdge>;

    /// Yields edges shifted to 0-based vertex indexing
    fn next(&mut self) -> Option<Self::Item> {
        self.parse_edge_line()
            .map(|maybe_edge| {
                maybe_edge.map(|e| WeightedEdge {
                    u: e.u - 1,
                    v: e.v - 1,
                    ..e
                })
            })
            .transpose()
    }
}

macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(std::io::Error::new($kind, $info));
        }
    };
}

macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let next = $iterator.next();
        raise_error_unless!(
            next.is_some(),
            ErrorKind::InvalidData,
            format!("Premature end of line when parsing {}.", $name)
        );

        let parsed = next.unwrap().parse();
        raise_error_unless!(
            parsed.is_ok(),
            ErrorKind::InvalidData,
            format!("Invalid value found. Cannot parse {}.", $name)
        );

        parsed.unwrap()
    }};
}

impl<R: BufRead> RipReader<R> {
    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        loop {
            let line = self.lines.next();
            match line {
                None => return Ok(None),
                Some(Err(x)) => return Err(x),
                Some(Ok(line)) if line.starts_with('c') => continue,
                Some(Ok(line)) => return Ok(Some(line)),
            }
        }
    }

    fn parse_header(&mut self) -> Result<(NumNodes, NumEdges)> {
        let line = self.next_non_comment_line()?;

        raise_error_unless!(line.is_some(), ErrorKind::InvalidData, "No header found");
        let line = line.unwrap();

        let mut parts = line.split(' ').filter(|t| !t.is_empty());

        raise_error_unless!(
            parts.next().is_some_and(|t| t.starts_with('p')),
            ErrorKind::InvalidData,
            "Invalid header found; line should start with p"
        );

        raise_error_unless!(
            parts.next() == Some("rip"),
            ErrorKind::InvalidData,
            "Invalid header found; file type should be \"rip\""
        );

        let number_of_nodes = parse_next_value!(parts, "Header>Number of nodes");
        let number_of_edges = parse_next_value!(parts, "Header>Number of edges");

        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            "Invalid header found; expected end of line"
        );

        Ok((number_of_nodes, number_of_edges))
    }

    /// Parses one edge line in 1-based indexing. Lines carry either three
    /// values (both traversal costs default to the weight) or all five.
    fn parse_edge_line(&mut self) -> Result<Option<WeightedEdge>> {
        let line = self.next_non_comment_line()?;
        if let Some(line) = line {
            let mut parts = line.split(' ').filter(|t| !t.is_empty()).peekable();

            let from: Node = parse_next_value!(parts, "Source node");
            let dest: Node = parse_next_value!(parts, "Target node");
            let weight: Weight = parse_next_value!(parts, "Edge weight");

            let (cost_forward, cost_backward) = if parts.peek().is_some() {
                let cost_forward: Weight = parse_next_value!(parts, "Forward cost");
                let cost_backward: Weight = parse_next_value!(parts, "Backward cost");
                (cost_forward, cost_backward)
            } else {
                (weight, weight)
            };

            raise_error_unless!(
                parts.next().is_none(),
                ErrorKind::InvalidData,
                "Invalid edge line; expected end of line"
            );

            raise_error_unless!(
                (1..=self.number_of_nodes).contains(&from),
                ErrorKind::InvalidData,
                format!("Source node {from} outside of 1..={}", self.number_of_nodes)
            );

            raise_error_unless!(
                (1..=self.number_of_nodes).contains(&dest),
                ErrorKind::InvalidData,
                format!("Target node {dest} outside of 1..={}", self.number_of_nodes)
            );

            Ok(Some(WeightedEdge::with_costs(
                from,
                dest,
                weight,
                cost_forward,
                cost_backward,
            )))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::*;

    use glob::glob;
    use itertools::Itertools;
    use std::fs::File;
    use std::io::BufReader;

    #[test]
    fn test_success() {
        const DEMO_FILE: &str =
            "c ROUTE\n p  rip 4  3 \n1 2 5\nc NOTE\n2 3 4 7 9\n3 4 2\nc TRAILING";
        let buf_reader = std::io::BufReader::new(DEMO_FILE.as_bytes());
        let rip_reader = RipReader::try_new(buf_reader).unwrap();

        assert_eq!(rip_reader.number_of_nodes(), 4);
        assert_eq!(rip_reader.number_of_edges(), 3);

        let edges: Vec<_> = rip_reader.try_collect().unwrap();
        assert_eq!(
            edges,
            vec![
                WeightedEdge::with_costs(0, 1, 5, 5, 5),
                WeightedEdge::with_costs(1, 2, 4, 7, 9),
                WeightedEdge::with_costs(2, 3, 2, 2, 2),
            ]
        );
    }

    #[test]
    fn test_graph_reader() {
        const DEMO_FILE: &str = "p rip 3 3\n1 2 1\n1 2 4\n2 3 2";
        let graph = Multigraph::try_read_rip(DEMO_FILE.as_bytes()).unwrap();

        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(graph.degree_of(1), 3);
    }

    #[test]
    fn test_rejects_malformed_input() {
        let broken = [
            "",                          // no header
            "p ds 3 2\n1 2 1\n2 3 1",    // wrong file type
            "p rip 3\n1 2 1",            // header too short
            "p rip 3 2 7\n1 2 1",        // header too long
            "p rip 3 2\n1 2\n2 3 1",     // missing weight
            "p rip 3 2\n1 2 1 9\n",      // only one traversal cost
            "p rip 3 2\n1 2 1 9 9 9\n",  // too many values
            "p rip 3 2\n1 x 1\n",        // unparsable node
            "p rip 3 2\n0 2 1\n",        // node below 1
            "p rip 3 2\n1 4 1\n",        // node above n
            "p rip 3 2\n2 2 1\n",        // self-loop
        ];

        for input in broken {
            let err = Multigraph::try_read_rip(input.as_bytes())
                .err()
                .unwrap_or_else(|| panic!("accepted malformed input: {input:?}"));
            assert_eq!(err.kind(), ErrorKind::InvalidData, "input: {input:?}");
        }
    }

    #[test]
    fn test_read_rip_instances() {
        let files = glob("instances/tiny/*.gr")
            .expect("Failed to glob")
            .map(|r| r.expect("Failed to access globbed path"))
            .collect_vec();

        assert!(!files.is_empty());

        for file in files {
            let reader = File::open(file.clone()).expect("Cannot open file");
            let buf_reader = BufReader::new(reader);

            let rip_reader = RipReader::try_new(buf_reader).expect("Could not construct RipReader");

            let number_of_nodes = rip_reader.number_of_nodes();
            let number_of_edges = rip_reader.number_of_edges();
            let edges: Vec<_> = rip_reader.try_collect().expect("Failed to parse edges");

            assert_eq!(edges.len() as NumEdges, number_of_edges, "file: {file:?}");
            assert!(edges.iter().all(|e| !e.is_loop()));
            assert!(edges
                .iter()
                .all(|e| e.u < number_of_nodes && e.v < number_of_nodes));
        }
    }
}
