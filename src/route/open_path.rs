use std::io::Write;

use fxhash::FxHashMap;

use crate::{graph::*, route::multiset::entries_cover_all_edges, route::TraversalMultiset};

/// The entry dropped when opening a closed plan
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemovedTraversal {
    pub entry: Traversal,
    /// Weight charged for the removal: the weight of the first edge in the
    /// input list connecting the entry's endpoints. With parallel edges this
    /// may differ from the entry's own weight.
    pub weight: Weight,
}

/// An open route obtained from a closed plan by dropping at most one entry:
/// the maximal duplicated entry under the order (charged weight, entry).
/// Entries are compared by value, so two traversals of an edge in opposite
/// directions do not count as duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenPath {
    entries: Vec<Traversal>,
    total_weight: Weight,
    removed: Option<RemovedTraversal>,
}

fn endpoint_weight_of(edges: &[WeightedEdge], t: &Traversal) -> Weight {
    edges
        .iter()
        .find(|e| e.connects(t.from, t.to))
        .map(|e| e.weight)
        .expect("every entry stems from the edge list")
}

impl TraversalMultiset {
    /// Converts the closed plan into an open route. If any entry occurs more
    /// than once, the maximal duplicate is removed at its first occurrence
    /// and its charged weight is subtracted from the total; otherwise the
    /// plan passes through unchanged. Callers supply plans covering every
    /// edge, so the charged weight never exceeds the total.
    pub fn into_open_path(self, edges: &[WeightedEdge]) -> OpenPath {
        let (mut entries, mut total_weight) = self.into_parts();

        let mut counts: FxHashMap<Traversal, usize> = FxHashMap::default();
        for t in &entries {
            *counts.entry(*t).or_insert(0) += 1;
        }

        let removed = counts
            .iter()
            .filter(|&(_, &count)| count > 1)
            .map(|(&t, _)| (endpoint_weight_of(edges, &t), t))
            .max()
            .map(|(weight, entry)| {
                let pos = entries
                    .iter()
                    .position(|&t| t == entry)
                    .expect("a counted entry is present");
                entries.remove(pos);
                total_weight -= weight;

                RemovedTraversal { entry, weight }
            });

        OpenPath {
            entries,
            total_weight,
            removed,
        }
    }
}

impl OpenPath {
    pub fn entries(&self) -> &[Traversal] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total weight after the removal
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    pub fn removed(&self) -> Option<&RemovedTraversal> {
        self.removed.as_ref()
    }

    pub fn removed_weight(&self) -> Option<Weight> {
        self.removed.as_ref().map(|r| r.weight)
    }

    /// Returns *true* exactly if the remaining entries still match every
    /// edge instance by value
    pub fn is_valid<G: WeightedEdgeList>(&self, graph: &G) -> bool {
        entries_cover_all_edges(&self.entries, graph)
    }

    /// Writes the route using 1-based vertex indexing: a header line with
    /// the number of entries and the total weight, one line per entry, and a
    /// comment documenting the removal if one happened.
    ///
    /// ```
    /// use ris::graph::Multigraph;
    /// use ris::route::solve_open_path;
    /// use ris::solver::NaiveBackend;
    ///
    /// let graph = Multigraph::test_only_from([(0, 1, 5)]);
    /// let path = solve_open_path(&graph, &NaiveBackend, None).unwrap();
    ///
    /// let mut buffer: Vec<u8> = Vec::new(); // implements Write
    /// path.write(&mut buffer).unwrap();
    /// assert_eq!(buffer, b"1 5\n1 2\nc removed 1 2 5\n");
    /// ```
    pub fn write<W: Write>(&self, mut writer: W) -> anyhow::Result<()> {
        writeln!(&mut writer, "{} {}", self.entries.len(), self.total_weight)?;
        for t in &self.entries {
            writeln!(&mut writer, "{} {}", t.from + 1, t.to + 1)?;
        }

        if let Some(removed) = &self.removed {
            writeln!(
                &mut writer,
                "c removed {} {} {}",
                removed.entry.from + 1,
                removed.entry.to + 1,
                removed.weight
            )?;
        }

        Ok(())
    }
}
