use tracing::{debug, instrument};

use crate::math::Tolerance;
use crate::operations::arrangement::HalfEdgeArrangement;

use super::classify::{ClassifiedEdge, SetClassification};

/// Builds an arrangement from a chosen subset of classified edges.
///
/// Every edge goes in one-way (in its own direction) unless its label is
/// listed in [`two_way`](Self::two_way). An edge is skipped when a
/// half-edge already joins its endpoints in either direction.
pub struct BuildGraph<'a> {
    edges: &'a [ClassifiedEdge],
    include: Option<Vec<SetClassification>>,
    two_way: Vec<SetClassification>,
    tolerance: Tolerance,
}

impl<'a> BuildGraph<'a> {
    /// Creates a new `BuildGraph` operation over all of `edges`.
    #[must_use]
    pub fn new(edges: &'a [ClassifiedEdge]) -> Self {
        Self {
            edges,
            include: None,
            two_way: Vec::new(),
            tolerance: Tolerance::default(),
        }
    }

    /// Restricts the graph to edges with these labels.
    #[must_use]
    pub fn include(mut self, labels: &[SetClassification]) -> Self {
        self.include = Some(labels.to_vec());
        self
    }

    /// Adds both directions for edges with these labels.
    #[must_use]
    pub fn two_way(mut self, labels: &[SetClassification]) -> Self {
        self.two_way = labels.to_vec();
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[instrument(skip_all, fields(edges = self.edges.len()))]
    #[must_use]
    pub fn execute(&self) -> HalfEdgeArrangement {
        let mut arrangement = HalfEdgeArrangement::new(self.tolerance);
        let selected = self.edges.iter().filter(|e| {
            self.include
                .as_ref()
                .map_or(true, |labels| labels.contains(&e.classification))
        });
        for edge in selected {
            if arrangement.has_edge_between(&edge.from, &edge.to) {
                continue;
            }
            let both = self.two_way.contains(&edge.classification);
            arrangement.add_segment(edge.from, edge.to, None, both);
        }
        debug!(
            vertices = arrangement.vertex_count(),
            half_edges = arrangement.half_edge_count(),
            "graph built"
        );
        arrangement
    }
}
