use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::geometry::Polyline;

use super::half_edge::{HalfEdgeArrangement, VertexId};

impl HalfEdgeArrangement {
    /// Extracts maximal chains of the undirected graph.
    ///
    /// Chains run between vertices whose degree is not 2 (dangling ends and
    /// branch points). Components made only of degree-2 vertices come back
    /// as closed chains with their first vertex repeated at the end.
    #[instrument(skip_all, fields(vertices = self.vertex_count()))]
    #[must_use]
    pub fn polylinize(&self) -> Vec<Polyline> {
        let graph = UndirectedGraph::from_arrangement(self);
        let mut visited = vec![false; graph.edges.len()];
        let mut chains = Vec::new();

        let order: Vec<VertexId> = self.vertices().map(|(id, _)| id).collect();

        for &v in &order {
            if graph.degree(v) == 2 {
                continue;
            }
            for &(edge, _) in graph.incident(v) {
                if !visited[edge] {
                    chains.push(graph.trace(v, edge, &mut visited));
                }
            }
        }
        for &v in &order {
            while let Some(&(edge, _)) = graph.incident(v).iter().find(|(e, _)| !visited[*e]) {
                chains.push(graph.trace(v, edge, &mut visited));
            }
        }

        let polylines: Vec<Polyline> = chains
            .into_iter()
            .filter_map(|chain| {
                Polyline::new(chain.into_iter().map(|id| self.point(id)).collect()).ok()
            })
            .collect();
        debug!(chains = polylines.len(), "polylinize finished");
        polylines
    }
}

/// Each segment once, whichever directions it has.
struct UndirectedGraph {
    edges: Vec<(VertexId, VertexId)>,
    adjacency: HashMap<VertexId, Vec<(usize, VertexId)>>,
}

impl UndirectedGraph {
    fn from_arrangement(arr: &HalfEdgeArrangement) -> Self {
        let mut graph = Self {
            edges: Vec::new(),
            adjacency: HashMap::new(),
        };
        for (id, edge) in arr.half_edges() {
            // Keep one half of each twin pair.
            if edge.twin.is_some_and(|t| t < id) {
                continue;
            }
            let index = graph.edges.len();
            graph.edges.push((edge.origin, edge.dest));
            graph
                .adjacency
                .entry(edge.origin)
                .or_default()
                .push((index, edge.dest));
            graph
                .adjacency
                .entry(edge.dest)
                .or_default()
                .push((index, edge.origin));
        }
        graph
    }

    fn incident(&self, v: VertexId) -> &[(usize, VertexId)] {
        self.adjacency.get(&v).map_or(&[], Vec::as_slice)
    }

    fn degree(&self, v: VertexId) -> usize {
        self.incident(v).len()
    }

    /// Follows `edge` away from `from` through degree-2 vertices.
    fn trace(&self, from: VertexId, edge: usize, visited: &mut [bool]) -> Vec<VertexId> {
        let mut chain = vec![from];
        let mut at = from;
        let mut edge = edge;
        loop {
            visited[edge] = true;
            let (a, b) = self.edges[edge];
            at = if a == at { b } else { a };
            chain.push(at);
            if self.degree(at) != 2 {
                break;
            }
            let Some(&(next, _)) = self.incident(at).iter().find(|(e, _)| !visited[*e]) else {
                break;
            };
            edge = next;
        }
        chain
    }
}
