use tracing::{debug, instrument};

use crate::geometry::Polygon;
use crate::math::Tolerance;

use super::classify::{ClassifiedEdge, ClassifySegments};
use super::graph::BuildGraph;
use super::select::{edge_source_location, should_keep_edge, BooleanOp, KeepDecision};

/// Splits both boundaries at every point where they meet, so each edge lies
/// wholly inside, wholly outside, or along the other boundary.
#[must_use]
pub fn split_boundaries(a: &Polygon, b: &Polygon, tol: Tolerance) -> (Polygon, Polygon) {
    let points = a.intersections_2d(b, tol).points();
    (a.split_at(&points, tol), b.split_at(&points, tol))
}

/// Executes a boolean operation on two polygons.
///
/// Orchestrates the full pipeline: intersection, splitting, classification,
/// selection, graph building and loop extraction. Both inputs are taken
/// counter-clockwise whatever their winding. Counter-clockwise output loops
/// bound regions, clockwise ones bound holes.
#[instrument(skip_all, fields(op = ?op, a = a.len(), b = b.len()))]
pub(crate) fn boolean_execute(
    a: &Polygon,
    b: &Polygon,
    op: BooleanOp,
    tol: Tolerance,
) -> Vec<Polygon> {
    let (a, b) = split_boundaries(&a.to_ccw(), &b.to_ccw(), tol);

    let classified = ClassifySegments::new(&a, &b).with_tolerance(tol).execute();
    let selected: Vec<ClassifiedEdge> = classified
        .iter()
        .filter_map(|edge| {
            let (source, location) = edge_source_location(edge);
            match should_keep_edge(source, location, op) {
                KeepDecision::Keep => Some(*edge),
                KeepDecision::KeepFlipped => Some(edge.flipped()),
                KeepDecision::Discard => None,
            }
        })
        .collect();
    debug!(
        classified = classified.len(),
        selected = selected.len(),
        "edges selected"
    );

    let min_area = tol.epsilon() * tol.epsilon();
    let loops: Vec<Polygon> = BuildGraph::new(&selected)
        .with_tolerance(tol)
        .execute()
        .polygonize()
        .into_iter()
        .filter(|l| l.area() > min_area)
        .collect();
    debug!(loops = loops.len(), "boolean finished");
    loops
}
