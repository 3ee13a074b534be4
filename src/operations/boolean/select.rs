use super::classify::{BoundaryContact, ClassifiedEdge, SetClassification};

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Subtract,
    Intersect,
}

/// Decision about whether to keep an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepDecision {
    Keep,
    KeepFlipped,
    Discard,
}

/// Which boundary an edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSource {
    A,
    B,
}

/// Where an edge lies relative to the other region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeLocation {
    Outside,
    Inside,
    /// On the other boundary, running the same way.
    SharedSame,
    /// On the other boundary, running the opposite way.
    SharedOpposite,
}

/// Reads an edge's source boundary and location off its label and contact.
#[must_use]
pub fn edge_source_location(edge: &ClassifiedEdge) -> (EdgeSource, EdgeLocation) {
    let source = if edge.classification.is_from_a() {
        EdgeSource::A
    } else {
        EdgeSource::B
    };
    let location = match (edge.contact, edge.classification) {
        (BoundaryContact::SameDirection, _) => EdgeLocation::SharedSame,
        (BoundaryContact::OppositeDirection, _) => EdgeLocation::SharedOpposite,
        (BoundaryContact::None, SetClassification::AInsideB | SetClassification::BInsideA) => {
            EdgeLocation::Inside
        }
        (BoundaryContact::None, _) => EdgeLocation::Outside,
    };
    (source, location)
}

/// Determines whether a boundary edge belongs to the result of `op`.
///
/// | Edge   | vs other region   | Union   | Subtract(A-B) | Intersect |
/// |--------|-------------------|---------|---------------|-----------|
/// | from A | outside B         | keep    | keep          | discard   |
/// | from A | inside B          | discard | discard       | keep      |
/// | from B | outside A         | keep    | discard       | discard   |
/// | from B | inside A          | discard | keep (flip)   | keep      |
/// | from A | shared, same way  | keep    | discard       | keep      |
/// | from A | shared, opposite  | discard | keep          | discard   |
/// | from B | shared            | discard | discard       | discard   |
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn should_keep_edge(source: EdgeSource, location: EdgeLocation, op: BooleanOp) -> KeepDecision {
    match (source, location, op) {
        (EdgeSource::A, EdgeLocation::Outside, BooleanOp::Union) => KeepDecision::Keep,
        (EdgeSource::A, EdgeLocation::Outside, BooleanOp::Subtract) => KeepDecision::Keep,
        (EdgeSource::A, EdgeLocation::Outside, BooleanOp::Intersect) => KeepDecision::Discard,

        (EdgeSource::A, EdgeLocation::Inside, BooleanOp::Union) => KeepDecision::Discard,
        (EdgeSource::A, EdgeLocation::Inside, BooleanOp::Subtract) => KeepDecision::Discard,
        (EdgeSource::A, EdgeLocation::Inside, BooleanOp::Intersect) => KeepDecision::Keep,

        (EdgeSource::B, EdgeLocation::Outside, BooleanOp::Union) => KeepDecision::Keep,
        (EdgeSource::B, EdgeLocation::Outside, BooleanOp::Subtract) => KeepDecision::Discard,
        (EdgeSource::B, EdgeLocation::Outside, BooleanOp::Intersect) => KeepDecision::Discard,

        (EdgeSource::B, EdgeLocation::Inside, BooleanOp::Union) => KeepDecision::Discard,
        (EdgeSource::B, EdgeLocation::Inside, BooleanOp::Subtract) => KeepDecision::KeepFlipped,
        (EdgeSource::B, EdgeLocation::Inside, BooleanOp::Intersect) => KeepDecision::Keep,

        // Shared stretches are taken from A only, so they appear once.
        (EdgeSource::A, EdgeLocation::SharedSame, BooleanOp::Union) => KeepDecision::Keep,
        (EdgeSource::A, EdgeLocation::SharedSame, BooleanOp::Subtract) => KeepDecision::Discard,
        (EdgeSource::A, EdgeLocation::SharedSame, BooleanOp::Intersect) => KeepDecision::Keep,

        (EdgeSource::A, EdgeLocation::SharedOpposite, BooleanOp::Union) => KeepDecision::Discard,
        (EdgeSource::A, EdgeLocation::SharedOpposite, BooleanOp::Subtract) => KeepDecision::Keep,
        (EdgeSource::A, EdgeLocation::SharedOpposite, BooleanOp::Intersect) => {
            KeepDecision::Discard
        }

        (EdgeSource::B, EdgeLocation::SharedSame | EdgeLocation::SharedOpposite, _) => {
            KeepDecision::Discard
        }
    }
}
