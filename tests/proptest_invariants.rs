#![allow(clippy::unwrap_used)]

use std::collections::{BTreeSet, HashSet};
use std::f64::consts::TAU;

use planar_arrangement::geometry::{Polygon, Segment};
use planar_arrangement::math::distance_2d::point_to_segment_dist;
use planar_arrangement::math::intersect_2d::segment_segment_intersect_2d;
use planar_arrangement::math::{cross, Point2, Tolerance, TOLERANCE};
use planar_arrangement::operations::arrangement::ConstructArrangement;
use planar_arrangement::operations::sweep::FindIntersections;
use planar_arrangement::search::StatusTree;
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = Segment> {
    (-100i32..100, -100i32..100, -100i32..100, -100i32..100).prop_map(|(x0, y0, x1, y1)| {
        Segment::new(
            Point2::new(f64::from(x0), f64::from(y0)),
            Point2::new(f64::from(x1), f64::from(y1)),
        )
    })
}

/// No zero-length segments, no parallel pairs, and no endpoint touching
/// another segment, so every meeting is a proper crossing.
fn in_general_position(segments: &[Segment]) -> bool {
    for (i, a) in segments.iter().enumerate() {
        if a.length() < 1.0 {
            return false;
        }
        for b in &segments[i + 1..] {
            if cross(&a.direction(), &b.direction()).abs() < 1e-9 {
                return false;
            }
            for (p, s) in [
                (a.start, b),
                (a.end, b),
                (b.start, a),
                (b.end, a),
            ] {
                if point_to_segment_dist(&p, &s.start, &s.end) < 1e-3 {
                    return false;
                }
            }
        }
    }
    true
}

/// Tenths on [-2, 2]. Most of them have no exact binary form.
fn tenth() -> impl Strategy<Value = f64> {
    (-20i32..=20).prop_map(|k| f64::from(k) / 10.0)
}

/// Points several generated segments are likely to share.
const SHARED: [(f64, f64); 5] = [(-1.0, 0.0), (0.0, 1.0), (-0.1, 0.3), (0.3, -0.1), (0.7, 0.7)];

fn grid_point() -> impl Strategy<Value = Point2> {
    prop_oneof![
        (0..SHARED.len()).prop_map(|i| Point2::new(SHARED[i].0, SHARED[i].1)),
        (tenth(), tenth()).prop_map(|(x, y)| Point2::new(x, y)),
    ]
}

fn grid_segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        (grid_point(), grid_point()).prop_map(|(a, b)| Segment::new(a, b)),
        (tenth(), tenth(), tenth())
            .prop_map(|(x, y0, y1)| Segment::new(Point2::new(x, y0), Point2::new(x, y1))),
    ]
}

/// Whether two segments come within `TOLERANCE` of each other.
fn meets(a: &Segment, b: &Segment) -> bool {
    let near = |p: &Point2, s: &Segment| point_to_segment_dist(p, &s.start, &s.end) <= TOLERANCE;
    if near(&a.start, b) || near(&a.end, b) || near(&b.start, a) || near(&b.end, a) {
        return true;
    }
    let side = |s: &Segment, p: &Point2| cross(&s.direction(), &(p - s.start));
    side(a, &b.start) * side(a, &b.end) < 0.0 && side(b, &a.start) * side(b, &a.end) < 0.0
}

fn star_polygon() -> impl Strategy<Value = Polygon> {
    (3usize..12)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(0.0f64..0.5, n),
                prop::collection::vec(1.0f64..10.0, n),
            )
        })
        .prop_map(|(n, jitter, radii)| {
            #[allow(clippy::cast_precision_loss)]
            let step = TAU / n as f64;
            let ring = (0..n)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let angle = step * (i as f64 + jitter[i]);
                    Point2::new(radii[i] * angle.cos(), radii[i] * angle.sin())
                })
                .collect();
            Polygon::new(ring).unwrap()
        })
}

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i32),
    Remove(i32),
}

fn tree_op() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        (0i32..50).prop_map(TreeOp::Insert),
        (0i32..50).prop_map(TreeOp::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sweep_finds_every_crossing(
        segments in prop::collection::vec(segment_strategy(), 2..10)
    ) {
        prop_assume!(in_general_position(&segments));

        let mut expected = HashSet::new();
        for i in 0..segments.len() {
            for j in i + 1..segments.len() {
                let (a, b) = (&segments[i], &segments[j]);
                if segment_segment_intersect_2d(&a.start, &a.end, &b.start, &b.end, TOLERANCE, true)
                    .is_some()
                {
                    expected.insert((i, j));
                }
            }
        }

        let hits = FindIntersections::new(&segments).execute();
        let mut found = HashSet::new();
        for (_, record) in hits.iter() {
            for &s in &record.segments {
                let seg = &segments[s];
                prop_assert!(point_to_segment_dist(&record.point, &seg.start, &seg.end) < 1e-3);
            }
            for (k, &i) in record.segments.iter().enumerate() {
                for &j in &record.segments[k + 1..] {
                    found.insert((i, j));
                }
            }
        }
        prop_assert!(expected.is_subset(&found), "missed {:?}", expected.difference(&found));
    }

    #[test]
    fn sweep_matches_brute_force_on_tenths(
        segments in prop::collection::vec(grid_segment(), 2..12)
    ) {
        let hits = FindIntersections::new(&segments).execute();

        let mut found = HashSet::new();
        for (_, record) in hits.iter() {
            for &s in &record.segments {
                let seg = &segments[s];
                let d = point_to_segment_dist(&record.point, &seg.start, &seg.end);
                prop_assert!(d <= TOLERANCE + 1e-12, "segment {} is {} from {:?}", s, d, record.point);
            }
            for (k, &i) in record.segments.iter().enumerate() {
                for &j in &record.segments[k + 1..] {
                    found.insert((i, j));
                }
            }
        }

        let real = |s: &Segment| s.length() > TOLERANCE;
        for i in 0..segments.len() {
            for j in i + 1..segments.len() {
                let (a, b) = (&segments[i], &segments[j]);
                if real(a) && real(b) && meets(a, b) {
                    prop_assert!(found.contains(&(i, j)), "missed {} and {}", i, j);
                }
            }
        }
    }

    #[test]
    fn disjoint_segments_report_nothing(
        rows in prop::collection::btree_set(-50i32..50, 1..8)
    ) {
        let segments: Vec<Segment> = rows
            .iter()
            .map(|&y| {
                let y = f64::from(y);
                Segment::new(Point2::new(-10.0, y), Point2::new(10.0, y + 0.5))
            })
            .collect();
        prop_assert!(FindIntersections::new(&segments).execute().is_empty());
    }

    #[test]
    fn simple_polygon_round_trips(poly in star_polygon()) {
        let segments = poly.segments();
        let loops = ConstructArrangement::new(&segments).execute().polygonize();
        prop_assert_eq!(loops.len(), 1);
        prop_assert_eq!(loops[0].len(), poly.len());
        prop_assert!((loops[0].signed_area() - poly.signed_area()).abs() < 1e-6);
        prop_assert!(loops[0].is_equivalent(&poly, Tolerance::default()));
    }

    #[test]
    fn status_tree_stays_sorted(ops in prop::collection::vec(tree_op(), 1..200)) {
        let order = |a: &i32, b: &i32| a.cmp(b);
        let mut tree = StatusTree::new();
        let mut model = BTreeSet::new();
        for op in ops {
            match op {
                TreeOp::Insert(k) => {
                    prop_assert_eq!(tree.insert(k, &order), model.insert(k));
                }
                TreeOp::Remove(k) => {
                    prop_assert_eq!(tree.remove(&k, &order).is_some(), model.remove(&k));
                }
            }
            let keys: Vec<i32> = tree.iter().copied().collect();
            let expected: Vec<i32> = model.iter().copied().collect();
            prop_assert_eq!(keys, expected);
            prop_assert_eq!(tree.len(), model.len());
        }
    }
}
