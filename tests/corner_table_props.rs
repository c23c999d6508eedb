//! Property-based tests for the corner table.
//!
//! Streams are generated as lists of face runs, each closed by a terminator,
//! optionally followed by a dangling run.
//!
//! Run with: cargo test --test corner_table_props

use faceset::mesh::{CornerTable, IndexedFaceSet, TERMINATOR};
use faceset::nalgebra::{Point3, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Face runs of up to six vertex indices each.
fn arb_runs() -> impl Strategy<Value = Vec<Vec<i32>>> {
    prop::collection::vec(prop::collection::vec(0..64i32, 0..6), 0..12)
}

/// A stream built from closed runs plus a possibly empty dangling run.
fn arb_stream() -> impl Strategy<Value = (Vec<Vec<i32>>, Vec<i32>, usize)> {
    (
        arb_runs(),
        prop::collection::vec(0..64i32, 0..4),
        0..100usize,
    )
}

fn flatten(runs: &[Vec<i32>], dangling: &[i32]) -> Vec<i32> {
    let mut stream = Vec::new();
    for run in runs {
        stream.extend_from_slice(run);
        stream.push(TERMINATOR);
    }
    stream.extend_from_slice(dangling);
    stream
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn vertex_count_is_reconciled((runs, dangling, nv) in arb_stream()) {
        let stream = flatten(&runs, &dangling);
        let referenced = stream.iter().filter(|&&i| i >= 0).count();
        let faces = CornerTable::new(nv, &stream);

        prop_assert_eq!(faces.num_vertices(), nv.max(referenced));
        prop_assert_eq!(faces.num_corners(), stream.len());
    }

    #[test]
    fn faces_are_counted_by_terminator((runs, dangling, nv) in arb_stream()) {
        let faces = CornerTable::new(nv, &flatten(&runs, &dangling));
        prop_assert_eq!(faces.num_faces(), runs.len());
    }

    #[test]
    fn face_queries_match_runs((runs, dangling, nv) in arb_stream()) {
        let faces = CornerTable::new(nv, &flatten(&runs, &dangling));

        for (f, run) in runs.iter().enumerate() {
            let f = f as i32;
            prop_assert_eq!(faces.face_size(f), run.len());
            prop_assert_eq!(faces.face_first_corner(f), faces.face_vertex(f, 0));
            for (local, &v) in run.iter().enumerate() {
                prop_assert_eq!(faces.face_vertex(f, local as i32), v);
            }
            prop_assert_eq!(faces.face_vertex(f, run.len() as i32), -1);
        }

        let past = runs.len() as i32;
        prop_assert_eq!(faces.face_size(past), 0);
        prop_assert_eq!(faces.face_first_corner(past), -1);
        prop_assert_eq!(faces.face_vertex(past, 0), -1);
        prop_assert_eq!(faces.face_size(-1), 0);
        prop_assert_eq!(faces.face_first_corner(-1), -1);
        prop_assert_eq!(faces.face_vertex(-1, 0), -1);
    }

    #[test]
    fn corner_face_lies_inside_its_face((runs, dangling, nv) in arb_stream()) {
        let stream = flatten(&runs, &dangling);
        let faces = CornerTable::new(nv, &stream);
        let closed = stream.len() - dangling.len();

        for c in 0..stream.len() {
            let face = faces.corner_face(c as i32);
            if stream[c] == TERMINATOR || c >= closed {
                prop_assert_eq!(face, -1);
                continue;
            }
            prop_assert!(face >= 0);
            prop_assert!(faces.face_size(face) >= 1);
            let next = faces.next_corner(c as i32);
            prop_assert_eq!(faces.corner_face(next), face);
        }

        prop_assert_eq!(faces.corner_face(stream.len() as i32), -1);
        prop_assert_eq!(faces.corner_face(-1), -1);
    }

    #[test]
    fn next_corner_is_a_single_cycle_per_face((runs, dangling, nv) in arb_stream()) {
        let faces = CornerTable::new(nv, &flatten(&runs, &dangling));

        let mut start = 0i32;
        for run in &runs {
            let size = run.len() as i32;
            let mut seen = Vec::new();
            let mut c = start;
            for _ in 0..size {
                seen.push(c);
                c = faces.next_corner(c);
            }
            if size > 0 {
                prop_assert_eq!(c, start);
            }
            seen.sort_unstable();
            let expected: Vec<i32> = (start..start + size).collect();
            prop_assert_eq!(seen, expected);
            start += size + 1;
        }
    }

    #[test]
    fn triangles_survive_the_face_set(
        triangles in prop::collection::vec(prop::array::uniform9(-100.0..100.0f32), 1..8)
    ) {
        let mut face_set = IndexedFaceSet::with_triangle_capacity(triangles.len());
        for t in &triangles {
            face_set.push_triangle(
                Vector3::new(0.0, 0.0, 1.0),
                [
                    Point3::new(t[0], t[1], t[2]),
                    Point3::new(t[3], t[4], t[5]),
                    Point3::new(t[6], t[7], t[8]),
                ],
            );
        }

        let faces = face_set.faces();
        prop_assert!(faces.is_triangle_mesh());
        prop_assert_eq!(faces.num_faces(), triangles.len());
        for (f, t) in triangles.iter().enumerate() {
            for j in 0..3 {
                let p = face_set.vertex(faces.face_vertex(f as i32, j as i32));
                prop_assert_eq!(p, Some(Point3::new(t[3 * j], t[3 * j + 1], t[3 * j + 2])));
            }
        }
    }
}
