mod common;

use approx::assert_relative_eq;
use common::*;
use tufted::{
    EdgeLengthGeometry, TuftedCover, TuftedError, mollify_intrinsic, mollify_intrinsic_absolute,
    mesh_processing::DEFAULT_MOLLIFY_FACTOR,
};

fn cover_of(soup: &tufted::PolygonSoup) -> TuftedCover {
    TuftedCover::from_positions(&soup.positions, &triangles(soup)).expect("cover")
}

#[test]
fn test_zero_factor_leaves_lengths_untouched() {
    let cover = cover_of(&sliver());
    let mut lengths = cover.edge_lengths.clone();
    let delta = mollify_intrinsic(&cover.mesh, &mut lengths, 0.0).expect("mollify");
    assert_eq!(delta, 0.0);
    assert_eq!(lengths, cover.edge_lengths);
}

#[test]
fn test_valid_mesh_with_margin_is_not_perturbed() {
    let cover = cover_of(&tetrahedron());
    let mut lengths = cover.edge_lengths.clone();
    let delta = mollify_intrinsic(&cover.mesh, &mut lengths, DEFAULT_MOLLIFY_FACTOR).expect("mollify");
    assert_eq!(delta, 0.0);
    assert_eq!(lengths, cover.edge_lengths);
}

#[test]
fn test_sliver_is_repaired() {
    let cover = cover_of(&sliver());
    let mut lengths = cover.edge_lengths.clone();

    let raw = EdgeLengthGeometry::new(cover.mesh.clone(), lengths.clone()).expect("geometry");
    let degenerate = (0..cover.mesh.faces.len()).any(|f| raw.face_lengths(f).is_err());
    assert!(degenerate);

    let delta = mollify_intrinsic(&cover.mesh, &mut lengths, 1e-3).expect("mollify");
    assert!(delta > 0.0);
    for (before, after) in cover.edge_lengths.iter().zip(&lengths) {
        assert!(after >= before);
        assert_relative_eq!(after - before, delta, epsilon = 1e-12);
    }

    let geom = EdgeLengthGeometry::new(cover.mesh.clone(), lengths).expect("geometry");
    let mean = geom.mean_edge_length();
    for f in 0..geom.mesh.faces.len() {
        let [a, b, c] = geom.face_lengths(f).expect("valid after mollification");
        for (x, y, z) in [(a, b, c), (b, c, a), (c, a, b)] {
            assert!(y + z - x >= 1e-3 * mean * (1.0 - 1e-9));
        }
    }
    for h in 0..geom.mesh.half_edges.len() {
        assert!(geom.corner_angle(h).expect("angle").is_finite());
    }
}

#[test]
fn test_mollification_is_idempotent() {
    let cover = cover_of(&sliver());
    let mut lengths = cover.edge_lengths.clone();
    mollify_intrinsic(&cover.mesh, &mut lengths, 1e-4).expect("first pass");
    let once = lengths.clone();
    let again = mollify_intrinsic(&cover.mesh, &mut lengths, 1e-4).expect("second pass");
    assert!(again <= 1e-14, "second pass added {again}");
    for (a, b) in once.iter().zip(&lengths) {
        assert_relative_eq!(*a, *b, epsilon = 1e-14);
    }
}

#[test]
fn test_absolute_variant_adds_exact_deficit() {
    let tri = single_triangle();
    let cover = tufted::build_intrinsic_tufted_cover(&tri.positions, &triangles(&tri), &[1.0, 1.0, 2.0])
        .expect("cover");
    let mut lengths = cover.edge_lengths.clone();
    let delta = mollify_intrinsic_absolute(&cover.mesh, &mut lengths, 0.5).expect("mollify");
    // 2 - 1 - 1 + 0.5
    assert_relative_eq!(delta, 0.5, epsilon = 1e-15);
    let again = mollify_intrinsic_absolute(&cover.mesh, &mut lengths, 0.5).expect("mollify");
    assert_eq!(again, 0.0);
}

#[test]
fn test_bad_factors_are_rejected() {
    let cover = cover_of(&single_triangle());
    let mut lengths = cover.edge_lengths.clone();
    assert!(matches!(
        mollify_intrinsic(&cover.mesh, &mut lengths, f64::NAN),
        Err(TuftedError::InvalidParameter { .. })
    ));
    assert!(matches!(
        mollify_intrinsic_absolute(&cover.mesh, &mut lengths, -1.0),
        Err(TuftedError::InvalidParameter { .. })
    ));
}

#[test]
fn test_square_is_left_alone() {
    let cover = cover_of(&unit_square());
    let mut lengths = cover.edge_lengths.clone();
    let delta = mollify_intrinsic(&cover.mesh, &mut lengths, DEFAULT_MOLLIFY_FACTOR).expect("mollify");
    assert_eq!(delta, 0.0);
    assert_eq!(lengths, cover.edge_lengths);
}

#[test]
fn test_needle_triangle_gets_margin() {
    let tri = single_triangle();
    // edges are numbered (0, 1), (1, 2), (0, 2)
    let needle = [1.0, 1.0, 1e-8];
    let cover = tufted::build_intrinsic_tufted_cover(&tri.positions, &triangles(&tri), &needle).expect("cover");
    let mut lengths = cover.edge_lengths.clone();
    let mean = needle.iter().sum::<f64>() / 3.0;

    let delta = mollify_intrinsic(&cover.mesh, &mut lengths, DEFAULT_MOLLIFY_FACTOR).expect("mollify");
    assert!(delta > 0.0);
    let geom = EdgeLengthGeometry::new(cover.mesh, lengths).expect("geometry");
    let [a, b, c] = geom.face_lengths(0).expect("valid");
    let slack = (a + b - c).min(b + c - a).min(c + a - b);
    assert!(slack >= DEFAULT_MOLLIFY_FACTOR * mean * (1.0 - 1e-6));
    for h in 0..geom.mesh.half_edges.len() {
        assert!(geom.corner_angle(h).expect("angle").is_finite());
    }
}
