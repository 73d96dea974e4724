mod common;

use approx::assert_relative_eq;
use common::*;
use tufted::{
    BubbleOffset, SurfacePoint, TuftedCover, TuftedError, TuftedOptions, VertexSeparatedCover,
    VisualizationConfig, subdivide_rounded,
};

fn tet_cover() -> TuftedCover {
    let soup = tetrahedron();
    TuftedCover::from_positions(&soup.positions, &triangles(&soup)).expect("cover")
}

#[test]
fn test_bubble_keeps_vertices_and_edges_flat() {
    let soup = tetrahedron();
    let cover = tet_cover();
    let bubble = BubbleOffset::new(&cover.mesh, &soup.positions).with_relative_scale(0.3);
    for v in 0..4 {
        assert_eq!(bubble.query_point(&SurfacePoint::Vertex(v)), soup.positions[v]);
    }
    for e in 0..cover.mesh.edges.len() {
        let point = SurfacePoint::Edge { edge: e, t: 0.25 };
        assert_eq!(bubble.query_point(&point), point.position(&cover.mesh, &soup.positions));
    }
    // a face point on an edge gets no bulge either
    let on_edge = bubble.query_face(0, [0.5, 0.5, 0.0]);
    let flat = SurfacePoint::Face { face: 0, bary: [0.5, 0.5, 0.0] }.position(&cover.mesh, &soup.positions);
    assert_relative_eq!(on_edge.distance_to(&flat), 0.0, epsilon = 1e-15);
}

#[test]
fn test_bubble_is_deterministic_and_scales_linearly() {
    let soup = tetrahedron();
    let cover = tet_cover();
    let a = BubbleOffset::new(&cover.mesh, &soup.positions).with_relative_scale(0.2);
    let b = BubbleOffset::new(&cover.mesh, &soup.positions).with_relative_scale(0.2);
    let c = BubbleOffset::new(&cover.mesh, &soup.positions).with_relative_scale(0.4);
    let flat = BubbleOffset::new(&cover.mesh, &soup.positions).with_relative_scale(0.0);
    let bary = [0.2, 0.3, 0.5];
    for f in 0..4 {
        let pa = a.query_face(f, bary);
        assert_eq!(pa, b.query_face(f, bary));
        let base = flat.query_face(f, bary);
        let pc = c.query_face(f, bary);
        assert_relative_eq!(pc.distance_to(&base), 2.0 * pa.distance_to(&base), epsilon = 1e-12);
    }
}

#[test]
fn test_bubble_bulges_outward_on_a_closed_mesh() {
    let soup = tetrahedron();
    let cover = tet_cover();
    let bubble = BubbleOffset::new(&cover.mesh, &soup.positions);
    let centroid = soup.positions.iter().fold(p(0.0, 0.0, 0.0), |acc, &x| acc + x) / 4.0;
    let third = 1.0 / 3.0;
    for f in 0..4 {
        let flat = SurfacePoint::Face { face: f, bary: [third; 3] }.position(&cover.mesh, &soup.positions);
        let lifted = bubble.query_face(f, [third; 3]);
        assert!(lifted.distance_to(&centroid) > flat.distance_to(&centroid));
    }
}

#[test]
fn test_subdivision_counts() {
    let soup = tetrahedron();
    let cover = tet_cover();
    let level0 = subdivide_rounded(&cover.mesh, &soup.positions, 0, 0.2).expect("subdivide");
    assert_eq!(level0.face_count(), 4);
    assert_eq!(level0.vertex_count(), 4);

    let level2 = subdivide_rounded(&cover.mesh, &soup.positions, 2, 0.2).expect("subdivide");
    assert_eq!(level2.face_count(), 4 * 16);
    // 4 corners, 3 interior samples per edge, 3 interior samples per face
    assert_eq!(level2.vertex_count(), 4 + 6 * 3 + 4 * 3);
    assert!(level2.triangles().is_ok());
    assert!(level2.positions.iter().all(|q| q.is_finite()));
}

#[test]
fn test_flat_subdivision_preserves_area() {
    let soup = unit_square();
    let cover = TuftedCover::from_positions(&soup.positions, &triangles(&soup)).expect("cover");
    let sub = subdivide_rounded(&cover.mesh, &soup.positions, 3, 0.0).expect("subdivide");
    // both sheets of the square
    assert_relative_eq!(total_area(&sub), 2.0, epsilon = 1e-12);
}

#[test]
fn test_pipeline_draws_every_intrinsic_edge() {
    let cover = VertexSeparatedCover::build(&fin(), &TuftedOptions::default()).expect("cover");
    assert_eq!(cover.sheets(), 2);
    let config = VisualizationConfig::default().with_subdivision_level(1).with_points_per_edge(4);
    let viz = cover.generate_visualization(&config).expect("visualization");

    let tri = cover.triangulation();
    assert_eq!(viz.intrinsic_edges.len(), tri.mesh().edges.len());
    for (e, line) in viz.intrinsic_edges.iter().enumerate() {
        assert!(line.iter().all(|q| q.is_finite()));
        if tri.is_original_edge(e) {
            assert_eq!(line.len(), 1 + 4 + 1);
        } else {
            assert!(line.len() >= 6);
        }
    }
    assert_eq!(viz.surface.face_count(), cover.mesh().faces.len() * 4);

    // same config, same output
    let again = cover.generate_visualization(&config).expect("visualization");
    assert_eq!(again.surface, viz.surface);
    assert_eq!(again.intrinsic_edges, viz.intrinsic_edges);
}

#[test]
fn test_pipeline_separates_bowtie() {
    let cover = VertexSeparatedCover::build(&bowtie(), &TuftedOptions::default()).expect("cover");
    assert_eq!(cover.vertex_origin().len(), 6);
    assert_eq!(cover.positions().len(), 6);
    assert_eq!(cover.positions()[5], cover.positions()[0]);
    assert!(cover.mesh().is_vertex_manifold());
}

#[test]
fn test_pipeline_handles_sliver_with_mollification() {
    let cover = VertexSeparatedCover::build(&sliver(), &TuftedOptions::default().with_mollify_factor(1e-3))
        .expect("cover");
    assert!(cover.mollify_delta() > 0.0);
    let viz = cover
        .generate_visualization(&VisualizationConfig::default().with_subdivision_level(0))
        .expect("visualization");
    assert!(viz.intrinsic_edges.iter().flatten().all(|q| q.is_finite()));
}

#[test]
fn test_visualization_config_validation() {
    assert!(VisualizationConfig::default().validate().is_ok());
    assert!(VisualizationConfig::default().with_bubble_scale(0.9).validate().is_ok());
    for bad in [-0.1, f64::NAN, f64::INFINITY] {
        let err = VisualizationConfig::default().with_bubble_scale(bad).validate().unwrap_err();
        assert!(matches!(err, TuftedError::InvalidParameter { name: "bubble_scale", .. }));
    }
    assert!(VisualizationConfig::default().with_subdivision_level(40).validate().is_err());
}
