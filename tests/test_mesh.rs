mod common;

use approx::assert_relative_eq;
use common::*;
use tufted::{PolygonSoup, SurfaceMesh, SurfacePoint, TuftedError};

fn tet_mesh() -> SurfaceMesh {
    let soup = tetrahedron();
    SurfaceMesh::from_closed_triangles(4, &triangles(&soup)).expect("closed tetrahedron")
}

#[test]
fn test_prepare_cleans_and_triangulates() {
    let mut soup = PolygonSoup::new(
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(5.0, 5.0, 5.0),
            p(2.0, 0.0, 0.0),
        ],
        vec![vec![0, 1, 2, 3], vec![1, 1, 2], vec![1, 5, 2], vec![0, 3]],
    );
    soup.prepare().expect("prepare");

    // quad fanned into two triangles, duplicate and short polygons dropped
    assert_eq!(soup.face_count(), 3);
    // vertex 4 was unused, vertex 5 moved down to 4
    assert_eq!(soup.vertex_count(), 5);
    assert_eq!(soup.positions[4], p(2.0, 0.0, 0.0));
    assert_eq!(soup.triangles().expect("triangles"), vec![[0, 1, 2], [0, 2, 3], [1, 4, 2]]);
}

#[test]
fn test_prepare_rejects_bad_input() {
    let mut bad_index = PolygonSoup::new(vec![p(0.0, 0.0, 0.0)], vec![vec![0, 1, 2]]);
    assert!(matches!(
        bad_index.prepare(),
        Err(TuftedError::InvalidVertexIndex { polygon: 0, index: 1, vertex_count: 1 })
    ));

    let mut nothing_left = PolygonSoup::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)], vec![vec![0, 1, 1]]);
    assert!(matches!(nothing_left.prepare(), Err(TuftedError::EmptyMesh)));
}

#[test]
fn test_triangles_require_triangulation() {
    let soup = PolygonSoup::new(
        vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
        vec![vec![0, 1, 2, 3]],
    );
    assert!(matches!(
        soup.triangles(),
        Err(TuftedError::NonTriangularFace { face: 0, arity: 4 })
    ));
}

#[test]
fn test_closed_mesh_navigation() {
    let mesh = tet_mesh();
    mesh.validate_connectivity().expect("connectivity");
    assert_eq!(mesh.euler_characteristic(), 2);
    assert!(mesh.is_vertex_manifold());
    for v in 0..4 {
        assert_eq!(mesh.degree(v), 3);
        let mut ring = mesh.one_ring_neighbors(v);
        ring.sort();
        let expected: Vec<usize> = (0..4).filter(|&u| u != v).collect();
        assert_eq!(ring, expected);

        let fan = mesh.vertex_ring_ccw(v);
        for (k, &h) in fan.halfedges_ccw.iter().enumerate() {
            assert_eq!(mesh.tail(h), v);
            assert_eq!(fan.neighbors_ccw[k], mesh.head(h));
            assert_eq!(fan.faces_ccw[k], mesh.face_of(h));
            let next = fan.halfedges_ccw[(k + 1) % fan.halfedges_ccw.len()];
            assert_eq!(mesh.rot_ccw_around_vertex(h), next);
        }
    }
    for h in 0..mesh.half_edges.len() {
        assert_eq!(mesh.rot_cw_around_vertex(mesh.rot_ccw_around_vertex(h)), h);
        assert_eq!(mesh.tail(mesh.twin(h)), mesh.head(h));
    }
}

#[test]
fn test_open_mesh_is_rejected_as_closed() {
    let soup = single_triangle();
    assert!(matches!(
        SurfaceMesh::from_closed_triangles(3, &triangles(&soup)),
        Err(TuftedError::UnpairedEdge { .. })
    ));
}

#[test]
fn test_glued_triangles_validate_twins() {
    // twin of half-edge 0 points back at itself
    let err = SurfaceMesh::from_glued_triangles(3, &[[0, 1, 2], [0, 2, 1]], &[0, 4, 3, 2, 1, 5]).unwrap_err();
    assert!(matches!(err, TuftedError::InvalidHalfEdge(0)));
}

#[test]
fn test_edge_point_agrees_in_both_faces() {
    let soup = tetrahedron();
    let mesh = tet_mesh();
    for e in 0..mesh.edges.len() {
        let point = SurfacePoint::Edge { edge: e, t: 0.3 };
        let expected = point.position(&mesh, &soup.positions);
        let faces = point.candidate_faces(&mesh);
        assert_eq!(faces.len(), 2);
        for &f in &faces {
            let bary = point.in_face(&mesh, f).expect("edge lies on its faces");
            let in_face = SurfacePoint::Face { face: f, bary }.position(&mesh, &soup.positions);
            assert_relative_eq!(in_face.distance_to(&expected), 0.0, epsilon = 1e-15);
        }
    }
}

#[test]
fn test_shared_face_picks_lowest_id() {
    let mesh = tet_mesh();
    let a = SurfacePoint::Vertex(0);
    let b = SurfacePoint::Vertex(1);
    // faces 0 and 1 both contain the edge (0, 1)
    assert_eq!(SurfacePoint::shared_face(&a, &b, &mesh), Some(0));
    let inner = SurfacePoint::Face { face: 2, bary: [0.2, 0.3, 0.5] };
    assert_eq!(SurfacePoint::shared_face(&a, &inner, &mesh), None);
}

#[test]
fn test_reduced_face_points() {
    let mesh = tet_mesh();
    let [a, _, _] = mesh.face_vertices(1);
    assert_eq!(
        SurfacePoint::Face { face: 1, bary: [1.0, 0.0, 0.0] }.reduced(&mesh),
        SurfacePoint::Vertex(a)
    );

    let on_edge = SurfacePoint::Face { face: 1, bary: [0.25, 0.75, 0.0] };
    let reduced = on_edge.reduced(&mesh);
    assert!(matches!(reduced, SurfacePoint::Edge { .. }));
    let soup = tetrahedron();
    assert_relative_eq!(
        reduced.position(&mesh, &soup.positions).distance_to(&on_edge.position(&mesh, &soup.positions)),
        0.0,
        epsilon = 1e-15
    );

    let interior = SurfacePoint::Face { face: 1, bary: [0.2, 0.3, 0.5] };
    assert_eq!(interior.reduced(&mesh), interior);
}
