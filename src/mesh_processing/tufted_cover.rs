// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::f64::consts::PI;

use ahash::AHashMap;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::{
    error::{TuftedError, TuftedResult},
    geometry::{Point3, Vector3},
    mesh::SurfaceMesh,
};

/// Undirected edges of a triangle list, numbered in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TriangleEdges {
    index: AHashMap<(usize, usize), usize>,
    vertices: Vec<[usize; 2]>,
    faces: Vec<SmallVec<[usize; 2]>>,
}

impl TriangleEdges {
    pub fn new(triangles: &[[usize; 3]]) -> Self {
        let mut edges = Self::default();
        for (f, tri) in triangles.iter().enumerate() {
            for k in 0..3 {
                let key = edge_key(tri[k], tri[(k + 1) % 3]);
                let next_id = edges.vertices.len();
                let e = *edges.index.entry(key).or_insert(next_id);
                if e == next_id {
                    edges.vertices.push([key.0, key.1]);
                    edges.faces.push(SmallVec::new());
                }
                edges.faces[e].push(f);
            }
        }
        edges
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn id(&self, a: usize, b: usize) -> Option<usize> {
        self.index.get(&edge_key(a, b)).copied()
    }

    /// Endpoints of edge `e`, smaller id first.
    pub fn vertices(&self, e: usize) -> [usize; 2] {
        self.vertices[e]
    }

    /// Faces incident to edge `e`, in face id order.
    pub fn faces(&self, e: usize) -> &[usize] {
        &self.faces[e]
    }

    /// Euclidean length of every edge under `positions`.
    pub fn lengths_from_positions(&self, positions: &[Point3<f64>]) -> Vec<f64> {
        self.vertices
            .iter()
            .map(|&[a, b]| positions[a].distance_to(&positions[b]))
            .collect()
    }
}

#[inline]
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

/// Closed, edge-manifold double of a triangle mesh.
///
/// Vertex ids are the input's. `face_origin[f]` is the input face that cover
/// face `f` copies.
#[derive(Debug, Clone)]
pub struct TuftedCover {
    pub mesh: SurfaceMesh,
    pub edge_lengths: Vec<f64>,
    pub sheets: usize,
    pub face_origin: Vec<usize>,
}

impl TuftedCover {
    /// Cover with edge lengths measured from `positions`.
    pub fn from_positions(positions: &[Point3<f64>], triangles: &[[usize; 3]]) -> TuftedResult<Self> {
        let edges = TriangleEdges::new(triangles);
        let lengths = edges.lengths_from_positions(positions);
        build_with_edges(positions, triangles, &edges, &lengths)
    }
}

/// Builds the tufted cover of `triangles`.
///
/// `edge_lengths` is indexed like [`TriangleEdges::new`] numbers the input
/// edges. Positions only decide the cyclic order of faces around each edge.
pub fn build_intrinsic_tufted_cover(
    positions: &[Point3<f64>],
    triangles: &[[usize; 3]],
    edge_lengths: &[f64],
) -> TuftedResult<TuftedCover> {
    let edges = TriangleEdges::new(triangles);
    build_with_edges(positions, triangles, &edges, edge_lengths)
}

fn build_with_edges(
    positions: &[Point3<f64>],
    triangles: &[[usize; 3]],
    edges: &TriangleEdges,
    edge_lengths: &[f64],
) -> TuftedResult<TuftedCover> {
    if triangles.is_empty() {
        return Err(TuftedError::EmptyMesh);
    }
    let vertex_count = positions.len();
    for (f, tri) in triangles.iter().enumerate() {
        if let Some(&index) = tri.iter().find(|&&v| v >= vertex_count) {
            return Err(TuftedError::InvalidVertexIndex {
                polygon: f,
                index,
                vertex_count,
            });
        }
        if tri[0] == tri[1] || tri[1] == tri[2] || tri[2] == tri[0] {
            let l = [0, 1, 2].map(|k| positions[tri[k]].distance_to(&positions[tri[(k + 1) % 3]]));
            return Err(TuftedError::degenerate(f, l));
        }
    }
    if edge_lengths.len() != edges.len() {
        return Err(TuftedError::invalid_parameter(
            "edge_lengths",
            format!("{} lengths for {} input edges", edge_lengths.len(), edges.len()),
        ));
    }

    if let Some(cover) = identity_cover(vertex_count, triangles, edges, edge_lengths) {
        info!(
            faces = triangles.len(),
            "input is a closed oriented manifold, using it as its own cover"
        );
        return Ok(cover);
    }

    // face f gets a front copy 2f = (a, b, c) and a back copy 2f + 1 = (a, c, b)
    let mut cover_triangles = Vec::with_capacity(2 * triangles.len());
    for &[a, b, c] in triangles {
        cover_triangles.push([a, b, c]);
        cover_triangles.push([a, c, b]);
    }

    let mut twin_of = vec![usize::MAX; 3 * cover_triangles.len()];
    let mut input_edge_of = vec![usize::MAX; 3 * cover_triangles.len()];
    let mut non_manifold = 0usize;
    let mut boundary = 0usize;

    for e in 0..edges.len() {
        let [i, j] = edges.vertices(e);
        let fins = sorted_fins(positions, triangles, edges.faces(e), i, j);
        match fins.len() {
            1 => boundary += 1,
            2 => {}
            _ => non_manifold += 1,
        }

        for (a, fin) in fins.iter().enumerate() {
            let next = &fins[(a + 1) % fins.len()];
            let h_plus = fin.plus;
            let h_minus = next.minus;
            twin_of[h_plus] = h_minus;
            twin_of[h_minus] = h_plus;
            input_edge_of[h_plus] = e;
            input_edge_of[h_minus] = e;
        }
    }

    let mesh = SurfaceMesh::from_glued_triangles(vertex_count, &cover_triangles, &twin_of)?;
    let cover_lengths = mesh
        .edges
        .iter()
        .map(|edge| edge_lengths[input_edge_of[edge.half_edge]])
        .collect();
    let face_origin = (0..cover_triangles.len()).map(|f| f / 2).collect();

    debug!(boundary, non_manifold, "glued tufted cover");
    info!(
        faces = mesh.faces.len(),
        edges = mesh.edges.len(),
        input_faces = triangles.len(),
        "built tufted cover"
    );

    Ok(TuftedCover {
        mesh,
        edge_lengths: cover_lengths,
        sheets: 2,
        face_origin,
    })
}

/// The input itself when every edge has two oppositely oriented faces and
/// every vertex a single fan.
fn identity_cover(
    vertex_count: usize,
    triangles: &[[usize; 3]],
    edges: &TriangleEdges,
    edge_lengths: &[f64],
) -> Option<TuftedCover> {
    if (0..edges.len()).any(|e| edges.faces(e).len() != 2) {
        return None;
    }
    let mesh = SurfaceMesh::from_closed_triangles(vertex_count, triangles).ok()?;
    if !mesh.is_vertex_manifold() {
        return None;
    }
    let mut lengths = Vec::with_capacity(mesh.edges.len());
    for e in 0..mesh.edges.len() {
        let [a, b] = mesh.edge_vertices(e);
        lengths.push(edge_lengths[edges.id(a, b)?]);
    }
    Some(TuftedCover {
        mesh,
        edge_lengths: lengths,
        sheets: 1,
        face_origin: (0..triangles.len()).collect(),
    })
}

/// One face around an input edge, with the cover half-edges of its two
/// sides on that edge.
///
/// `plus` is the side whose normal is `e × r`, where `e` runs from the
/// smaller endpoint to the larger and `r` points into the face. It runs
/// along `e`; `minus` runs against it.
struct Fin {
    face: usize,
    angle: f64,
    plus: usize,
    minus: usize,
}

/// Faces around edge `(i, j)`, `i < j`, sorted by rotation angle about it.
fn sorted_fins(
    positions: &[Point3<f64>],
    triangles: &[[usize; 3]],
    faces: &[usize],
    i: usize,
    j: usize,
) -> SmallVec<[Fin; 2]> {
    let axis = (positions[j] - positions[i]).normalized();
    let mut reference: Option<(Vector3<f64>, Vector3<f64>)> = None;
    let mut fins: SmallVec<[Fin; 2]> = SmallVec::new();

    for &f in faces {
        let tri = triangles[f];
        let k = (0..3)
            .find(|&k| edge_key(tri[k], tri[(k + 1) % 3]) == (i, j))
            .unwrap_or(0);
        let opposite = tri[(k + 2) % 3];

        let front = 3 * (2 * f) + k;
        let back = 3 * (2 * f + 1) + (2 - k);
        let (plus, minus) = if tri[k] == i { (front, back) } else { (back, front) };

        let d = positions[opposite] - positions[i];
        let r = (d - axis.scale(d.dot(&axis))).normalized();
        let angle = match reference {
            None => {
                if r.norm2() > 0.0 {
                    reference = Some((r, axis.cross(&r)));
                }
                0.0
            }
            Some((r0, s0)) => {
                let a = r.dot(&s0).atan2(r.dot(&r0));
                if a < 0.0 { a + 2.0 * PI } else { a }
            }
        };
        fins.push(Fin {
            face: f,
            angle,
            plus,
            minus,
        });
    }

    fins.sort_by(|a, b| a.angle.total_cmp(&b.angle).then(a.face.cmp(&b.face)));
    fins
}
