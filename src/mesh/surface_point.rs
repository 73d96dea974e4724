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

use smallvec::SmallVec;

use crate::{
    geometry::Point3,
    mesh::basic_types::SurfaceMesh,
};

/// A location on a mesh surface.
///
/// `Edge::t` is measured along the edge's representative half-edge
/// (`edges[edge].half_edge`) starting at its tail. `Face::bary` follows the
/// corner order of [`SurfaceMesh::face_vertices`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfacePoint {
    Vertex(usize),
    Edge { edge: usize, t: f64 },
    Face { face: usize, bary: [f64; 3] },
}

impl SurfacePoint {
    /// Faces in which this point can be expressed, in ascending id order.
    pub fn candidate_faces(&self, mesh: &SurfaceMesh) -> SmallVec<[usize; 8]> {
        let mut faces: SmallVec<[usize; 8]> = match *self {
            SurfacePoint::Vertex(v) => mesh
                .outgoing_half_edges(v)
                .iter()
                .map(|&h| mesh.face_of(h))
                .collect(),
            SurfacePoint::Edge { edge, .. } => mesh.edge_faces(edge).into_iter().collect(),
            SurfacePoint::Face { face, .. } => SmallVec::from_slice(&[face]),
        };
        faces.sort_unstable();
        faces.dedup();
        faces
    }

    /// Barycentric coordinates of this point in face `f`, or `None` when the
    /// point does not lie on `f`'s closure.
    pub fn in_face(&self, mesh: &SurfaceMesh, f: usize) -> Option<[f64; 3]> {
        let hs = mesh.face_half_edges(f);
        match *self {
            SurfacePoint::Vertex(v) => {
                let k = hs.iter().position(|&h| mesh.tail(h) == v)?;
                let mut bary = [0.0; 3];
                bary[k] = 1.0;
                Some(bary)
            }
            SurfacePoint::Edge { edge, t } => {
                let k = hs.iter().position(|&h| mesh.edge_of(h) == edge)?;
                let canonical = mesh.edges[edge].half_edge == hs[k];
                let mut bary = [0.0; 3];
                // half-edge k runs from corner k to corner k + 1
                if canonical {
                    bary[k] = 1.0 - t;
                    bary[(k + 1) % 3] = t;
                } else {
                    bary[k] = t;
                    bary[(k + 1) % 3] = 1.0 - t;
                }
                Some(bary)
            }
            SurfacePoint::Face { face, bary } => (face == f).then_some(bary),
        }
    }

    /// Lowest-id face in which both points can be expressed.
    pub fn shared_face(a: &SurfacePoint, b: &SurfacePoint, mesh: &SurfaceMesh) -> Option<usize> {
        let fb = b.candidate_faces(mesh);
        a.candidate_faces(mesh).into_iter().find(|f| fb.contains(f))
    }

    /// Canonical form: face points exactly on a corner or an edge become
    /// vertex or edge points, edge points exactly at an end become vertices.
    pub fn reduced(&self, mesh: &SurfaceMesh) -> SurfacePoint {
        match *self {
            SurfacePoint::Vertex(_) => *self,
            SurfacePoint::Edge { edge, t } => {
                let [a, b] = mesh.edge_vertices(edge);
                if t == 0.0 {
                    SurfacePoint::Vertex(a)
                } else if t == 1.0 {
                    SurfacePoint::Vertex(b)
                } else {
                    *self
                }
            }
            SurfacePoint::Face { face, bary } => {
                let hs = mesh.face_half_edges(face);
                if let Some(k) = bary.iter().position(|&w| w == 1.0) {
                    return SurfacePoint::Vertex(mesh.tail(hs[k]));
                }
                if let Some(i) = bary.iter().position(|&w| w == 0.0) {
                    // the edge opposite corner i is half-edge i + 1
                    let h = hs[(i + 1) % 3];
                    let edge = mesh.edge_of(h);
                    let t = if mesh.edges[edge].half_edge == h {
                        bary[(i + 2) % 3]
                    } else {
                        bary[(i + 1) % 3]
                    };
                    return SurfacePoint::Edge { edge, t };
                }
                *self
            }
        }
    }

    /// Position under a per-vertex embedding.
    pub fn position(&self, mesh: &SurfaceMesh, positions: &[Point3<f64>]) -> Point3<f64> {
        match *self {
            SurfacePoint::Vertex(v) => positions[v],
            SurfacePoint::Edge { edge, t } => {
                let [a, b] = mesh.edge_vertices(edge);
                positions[a].lerp(&positions[b], t)
            }
            SurfacePoint::Face { face, bary } => {
                let [a, b, c] = mesh.face_vertices(face);
                positions[a] * bary[0] + positions[b] * bary[1] + positions[c] * bary[2]
            }
        }
    }
}
