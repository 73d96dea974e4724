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

use crate::mesh::basic_types::{SurfaceMesh, VertexRing};

impl SurfaceMesh {
    #[inline]
    pub fn next(&self, h: usize) -> usize {
        self.half_edges[h].next
    }

    /// Faces are triangles, so the previous half-edge is two steps ahead.
    #[inline]
    pub fn prev(&self, h: usize) -> usize {
        self.next(self.next(h))
    }

    #[inline]
    pub fn twin(&self, h: usize) -> usize {
        self.half_edges[h].twin
    }

    #[inline]
    pub fn tail(&self, h: usize) -> usize {
        self.half_edges[h].vertex
    }

    #[inline]
    pub fn head(&self, h: usize) -> usize {
        self.half_edges[self.half_edges[h].next].vertex
    }

    #[inline]
    pub fn face_of(&self, h: usize) -> usize {
        self.half_edges[h].face
    }

    #[inline]
    pub fn edge_of(&self, h: usize) -> usize {
        self.half_edges[h].edge
    }

    /// Next outgoing half-edge counter-clockwise around `tail(h)`.
    #[inline]
    pub fn rot_ccw_around_vertex(&self, h: usize) -> usize {
        self.twin(self.prev(h))
    }

    /// Next outgoing half-edge clockwise around `tail(h)`.
    #[inline]
    pub fn rot_cw_around_vertex(&self, h: usize) -> usize {
        self.next(self.twin(h))
    }

    pub fn face_half_edges(&self, f: usize) -> [usize; 3] {
        let h0 = self.faces[f].half_edge;
        let h1 = self.next(h0);
        let h2 = self.next(h1);
        [h0, h1, h2]
    }

    pub fn face_vertices(&self, f: usize) -> [usize; 3] {
        self.face_half_edges(f).map(|h| self.tail(h))
    }

    pub fn face_edges(&self, f: usize) -> [usize; 3] {
        self.face_half_edges(f).map(|h| self.edge_of(h))
    }

    pub fn edge_vertices(&self, e: usize) -> [usize; 2] {
        let h = self.edges[e].half_edge;
        [self.tail(h), self.head(h)]
    }

    /// The two faces on either side of edge `e`.
    pub fn edge_faces(&self, e: usize) -> [usize; 2] {
        let h = self.edges[e].half_edge;
        [self.face_of(h), self.face_of(self.twin(h))]
    }

    /// Outgoing half-edges of `v` in CCW order, restricted to the fan that
    /// contains `vertices[v].half_edge`.
    pub fn outgoing_half_edges(&self, v: usize) -> SmallVec<[usize; 8]> {
        let mut out = SmallVec::new();
        let Some(start) = self.vertices[v].half_edge else {
            return out;
        };
        let mut h = start;
        loop {
            out.push(h);
            h = self.rot_ccw_around_vertex(h);
            if h == start || out.len() > self.half_edges.len() {
                break;
            }
        }
        out
    }

    pub fn degree(&self, v: usize) -> usize {
        self.outgoing_half_edges(v).len()
    }

    pub fn one_ring_neighbors(&self, v: usize) -> Vec<usize> {
        self.outgoing_half_edges(v).iter().map(|&h| self.head(h)).collect()
    }

    pub fn vertex_ring_ccw(&self, v: usize) -> VertexRing {
        let halfedges_ccw: Vec<usize> = self.outgoing_half_edges(v).into_vec();
        let neighbors_ccw = halfedges_ccw.iter().map(|&h| self.head(h)).collect();
        let faces_ccw = halfedges_ccw.iter().map(|&h| self.face_of(h)).collect();
        VertexRing {
            center: v,
            halfedges_ccw,
            neighbors_ccw,
            faces_ccw,
        }
    }

    /// Number of disjoint fans around each vertex.
    pub fn vertex_fan_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.vertices.len()];
        let mut visited = vec![false; self.half_edges.len()];
        for start in 0..self.half_edges.len() {
            if visited[start] {
                continue;
            }
            counts[self.tail(start)] += 1;
            let mut h = start;
            while !visited[h] {
                visited[h] = true;
                h = self.rot_ccw_around_vertex(h);
            }
        }
        counts
    }

    /// True when every vertex with incident faces has exactly one fan.
    pub fn is_vertex_manifold(&self) -> bool {
        self.vertex_fan_counts().iter().all(|&c| c <= 1)
    }

    /// Number of faces incident to edge `e`, counted through its half-edges.
    pub fn edge_face_count(&self, e: usize) -> usize {
        self.half_edges.iter().filter(|he| he.edge == e).count()
    }

    /// Checks the arena invariants. Returns the first violation found.
    pub fn validate_connectivity(&self) -> Result<(), String> {
        let n = self.half_edges.len();
        for (h, he) in self.half_edges.iter().enumerate() {
            if he.next >= n || he.twin >= n {
                return Err(format!("half-edge {} has dangling next/twin", h));
            }
            if he.twin == h || self.twin(he.twin) != h {
                return Err(format!("half-edge {} twin is not an involution", h));
            }
            if self.next(self.next(self.next(h))) != h {
                return Err(format!("face cycle through half-edge {} is not a triangle", h));
            }
            if self.face_of(he.next) != he.face {
                return Err(format!("half-edge {} and its next disagree on face", h));
            }
            if self.tail(he.twin) != self.head(h) {
                return Err(format!("half-edge {} twin does not run backwards", h));
            }
            if he.edge >= self.edges.len() || self.edge_of(he.twin) != he.edge {
                return Err(format!("half-edge {} edge id is inconsistent", h));
            }
            if he.vertex >= self.vertices.len() {
                return Err(format!("half-edge {} tail out of range", h));
            }
        }
        for (e, edge) in self.edges.iter().enumerate() {
            if edge.half_edge >= n || self.edge_of(edge.half_edge) != e {
                return Err(format!("edge {} representative is inconsistent", e));
            }
        }
        for (f, face) in self.faces.iter().enumerate() {
            if face.half_edge >= n || self.face_of(face.half_edge) != f {
                return Err(format!("face {} representative is inconsistent", f));
            }
        }
        for (v, vert) in self.vertices.iter().enumerate() {
            if let Some(h) = vert.half_edge {
                if h >= n || self.tail(h) != v {
                    return Err(format!("vertex {} representative does not leave it", v));
                }
            }
        }
        Ok(())
    }
}
