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

use ahash::AHashMap;
use tracing::info;

use crate::{
    error::{TuftedError, TuftedResult},
    mesh::{
        basic_types::{Edge, Face, SurfaceMesh, Vertex},
        half_edge::HalfEdge,
    },
};

impl SurfaceMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mesh from triangles whose half-edges are glued pairwise.
    ///
    /// Half-edge `3 * f + k` runs from `triangles[f][k]` to
    /// `triangles[f][(k + 1) % 3]`; `twin_of[h]` names its partner. The
    /// gluing must be a fixed-point-free involution and partners must run in
    /// opposite directions.
    pub fn from_glued_triangles(
        vertex_count: usize,
        triangles: &[[usize; 3]],
        twin_of: &[usize],
    ) -> TuftedResult<Self> {
        if triangles.is_empty() {
            return Err(TuftedError::EmptyMesh);
        }
        let n_he = triangles.len() * 3;
        if twin_of.len() != n_he {
            return Err(TuftedError::InvalidHalfEdge(twin_of.len().min(n_he)));
        }

        let mut mesh = SurfaceMesh {
            vertices: vec![Vertex::default(); vertex_count],
            edges: Vec::with_capacity(n_he / 2),
            faces: Vec::with_capacity(triangles.len()),
            half_edges: Vec::with_capacity(n_he),
        };

        for (f, tri) in triangles.iter().enumerate() {
            for (k, &v) in tri.iter().enumerate() {
                if v >= vertex_count {
                    return Err(TuftedError::InvalidVertexIndex {
                        polygon: f,
                        index: v,
                        vertex_count,
                    });
                }
                let mut he = HalfEdge::new(v, f);
                he.next = 3 * f + (k + 1) % 3;
                mesh.half_edges.push(he);
                mesh.vertices[v].half_edge.get_or_insert(3 * f + k);
            }
            mesh.faces.push(Face { half_edge: 3 * f });
        }

        for h in 0..n_he {
            let t = twin_of[h];
            if t >= n_he || t == h || twin_of[t] != h {
                return Err(TuftedError::InvalidHalfEdge(h));
            }
            let (tail, head) = (mesh.tail(h), mesh.head(h));
            if mesh.tail(t) != head || mesh.head(t) != tail {
                return Err(TuftedError::UnpairedEdge { tail, head });
            }
            mesh.half_edges[h].twin = t;
            if h < t {
                let e = mesh.edges.len();
                mesh.edges.push(Edge { half_edge: h });
                mesh.half_edges[h].edge = e;
                mesh.half_edges[t].edge = e;
            }
        }

        Ok(mesh)
    }

    /// Builds a mesh from a closed, consistently oriented triangle list:
    /// every directed edge `(a, b)` must be matched by exactly one `(b, a)`.
    pub fn from_closed_triangles(vertex_count: usize, triangles: &[[usize; 3]]) -> TuftedResult<Self> {
        let mut directed: AHashMap<(usize, usize), usize> = AHashMap::with_capacity(triangles.len() * 3);
        for (f, tri) in triangles.iter().enumerate() {
            for k in 0..3 {
                let key = (tri[k], tri[(k + 1) % 3]);
                if directed.insert(key, 3 * f + k).is_some() {
                    return Err(TuftedError::UnpairedEdge { tail: key.0, head: key.1 });
                }
            }
        }

        let mut twin_of = vec![usize::MAX; triangles.len() * 3];
        for (&(a, b), &h) in &directed {
            match directed.get(&(b, a)) {
                Some(&t) => twin_of[h] = t,
                None => return Err(TuftedError::UnpairedEdge { tail: a, head: b }),
            }
        }

        Self::from_glued_triangles(vertex_count, triangles, &twin_of)
    }

    /// Splits every vertex whose incident faces form several fans into one
    /// vertex per fan. Returns, for every vertex of the result, the vertex it
    /// was split from (identity for untouched vertices).
    pub fn separate_nonmanifold_vertices(&mut self) -> Vec<usize> {
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); self.vertices.len()];
        for (h, he) in self.half_edges.iter().enumerate() {
            outgoing[he.vertex].push(h);
        }

        let mut origin: Vec<usize> = (0..self.vertices.len()).collect();
        let mut visited = vec![false; self.half_edges.len()];

        for v in 0..outgoing.len() {
            let mut fans = 0usize;
            for &start in &outgoing[v] {
                if visited[start] {
                    continue;
                }
                let target = if fans == 0 {
                    v
                } else {
                    self.vertices.push(Vertex::default());
                    origin.push(v);
                    self.vertices.len() - 1
                };
                fans += 1;

                self.vertices[target].half_edge = Some(start);
                let mut h = start;
                loop {
                    visited[h] = true;
                    self.half_edges[h].vertex = target;
                    h = self.rot_ccw_around_vertex(h);
                    if h == start || visited[h] {
                        break;
                    }
                }
            }
        }

        origin
    }

    pub fn euler_characteristic(&self) -> i64 {
        self.vertices.len() as i64 - self.edges.len() as i64 + self.faces.len() as i64
    }

    pub fn log_statistics(&self, label: &str) {
        info!(
            mesh = label,
            vertices = self.vertices.len(),
            edges = self.edges.len(),
            faces = self.faces.len(),
            half_edges = self.half_edges.len(),
            euler = self.euler_characteristic(),
            "mesh statistics"
        );
    }
}
