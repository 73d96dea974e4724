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

use std::collections::VecDeque;
use std::f64::consts::PI;

use tracing::{debug, warn};

use crate::{
    error::{TuftedError, TuftedResult},
    geometry::{
        Vector2,
        util::{angle_opposite, area_from_lengths, is_valid_triangle, layout_apex},
    },
    mesh::SurfaceMesh,
};

/// Slack on the opposite-angle sum before an edge counts as non-Delaunay.
/// Ties are treated as Delaunay so flipping always terminates.
pub const DELAUNAY_EPS: f64 = 1e-12;

/// Upper bound on flips per edge before `flip_to_delaunay` gives up.
const FLIP_CAP_PER_EDGE: usize = 100;

/// A triangle mesh whose metric is given purely by edge lengths.
#[derive(Debug, Clone)]
pub struct EdgeLengthGeometry {
    pub mesh: SurfaceMesh,
    pub edge_lengths: Vec<f64>,
}

impl EdgeLengthGeometry {
    pub fn new(mesh: SurfaceMesh, edge_lengths: Vec<f64>) -> TuftedResult<Self> {
        if edge_lengths.len() != mesh.edges.len() {
            return Err(TuftedError::invalid_parameter(
                "edge_lengths",
                format!("{} lengths for {} edges", edge_lengths.len(), mesh.edges.len()),
            ));
        }
        Ok(Self { mesh, edge_lengths })
    }

    #[inline]
    pub fn half_edge_length(&self, h: usize) -> f64 {
        self.edge_lengths[self.mesh.edge_of(h)]
    }

    /// Lengths of the face's half-edges in [`SurfaceMesh::face_half_edges`]
    /// order, validated against the triangle inequality.
    pub fn face_lengths(&self, f: usize) -> TuftedResult<[f64; 3]> {
        let l = self.mesh.face_half_edges(f).map(|h| self.half_edge_length(h));
        if is_valid_triangle(l[0], l[1], l[2]) {
            Ok(l)
        } else {
            Err(TuftedError::degenerate(f, l))
        }
    }

    /// Interior angle of `face(h)` at the tail of `h`.
    pub fn corner_angle(&self, h: usize) -> TuftedResult<f64> {
        self.face_lengths(self.mesh.face_of(h))?;
        let a = self.half_edge_length(h);
        let b = self.half_edge_length(self.mesh.prev(h));
        let opposite = self.half_edge_length(self.mesh.next(h));
        Ok(angle_opposite(a, b, opposite))
    }

    /// Interior angle of `face(h)` across from `h`.
    pub fn opposite_angle(&self, h: usize) -> TuftedResult<f64> {
        self.corner_angle(self.mesh.prev(h))
    }

    /// Cotangent of the angle across from `h`.
    pub fn opposite_cotan(&self, h: usize) -> TuftedResult<f64> {
        let f = self.mesh.face_of(h);
        self.face_lengths(f)?;
        let c = self.half_edge_length(h);
        let a = self.half_edge_length(self.mesh.next(h));
        let b = self.half_edge_length(self.mesh.prev(h));
        let area = area_from_lengths(a, b, c);
        if area <= 0.0 {
            return Err(TuftedError::degenerate(f, [c, a, b]));
        }
        Ok((a * a + b * b - c * c) / (4.0 * area))
    }

    pub fn face_area(&self, f: usize) -> TuftedResult<f64> {
        let [a, b, c] = self.face_lengths(f)?;
        Ok(area_from_lengths(a, b, c))
    }

    pub fn total_area(&self) -> TuftedResult<f64> {
        (0..self.mesh.faces.len()).map(|f| self.face_area(f)).sum()
    }

    pub fn mean_edge_length(&self) -> f64 {
        if self.edge_lengths.is_empty() {
            return 0.0;
        }
        self.edge_lengths.iter().sum::<f64>() / self.edge_lengths.len() as f64
    }

    /// `(cot α + cot β) / 2` for the two angles across from edge `e`.
    pub fn cotan_weight(&self, e: usize) -> TuftedResult<f64> {
        let h = self.mesh.edges[e].half_edge;
        let t = self.mesh.twin(h);
        Ok(0.5 * (self.opposite_cotan(h)? + self.opposite_cotan(t)?))
    }

    /// Intrinsic Delaunay test: the opposite angles sum to at most π.
    pub fn is_delaunay(&self, e: usize) -> TuftedResult<bool> {
        let h = self.mesh.edges[e].half_edge;
        let t = self.mesh.twin(h);
        if self.mesh.face_of(h) == self.mesh.face_of(t) {
            return Ok(true);
        }
        let sum = self.opposite_angle(h)? + self.opposite_angle(t)?;
        Ok(sum <= PI + DELAUNAY_EPS)
    }

    /// Number of outgoing half-edges in the fan of `tail(h)` that holds `h`.
    fn fan_degree(&self, h: usize) -> usize {
        let mut count = 1;
        let mut cur = self.mesh.rot_ccw_around_vertex(h);
        while cur != h && count <= self.mesh.half_edges.len() {
            count += 1;
            cur = self.mesh.rot_ccw_around_vertex(cur);
        }
        count
    }

    /// Length the diagonal would have after flipping `e`, or `None` when the
    /// surrounding quad is not strictly convex.
    pub fn flipped_length(&self, e: usize) -> TuftedResult<Option<f64>> {
        let ha = self.mesh.edges[e].half_edge;
        let hd = self.mesh.twin(ha);
        let (f0, f1) = (self.mesh.face_of(ha), self.mesh.face_of(hd));
        if f0 == f1 {
            return Ok(None);
        }
        self.face_lengths(f0)?;
        self.face_lengths(f1)?;

        // quad angles at both ends of the diagonal must stay below π
        let at_u = self.corner_angle(ha)? + self.corner_angle(self.mesh.next(hd))?;
        let at_v = self.corner_angle(hd)? + self.corner_angle(self.mesh.next(ha))?;
        if at_u >= PI || at_v >= PI {
            return Ok(None);
        }

        let l_uv = self.edge_lengths[e];
        let hb = self.mesh.next(ha);
        let hc = self.mesh.next(hb);
        let he = self.mesh.next(hd);
        let hf = self.mesh.next(he);

        let u = Vector2::new(0.0, 0.0);
        let v = Vector2::new(l_uv, 0.0);
        let c = layout_apex(u, v, self.half_edge_length(hc), self.half_edge_length(hb));
        let d = layout_apex(v, u, self.half_edge_length(hf), self.half_edge_length(he));
        Ok(Some((c - d).norm()))
    }

    /// Replaces edge `e` by the other diagonal of its quad. Returns
    /// `Ok(false)` when the edge cannot be flipped.
    ///
    /// Half-edge, edge and face ids are reused: `edges[e].half_edge` now runs
    /// between the two formerly opposite corners.
    pub fn flip_edge(&mut self, e: usize) -> TuftedResult<bool> {
        let ha = self.mesh.edges[e].half_edge;
        let hd = self.mesh.twin(ha);
        if self.fan_degree(ha) == 1 || self.fan_degree(hd) == 1 {
            return Ok(false);
        }
        let Some(new_length) = self.flipped_length(e)? else {
            return Ok(false);
        };

        let f0 = self.mesh.face_of(ha);
        let f1 = self.mesh.face_of(hd);
        let hb = self.mesh.next(ha); // v -> c
        let hc = self.mesh.next(hb); // c -> u
        let he = self.mesh.next(hd); // u -> d
        let hf = self.mesh.next(he); // d -> v
        let u = self.mesh.tail(ha);
        let v = self.mesh.tail(hd);
        let c = self.mesh.tail(hc);
        let d = self.mesh.tail(hf);

        let m = &mut self.mesh;

        // f0 becomes (d, c, u)
        m.half_edges[ha].vertex = d;
        m.half_edges[ha].next = hc;
        m.half_edges[hc].next = he;
        m.half_edges[he].next = ha;
        m.half_edges[he].face = f0;
        m.faces[f0].half_edge = ha;

        // f1 becomes (c, d, v)
        m.half_edges[hd].vertex = c;
        m.half_edges[hd].next = hf;
        m.half_edges[hf].next = hb;
        m.half_edges[hb].next = hd;
        m.half_edges[hb].face = f1;
        m.faces[f1].half_edge = hd;

        if m.vertices[u].half_edge == Some(ha) {
            m.vertices[u].half_edge = Some(he);
        }
        if m.vertices[v].half_edge == Some(hd) {
            m.vertices[v].half_edge = Some(hb);
        }

        self.edge_lengths[e] = new_length;
        Ok(true)
    }

    /// Flips until every edge is intrinsic Delaunay. Returns the flip count.
    pub fn flip_to_delaunay(&mut self) -> TuftedResult<usize> {
        self.flip_to_delaunay_by(|_, _| Ok(()))
    }

    /// Same as [`Self::flip_to_delaunay`], calling `after_flip` with the
    /// flipped edge right after each flip.
    pub fn flip_to_delaunay_by<F>(&mut self, mut after_flip: F) -> TuftedResult<usize>
    where
        F: FnMut(&Self, usize) -> TuftedResult<()>,
    {
        let n_edges = self.mesh.edges.len();
        let mut queue: VecDeque<usize> = (0..n_edges).collect();
        let mut in_queue = vec![true; n_edges];
        let max_flips = FLIP_CAP_PER_EDGE * n_edges.max(1);
        let mut flips = 0usize;

        while let Some(e) = queue.pop_front() {
            in_queue[e] = false;
            if self.is_delaunay(e)? {
                continue;
            }
            if !self.flip_edge(e)? {
                continue;
            }
            flips += 1;
            after_flip(self, e)?;

            if flips >= max_flips {
                warn!(flips, "flip cap reached before the triangulation became Delaunay");
                break;
            }

            let ha = self.mesh.edges[e].half_edge;
            let hd = self.mesh.twin(ha);
            for h in [self.mesh.next(ha), self.mesh.prev(ha), self.mesh.next(hd), self.mesh.prev(hd)] {
                let n = self.mesh.edge_of(h);
                if !in_queue[n] {
                    in_queue[n] = true;
                    queue.push_back(n);
                }
            }
        }

        debug!(flips, edges = n_edges, "flipped to intrinsic Delaunay");
        Ok(flips)
    }
}
