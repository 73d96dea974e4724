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

use tracing::warn;

use crate::{
    error::{TuftedError, TuftedResult},
    geometry::{
        Point3, Vector2,
        util::{barycentric_coords_2d, layout_apex, ray_segment_intersection_2d},
    },
    mesh::{SurfaceMesh, SurfacePoint},
    operations::triangulation::signpost::SignpostTriangulation,
};

/// Fraction of the traced length under which an edge crossing counts as the
/// end of the walk.
const END_SNAP_RELATIVE: f64 = 1e-12;

/// Tolerance on the segment parameter when accepting an edge crossing.
const CROSSING_SLACK: f64 = 1e-9;

/// Straight path on the input surface.
///
/// `faces[i]` is the input face crossed between `points[i]` and
/// `points[i + 1]`, so `faces.len() == points.len() - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedPath {
    pub points: Vec<SurfacePoint>,
    pub faces: Vec<usize>,
}

impl TracedPath {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn positions(&self, mesh: &SurfaceMesh, positions: &[Point3<f64>]) -> Vec<Point3<f64>> {
        self.points.iter().map(|p| p.position(mesh, positions)).collect()
    }

    /// Polyline length under an embedding.
    pub fn length(&self, mesh: &SurfaceMesh, positions: &[Point3<f64>]) -> f64 {
        self.positions(mesh, positions)
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceOptions {
    /// Replace the final face point by the target vertex.
    pub snap_end: bool,
    /// Shorten the traced length by this fraction so the walk stops strictly
    /// inside the last face. Zero disables it.
    pub end_shrink: f64,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            snap_end: true,
            end_shrink: 0.0,
        }
    }
}

/// Planar layout of one input face. Corner `k` is the tail of
/// `half_edges[k]`; the order is a rotation of the face's own order.
struct FaceLayout {
    face: usize,
    half_edges: [usize; 3],
    corners: [Vector2<f64>; 3],
}

impl FaceLayout {
    /// Reorders layout barycentrics into the corner order of
    /// [`SurfaceMesh::face_vertices`].
    fn to_face_order(&self, mesh: &SurfaceMesh, bary: [f64; 3]) -> [f64; 3] {
        let hs = mesh.face_half_edges(self.face);
        let mut out = [0.0; 3];
        for (i, h) in self.half_edges.iter().enumerate() {
            if let Some(j) = hs.iter().position(|x| x == h) {
                out[j] = bary[i];
            }
        }
        out
    }
}

impl SignpostTriangulation {
    /// Path of intrinsic half-edge `h` across the input surface.
    pub fn trace_halfedge(&self, h: usize, snap_end: bool) -> TuftedResult<TracedPath> {
        self.trace_halfedge_with(
            h,
            TraceOptions {
                snap_end,
                ..TraceOptions::default()
            },
        )
    }

    pub fn trace_halfedge_with(&self, h: usize, opts: TraceOptions) -> TuftedResult<TracedPath> {
        let mesh = &self.intrinsic.mesh;
        if h >= mesh.half_edges.len() {
            return Err(TuftedError::InvalidHalfEdge(h));
        }
        let source = mesh.tail(h);
        let target = mesh.head(h);
        let input = &self.input.mesh;
        if input.vertices[source].half_edge.is_none() {
            return Err(TuftedError::IsolatedVertex(source));
        }

        let e = mesh.edge_of(h);
        if self.edge_is_original[e] {
            // unflipped edges keep their input half-edge id
            return Ok(TracedPath {
                points: vec![SurfacePoint::Vertex(source), SurfacePoint::Vertex(target)],
                faces: vec![input.face_of(h)],
            });
        }

        let length = self.intrinsic.edge_lengths[e] * (1.0 - opts.end_shrink.clamp(0.0, 1.0));
        let (wedge, phi) = self.locate_wedge(source, self.signposts[h])?;

        let mut layout = self.layout_from_half_edge(wedge)?;
        let mut excluded: [bool; 3] = [true, false, true];
        // the walk leaves corner 0, so only the edge across from it can be hit
        let mut origin = layout.corners[0];
        let dir = Vector2::from_angle(phi);
        let mut remaining = length;

        let mut points = vec![SurfacePoint::Vertex(source)];
        let mut faces = Vec::new();
        let max_steps = 4 * input.faces.len() + 16;
        let mut finished = false;

        for _ in 0..max_steps {
            let Some((k, t, s)) = best_crossing(&layout, origin, dir, &excluded) else {
                return Err(TuftedError::TraceFailed {
                    half_edge: h,
                    reason: "ray left a face without crossing any edge",
                });
            };

            if t >= remaining - END_SNAP_RELATIVE * length {
                let q = origin + dir.scale(remaining);
                let bary = clean_bary(
                    barycentric_coords_2d(q, layout.corners[0], layout.corners[1], layout.corners[2])
                        .ok_or(TuftedError::TraceFailed {
                            half_edge: h,
                            reason: "degenerate face layout",
                        })?,
                );
                points.push(SurfacePoint::Face {
                    face: layout.face,
                    bary: layout.to_face_order(input, bary),
                });
                faces.push(layout.face);
                finished = true;
                break;
            }

            let s = s.clamp(0.0, 1.0);
            let hk = layout.half_edges[k];
            let edge = input.edge_of(hk);
            let t_edge = if input.edges[edge].half_edge == hk { s } else { 1.0 - s };
            points.push(SurfacePoint::Edge { edge, t: t_edge });
            faces.push(layout.face);

            let a = layout.corners[k];
            let b = layout.corners[(k + 1) % 3];
            origin = a + (b - a).scale(s);
            remaining -= t;

            let (next_layout, entry) = self.unfold_across(hk, a, b)?;
            layout = next_layout;
            excluded = [false; 3];
            excluded[entry] = true;
        }

        if !finished {
            return Err(TuftedError::TraceFailed {
                half_edge: h,
                reason: "step limit reached",
            });
        }

        if let (true, Some(&last_face)) = (opts.snap_end, faces.last()) {
            if input.face_vertices(last_face).contains(&target) {
                if let Some(last) = points.last_mut() {
                    *last = SurfacePoint::Vertex(target);
                }
            } else {
                warn!(half_edge = h, target, face = last_face, "trace ended away from its target vertex");
            }
        }

        Ok(TracedPath { points, faces })
    }

    /// Input half-edge leaving `v` whose wedge contains direction `angle`,
    /// plus the angle measured inside that wedge.
    fn locate_wedge(&self, v: usize, angle: f64) -> TuftedResult<(usize, f64)> {
        let input = &self.input.mesh;
        let ring = input.outgoing_half_edges(v);
        let mut chosen = ring[0];
        for &g in ring.iter() {
            if self.input_signposts[g] <= angle {
                chosen = g;
            }
        }
        let width = self.input.corner_angle(chosen)?;
        let phi = (angle - self.input_signposts[chosen]).clamp(0.0, width);
        Ok((chosen, phi))
    }

    /// Layout of `face(g)` with `tail(g)` at the origin and `head(g)` on +x.
    fn layout_from_half_edge(&self, g: usize) -> TuftedResult<FaceLayout> {
        let input = &self.input;
        let face = input.mesh.face_of(g);
        input.face_lengths(face)?;

        let hs = input.mesh.face_half_edges(face);
        let j = hs.iter().position(|&x| x == g).unwrap_or(0);
        let half_edges = [hs[j], hs[(j + 1) % 3], hs[(j + 2) % 3]];
        let l0 = input.half_edge_length(half_edges[0]);
        let p0 = Vector2::zero();
        let p1 = Vector2::new(l0, 0.0);
        let p2 = layout_apex(
            p0,
            p1,
            input.half_edge_length(half_edges[2]),
            input.half_edge_length(half_edges[1]),
        );
        Ok(FaceLayout {
            face,
            half_edges,
            corners: [p0, p1, p2],
        })
    }

    /// Lays out the face across half-edge `hk` (which runs `a -> b` in the
    /// current layout) in the same plane. Returns the layout and the index of
    /// the entry edge in it.
    fn unfold_across(&self, hk: usize, a: Vector2<f64>, b: Vector2<f64>) -> TuftedResult<(FaceLayout, usize)> {
        let input = &self.input;
        let tw = input.mesh.twin(hk);
        let face = input.mesh.face_of(tw);
        input.face_lengths(face)?;

        let n = input.mesh.next(tw);
        let p = input.mesh.prev(tw);
        // twin runs b -> a; the apex sits to its left
        let apex = layout_apex(b, a, input.half_edge_length(p), input.half_edge_length(n));
        Ok((
            FaceLayout {
                face,
                half_edges: [tw, n, p],
                corners: [b, a, apex],
            },
            0,
        ))
    }
}

/// Edge of `layout` the ray hits first. Returns `(edge index, ray t, segment s)`.
fn best_crossing(
    layout: &FaceLayout,
    origin: Vector2<f64>,
    dir: Vector2<f64>,
    excluded: &[bool; 3],
) -> Option<(usize, f64, f64)> {
    let mut best: Option<(usize, f64, f64, f64)> = None;
    for k in 0..3 {
        if excluded[k] {
            continue;
        }
        let a = layout.corners[k];
        let b = layout.corners[(k + 1) % 3];
        let Some((t, s)) = ray_segment_intersection_2d(origin, dir, a, b) else {
            continue;
        };
        if t <= 0.0 {
            continue;
        }
        let violation = (-s).max(s - 1.0).max(0.0);
        let better = match best {
            None => true,
            Some((_, bt, _, bv)) => {
                if violation <= CROSSING_SLACK && bv <= CROSSING_SLACK {
                    t < bt
                } else {
                    violation < bv
                }
            }
        };
        if better {
            best = Some((k, t, s, violation));
        }
    }
    best.map(|(k, t, s, _)| (k, t, s))
}

/// Clamps tiny negative coordinates and renormalizes.
fn clean_bary(bary: [f64; 3]) -> [f64; 3] {
    let b = bary.map(|w| w.max(0.0));
    let sum: f64 = b.iter().sum();
    if sum > 0.0 { b.map(|w| w / sum) } else { [1.0 / 3.0; 3] }
}
