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

use tracing::{debug, warn};

use crate::{
    error::{TuftedError, TuftedResult},
    geometry::Point3,
    mesh::SurfacePoint,
    operations::triangulation::{SignpostTriangulation, TracedPath},
    visualization::bubble_offset::BubbleOffset,
};

/// Interpolated samples inserted between consecutive trace points by default.
pub const DEFAULT_POINTS_PER_EDGE: usize = 10;

/// One polyline per intrinsic edge, traced over the input surface and lifted
/// through `bubble`.
///
/// `bubble` must be built on the input mesh of `tri`.
pub fn trace_intrinsic_edges(
    tri: &SignpostTriangulation,
    bubble: &BubbleOffset<'_>,
    points_per_edge: usize,
) -> TuftedResult<Vec<Vec<Point3<f64>>>> {
    let mesh = tri.mesh();
    let mut lines = Vec::with_capacity(mesh.edges.len());
    for e in 0..mesh.edges.len() {
        let h = mesh.edges[e].half_edge;
        let path = tri.trace_halfedge(h, true)?;
        lines.push(polyline(&path, bubble, points_per_edge, h)?);
    }
    debug!(lines = lines.len(), points_per_edge, "traced intrinsic edges");
    Ok(lines)
}

/// Lifts a traced path, inserting `points_per_edge` samples inside each
/// segment's face.
pub fn polyline(
    path: &TracedPath,
    bubble: &BubbleOffset<'_>,
    points_per_edge: usize,
    half_edge: usize,
) -> TuftedResult<Vec<Point3<f64>>> {
    let mesh = bubble.mesh();
    let Some(first) = path.points.first() else {
        return Ok(Vec::new());
    };
    let mut line = Vec::with_capacity(path.points.len() * (points_per_edge + 1));
    line.push(bubble.query_point(first));

    for (i, pair) in path.points.windows(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        let face = match path.faces.get(i) {
            Some(&f) if a.in_face(mesh, f).is_some() && b.in_face(mesh, f).is_some() => f,
            _ => {
                warn!(half_edge, segment = i, "recorded face misses a trace point, falling back to a shared face");
                SurfacePoint::shared_face(a, b, mesh).ok_or(TuftedError::TraceFailed {
                    half_edge,
                    reason: "consecutive trace points share no face",
                })?
            }
        };
        let (Some(ba), Some(bb)) = (a.in_face(mesh, face), b.in_face(mesh, face)) else {
            return Err(TuftedError::TraceFailed {
                half_edge,
                reason: "trace point outside its face",
            });
        };

        for k in 0..points_per_edge {
            let t = (k + 1) as f64 / (points_per_edge + 1) as f64;
            let bary = [0, 1, 2].map(|c| (1.0 - t) * ba[c] + t * bb[c]);
            line.push(bubble.query_face(face, bary));
        }
        line.push(bubble.query_point(b));
    }
    Ok(line)
}
