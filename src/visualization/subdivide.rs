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
use tracing::debug;

use crate::{
    error::{TuftedError, TuftedResult},
    geometry::Point3,
    mesh::{PolygonSoup, SurfaceMesh, SurfacePoint},
    visualization::bubble_offset::BubbleOffset,
};

/// Deepest subdivision accepted; level `n` emits `4^n` triangles per face.
pub const MAX_SUBDIVISION_LEVEL: u32 = 8;

/// Samples every face on a barycentric lattice with `2^level` segments per
/// side, lifts the samples through a [`BubbleOffset`] of height `scale` and
/// returns the resulting triangles.
///
/// Lattice points on edges and corners are shared between neighbouring faces.
pub fn subdivide_rounded(
    mesh: &SurfaceMesh,
    positions: &[Point3<f64>],
    level: u32,
    scale: f64,
) -> TuftedResult<PolygonSoup> {
    if level > MAX_SUBDIVISION_LEVEL {
        return Err(TuftedError::invalid_parameter(
            "subdivision_level",
            format!("{level} exceeds {MAX_SUBDIVISION_LEVEL}"),
        ));
    }
    let bubble = BubbleOffset::new(mesh, positions).with_relative_scale(scale);
    let n = 1usize << level;

    let mut soup = PolygonSoup::default();
    let mut shared: AHashMap<SharedKey, usize> = AHashMap::new();

    for f in 0..mesh.faces.len() {
        let mut ids = vec![usize::MAX; (n + 1) * (n + 2) / 2];
        for i in 0..=n {
            for j in 0..=n - i {
                let bary = [
                    (n - i - j) as f64 / n as f64,
                    i as f64 / n as f64,
                    j as f64 / n as f64,
                ];
                let point = SurfacePoint::Face { face: f, bary }.reduced(mesh);
                let id = match shared_key(&point, n) {
                    Some(key) => *shared.entry(key).or_insert_with(|| {
                        soup.positions.push(bubble.query_point(&point));
                        soup.positions.len() - 1
                    }),
                    None => {
                        soup.positions.push(bubble.query_point(&point));
                        soup.positions.len() - 1
                    }
                };
                ids[lattice_index(n, i, j)] = id;
            }
        }

        for i in 0..n {
            for j in 0..n - i {
                let a = ids[lattice_index(n, i, j)];
                let b = ids[lattice_index(n, i + 1, j)];
                let c = ids[lattice_index(n, i, j + 1)];
                soup.polygons.push(vec![a, b, c]);
                if i + j + 1 < n {
                    let d = ids[lattice_index(n, i + 1, j + 1)];
                    soup.polygons.push(vec![b, d, c]);
                }
            }
        }
    }

    debug!(
        level,
        vertices = soup.positions.len(),
        triangles = soup.polygons.len(),
        "subdivided bubble surface"
    );
    Ok(soup)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SharedKey {
    Vertex(usize),
    /// Edge and lattice step along its representative half-edge.
    Edge(usize, usize),
}

fn shared_key(point: &SurfacePoint, n: usize) -> Option<SharedKey> {
    match *point {
        SurfacePoint::Vertex(v) => Some(SharedKey::Vertex(v)),
        SurfacePoint::Edge { edge, t } => Some(SharedKey::Edge(edge, (t * n as f64).round() as usize)),
        SurfacePoint::Face { .. } => None,
    }
}

#[inline]
fn lattice_index(n: usize, i: usize, j: usize) -> usize {
    // rows of decreasing length n + 1, n, ..., 1
    i * (n + 1) - i * (i.saturating_sub(1)) / 2 + j
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_index_is_dense() {
        let n = 4;
        let mut seen = Vec::new();
        for i in 0..=n {
            for j in 0..=n - i {
                seen.push(lattice_index(n, i, j));
            }
        }
        let expected: Vec<usize> = (0..(n + 1) * (n + 2) / 2).collect();
        assert_eq!(seen, expected);
    }
}
