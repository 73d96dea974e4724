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

use tracing::debug;

use crate::{
    error::{TuftedError, TuftedResult},
    geometry::Point3,
};

/// Raw polygon list over indexed vertex positions, as handed over by a mesh
/// loader or produced by the visualization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonSoup {
    pub positions: Vec<Point3<f64>>,
    pub polygons: Vec<Vec<usize>>,
}

impl PolygonSoup {
    pub fn new(positions: Vec<Point3<f64>>, polygons: Vec<Vec<usize>>) -> Self {
        Self { positions, polygons }
    }

    pub fn from_triangles(positions: Vec<Point3<f64>>, triangles: &[[usize; 3]]) -> Self {
        Self {
            positions,
            polygons: triangles.iter().map(|t| t.to_vec()).collect(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn validate_indices(&self) -> TuftedResult<()> {
        let vertex_count = self.positions.len();
        for (polygon, poly) in self.polygons.iter().enumerate() {
            if let Some(&index) = poly.iter().find(|&&i| i >= vertex_count) {
                return Err(TuftedError::InvalidVertexIndex {
                    polygon,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Drops polygons that mention a vertex more than once (or have fewer
    /// than three corners). Returns the number removed.
    pub fn strip_faces_with_duplicate_vertices(&mut self) -> usize {
        let before = self.polygons.len();
        self.polygons.retain(|poly| {
            poly.len() >= 3 && poly.iter().enumerate().all(|(i, v)| !poly[..i].contains(v))
        });
        before - self.polygons.len()
    }

    /// Removes vertices no polygon references and compacts indices.
    /// Returns the number removed.
    pub fn strip_unused_vertices(&mut self) -> usize {
        let mut used = vec![false; self.positions.len()];
        for poly in &self.polygons {
            for &v in poly {
                if v < used.len() {
                    used[v] = true;
                }
            }
        }

        let mut remap = vec![usize::MAX; self.positions.len()];
        let mut kept = Vec::with_capacity(self.positions.len());
        for (v, pos) in self.positions.iter().enumerate() {
            if used[v] {
                remap[v] = kept.len();
                kept.push(*pos);
            }
        }
        let removed = self.positions.len() - kept.len();
        self.positions = kept;
        for poly in &mut self.polygons {
            for v in poly.iter_mut() {
                *v = remap[*v];
            }
        }
        removed
    }

    /// Fan-triangulates every polygon with more than three corners.
    pub fn triangulate(&mut self) {
        let mut out = Vec::with_capacity(self.polygons.len());
        for poly in self.polygons.drain(..) {
            if poly.len() <= 3 {
                out.push(poly);
                continue;
            }
            for i in 1..poly.len() - 1 {
                out.push(vec![poly[0], poly[i], poly[i + 1]]);
            }
        }
        self.polygons = out;
    }

    /// Cleanup the core expects before cover construction.
    pub fn prepare(&mut self) -> TuftedResult<()> {
        self.validate_indices()?;
        let dup = self.strip_faces_with_duplicate_vertices();
        let unused = self.strip_unused_vertices();
        self.triangulate();
        debug!(
            removed_faces = dup,
            removed_vertices = unused,
            faces = self.polygons.len(),
            "prepared polygon soup"
        );
        if self.polygons.is_empty() {
            return Err(TuftedError::EmptyMesh);
        }
        Ok(())
    }

    /// Triangles of an already triangulated soup.
    pub fn triangles(&self) -> TuftedResult<Vec<[usize; 3]>> {
        self.validate_indices()?;
        self.polygons
            .iter()
            .enumerate()
            .map(|(face, poly)| match poly.as_slice() {
                &[a, b, c] => Ok([a, b, c]),
                _ => Err(TuftedError::NonTriangularFace {
                    face,
                    arity: poly.len(),
                }),
            })
            .collect()
    }
}
