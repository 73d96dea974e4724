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

use crate::{
    geometry::{Point3, Vector3},
    mesh::{SurfaceMesh, SurfacePoint},
};

/// Default height of the bubble relative to a face's mean edge length.
pub const DEFAULT_BUBBLE_SCALE: f64 = 0.2;

/// Maps surface points to an inflated copy of the surface.
///
/// Each face bulges along its normal by `relative_scale * h * (27 b0 b1 b2)^(1/3)`
/// where `h` is its mean edge length. The bulge vanishes on edges and
/// vertices, so neighbouring faces meet without cracks.
#[derive(Debug, Clone)]
pub struct BubbleOffset<'a> {
    mesh: &'a SurfaceMesh,
    positions: &'a [Point3<f64>],
    face_normals: Vec<Vector3<f64>>,
    face_scales: Vec<f64>,
    pub relative_scale: f64,
}

impl<'a> BubbleOffset<'a> {
    pub fn new(mesh: &'a SurfaceMesh, positions: &'a [Point3<f64>]) -> Self {
        let mut face_normals = Vec::with_capacity(mesh.faces.len());
        let mut face_scales = Vec::with_capacity(mesh.faces.len());
        for f in 0..mesh.faces.len() {
            let [a, b, c] = mesh.face_vertices(f).map(|v| positions[v]);
            // zero for degenerate faces
            face_normals.push((b - a).cross(&(c - a)).normalized());
            face_scales.push((a.distance_to(&b) + b.distance_to(&c) + c.distance_to(&a)) / 3.0);
        }
        Self {
            mesh,
            positions,
            face_normals,
            face_scales,
            relative_scale: DEFAULT_BUBBLE_SCALE,
        }
    }

    pub fn with_relative_scale(mut self, relative_scale: f64) -> Self {
        self.relative_scale = relative_scale;
        self
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        self.mesh
    }

    pub fn query_point(&self, p: &SurfacePoint) -> Point3<f64> {
        match *p {
            SurfacePoint::Face { face, bary } => self.query_face(face, bary),
            _ => p.position(self.mesh, self.positions),
        }
    }

    /// Offset position of the point with barycentric coordinates `bary` in
    /// face `f` (corner order of [`SurfaceMesh::face_vertices`]).
    pub fn query_face(&self, f: usize, bary: [f64; 3]) -> Point3<f64> {
        let [a, b, c] = self.mesh.face_vertices(f).map(|v| self.positions[v]);
        let flat = a * bary[0] + b * bary[1] + c * bary[2];
        let product = (27.0 * bary[0] * bary[1] * bary[2]).max(0.0);
        let bump = self.relative_scale * self.face_scales[f] * product.cbrt();
        flat + self.face_normals[f] * bump
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn centroid_rises_by_scale_times_mean_edge() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = SurfaceMesh::from_glued_triangles(3, &[[0, 1, 2], [0, 2, 1]], &[5, 4, 3, 2, 1, 0])
            .expect("single triangle double");
        let bubble = BubbleOffset::new(&mesh, &positions).with_relative_scale(0.5);
        let third = 1.0 / 3.0;
        let p = bubble.query_face(0, [third, third, third]);
        let h = (2.0 + 2.0_f64.sqrt()) / 3.0;
        assert_relative_eq!(p.z, 0.5 * h, epsilon = 1e-12);
        assert_relative_eq!(p.x, third, epsilon = 1e-12);
    }
}
