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

use tracing::{debug, info};

use crate::{
    error::{TuftedError, TuftedResult},
    geometry::util::standardize_angle,
    mesh::SurfaceMesh,
    operations::triangulation::edge_length_geometry::EdgeLengthGeometry,
};

/// Intrinsic triangulation of a fixed input surface that remembers, for every
/// half-edge, the direction it leaves its tail in ("signposts").
///
/// Intrinsic vertices are the input vertices, so a signpost angle measured
/// from the vertex's reference direction locates the half-edge on the input
/// surface no matter how many flips happened. Lengths and signposts are only
/// changed together, by [`SignpostTriangulation::flip_to_delaunay`].
#[derive(Debug, Clone)]
pub struct SignpostTriangulation {
    pub(crate) input: EdgeLengthGeometry,
    pub(crate) input_signposts: Vec<f64>,
    pub(crate) intrinsic: EdgeLengthGeometry,
    pub(crate) signposts: Vec<f64>,
    pub(crate) vertex_angle_sums: Vec<f64>,
    pub(crate) edge_is_original: Vec<bool>,
}

/// Signpost angles of every half-edge plus the cone angle of every vertex,
/// accumulated counter-clockwise from each vertex's representative half-edge.
fn compute_signposts(geom: &EdgeLengthGeometry) -> TuftedResult<(Vec<f64>, Vec<f64>)> {
    let mesh = &geom.mesh;
    let mut angles = vec![0.0; mesh.half_edges.len()];
    let mut sums = vec![0.0; mesh.vertices.len()];
    for v in 0..mesh.vertices.len() {
        let mut acc = 0.0;
        for h in mesh.outgoing_half_edges(v) {
            angles[h] = acc;
            acc += geom.corner_angle(h)?;
        }
        sums[v] = acc;
    }
    Ok((angles, sums))
}

/// Recomputes the signpost of `h` from its clockwise neighbour.
fn update_signpost_from_cw(
    geom: &EdgeLengthGeometry,
    signposts: &mut [f64],
    sums: &[f64],
    h: usize,
) -> TuftedResult<()> {
    let cw = geom.mesh.rot_cw_around_vertex(h);
    let v = geom.mesh.tail(h);
    signposts[h] = standardize_angle(signposts[cw] + geom.corner_angle(cw)?, sums[v]);
    Ok(())
}

impl SignpostTriangulation {
    /// Starts with the intrinsic triangulation equal to the input.
    ///
    /// The input must be vertex-manifold: every vertex carries a single fan.
    pub fn new(input: EdgeLengthGeometry) -> TuftedResult<Self> {
        if !input.mesh.is_vertex_manifold() {
            return Err(TuftedError::invalid_parameter(
                "input",
                "signposts need a vertex-manifold mesh; separate non-manifold vertices first",
            ));
        }
        for f in 0..input.mesh.faces.len() {
            input.face_lengths(f)?;
        }

        let (input_signposts, vertex_angle_sums) = compute_signposts(&input)?;
        let intrinsic = input.clone();
        let signposts = input_signposts.clone();
        let edge_is_original = vec![true; input.mesh.edges.len()];

        info!(
            vertices = input.mesh.vertices.len(),
            faces = input.mesh.faces.len(),
            "built signpost intrinsic triangulation"
        );

        Ok(Self {
            input,
            input_signposts,
            intrinsic,
            signposts,
            vertex_angle_sums,
            edge_is_original,
        })
    }

    /// Current intrinsic mesh.
    pub fn mesh(&self) -> &SurfaceMesh {
        &self.intrinsic.mesh
    }

    /// Current intrinsic edge lengths and connectivity.
    pub fn intrinsic(&self) -> &EdgeLengthGeometry {
        &self.intrinsic
    }

    /// The surface the triangulation lives on.
    pub fn input(&self) -> &EdgeLengthGeometry {
        &self.input
    }

    pub fn signpost(&self, h: usize) -> f64 {
        self.signposts[h]
    }

    pub fn vertex_angle_sum(&self, v: usize) -> f64 {
        self.vertex_angle_sums[v]
    }

    /// True until edge `e` has been flipped.
    pub fn is_original_edge(&self, e: usize) -> bool {
        self.edge_is_original[e]
    }

    /// Flips intrinsic edges until the triangulation is Delaunay, keeping
    /// signposts in step with every flip. Returns the number of flips.
    pub fn flip_to_delaunay(&mut self) -> TuftedResult<usize> {
        let signposts = &mut self.signposts;
        let sums = &self.vertex_angle_sums;
        let original = &mut self.edge_is_original;

        let flips = self.intrinsic.flip_to_delaunay_by(|geom, e| {
            original[e] = false;
            let ha = geom.mesh.edges[e].half_edge;
            let hd = geom.mesh.twin(ha);
            update_signpost_from_cw(geom, signposts, sums, ha)?;
            update_signpost_from_cw(geom, signposts, sums, hd)
        })?;

        debug!(flips, "signpost triangulation flipped to Delaunay");
        Ok(flips)
    }

    /// Largest disagreement between the stored signposts and signposts
    /// re-accumulated from the current lengths around each vertex, measured
    /// relative to the vertex's stored direction of its representative.
    pub fn max_signpost_drift(&self) -> TuftedResult<f64> {
        let mesh = &self.intrinsic.mesh;
        let mut worst: f64 = 0.0;
        for v in 0..mesh.vertices.len() {
            let Some(start) = mesh.vertices[v].half_edge else {
                continue;
            };
            let sum = self.vertex_angle_sums[v];
            let mut acc = self.signposts[start];
            let mut h = start;
            loop {
                let diff = (standardize_angle(acc, sum) - self.signposts[h]).abs();
                worst = worst.max(diff.min((sum - diff).abs()));
                acc += self.intrinsic.corner_angle(h)?;
                h = mesh.rot_ccw_around_vertex(h);
                if h == start {
                    break;
                }
            }
            let closure = (acc - self.signposts[start] - sum).abs();
            worst = worst.max(closure);
        }
        Ok(worst)
    }
}
