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

//! End-to-end entry points.
//!
//! [`build_tufted_laplacian`] produces the operator pair for a polygon soup.
//! [`VertexSeparatedCover`] keeps a manifold cover with a signpost
//! triangulation around so the intrinsic edges can be drawn on an inflated
//! copy of the surface.

use tracing::{info, warn};

use crate::{
    error::{TuftedError, TuftedResult},
    geometry::Point3,
    mesh::{PolygonSoup, SurfaceMesh},
    mesh_processing::{
        mollify::{DEFAULT_MOLLIFY_FACTOR, mollify_intrinsic},
        tufted_cover::TuftedCover,
    },
    operations::triangulation::{EdgeLengthGeometry, SignpostTriangulation},
    visualization::{
        bubble_offset::{BubbleOffset, DEFAULT_BUBBLE_SCALE},
        geodesic_tracer::{DEFAULT_POINTS_PER_EDGE, trace_intrinsic_edges},
        subdivide::{MAX_SUBDIVISION_LEVEL, subdivide_rounded},
    },
};

pub use crate::mesh_processing::laplacian::{TuftedLaplacian, build_tufted_laplacian};

/// Bubble heights above this look detached from the surface.
const LARGE_BUBBLE_SCALE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuftedOptions {
    /// Mollification margin relative to the mean edge length. `0` skips it.
    pub mollify_factor: f64,
}

impl Default for TuftedOptions {
    fn default() -> Self {
        Self {
            mollify_factor: DEFAULT_MOLLIFY_FACTOR,
        }
    }
}

impl TuftedOptions {
    pub fn with_mollify_factor(mut self, mollify_factor: f64) -> Self {
        self.mollify_factor = mollify_factor;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualizationConfig {
    pub subdivision_level: u32,
    pub bubble_scale: f64,
    pub points_per_edge: usize,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            subdivision_level: 3,
            bubble_scale: DEFAULT_BUBBLE_SCALE,
            points_per_edge: DEFAULT_POINTS_PER_EDGE,
        }
    }
}

impl VisualizationConfig {
    pub fn with_subdivision_level(mut self, subdivision_level: u32) -> Self {
        self.subdivision_level = subdivision_level;
        self
    }

    pub fn with_bubble_scale(mut self, bubble_scale: f64) -> Self {
        self.bubble_scale = bubble_scale;
        self
    }

    pub fn with_points_per_edge(mut self, points_per_edge: usize) -> Self {
        self.points_per_edge = points_per_edge;
        self
    }

    pub fn validate(&self) -> TuftedResult<()> {
        if !self.bubble_scale.is_finite() || self.bubble_scale < 0.0 {
            return Err(TuftedError::invalid_parameter(
                "bubble_scale",
                format!("{} must be finite and non-negative", self.bubble_scale),
            ));
        }
        if self.subdivision_level > MAX_SUBDIVISION_LEVEL {
            return Err(TuftedError::invalid_parameter(
                "subdivision_level",
                format!("{} exceeds {MAX_SUBDIVISION_LEVEL}", self.subdivision_level),
            ));
        }
        if self.bubble_scale > LARGE_BUBBLE_SCALE {
            warn!(bubble_scale = self.bubble_scale, "large bubble scale");
        }
        Ok(())
    }
}

/// Renderable output of [`VertexSeparatedCover::generate_visualization`].
#[derive(Debug, Clone, Default)]
pub struct Visualization {
    pub surface: PolygonSoup,
    pub intrinsic_edges: Vec<Vec<Point3<f64>>>,
}

/// Tufted cover whose non-manifold vertices have been split, carrying an
/// intrinsic Delaunay signpost triangulation.
#[derive(Debug, Clone)]
pub struct VertexSeparatedCover {
    positions: Vec<Point3<f64>>,
    vertex_origin: Vec<usize>,
    sheets: usize,
    mollify_delta: f64,
    flips: usize,
    triangulation: SignpostTriangulation,
}

impl VertexSeparatedCover {
    pub fn build(soup: &PolygonSoup, options: &TuftedOptions) -> TuftedResult<Self> {
        let mut soup = soup.clone();
        soup.prepare()?;
        let triangles = soup.triangles()?;

        let cover = TuftedCover::from_positions(&soup.positions, &triangles)?;
        let sheets = cover.sheets;
        let mut mesh = cover.mesh;

        let vertex_origin = mesh.separate_nonmanifold_vertices();
        let positions: Vec<Point3<f64>> = vertex_origin.iter().map(|&o| soup.positions[o]).collect();
        let mut lengths = embedded_lengths(&mesh, &positions);
        mesh.log_statistics("vertex-separated tufted cover");

        let mollify_delta = mollify_intrinsic(&mesh, &mut lengths, options.mollify_factor)?;
        let geom = EdgeLengthGeometry::new(mesh, lengths)?;
        let mut triangulation = SignpostTriangulation::new(geom)?;
        let flips = triangulation.flip_to_delaunay()?;

        info!(
            sheets,
            split_vertices = vertex_origin.len() - soup.vertex_count(),
            mollify_delta,
            flips,
            "vertex-separated cover ready"
        );

        Ok(Self {
            positions,
            vertex_origin,
            sheets,
            mollify_delta,
            flips,
            triangulation,
        })
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.triangulation.input().mesh
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Cleaned-soup vertex each cover vertex was split from.
    pub fn vertex_origin(&self) -> &[usize] {
        &self.vertex_origin
    }

    pub fn sheets(&self) -> usize {
        self.sheets
    }

    pub fn mollify_delta(&self) -> f64 {
        self.mollify_delta
    }

    pub fn flips(&self) -> usize {
        self.flips
    }

    pub fn triangulation(&self) -> &SignpostTriangulation {
        &self.triangulation
    }

    /// Inflated surface plus one polyline per intrinsic edge. Depends only on
    /// the cover and `config`.
    pub fn generate_visualization(&self, config: &VisualizationConfig) -> TuftedResult<Visualization> {
        config.validate()?;
        let mesh = self.mesh();
        let surface = subdivide_rounded(mesh, &self.positions, config.subdivision_level, config.bubble_scale)?;
        let bubble = BubbleOffset::new(mesh, &self.positions).with_relative_scale(config.bubble_scale);
        let intrinsic_edges = trace_intrinsic_edges(&self.triangulation, &bubble, config.points_per_edge)?;

        info!(
            surface_vertices = surface.vertex_count(),
            surface_triangles = surface.face_count(),
            lines = intrinsic_edges.len(),
            "generated visualization"
        );
        Ok(Visualization {
            surface,
            intrinsic_edges,
        })
    }
}

fn embedded_lengths(mesh: &SurfaceMesh, positions: &[Point3<f64>]) -> Vec<f64> {
    (0..mesh.edges.len())
        .map(|e| {
            let [a, b] = mesh.edge_vertices(e);
            positions[a].distance_to(&positions[b])
        })
        .collect()
}
