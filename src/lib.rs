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

//! Tufted covers of non-manifold triangle meshes.
//!
//! The cover doubles a mesh into a closed, edge-manifold surface on which
//! intrinsic Delaunay triangulations and cotan Laplacians behave. Intrinsic
//! edges can be traced back onto the input and drawn on a bubble-inflated
//! copy of it.

pub mod error;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod mesh_processing;
pub mod operations;
pub mod pipeline;
pub mod visualization;

pub use error::{TuftedError, TuftedResult};
pub use geometry::{Point3, Vector2, Vector3};
pub use io::{SparseMatrix, save_spmat, write_spmat};
pub use mesh::{PolygonSoup, SurfaceMesh, SurfacePoint};
pub use mesh_processing::{
    TuftedCover, TuftedLaplacian, build_intrinsic_tufted_cover, build_tufted_laplacian, mollify_intrinsic,
    mollify_intrinsic_absolute,
};
pub use operations::triangulation::{
    EdgeLengthGeometry, IntrinsicTriangulation, SignpostTriangulation, TraceOptions, TracedPath,
};
pub use pipeline::{TuftedOptions, VertexSeparatedCover, Visualization, VisualizationConfig};
pub use visualization::{BubbleOffset, subdivide_rounded, trace_intrinsic_edges};
