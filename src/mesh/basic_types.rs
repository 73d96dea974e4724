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

use crate::mesh::half_edge::HalfEdge;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vertex {
    /// Any outgoing half-edge; `None` for isolated vertices.
    pub half_edge: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub half_edge: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub half_edge: usize,
}

/// Closed, edge-manifold triangle mesh stored as an arena of half-edges.
///
/// Every edge owns exactly two half-edges. Vertices may still be
/// non-manifold (several disjoint fans) until
/// [`SurfaceMesh::separate_nonmanifold_vertices`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceMesh {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub faces: Vec<Face>,
    pub half_edges: Vec<HalfEdge>,
}

/// CCW one-ring snapshot around a manifold vertex.
#[derive(Debug, Clone)]
pub struct VertexRing {
    pub center: usize,
    pub halfedges_ccw: Vec<usize>, // outgoing half-edges from `center`
    pub neighbors_ccw: Vec<usize>, // head of each half-edge
    pub faces_ccw: Vec<usize>,     // face spanning the wedge after each half-edge
}
