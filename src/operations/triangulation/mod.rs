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

pub mod edge_length_geometry;
pub mod signpost;
pub mod trace;

pub use edge_length_geometry::{DELAUNAY_EPS, EdgeLengthGeometry};
pub use signpost::SignpostTriangulation;
pub use trace::{TraceOptions, TracedPath};

use crate::error::TuftedResult;

/// Triangulations driven purely by edge lengths.
pub trait IntrinsicTriangulation {
    fn geometry(&self) -> &EdgeLengthGeometry;

    /// Flips until every edge is intrinsic Delaunay. Returns the flip count.
    fn flip_to_delaunay(&mut self) -> TuftedResult<usize>;

    /// Edges whose opposite angles still sum past π + [`DELAUNAY_EPS`].
    fn non_delaunay_edges(&self) -> TuftedResult<Vec<usize>> {
        let geom = self.geometry();
        let mut out = Vec::new();
        for e in 0..geom.mesh.edges.len() {
            if !geom.is_delaunay(e)? {
                out.push(e);
            }
        }
        Ok(out)
    }
}

impl IntrinsicTriangulation for EdgeLengthGeometry {
    fn geometry(&self) -> &EdgeLengthGeometry {
        self
    }

    fn flip_to_delaunay(&mut self) -> TuftedResult<usize> {
        EdgeLengthGeometry::flip_to_delaunay(self)
    }
}

impl IntrinsicTriangulation for SignpostTriangulation {
    fn geometry(&self) -> &EdgeLengthGeometry {
        self.intrinsic()
    }

    fn flip_to_delaunay(&mut self) -> TuftedResult<usize> {
        SignpostTriangulation::flip_to_delaunay(self)
    }
}
