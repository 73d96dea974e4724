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

//! Error types for cover construction, intrinsic triangulation and output.
//!
//! Every variant names the entity (vertex, face, half-edge, path) that
//! triggered it so a failed run can be diagnosed from the message alone.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tufted operations.
pub type TuftedResult<T> = Result<T, TuftedError>;

#[derive(Debug, Error)]
pub enum TuftedError {
    /// A polygon references a vertex that does not exist.
    #[error("polygon {polygon} references vertex {index}, but only {vertex_count} vertices exist")]
    InvalidVertexIndex {
        polygon: usize,
        index: usize,
        vertex_count: usize,
    },

    /// A polygon reached the core without being triangulated.
    #[error("face {face} has {arity} vertices; the core only accepts triangles")]
    NonTriangularFace { face: usize, arity: usize },

    /// Nothing to operate on.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// Edge lengths of a face violate the triangle inequality.
    #[error("degenerate triangle at face {face} with edge lengths {lengths:?}")]
    DegenerateTriangle { face: usize, lengths: [f64; 3] },

    /// A closed mesh was expected but a directed edge has no unique partner.
    #[error("directed edge ({tail}, {head}) has no unique opposite half-edge")]
    UnpairedEdge { tail: usize, head: usize },

    #[error("half-edge {0} does not exist")]
    InvalidHalfEdge(usize),

    #[error("vertex {0} has no incident faces")]
    IsolatedVertex(usize),

    /// The straight-line walk for a half-edge could not be completed.
    #[error("tracing half-edge {half_edge} failed: {reason}")]
    TraceFailed {
        half_edge: usize,
        reason: &'static str,
    },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// Writing an output file failed. Fatal to that output only.
    #[error("failed to write output {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TuftedError {
    pub fn degenerate(face: usize, lengths: [f64; 3]) -> Self {
        TuftedError::DegenerateTriangle { face, lengths }
    }

    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        TuftedError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
