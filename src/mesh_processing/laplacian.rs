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
    io::SparseMatrix,
    mesh::PolygonSoup,
    mesh_processing::{mollify::mollify_intrinsic, tufted_cover::TuftedCover},
    operations::triangulation::EdgeLengthGeometry,
};

/// Weak cotan Laplacian and lumped mass of an intrinsic triangulation.
#[derive(Debug, Clone)]
pub struct TuftedLaplacian {
    /// Positive semi-definite: `L_ii = Σ w_ij`, `L_ij = -w_ij`.
    pub laplacian: SparseMatrix,
    /// Diagonal, one third of the incident face areas.
    pub mass: SparseMatrix,
}

/// Assembles `L` and `M` on `geom`, both divided by `sheets`.
pub fn assemble_cotan_laplacian(geom: &EdgeLengthGeometry, sheets: usize) -> TuftedResult<TuftedLaplacian> {
    if sheets == 0 {
        return Err(TuftedError::invalid_parameter("sheets", "at least one sheet".to_string()));
    }
    let mesh = &geom.mesh;
    let n = mesh.vertices.len();
    let inv = 1.0 / sheets as f64;

    let mut triplets = Vec::with_capacity(4 * mesh.edges.len());
    for e in 0..mesh.edges.len() {
        let w = inv * geom.cotan_weight(e)?;
        let [i, j] = mesh.edge_vertices(e);
        triplets.push((i, i, w));
        triplets.push((j, j, w));
        triplets.push((i, j, -w));
        triplets.push((j, i, -w));
    }
    let laplacian = SparseMatrix::from_triplets(n, n, triplets)?;

    let mut mass = vec![0.0; n];
    for f in 0..mesh.faces.len() {
        let third = inv * geom.face_area(f)? / 3.0;
        for v in mesh.face_vertices(f) {
            mass[v] += third;
        }
    }

    debug!(vertices = n, nnz = laplacian.nnz(), sheets, "assembled cotan Laplacian");
    Ok(TuftedLaplacian {
        laplacian,
        mass: SparseMatrix::from_diagonal(&mass),
    })
}

/// Tufted weak Laplacian and lumped mass of a polygon soup, indexed by the
/// vertices of the cleaned soup.
///
/// Runs cleanup, cover construction, mollification and intrinsic Delaunay
/// flips before assembling.
pub fn build_tufted_laplacian(soup: &PolygonSoup, mollify_factor: f64) -> TuftedResult<TuftedLaplacian> {
    info!(
        vertices = soup.vertex_count(),
        polygons = soup.face_count(),
        mollify_factor,
        "building tufted Laplacian"
    );
    let mut soup = soup.clone();
    soup.prepare()?;
    let triangles = soup.triangles()?;

    let cover = TuftedCover::from_positions(&soup.positions, &triangles)?;
    let sheets = cover.sheets;
    let mut lengths = cover.edge_lengths;
    mollify_intrinsic(&cover.mesh, &mut lengths, mollify_factor)?;

    let mut geom = EdgeLengthGeometry::new(cover.mesh, lengths)?;
    let flips = geom.flip_to_delaunay()?;
    info!(flips, sheets, "tufted cover flipped to intrinsic Delaunay");

    assemble_cotan_laplacian(&geom, sheets)
}
