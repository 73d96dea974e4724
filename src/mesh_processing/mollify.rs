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
    mesh::SurfaceMesh,
};

/// Relative mollification factor used when none is given.
pub const DEFAULT_MOLLIFY_FACTOR: f64 = 1e-6;

/// Adds one uniform amount to every edge length so that each triangle
/// satisfies the triangle inequality with margin `relative_factor` times the
/// mean edge length. Returns the amount added.
///
/// A factor `<= 0` leaves `lengths` untouched. The margin is taken against the
/// mean after the shift, so a second call adds nothing beyond rounding.
pub fn mollify_intrinsic(mesh: &SurfaceMesh, lengths: &mut [f64], relative_factor: f64) -> TuftedResult<f64> {
    if !relative_factor.is_finite() || relative_factor >= 1.0 {
        return Err(TuftedError::invalid_parameter(
            "mollify_factor",
            format!("{relative_factor} must be finite and below 1"),
        ));
    }
    if relative_factor <= 0.0 {
        return Ok(0.0);
    }
    check_lengths(mesh, lengths)?;
    if lengths.is_empty() {
        return Ok(0.0);
    }

    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    let worst = worst_violation(mesh, lengths, relative_factor * mean);
    let delta = (worst / (1.0 - relative_factor)).max(0.0);
    apply(lengths, delta);
    debug!(delta, mean, relative_factor, "mollified edge lengths");
    Ok(delta)
}

/// Same as [`mollify_intrinsic`] with an absolute margin `eps`.
pub fn mollify_intrinsic_absolute(mesh: &SurfaceMesh, lengths: &mut [f64], eps: f64) -> TuftedResult<f64> {
    if !eps.is_finite() || eps < 0.0 {
        return Err(TuftedError::invalid_parameter(
            "eps",
            format!("{eps} must be finite and non-negative"),
        ));
    }
    check_lengths(mesh, lengths)?;
    let delta = worst_violation(mesh, lengths, eps).max(0.0);
    apply(lengths, delta);
    debug!(delta, eps, "mollified edge lengths");
    Ok(delta)
}

fn check_lengths(mesh: &SurfaceMesh, lengths: &[f64]) -> TuftedResult<()> {
    if lengths.len() != mesh.edges.len() {
        return Err(TuftedError::invalid_parameter(
            "lengths",
            format!("{} lengths for {} edges", lengths.len(), mesh.edges.len()),
        ));
    }
    if let Some(l) = lengths.iter().find(|l| !l.is_finite() || **l < 0.0) {
        return Err(TuftedError::invalid_parameter(
            "lengths",
            format!("edge length {l} is not a finite non-negative number"),
        ));
    }
    Ok(())
}

/// `max over corners of l_b - l_a - l_c + eps`.
fn worst_violation(mesh: &SurfaceMesh, lengths: &[f64], eps: f64) -> f64 {
    let mut worst = f64::NEG_INFINITY;
    for f in 0..mesh.faces.len() {
        let l = mesh.face_edges(f).map(|e| lengths[e]);
        for k in 0..3 {
            let excess = l[k] - l[(k + 1) % 3] - l[(k + 2) % 3] + eps;
            worst = worst.max(excess);
        }
    }
    worst
}

fn apply(lengths: &mut [f64], delta: f64) {
    if delta > 0.0 {
        for l in lengths.iter_mut() {
            *l += delta;
        }
    }
}
