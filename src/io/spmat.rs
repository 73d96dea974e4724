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

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use ahash::AHashMap;
use tracing::info;

use crate::error::{TuftedError, TuftedResult};

/// Sparse matrix in coordinate form. Entries are unique and stored in
/// column-major order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseMatrix {
    pub rows: usize,
    pub cols: usize,
    entries: Vec<(usize, usize, f64)>,
}

impl SparseMatrix {
    /// Sums duplicate `(row, col)` triplets.
    pub fn from_triplets<I>(rows: usize, cols: usize, triplets: I) -> TuftedResult<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut acc: AHashMap<(usize, usize), f64> = AHashMap::new();
        for (r, c, v) in triplets {
            if r >= rows || c >= cols {
                return Err(TuftedError::invalid_parameter(
                    "triplet",
                    format!("({r}, {c}) outside a {rows}x{cols} matrix"),
                ));
            }
            *acc.entry((r, c)).or_insert(0.0) += v;
        }
        let mut entries: Vec<(usize, usize, f64)> = acc.into_iter().map(|((r, c), v)| (r, c, v)).collect();
        entries.sort_by_key(|&(r, c, _)| (c, r));
        Ok(Self { rows, cols, entries })
    }

    pub fn from_diagonal(diagonal: &[f64]) -> Self {
        Self {
            rows: diagonal.len(),
            cols: diagonal.len(),
            entries: diagonal.iter().enumerate().map(|(i, &v)| (i, i, v)).collect(),
        }
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Value at `(row, col)`, zero when not stored.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.entries
            .binary_search_by_key(&(col, row), |&(r, c, _)| (c, r))
            .map(|i| self.entries[i].2)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn scale(&mut self, s: f64) {
        for entry in &mut self.entries {
            entry.2 *= s;
        }
    }

    pub fn row_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.rows];
        for &(r, _, v) in &self.entries {
            sums[r] += v;
        }
        sums
    }
}

/// Writes `row col value` lines, 1-based, in column-major order.
pub fn write_spmat<W: Write>(matrix: &SparseMatrix, out: &mut W) -> io::Result<()> {
    for (r, c, v) in matrix.iter() {
        writeln!(out, "{} {} {:?}", r + 1, c + 1, v)?;
    }
    out.flush()
}

pub fn save_spmat<P: AsRef<Path>>(matrix: &SparseMatrix, path: P) -> TuftedResult<()> {
    let path = path.as_ref();
    info!(path = %path.display(), nnz = matrix.nnz(), "writing sparse matrix");
    let to_error = |source| TuftedError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    let mut out = BufWriter::new(file);
    write_spmat(matrix, &mut out).map_err(to_error)
}
