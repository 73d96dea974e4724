#![allow(dead_code)]

use rand::{Rng, SeedableRng, rngs::StdRng};
use tufted::{Point3, PolygonSoup};

pub fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(x, y, z)
}

pub fn soup(positions: Vec<Point3<f64>>, triangles: &[[usize; 3]]) -> PolygonSoup {
    PolygonSoup::from_triangles(positions, triangles)
}

/// Closed, outward oriented tetrahedron.
pub fn tetrahedron() -> PolygonSoup {
    soup(
        vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 0.0, 1.0)],
        &[[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]],
    )
}

pub fn single_triangle() -> PolygonSoup {
    soup(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)], &[[0, 1, 2]])
}

/// Unit square split along the (0, 2) diagonal:
///  v3(0,1) ---- v2(1,1)
///     |       /   |
///  v0(0,0) ---- v1(1,0)
pub fn unit_square() -> PolygonSoup {
    soup(
        vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
        &[[0, 1, 2], [0, 2, 3]],
    )
}

/// Flat rhombus whose (0, 2) diagonal is far from Delaunay.
pub fn thin_rhombus() -> PolygonSoup {
    soup(
        vec![p(-1.0, 0.0, 0.0), p(0.0, -0.2, 0.0), p(1.0, 0.0, 0.0), p(0.0, 0.2, 0.0)],
        &[[0, 1, 2], [0, 2, 3]],
    )
}

/// Three triangles hinged on the edge (0, 1).
pub fn fin() -> PolygonSoup {
    soup(
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.5, 1.0, 0.0),
            p(0.5, -1.0, 0.0),
            p(0.5, 0.0, 1.0),
        ],
        &[[0, 1, 2], [1, 0, 3], [0, 1, 4]],
    )
}

/// Two triangles touching only at vertex 0.
pub fn bowtie() -> PolygonSoup {
    soup(
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(-1.0, 0.0, 0.0),
            p(-1.0, -1.0, 0.0),
        ],
        &[[0, 1, 2], [0, 3, 4]],
    )
}

/// Pair of triangles where face 0 has collapsed onto a segment.
pub fn sliver() -> PolygonSoup {
    soup(
        vec![p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, -1.0, 0.0)],
        &[[0, 1, 2], [1, 0, 3]],
    )
}

/// `n x n` grid in the plane z = 0 with interior vertices jittered by up to
/// `jitter` cells.
pub fn flat_grid(n: usize, jitter: f64, seed: u64) -> PolygonSoup {
    let mut rng = StdRng::seed_from_u64(seed);
    let h = 1.0 / n as f64;
    let mut positions = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            let interior = i > 0 && i < n && j > 0 && j < n;
            let (dx, dy) = if interior && jitter > 0.0 {
                (
                    rng.random_range(-jitter..jitter) * h,
                    rng.random_range(-jitter..jitter) * h,
                )
            } else {
                (0.0, 0.0)
            };
            positions.push(p(i as f64 * h + dx, j as f64 * h + dy, 0.0));
        }
    }
    let id = |i: usize, j: usize| j * (n + 1) + i;
    let mut triangles = Vec::with_capacity(2 * n * n);
    for j in 0..n {
        for i in 0..n {
            triangles.push([id(i, j), id(i + 1, j), id(i + 1, j + 1)]);
            triangles.push([id(i, j), id(i + 1, j + 1), id(i, j + 1)]);
        }
    }
    soup(positions, &triangles)
}

pub fn triangles(soup: &PolygonSoup) -> Vec<[usize; 3]> {
    soup.triangles().expect("triangulated soup")
}

pub fn total_area(soup: &PolygonSoup) -> f64 {
    triangles(soup)
        .iter()
        .map(|&[a, b, c]| {
            let (pa, pb, pc) = (soup.positions[a], soup.positions[b], soup.positions[c]);
            0.5 * (pb - pa).cross(&(pc - pa)).norm()
        })
        .sum()
}
