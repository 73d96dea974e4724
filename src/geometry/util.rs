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

use crate::geometry::vector_2::Vector2;

/// True when `(a, b, c)` are finite, positive and strictly satisfy every
/// triangle inequality.
#[inline]
pub fn is_valid_triangle(a: f64, b: f64, c: f64) -> bool {
    a.is_finite()
        && b.is_finite()
        && c.is_finite()
        && a > 0.0
        && b > 0.0
        && c > 0.0
        && a + b > c
        && b + c > a
        && c + a > b
}

/// Interior angle opposite side `c` in a triangle with sides `a, b, c`.
/// Caller guarantees [`is_valid_triangle`].
#[inline]
pub fn angle_opposite(a: f64, b: f64, c: f64) -> f64 {
    let cos = (a * a + b * b - c * c) / (2.0 * a * b);
    cos.clamp(-1.0, 1.0).acos()
}

/// Area from side lengths (Kahan's stable Heron formula).
pub fn area_from_lengths(a: f64, b: f64, c: f64) -> f64 {
    let mut s = [a, b, c];
    s.sort_by(|x, y| y.total_cmp(x));
    let [a, b, c] = s;
    let prod = (a + (b + c)) * (c - (a - b)) * (c + (a - b)) * (a + (b - c));
    0.25 * prod.max(0.0).sqrt()
}

/// Lays out the apex of a triangle over the base `p0 -> p1`, given
/// `l_0 = |apex - p0|` and `l_1 = |apex - p1|`. The apex lands to the left of
/// the base, so `(p0, p1, apex)` is counter-clockwise.
pub fn layout_apex(p0: Vector2<f64>, p1: Vector2<f64>, l_0: f64, l_1: f64) -> Vector2<f64> {
    let base = p1 - p0;
    let len = base.norm();
    let u = base.scale(1.0 / len);
    let n = Vector2::new(-u.y, u.x);
    let x = (len * len + l_0 * l_0 - l_1 * l_1) / (2.0 * len);
    let y = (l_0 * l_0 - x * x).max(0.0).sqrt();
    p0 + u.scale(x) + n.scale(y)
}

/// Barycentric coordinates of `p` in the planar triangle `(a, b, c)`.
pub fn barycentric_coords_2d(
    p: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
) -> Option<[f64; 3]> {
    let denom = (b - a).cross(&(c - a));
    if denom.abs() < f64::MIN_POSITIVE {
        return None; // degenerate triangle
    }
    let wb = (p - a).cross(&(c - a)) / denom;
    let wc = (b - a).cross(&(p - a)) / denom;
    Some([1.0 - wb - wc, wb, wc])
}

/// Wraps `angle` into `[0, period)`.
#[inline]
pub fn standardize_angle(angle: f64, period: f64) -> f64 {
    let r = angle.rem_euclid(period);
    if r >= period { 0.0 } else { r }
}

/// Intersection of the ray `origin + t * dir` (t > 0) with segment `a -> b`.
/// Returns `(t, s)` where `s` is the parameter along the segment.
pub fn ray_segment_intersection_2d(
    origin: Vector2<f64>,
    dir: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
) -> Option<(f64, f64)> {
    let e = b - a;
    let denom = dir.cross(&e);
    if denom.abs() < f64::MIN_POSITIVE {
        return None; // parallel
    }
    let w = a - origin;
    let t = w.cross(&e) / denom;
    let s = w.cross(&dir) / denom;
    Some((t, s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_triangle_angle_and_area() {
        assert!(is_valid_triangle(3.0, 4.0, 5.0));
        let a = angle_opposite(3.0, 4.0, 5.0);
        assert!((a - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((area_from_lengths(3.0, 4.0, 5.0) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn flat_triangle_is_rejected() {
        assert!(!is_valid_triangle(1.0, 1.0, 2.0));
        assert!(!is_valid_triangle(1.0, 1.0, 0.0));
        assert!(!is_valid_triangle(f64::NAN, 1.0, 1.0));
    }

    #[test]
    fn apex_layout_is_ccw() {
        let p = layout_apex(Vector2::new(0.0, 0.0), Vector2::new(4.0, 0.0), 3.0, 5.0);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 3.0).abs() < 1e-12);
        let q = layout_apex(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), 1.0, 1.0);
        assert!((q.x - 0.5).abs() < 1e-12);
        assert!((q.y - 0.75_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn ray_hits_segment() {
        let (t, s) = ray_segment_intersection_2d(
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(2.0, -1.0),
            Vector2::new(2.0, 1.0),
        )
        .unwrap();
        assert!((t - 2.0).abs() < 1e-12);
        assert!((s - 0.5).abs() < 1e-12);
    }
}
