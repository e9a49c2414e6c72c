//! # Profile Curve
//!
//! Cubic Bezier curve in the (radius, y) plane, used by the Bezier cone
//! family.
//!
//! The curve runs from the bottom ring `P0 = (r_bottom, -L/2)` to the top
//! ring `P3 = (r_top, L/2)`. The two inner control points come from a
//! normalized descriptor `[x1, y1, x2, y2]` in the CSS `cubic-bezier`
//! convention: `x` blends the radius from bottom to top and `y` blends the
//! axial position. With all four values in `[0, 1]` the axial coordinate is
//! monotone in `t`, which is what makes [`ProfileCurve::t_at_y`] a plain
//! bisection.

use config::constants::{approx_equal, approx_zero, DEGENERATE_EPSILON};
use glam::DVec2;

/// Bisection steps for axial inversion; 2^-60 is below f64 resolution on [0, 1].
const INVERSION_STEPS: usize = 60;

/// Cubic Bezier profile curve, control points in (radius, y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileCurve {
    points: [DVec2; 4],
}

impl ProfileCurve {
    /// Creates a curve from explicit control points.
    pub fn new(points: [DVec2; 4]) -> Self {
        Self { points }
    }

    /// Builds the curve of a Bezier cone centered on the origin.
    ///
    /// # Arguments
    ///
    /// * `bottom_diameter` - Ring diameter at `y = -length / 2`
    /// * `top_diameter` - Ring diameter at `y = length / 2`
    /// * `length` - Axial extent
    /// * `curve` - Normalized inner control points `[x1, y1, x2, y2]`
    pub fn from_descriptor(
        bottom_diameter: f64,
        top_diameter: f64,
        length: f64,
        curve: [f64; 4],
    ) -> Self {
        let bottom = bottom_diameter * 0.5;
        let top = top_diameter * 0.5;
        let half = length * 0.5;
        let blend = |x: f64, y: f64| DVec2::new(bottom + x * (top - bottom), -half + y * length);

        Self::new([
            DVec2::new(bottom, -half),
            blend(curve[0], curve[1]),
            blend(curve[2], curve[3]),
            DVec2::new(top, half),
        ])
    }

    /// Control points.
    #[inline]
    pub fn control_points(&self) -> &[DVec2; 4] {
        &self.points
    }

    /// Position at parameter `t`.
    pub fn point(&self, t: f64) -> DVec2 {
        let s = 1.0 - t;
        let [p0, p1, p2, p3] = self.points;
        p0 * (s * s * s) + p1 * (3.0 * s * s * t) + p2 * (3.0 * s * t * t) + p3 * (t * t * t)
    }

    /// First derivative at parameter `t`.
    pub fn derivative(&self, t: f64) -> DVec2 {
        let s = 1.0 - t;
        let [p0, p1, p2, p3] = self.points;
        ((p1 - p0) * (s * s) + (p2 - p1) * (2.0 * s * t) + (p3 - p2) * (t * t)) * 3.0
    }

    /// Outward unit normal at parameter `t`.
    ///
    /// Where the derivative vanishes (coincident control points at an end)
    /// the normal of the overall chord is used instead.
    pub fn normal(&self, t: f64) -> DVec2 {
        let mut tangent = self.derivative(t);
        if approx_zero(tangent.length_squared()) {
            tangent = self.points[3] - self.points[0];
        }
        let length = tangent.length();
        if length < DEGENERATE_EPSILON {
            return DVec2::X;
        }
        DVec2::new(tangent.y, -tangent.x) / length
    }

    /// Parameter at which the curve reaches axial position `y`.
    ///
    /// `y` is clamped to the curve's axial extent.
    pub fn t_at_y(&self, y: f64) -> f64 {
        let bottom = self.points[0].y;
        let top = self.points[3].y;
        if y <= bottom {
            return 0.0;
        }
        if y >= top {
            return 1.0;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        for _ in 0..INVERSION_STEPS {
            let mid = 0.5 * (lo + hi);
            if self.point(mid).y < y {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }

    /// Profile radius at axial position `y`.
    pub fn radius_at_y(&self, y: f64) -> f64 {
        self.point(self.t_at_y(y)).x.max(0.0)
    }

    /// Parameters strictly inside `(t_m, t_n)` where the curve is locally
    /// farthest from the chord between `point(t_m)` and `point(t_n)`.
    ///
    /// The deviation derivative is `3·(a(1-t)² + 2b·t(1-t) + c·t²)` where
    /// `a`, `b` and `c` project the control polygon edges onto the chord
    /// normal. An empty result means the segment is straight within
    /// numerical resolution or has no interior extremum.
    pub fn chord_extrema(&self, t_m: f64, t_n: f64) -> Vec<f64> {
        let chord = self.point(t_n) - self.point(t_m);
        let length = chord.length();
        if length < DEGENERATE_EPSILON {
            return Vec::new();
        }
        let normal = chord.perp() / length;
        let [p0, p1, p2, p3] = self.points;
        let a = (p1 - p0).dot(normal);
        let b = (p2 - p1).dot(normal);
        let c = (p3 - p2).dot(normal);

        let scale = a.abs().max(b.abs()).max(c.abs());
        if scale <= DEGENERATE_EPSILON * (1.0 + length) {
            return Vec::new();
        }
        let quadratic = a - 2.0 * b + c;

        let mut roots = Vec::with_capacity(2);
        if quadratic.abs() <= DEGENERATE_EPSILON * scale {
            let denominator = 2.0 * (b - c);
            if denominator.abs() > DEGENERATE_EPSILON * scale {
                roots.push((2.0 * b - c) / denominator);
            }
        } else {
            let discriminant = b * b - a * c;
            if discriminant >= 0.0 {
                let root = discriminant.sqrt();
                roots.push((a - b + root) / quadratic);
                roots.push((a - b - root) / quadratic);
            }
        }

        roots.retain(|&t| t > t_m && t < t_n);
        roots.sort_by(f64::total_cmp);
        roots.dedup_by(|x, y| approx_equal(*x, *y));
        roots
    }

    /// Perpendicular distance from `point(t)` to the chord between
    /// `point(t_m)` and `point(t_n)`.
    pub fn deviation(&self, t: f64, t_m: f64, t_n: f64) -> f64 {
        let start = self.point(t_m);
        let chord = self.point(t_n) - start;
        let offset = self.point(t) - start;
        let length = chord.length();
        if length < DEGENERATE_EPSILON {
            return offset.length();
        }
        chord.perp_dot(offset).abs() / length
    }
}
