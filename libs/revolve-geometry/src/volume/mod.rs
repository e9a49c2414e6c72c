//! # Volume Calculation
//!
//! Closed-form volumes for every shape family and the dimension solver
//! that inverts them.
//!
//! ## Formulas
//!
//! | Family | Volume |
//! |--------|--------|
//! | Frustum | `π·L·(d1² + d1·d2 + d2²) / 12` |
//! | Bezier | Pappus over the cubic profile, see [`bezier_volume`] |
//! | Pill | `π·R²·L − 2·2π·r̄·A`, see [`pill_volume`] |
//! | Prism | `(n/2)·R²·sin(2π/n)·L` |
//!
//! ## Solver
//!
//! [`seek_value`] finds the parameter value producing a target volume.
//! Relations that are exactly quadratic (or linear) in the parameter are
//! solved in closed form; everything else runs a decade-refined step search.
//! The result is rounded to the slider precision, clamped to the allowed
//! range and flagged `within_tolerance` when the achieved volume is within
//! the configured relative tolerance of the target.

#[cfg(test)]
mod tests;

use crate::curve::ProfileCurve;
use config::constants::{DEGENERATE_EPSILON, MAX_SEEK_ITERATIONS};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

// =============================================================================
// CLOSED-FORM VOLUMES
// =============================================================================

/// Volume of a conical frustum.
///
/// # Example
///
/// ```rust
/// use revolve_geometry::volume::frustum_volume;
///
/// let v = frustum_volume(2.0, 1.0, 4.0);
/// assert!((v - 7.0 * std::f64::consts::PI / 3.0).abs() < 1e-12);
/// ```
pub fn frustum_volume(bottom_diameter: f64, top_diameter: f64, length: f64) -> f64 {
    let (a, b) = (bottom_diameter, top_diameter);
    PI * length * (a * a + a * b + b * b) / 12.0
}

/// Volume of a cylinder.
pub fn cylinder_volume(diameter: f64, length: f64) -> f64 {
    frustum_volume(diameter, diameter, length)
}

/// Volume of the solid swept by a cubic Bezier profile.
///
/// By Pappus the volume is `π ∫ r(t)² y'(t) dt`. Expanding `r` in the cubic
/// Bernstein basis and `y'` in the quadratic one, every term integrates to
/// a constant:
///
/// ```text
/// ∫ B3_i(t)·B3_j(t)·B2_k(t) dt = C(3,i)·C(3,j)·C(2,k) / (9·C(8, i+j+k))
/// ```
///
/// so the volume is a fixed weighted sum over the control points.
pub fn bezier_volume(curve: &ProfileCurve) -> f64 {
    let p = curve.control_points();
    let mut sum = 0.0;
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..3 {
                let weight = binomial(3, i) * binomial(3, j) * binomial(2, k)
                    / (9.0 * binomial(8, i + j + k));
                sum += p[i].x * p[j].x * 3.0 * (p[k + 1].y - p[k].y) * weight;
            }
        }
    }
    PI * sum
}

fn binomial(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Distance of a fillet spandrel's centroid from the cylinder wall, per
/// unit fillet radius: `(10 − 3π) / (12 − 3π)`.
pub fn spandrel_centroid_ratio() -> f64 {
    (10.0 - 3.0 * PI) / (12.0 - 3.0 * PI)
}

/// Area between a square corner and its inscribed quarter circle.
pub fn spandrel_area(fillet_radius: f64) -> f64 {
    fillet_radius * fillet_radius * (1.0 - PI / 4.0)
}

/// Volume of a cylinder whose two end edges are rounded.
///
/// Each rounded edge removes a revolved spandrel of area `A = ρ²(1 − π/4)`
/// whose centroid sits at `r̄ = R − ρ·(10 − 3π)/(12 − 3π)` from the axis.
///
/// # Arguments
///
/// * `diameter` - Cylinder diameter
/// * `length` - Overall length including the rounded ends
/// * `fillet` - Rounding diameter, at most `min(diameter, length)`
pub fn pill_volume(diameter: f64, length: f64, fillet: f64) -> f64 {
    let radius = diameter * 0.5;
    let rho = fillet * 0.5;
    let centroid = radius - rho * spandrel_centroid_ratio();
    PI * radius * radius * length - 2.0 * TAU * centroid * spandrel_area(rho)
}

/// Volume of a regular polygon prism with circumscribed `diameter`.
pub fn prism_volume(corner_count: u32, diameter: f64, length: f64) -> f64 {
    if corner_count < 3 {
        return 0.0;
    }
    let n = f64::from(corner_count);
    let radius = diameter * 0.5;
    0.5 * n * radius * radius * (TAU / n).sin() * length
}

// =============================================================================
// ROUNDING
// =============================================================================

/// Direction the solver rounds its result to the slider precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundingDirection {
    /// Toward negative infinity
    Down,
    /// To the closest multiple
    #[default]
    Nearest,
    /// Toward positive infinity
    Up,
}

impl RoundingDirection {
    /// Rounds `value` to a multiple of `precision`.
    ///
    /// Values within floating-point noise of a multiple snap to it, so
    /// `0.3` rounded down at `0.1` stays `0.3`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use revolve_geometry::volume::RoundingDirection;
    ///
    /// assert_eq!(RoundingDirection::Up.apply(1.21, 0.1), 1.3);
    /// assert_eq!(RoundingDirection::Down.apply(1.29, 0.1), 1.2);
    /// ```
    pub fn apply(self, value: f64, precision: f64) -> f64 {
        if !(precision > 0.0) || !value.is_finite() {
            return value;
        }
        let steps = value / precision;
        let nearest = steps.round();
        let rounded = if (steps - nearest).abs() < 1e-9 {
            nearest
        } else {
            match self {
                Self::Down => steps.floor(),
                Self::Nearest => nearest,
                Self::Up => steps.ceil(),
            }
        };
        // Dividing by the inverse keeps decimal precisions exact: 13 / 10
        // is 1.3 where 13 * 0.1 is not.
        rounded / precision.recip()
    }
}

// =============================================================================
// SOLVER
// =============================================================================

/// Input of a volume seek.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekRequest {
    /// Desired volume
    pub target: f64,
    /// Current parameter value, where the step search starts
    pub current: f64,
    /// Lowest allowed parameter value
    pub min: f64,
    /// Highest allowed parameter value
    pub max: f64,
    /// Slider precision the result is rounded to
    pub precision: f64,
    /// Rounding direction
    pub direction: RoundingDirection,
    /// Relative volume error accepted as a match
    pub tolerance: f64,
}

/// Outcome of a volume seek.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekResult {
    /// Rounded, clamped parameter value
    pub value: f64,
    /// Volume at `value`
    pub volume: f64,
    /// Whether `volume` is within tolerance of the target
    pub within_tolerance: bool,
}

/// How the volume depends on the sought parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeRelation {
    /// `a·x² + b·x + c = 0` at the target volume
    Quadratic {
        /// Quadratic coefficient
        a: f64,
        /// Linear coefficient
        b: f64,
        /// Constant term, target volume already subtracted
        c: f64,
    },
    /// No closed form; search numerically
    Monotone,
}

impl VolumeRelation {
    /// Linear relation `b·x + c = 0`.
    pub fn linear(b: f64, c: f64) -> Self {
        Self::Quadratic { a: 0.0, b, c }
    }
}

/// Largest non-negative root of `a·x² + b·x + c = 0`.
///
/// Degenerates to the linear equation when `a` vanishes. Returns `None`
/// when no real non-negative root exists.
///
/// # Example
///
/// ```rust
/// use revolve_geometry::volume::solve_quadratic;
///
/// assert_eq!(solve_quadratic(1.0, 0.0, -4.0), Some(2.0));
/// assert_eq!(solve_quadratic(0.0, 2.0, -3.0), Some(1.5));
/// assert_eq!(solve_quadratic(1.0, 0.0, 4.0), None);
/// ```
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<f64> {
    let scale = a.abs().max(b.abs()).max(c.abs());
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }

    if a.abs() <= DEGENERATE_EPSILON * scale {
        if b.abs() <= DEGENERATE_EPSILON * scale {
            return None;
        }
        let x = -c / b;
        return (x >= 0.0).then_some(x);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let x = ((-b + root) / (2.0 * a)).max((-b - root) / (2.0 * a));
    (x >= 0.0).then_some(x)
}

/// Finds the parameter value whose volume matches `request.target`.
///
/// # Arguments
///
/// * `request` - Target, range, start value and rounding policy
/// * `relation` - Closed-form coefficients when the relation is quadratic
/// * `volume` - Volume as a function of the parameter
pub fn seek_value(
    request: &SeekRequest,
    relation: VolumeRelation,
    volume: impl Fn(f64) -> f64,
) -> SeekResult {
    let closed_form = match relation {
        VolumeRelation::Quadratic { a, b, c } => solve_quadratic(a, b, c),
        VolumeRelation::Monotone => None,
    };
    let value = match closed_form {
        Some(value) => value,
        None => search_value(request, &volume),
    };
    finish_seek(request, value, &volume)
}

/// Decade-refined step search for the value where the volume crosses the
/// target.
///
/// Starts at the current value with a step no smaller than the allowed
/// range, walks toward the crossing, then divides the step by ten until it
/// drops below a tenth of the slider precision.
pub fn search_value(request: &SeekRequest, volume: &impl Fn(f64) -> f64) -> f64 {
    let (lo, hi) = ordered(request.min, request.max);
    let span = hi - lo;
    let mut x = clamp_finite(request.current, lo, hi);
    if span <= 0.0 {
        return x;
    }

    let increasing = volume(hi) >= volume(lo);
    let below = |x: f64| {
        let v = volume(x);
        if increasing {
            v <= request.target
        } else {
            v >= request.target
        }
    };

    let resolution = if request.precision > 0.0 {
        request.precision * 0.1
    } else {
        span * 1e-9
    };
    let mut step = 10f64.powf(span.log10().ceil());
    let mut iterations = 0;

    while step >= resolution && iterations < MAX_SEEK_ITERATIONS {
        if below(x) {
            while iterations < MAX_SEEK_ITERATIONS && x + step <= hi && below(x + step) {
                x += step;
                iterations += 1;
            }
        } else {
            while iterations < MAX_SEEK_ITERATIONS && x - step >= lo && !below(x - step) {
                x -= step;
                iterations += 1;
            }
            if x - step >= lo {
                x -= step;
            } else if below(lo) {
                x = lo;
            }
        }
        step *= 0.1;
        iterations += 1;
    }
    x
}

fn finish_seek(request: &SeekRequest, value: f64, volume: &impl Fn(f64) -> f64) -> SeekResult {
    let (lo, hi) = ordered(request.min, request.max);
    let rounded = request.direction.apply(value, request.precision);
    let clamped = clamp_finite(rounded, lo, hi);
    if clamped != rounded {
        log::warn!(
            "volume seek for {} clamped {rounded} to [{lo}, {hi}]",
            request.target
        );
    }

    let achieved = volume(clamped);
    let within_tolerance =
        (achieved - request.target).abs() <= request.tolerance * request.target.abs();
    SeekResult {
        value: clamped,
        volume: achieved,
        within_tolerance,
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn clamp_finite(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.max(lo).min(hi)
    }
}
