//! # Adaptive Subdivision
//!
//! Densifies a profile so the rendered surface stays smooth.
//!
//! Two passes exist:
//!
//! - **Diameter change**: steep segments get extra render-only rings so the
//!   side texture does not visibly stretch. Inserted rings never reach the
//!   collider.
//! - **Curve flattening**: a Bezier profile is sampled where it deviates most
//!   from the chord between existing samples, until every chord is within
//!   tolerance.

#[cfg(test)]
mod tests;

use crate::curve::ProfileCurve;
use crate::profile::{Profile, ProfilePoint, RingResolution};
use crate::tessellation::TessellationCache;
use config::constants::{
    approx_equal, GeometryConfig, EPSILON, MAX_FLATTEN_ITERATIONS, MAX_SUBDIVISIONS,
};
use glam::DVec2;
use std::collections::VecDeque;
use std::f64::consts::{PI, TAU};

// =============================================================================
// DIAMETER CHANGE
// =============================================================================

/// Number of rings to insert between two diameters.
///
/// The change is measured in percent of the larger diameter and divided by
/// the allowed change per segment. Counts below 2 mean no insertion.
///
/// # Example
///
/// ```rust
/// use revolve_geometry::subdivide::subdivision_count;
///
/// // A 50% change at 5% per segment asks for 10 rings.
/// assert_eq!(subdivision_count(2.0, 1.0, 5.0, 30), 10);
/// assert_eq!(subdivision_count(1.0, 1.0, 5.0, 30), 0);
/// ```
pub fn subdivision_count(
    diameter_a: f64,
    diameter_b: f64,
    max_change_percent: f64,
    max_subdivisions: u32,
) -> u32 {
    let larger = diameter_a.max(diameter_b);
    if larger <= EPSILON || max_change_percent <= 0.0 {
        return 0;
    }
    let percent = (diameter_a - diameter_b).abs() / larger * 100.0;
    let count = (percent / max_change_percent).floor();
    if !count.is_finite() || count < 2.0 {
        return 0;
    }
    (count as u32).min(max_subdivisions.min(MAX_SUBDIVISIONS))
}

/// Inserts render-only rings between consecutive render points whose
/// diameters differ by more than the configured percentage.
///
/// Inserted rings interpolate diameter, axial position and texture V
/// linearly and blend the normal by angle. Each receives a render
/// tessellation for its own diameter.
pub fn subdivide_diameter_changes(
    profile: &Profile,
    cache: &mut TessellationCache,
    config: &GeometryConfig,
    resolution: RingResolution,
) -> Profile {
    let source = profile.points();
    let mut points = Vec::with_capacity(source.len());
    let mut inserted = 0;

    for (index, point) in source.iter().enumerate() {
        points.push(point.clone());

        let Some(next) = source.get(index + 1) else {
            continue;
        };
        if !(point.in_render && next.in_render) {
            continue;
        }

        let count = subdivision_count(
            point.diameter,
            next.diameter,
            config.max_diameter_change,
            config.max_subdivisions,
        );
        for i in 1..=count {
            let f = f64::from(i) / f64::from(count + 1);
            let diameter = lerp(point.diameter, next.diameter, f);
            let mut ring = ProfilePoint::new(
                diameter,
                lerp(point.y, next.y, f),
                slerp_normal(point.normal, next.normal, f),
            )
            .render_only()
            .with_tessellation(resolution.select(cache, config, diameter));
            ring.v = lerp(point.v, next.v, f);
            points.push(ring);
        }
        inserted += count;
    }

    if inserted > 0 {
        log::debug!(
            "inserted {inserted} rings into a {} point profile",
            source.len()
        );
    }
    Profile::new(points)
}

#[inline]
fn lerp(a: f64, b: f64, f: f64) -> f64 {
    a + (b - a) * f
}

/// Blends two unit normals by angle.
///
/// Identical normals are returned unchanged so straight segments keep an
/// exact normal.
pub fn slerp_normal(a: DVec2, b: DVec2, f: f64) -> DVec2 {
    if a.abs_diff_eq(b, EPSILON) {
        return a;
    }
    let start = a.y.atan2(a.x);
    let mut delta = b.y.atan2(b.x) - start;
    if delta > PI {
        delta -= TAU;
    } else if delta < -PI {
        delta += TAU;
    }
    let angle = start + delta * f;
    DVec2::new(angle.cos(), angle.sin())
}

// =============================================================================
// CURVE FLATTENING
// =============================================================================

/// Samples a Bezier profile until every chord is within `tolerance`.
///
/// Returns ascending curve parameters starting at 0 and ending at 1.
/// Intervals are refined first in, first out; each is split at the interior
/// points where the curve is farthest from the interval's chord, when that
/// distance exceeds the tolerance.
pub fn flatten_curve(curve: &ProfileCurve, tolerance: f64) -> Vec<f64> {
    let mut samples = vec![0.0, 1.0];
    let mut queue = VecDeque::from([(0.0, 1.0)]);
    let mut iterations = 0;

    while let Some((t_m, t_n)) = queue.pop_front() {
        if iterations == MAX_FLATTEN_ITERATIONS {
            log::warn!(
                "curve flattening stopped after {iterations} iterations with {} samples",
                samples.len()
            );
            break;
        }
        iterations += 1;

        let splits: Vec<f64> = curve
            .chord_extrema(t_m, t_n)
            .into_iter()
            .filter(|&t| curve.deviation(t, t_m, t_n) > tolerance)
            .collect();
        if splits.is_empty() {
            continue;
        }

        let mut start = t_m;
        for &t in &splits {
            samples.push(t);
            queue.push_back((start, t));
            start = t;
        }
        queue.push_back((start, t_n));
    }

    samples.sort_by(f64::total_cmp);
    samples.dedup_by(|x, y| approx_equal(*x, *y));
    log::debug!("flattened curve into {} samples", samples.len());
    samples
}
