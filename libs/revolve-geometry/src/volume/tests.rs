//! # Volume Tests
//!
//! Closed forms are checked against Simpson integration of the revolved
//! profile.

use super::*;
use approx::assert_relative_eq;

/// Composite Simpson rule over [a, b] with an even number of panels.
fn simpson(f: impl Fn(f64) -> f64, a: f64, b: f64, panels: usize) -> f64 {
    let h = (b - a) / panels as f64;
    let mut sum = f(a) + f(b);
    for i in 1..panels {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(a + h * i as f64);
    }
    sum * h / 3.0
}

fn request(target: f64, current: f64, min: f64, max: f64) -> SeekRequest {
    SeekRequest {
        target,
        current,
        min,
        max,
        precision: 0.001,
        direction: RoundingDirection::Nearest,
        tolerance: 0.01,
    }
}

// =============================================================================
// CLOSED FORMS
// =============================================================================

#[test]
fn test_frustum_scenario() {
    assert_relative_eq!(frustum_volume(2.0, 1.0, 4.0), 7.0 * PI / 3.0, epsilon = 1e-12);
    assert_relative_eq!(frustum_volume(2.0, 1.0, 4.0), 7.3304, epsilon = 1e-4);
}

#[test]
fn test_frustum_matches_integration() {
    for (d1, d2, length) in [(2.0, 1.0, 4.0), (0.0, 3.0, 1.5), (1.2, 1.2, 0.3), (5.0, 0.0, 2.0)] {
        let numeric = simpson(
            |y| {
                let r = 0.5 * (d1 + (d2 - d1) * y / length);
                PI * r * r
            },
            0.0,
            length,
            200,
        );
        assert_relative_eq!(frustum_volume(d1, d2, length), numeric, max_relative = 1e-4);
    }
    assert_eq!(frustum_volume(0.0, 0.0, 1.0), 0.0);
}

#[test]
fn test_bezier_straight_polygon_is_frustum() {
    let curve = ProfileCurve::from_descriptor(2.0, 1.0, 4.0, [0.25, 0.25, 0.6, 0.6]);
    assert_relative_eq!(bezier_volume(&curve), frustum_volume(2.0, 1.0, 4.0), epsilon = 1e-12);
}

#[test]
fn test_bezier_matches_integration() {
    let curve = ProfileCurve::from_descriptor(1.0, 2.5, 3.0, [0.9, 0.1, 0.2, 0.7]);
    let numeric = simpson(
        |t| {
            let r = curve.point(t).x;
            PI * r * r * curve.derivative(t).y
        },
        0.0,
        1.0,
        400,
    );
    assert_relative_eq!(bezier_volume(&curve), numeric, max_relative = 1e-7);
}

#[test]
fn test_pill_without_fillet_is_cylinder() {
    assert_relative_eq!(pill_volume(1.5, 2.0, 0.0), cylinder_volume(1.5, 2.0));
}

#[test]
fn test_pill_with_full_fillet_is_sphere() {
    let r: f64 = 0.75;
    assert_relative_eq!(pill_volume(1.5, 1.5, 1.5), 4.0 / 3.0 * PI * r.powi(3), epsilon = 1e-12);
}

#[test]
fn test_pill_matches_integration() {
    let (diameter, length, fillet) = (2.0_f64, 3.0_f64, 0.8_f64);
    let radius = diameter / 2.0;
    let rho = fillet / 2.0;
    let straight = length / 2.0 - rho;
    let profile = |y: f64| {
        let dy = y.abs() - straight;
        if dy <= 0.0 {
            radius
        } else {
            radius - rho + (rho * rho - dy * dy).max(0.0).sqrt()
        }
    };
    let numeric = simpson(
        |y| PI * profile(y).powi(2),
        -length / 2.0,
        length / 2.0,
        20_000,
    );
    assert_relative_eq!(pill_volume(diameter, length, fillet), numeric, max_relative = 1e-5);
}

#[test]
fn test_prism_volume() {
    // Square inscribed in the unit circle has area 2.
    assert_relative_eq!(prism_volume(4, 2.0, 3.0), 6.0, epsilon = 1e-12);
    assert_relative_eq!(
        prism_volume(512, 2.0, 3.0),
        cylinder_volume(2.0, 3.0),
        max_relative = 1e-4
    );
    assert_eq!(prism_volume(2, 2.0, 3.0), 0.0);
}

// =============================================================================
// ROUNDING AND ROOTS
// =============================================================================

#[test]
fn test_rounding_directions() {
    assert_eq!(RoundingDirection::Down.apply(1.2345, 0.01), 1.23);
    assert_eq!(RoundingDirection::Nearest.apply(1.2351, 0.01), 1.24);
    assert_eq!(RoundingDirection::Up.apply(1.2301, 0.01), 1.24);
}

#[test]
fn test_rounding_snaps_float_noise() {
    assert_eq!(RoundingDirection::Down.apply(0.1 + 0.2, 0.1), 0.3);
    assert_eq!(RoundingDirection::Up.apply(0.7, 0.1), 0.7);
}

#[test]
fn test_solve_quadratic_picks_non_negative_root() {
    assert_relative_eq!(solve_quadratic(1.0, -1.0, -6.0).unwrap(), 3.0);
    assert_eq!(solve_quadratic(1.0, 5.0, 6.0), None);
    assert_eq!(solve_quadratic(0.0, 0.0, 1.0), None);
    assert_eq!(solve_quadratic(0.0, 1.0, 1.0), None);
}

// =============================================================================
// SEEK
// =============================================================================

#[test]
fn test_seek_linear_length() {
    let diameter = 2.0;
    let target = 2.0 * PI;
    let area = PI * diameter * diameter / 4.0;
    let result = seek_value(
        &request(target, 1.0, 0.1, 10.0),
        VolumeRelation::linear(area, -target),
        |length| cylinder_volume(diameter, length),
    );
    assert_relative_eq!(result.value, 2.0, epsilon = 1e-12);
    assert!(result.within_tolerance);
}

#[test]
fn test_seek_search_reaches_target() {
    let curve = |x: f64| ProfileCurve::from_descriptor(x, 1.0, 2.0, [0.2, 0.8, 0.5, 0.3]);
    let target = 5.0;
    let result = seek_value(
        &request(target, 1.0, 0.0, 10.0),
        VolumeRelation::Monotone,
        |x| bezier_volume(&curve(x)),
    );
    assert!(result.within_tolerance, "{result:?}");
    assert_relative_eq!(result.volume, target, max_relative = 0.01);
}

#[test]
fn test_seek_search_handles_decreasing_volume() {
    let result = seek_value(
        &request(9.0, 0.0, 0.0, 2.0),
        VolumeRelation::Monotone,
        |fillet| pill_volume(2.0, 3.0, fillet),
    );
    assert!(result.within_tolerance, "{result:?}");
    assert!(result.value > 0.0 && result.value < 2.0);
}

#[test]
fn test_seek_out_of_range_reports_miss() {
    let result = seek_value(
        &request(1000.0, 1.0, 0.0, 3.0),
        VolumeRelation::Monotone,
        |d| cylinder_volume(d, 1.0),
    );
    assert!(!result.within_tolerance);
    assert_relative_eq!(result.value, 3.0, epsilon = 1e-3);
}

#[test]
fn test_seek_closed_form_is_clamped() {
    let result = seek_value(
        &request(1000.0, 1.0, 0.0, 3.0),
        VolumeRelation::Quadratic {
            a: PI / 4.0,
            b: 0.0,
            c: -1000.0,
        },
        |d| cylinder_volume(d, 1.0),
    );
    assert_eq!(result.value, 3.0);
    assert!(!result.within_tolerance);
}

#[test]
fn test_seek_accepts_inverted_range() {
    let result = seek_value(
        &request(PI, 1.0, 5.0, 0.5),
        VolumeRelation::Monotone,
        |d| cylinder_volume(d, 1.0),
    );
    assert!(result.within_tolerance);
    assert_relative_eq!(result.value, 2.0, epsilon = 2e-3);
}

#[test]
fn test_seek_rounds_in_requested_direction() {
    let mut seek = request(PI, 1.0, 0.0, 5.0);
    seek.precision = 0.3;
    seek.direction = RoundingDirection::Up;
    let result = seek_value(
        &seek,
        VolumeRelation::Quadratic {
            a: PI / 4.0,
            b: 0.0,
            c: -PI,
        },
        |d| cylinder_volume(d, 1.0),
    );
    // Exact answer 2.0 rounds up to 2.1.
    assert_relative_eq!(result.value, 2.1, epsilon = 1e-12);
}
