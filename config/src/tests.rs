//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;
use approx::assert_relative_eq;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
}

#[test]
fn test_degenerate_epsilon_larger_than_epsilon() {
    assert!(DEGENERATE_EPSILON >= EPSILON);
}

// =============================================================================
// TESSELLATION TESTS
// =============================================================================

#[test]
fn test_vertex_bounds_are_multiples_of_four() {
    assert_eq!(MIN_CIRCLE_VERTICES % 4, 0);
    assert_eq!(MAX_CIRCLE_VERTICES % 4, 0);
    assert_eq!(MIN_COLLIDER_VERTICES % 4, 0);
}

#[test]
fn test_collider_is_coarser_than_render() {
    assert!(COLLIDER_CHORD_ERROR > MAX_CHORD_ERROR);
    assert!(MIN_COLLIDER_VERTICES <= MIN_CIRCLE_VERTICES);
}

// =============================================================================
// CHORD_ERROR TESTS
// =============================================================================

#[test]
fn test_chord_error_square() {
    // A square inscribed in a unit circle leaves 1 - cos(45 deg).
    let expected = 1.0 - std::f64::consts::FRAC_1_SQRT_2;
    assert_relative_eq!(chord_error(1.0, 4), expected, epsilon = 1e-12);
}

#[test]
fn test_chord_error_scales_with_radius() {
    assert_relative_eq!(chord_error(2.0, 16), 2.0 * chord_error(1.0, 16), epsilon = 1e-12);
}

#[test]
fn test_chord_error_decreases_with_vertices() {
    let mut previous = f64::MAX;
    for count in (4..=64).step_by(4) {
        let error = chord_error(1.0, count);
        assert!(error < previous);
        previous = error;
    }
}

#[test]
fn test_chord_error_zero_vertices() {
    assert_eq!(chord_error(0.5, 0), 0.5);
}

#[test]
fn test_sixteen_gon_meets_default_tolerance_at_unit_diameter() {
    assert!(chord_error(0.5, 16) <= MAX_CHORD_ERROR);
    assert!(chord_error(0.5, 12) > MAX_CHORD_ERROR);
}

// =============================================================================
// APPROX TESTS
// =============================================================================

#[test]
fn test_approx_equal_within_epsilon() {
    let small_diff = EPSILON / 2.0;
    assert!(approx_equal(1.0, 1.0 + small_diff));
    assert!(approx_equal(1.0, 1.0 - small_diff));
}

#[test]
fn test_approx_equal_outside_epsilon() {
    let large_diff = EPSILON * 2.0;
    assert!(!approx_equal(1.0, 1.0 + large_diff));
}

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(EPSILON / 2.0));
    assert!(!approx_zero(0.1));
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_collider_budget_matches_physics_limit() {
    assert_eq!(MAX_COLLIDER_TRIANGLES, 255);
}

#[test]
fn test_subdivision_cap() {
    assert_eq!(MAX_SUBDIVISIONS, 30);
}

#[test]
fn test_volume_tolerance_is_one_percent() {
    assert_relative_eq!(VOLUME_TOLERANCE, 0.01);
}
