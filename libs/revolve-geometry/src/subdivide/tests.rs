//! # Subdivision Tests

use super::*;
use crate::profile::segment_normal;
use approx::assert_relative_eq;

fn cone_profile(bottom: f64, top: f64) -> Profile {
    let normal = segment_normal(DVec2::new(bottom / 2.0, -0.5), DVec2::new(top / 2.0, 0.5));
    let mut profile = Profile::new(vec![
        ProfilePoint::new(bottom, -0.5, normal),
        ProfilePoint::new(top, 0.5, normal),
    ]);
    profile.assign_texture_v();
    profile
}

#[test]
fn test_subdivision_count_thresholds() {
    // 8% at 5% per segment is a single step: no insertion.
    assert_eq!(subdivision_count(1.0, 0.92, 5.0, 30), 0);
    assert_eq!(subdivision_count(1.0, 0.85, 5.0, 30), 3);
    assert_eq!(subdivision_count(0.0, 0.0, 5.0, 30), 0);
}

#[test]
fn test_subdivision_count_is_capped() {
    assert_eq!(subdivision_count(1.0, 0.0, 1.0, 30), 30);
    assert_eq!(subdivision_count(1.0, 0.0, 1.0, 12), 12);
}

#[test]
fn test_cylinder_is_not_subdivided() {
    let mut cache = TessellationCache::new();
    let config = GeometryConfig::default();
    let out = subdivide_diameter_changes(
        &cone_profile(1.0, 1.0),
        &mut cache,
        &config,
        RingResolution::ChordError,
    );
    assert_eq!(out.len(), 2);
}

#[test]
fn test_steep_cone_gets_render_only_rings() {
    let mut cache = TessellationCache::new();
    let config = GeometryConfig::default();
    let out = subdivide_diameter_changes(
        &cone_profile(2.0, 1.0),
        &mut cache,
        &config,
        RingResolution::ChordError,
    );

    assert_eq!(out.len(), 12);
    assert_eq!(out.collider_points().count(), 2);
    for pair in out.points().windows(2) {
        assert!(pair[0].y < pair[1].y);
        assert!(pair[0].diameter > pair[1].diameter);
        assert!(pair[0].v < pair[1].v);
    }
    for inner in &out.points()[1..11] {
        assert!(!inner.in_collider);
        let ring = inner.tessellation.as_ref().map(|t| t.vertex_count());
        assert!(ring.is_some_and(|n| n >= config.min_circle_vertices));
    }
}

#[test]
fn test_inserted_rings_are_evenly_spaced() {
    let mut cache = TessellationCache::new();
    let config = GeometryConfig::new(0.01, 20.0).unwrap();
    let out = subdivide_diameter_changes(
        &cone_profile(1.0, 0.0),
        &mut cache,
        &config,
        RingResolution::ChordError,
    );
    // 100% / 20% = 5 rings, at sixths of the segment.
    assert_eq!(out.len(), 7);
    for (i, point) in out.points().iter().enumerate() {
        assert_relative_eq!(point.y, -0.5 + i as f64 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(point.diameter, 1.0 - i as f64 / 6.0, epsilon = 1e-12);
    }
}

#[test]
fn test_slerp_normal_blends_by_angle() {
    let n = slerp_normal(DVec2::X, DVec2::Y, 0.5);
    let expected = std::f64::consts::FRAC_1_SQRT_2;
    assert_relative_eq!(n.x, expected, epsilon = 1e-12);
    assert_relative_eq!(n.y, expected, epsilon = 1e-12);
    assert_eq!(slerp_normal(DVec2::X, DVec2::X, 0.3), DVec2::X);
}

#[test]
fn test_slerp_normal_takes_short_way_around() {
    let a = DVec2::new(-1.0, 0.01).normalize();
    let b = DVec2::new(-1.0, -0.01).normalize();
    assert!(slerp_normal(a, b, 0.5).x < -0.99);
}

#[test]
fn test_flatten_straight_curve_keeps_endpoints() {
    let third = 1.0 / 3.0;
    let curve = ProfileCurve::from_descriptor(2.0, 1.0, 2.0, [third, third, 2.0 * third, 2.0 * third]);
    assert_eq!(flatten_curve(&curve, 0.001), vec![0.0, 1.0]);
}

#[test]
fn test_flatten_meets_tolerance() {
    let curve = ProfileCurve::new([
        DVec2::new(0.5, -1.0),
        DVec2::new(1.5, -0.5),
        DVec2::new(0.2, 0.4),
        DVec2::new(0.5, 1.0),
    ]);
    let tolerance = 0.002;
    let samples = flatten_curve(&curve, tolerance);

    assert!(samples.len() > 4);
    assert_eq!(samples.first(), Some(&0.0));
    assert_eq!(samples.last(), Some(&1.0));
    for pair in samples.windows(2) {
        assert!(pair[0] < pair[1]);
        for step in 1..20 {
            let t = pair[0] + (pair[1] - pair[0]) * f64::from(step) / 20.0;
            assert!(curve.deviation(t, pair[0], pair[1]) <= tolerance + 1e-9);
        }
    }
}

#[test]
fn test_flatten_tighter_tolerance_adds_samples() {
    let curve = ProfileCurve::from_descriptor(3.0, 0.5, 2.0, [0.0, 0.8, 0.2, 1.0]);
    let coarse = flatten_curve(&curve, 0.05).len();
    let fine = flatten_curve(&curve, 0.0005).len();
    assert!(fine > coarse);
}
