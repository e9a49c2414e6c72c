//! # Tessellation Tests
//!
//! Tests for circle tessellation and the level cache.

use super::*;
use approx::assert_relative_eq;
use std::f64::consts::PI;

#[test]
fn test_vertex_count_is_multiple_of_four() {
    for level in 0..20 {
        let tess = CircleTessellation::new(level);
        assert_eq!(tess.vertex_count(), 4 * (level + 1));
    }
}

#[test]
fn test_mirrored_directions_match_trigonometry() {
    let tess = CircleTessellation::new(4);
    let n = tess.vertex_count();
    for odd in [false, true] {
        for k in 0..n {
            let theta = 2.0 * PI * tess.u(k, odd);
            let dir = tess.direction(k, odd);
            assert_relative_eq!(dir.x, theta.cos(), epsilon = 1e-12);
            assert_relative_eq!(dir.y, theta.sin(), epsilon = 1e-12);
        }
    }
}

#[test]
fn test_ring_closes_seam() {
    let tess = CircleTessellation::new(2);
    let ring: Vec<_> = tess.ring(false).collect();
    assert_eq!(ring.len(), tess.vertex_count() as usize + 1);
    assert_relative_eq!(ring[0].0, 0.0);
    assert_relative_eq!(ring.last().unwrap().0, 1.0);
    assert_relative_eq!(ring[0].1.x, ring.last().unwrap().1.x, epsilon = 1e-12);
}

#[test]
fn test_odd_ring_is_staggered_half_step() {
    let tess = CircleTessellation::new(3);
    let even = tess.ring_parameters(false);
    let odd = tess.ring_parameters(true);
    let step = 1.0 / f64::from(tess.vertex_count());
    for (e, o) in even.iter().zip(&odd) {
        assert_relative_eq!(o - e, step / 2.0, epsilon = 1e-12);
    }
}

#[test]
fn test_for_diameter_unit_circle_scenario() {
    let mut cache = TessellationCache::new();
    let tess = cache.for_diameter(1.0, 0.01, 12, 512);
    assert!(tess.vertex_count() >= 12);
    assert_eq!(tess.vertex_count() % 4, 0);
    // 0.5 * (1 - cos(PI / 16)) is just under 0.01; 12 vertices is not.
    assert_eq!(tess.vertex_count(), 16);
}

#[test]
fn test_for_diameter_is_minimal() {
    let mut cache = TessellationCache::new();
    let diameter = 3.0;
    let max_error = 0.004;
    let tess = cache.for_diameter(diameter, max_error, 4, 1024);
    assert!(tess.chord_error(diameter) <= max_error);
    if tess.level() > 0 {
        let coarser = cache.level(tess.level() - 1);
        assert!(coarser.chord_error(diameter) > max_error);
    }
}

#[test]
fn test_for_diameter_monotone_in_error() {
    let mut cache = TessellationCache::new();
    let mut previous = 0;
    let mut max_error = 0.5;
    while max_error > 1e-4 {
        let count = cache.for_diameter(2.0, max_error, 4, 4096).vertex_count();
        assert!(count >= previous, "{count} < {previous} at {max_error}");
        previous = count;
        max_error *= 0.7;
    }
}

#[test]
fn test_for_diameter_independent_of_cache_history() {
    let mut warm = TessellationCache::new();
    warm.level(40);
    let mut cold = TessellationCache::new();
    assert_eq!(
        warm.for_diameter(1.5, 0.002, 12, 512).vertex_count(),
        cold.for_diameter(1.5, 0.002, 12, 512).vertex_count()
    );
}

#[test]
fn test_for_diameter_respects_ceiling() {
    let mut cache = TessellationCache::new();
    let tess = cache.for_diameter(100.0, 1e-6, 4, 32);
    assert_eq!(tess.vertex_count(), 32);
}

#[test]
fn test_for_diameter_zero_diameter_uses_minimum() {
    let mut cache = TessellationCache::new();
    assert_eq!(cache.for_diameter(0.0, 0.01, 12, 512).vertex_count(), 12);
    assert_eq!(cache.for_diameter(f64::NAN, 0.01, 12, 512).vertex_count(), 12);
}

#[test]
fn test_for_points_rounds_up() {
    let mut cache = TessellationCache::new();
    assert_eq!(cache.for_points(0).vertex_count(), 4);
    assert_eq!(cache.for_points(4).vertex_count(), 4);
    assert_eq!(cache.for_points(13).vertex_count(), 16);
    assert_eq!(cache.for_points(24).vertex_count(), 24);
}

#[test]
fn test_for_points_caps_at_ceiling() {
    let mut cache = TessellationCache::new();
    assert_eq!(cache.for_points(u32::MAX).vertex_count(), MAX_CIRCLE_VERTICES);
    assert_eq!(cache.for_points(MAX_CIRCLE_VERTICES + 1).vertex_count(), MAX_CIRCLE_VERTICES);
}

#[test]
fn test_cache_is_append_only_and_shared() {
    let mut cache = TessellationCache::new();
    let first = cache.level(3);
    assert_eq!(cache.len(), 4);
    let again = cache.level(3);
    assert!(Arc::ptr_eq(&first, &again));

    cache.reset();
    assert!(cache.is_empty());
    let rebuilt = cache.level(3);
    assert_eq!(*first, *rebuilt);
}
