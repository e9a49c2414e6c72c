//! # Shape Tests

use super::*;
use crate::volume::pill_volume;
use approx::assert_relative_eq;
use std::f64::consts::PI;

fn cone(top: f64, bottom: f64, length: f64) -> Shape {
    Shape::Cone(Cone {
        top_diameter: top,
        bottom_diameter: bottom,
        length,
    })
}

fn pill(diameter: f64, length: f64, fillet: f64) -> Shape {
    Shape::Pill(Pill {
        diameter,
        length,
        fillet,
    })
}

fn seek(shape: &Shape, target: f64, parameter: Parameter) -> SeekResult {
    shape
        .seek_volume(
            target,
            parameter,
            RoundingDirection::Nearest,
            &ShapeLimits::default(),
            &GeometryConfig::default(),
        )
        .unwrap()
}

fn build(shape: &Shape) -> ShapeGeometry {
    let mut cache = TessellationCache::new();
    shape
        .rebuild_geometry(&mut cache, &GeometryConfig::default(), RingResolution::default())
        .unwrap()
}

// =============================================================================
// VOLUME
// =============================================================================

#[test]
fn test_family_volumes() {
    let cylinder = Shape::Cylinder(Cylinder {
        diameter: 2.0,
        length: 3.0,
    });
    assert_relative_eq!(cylinder.calculate_volume(), 3.0 * PI, epsilon = 1e-12);
    assert_relative_eq!(cone(1.0, 2.0, 4.0).calculate_volume(), 7.0 * PI / 3.0, epsilon = 1e-12);

    let square = Shape::Prism(Prism {
        corner_count: 4,
        diameter: 2.0,
        length: 1.0,
    });
    assert_relative_eq!(square.calculate_volume(), 2.0, epsilon = 1e-12);
}

#[test]
fn test_pill_volume_limits() {
    assert_relative_eq!(pill(2.0, 3.0, 0.0).calculate_volume(), 3.0 * PI, epsilon = 1e-12);
    assert_relative_eq!(pill(2.0, 2.0, 2.0).calculate_volume(), 4.0 * PI / 3.0, epsilon = 1e-9);
}

#[test]
fn test_linear_bezier_matches_frustum() {
    let bezier = Shape::BezierCone(BezierCone {
        top_diameter: 1.0,
        bottom_diameter: 2.0,
        length: 4.0,
        curve: LINEAR_CURVE,
    });
    assert_relative_eq!(bezier.calculate_volume(), 7.0 * PI / 3.0, epsilon = 1e-9);
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_validate_rejects_bad_dimensions() {
    let negative = Shape::Cylinder(Cylinder {
        diameter: -1.0,
        length: 1.0,
    });
    assert!(matches!(
        negative.validate(),
        Err(GeometryError::InvalidDimension { .. })
    ));

    let flat = Shape::Cylinder(Cylinder {
        diameter: 1.0,
        length: 0.0,
    });
    assert!(flat.validate().is_err());

    let triangle_less = Shape::Prism(Prism {
        corner_count: 2,
        diameter: 1.0,
        length: 1.0,
    });
    assert!(triangle_less.validate().is_err());

    assert!(pill(1.0, 2.0, 1.5).validate().is_err());
    assert!(pill(1.0, 2.0, 1.0).validate().is_ok());

    let wild = Shape::BezierCone(BezierCone {
        curve: [0.2, 1.5, 0.8, 0.8],
        ..BezierCone::default()
    });
    assert!(wild.validate().is_err());
}

#[test]
fn test_validate_rejects_point_cone() {
    assert!(matches!(
        cone(0.0, 0.0, 1.0).validate(),
        Err(GeometryError::DegenerateGeometry { .. })
    ));
    assert!(cone(0.0, 1.0, 1.0).validate().is_ok());
}

#[test]
fn test_rebuild_geometry_propagates_validation() {
    let mut cache = TessellationCache::new();
    let result = cone(-1.0, 1.0, 1.0).rebuild_geometry(
        &mut cache,
        &GeometryConfig::default(),
        RingResolution::default(),
    );
    assert!(result.is_err());
}

// =============================================================================
// PARAMETERS
// =============================================================================

#[test]
fn test_parameter_access() {
    let shape = cone(1.0, 2.0, 4.0);
    assert_eq!(shape.parameter(Parameter::TopDiameter), Some(1.0));
    assert_eq!(shape.parameter(Parameter::Fillet), None);

    let longer = shape.with_parameter(Parameter::Length, 5.0).unwrap();
    assert_eq!(longer.length(), 5.0);

    assert!(matches!(
        shape.with_parameter(Parameter::Fillet, 0.1),
        Err(GeometryError::Unsupported { .. })
    ));
    assert!(shape.with_parameter(Parameter::Length, -1.0).is_err());
}

#[test]
fn test_pill_bounds_follow_fillet() {
    let bounds = pill(2.0, 3.0, 1.0).adjust_bounds(&ShapeLimits::default());
    let fillet = bounds.range(Parameter::Fillet).unwrap();
    assert_eq!(fillet.min, 0.0);
    assert_eq!(fillet.max, 2.0);
    assert_eq!(bounds.range(Parameter::Diameter).unwrap().min, 1.0);
    assert_eq!(bounds.range(Parameter::Length).unwrap().min, 1.0);
    assert!(bounds.range(Parameter::TopDiameter).is_none());
}

#[test]
fn test_clamp_into_limits() {
    let limits = ShapeLimits {
        max_diameter: 1.0,
        ..ShapeLimits::default()
    };
    let Shape::Pill(clamped) = pill(3.0, 25.0, 2.5).clamp(&limits) else {
        panic!("clamp changed the family");
    };
    assert_eq!(clamped.diameter, 1.0);
    assert_eq!(clamped.length, 20.0);
    assert_eq!(clamped.fillet, 1.0);
    assert!(Shape::Pill(clamped).validate().is_ok());
}

// =============================================================================
// SEEK
// =============================================================================

#[test]
fn test_seek_cylinder_closed_forms() {
    let shape = Shape::Cylinder(Cylinder {
        diameter: 2.0,
        length: 1.0,
    });

    let length = seek(&shape, 2.0 * PI, Parameter::Length);
    assert_relative_eq!(length.value, 2.0, epsilon = 1e-9);
    assert!(length.within_tolerance);

    let diameter = seek(&shape, 4.0 * PI, Parameter::Diameter);
    assert_relative_eq!(diameter.value, 4.0, epsilon = 1e-9);
}

#[test]
fn test_seek_cone_top_diameter() {
    let shape = cone(3.0, 2.0, 4.0);
    let result = seek(&shape, 7.0 * PI / 3.0, Parameter::TopDiameter);
    assert_relative_eq!(result.value, 1.0, epsilon = 1e-9);
    assert!(result.within_tolerance);
}

#[test]
fn test_seek_pill_diameter_and_length() {
    let shape = pill(2.0, 4.0, 1.0);

    let target = pill_volume(3.0, 4.0, 1.0);
    let result = seek(&shape, target, Parameter::Diameter);
    assert_relative_eq!(result.value, 3.0, epsilon = 1e-6);

    let target = pill_volume(2.0, 6.5, 1.0);
    let result = seek(&shape, target, Parameter::Length);
    assert_relative_eq!(result.value, 6.5, epsilon = 1e-6);
}

#[test]
fn test_seek_pill_fillet_searches() {
    let shape = pill(2.0, 4.0, 0.5);
    let target = pill_volume(2.0, 4.0, 1.2);
    let result = seek(&shape, target, Parameter::Fillet);
    assert!((result.value - 1.2).abs() <= 0.002, "{}", result.value);
    assert!(result.within_tolerance);
}

#[test]
fn test_seek_bezier_matches_cone() {
    let shape = Shape::BezierCone(BezierCone {
        top_diameter: 3.0,
        bottom_diameter: 2.0,
        length: 4.0,
        curve: LINEAR_CURVE,
    });
    let result = seek(&shape, 7.0 * PI / 3.0, Parameter::TopDiameter);
    assert_relative_eq!(result.value, 1.0, epsilon = 1e-6);

    let result = seek(&shape, 14.0 * PI / 3.0, Parameter::Length);
    assert_relative_eq!(result.value, 56.0 / 19.0, epsilon = 1e-3);
}

#[test]
fn test_seek_unreachable_clamps() {
    let shape = Shape::Cylinder(Cylinder {
        diameter: 2.0,
        length: 2.0,
    });
    let result = seek(&shape, 1.0e6, Parameter::Length);
    assert_eq!(result.value, ShapeLimits::default().max_length);
    assert!(!result.within_tolerance);
}

#[test]
fn test_seek_rounds_to_precision() {
    let shape = Shape::Cylinder(Cylinder {
        diameter: 2.0,
        length: 1.0,
    });
    let result = shape
        .seek_volume(
            1.2345 * PI,
            Parameter::Length,
            RoundingDirection::Down,
            &ShapeLimits::default(),
            &GeometryConfig::default().with_slider_precision(0.01).unwrap(),
        )
        .unwrap();
    assert_relative_eq!(result.value, 1.23, epsilon = 1e-12);
}

#[test]
fn test_seek_unsupported_parameter() {
    let result = cone(1.0, 2.0, 1.0).seek_volume(
        1.0,
        Parameter::Fillet,
        RoundingDirection::Nearest,
        &ShapeLimits::default(),
        &GeometryConfig::default(),
    );
    assert!(result.is_err());
}

// =============================================================================
// PROFILES AND GEOMETRY
// =============================================================================

#[test]
fn test_pill_without_fillet_is_cylinder() {
    let mut cache = TessellationCache::new();
    let profile = pill(2.0, 3.0, 0.0).profile(
        &mut cache,
        &GeometryConfig::default(),
        RingResolution::default(),
    );
    assert_eq!(profile.len(), 2);
}

#[test]
fn test_pill_without_straight_section_has_no_duplicates() {
    let mut cache = TessellationCache::new();
    let profile = pill(4.0, 2.0, 2.0).profile(
        &mut cache,
        &GeometryConfig::default(),
        RingResolution::default(),
    );
    for pair in profile.points().windows(2) {
        assert!(pair[1].y > pair[0].y - 1e-12);
        assert!(!pair[0].section().abs_diff_eq(pair[1].section(), 1e-9));
    }
    assert_relative_eq!(profile.first().diameter, 2.0, epsilon = 1e-12);
    assert_relative_eq!(profile.first().normal.y, -1.0, epsilon = 1e-12);
    assert_relative_eq!(profile.last().normal.y, 1.0, epsilon = 1e-12);
}

#[test]
fn test_sphere_pill_has_no_caps() {
    let geometry = build(&pill(2.0, 2.0, 2.0));
    assert!(geometry.meshes.bottom_cap.is_empty());
    assert!(geometry.meshes.top_cap.is_empty());
    assert_relative_eq!(geometry.profile.first().diameter, 0.0, epsilon = 1e-12);
    assert_eq!(geometry.meshes.colliders.len(), 1);
}

#[test]
fn test_bezier_profile_normals_face_out() {
    let shape = Shape::BezierCone(BezierCone {
        top_diameter: 2.0,
        bottom_diameter: 1.0,
        length: 2.0,
        curve: [1.0, 0.2, 1.0, 0.8],
    });
    let geometry = build(&shape);
    assert!(geometry.profile.len() > 2);
    assert!(geometry.profile.points().iter().all(|p| p.normal.x > 0.0));
}

#[test]
fn test_every_family_builds_within_budget() {
    let shapes = [
        Shape::Cylinder(Cylinder {
            diameter: 1.0,
            length: 2.0,
        }),
        cone(0.0, 2.0, 3.0),
        pill(2.0, 4.0, 1.0),
        Shape::BezierCone(BezierCone {
            top_diameter: 0.5,
            bottom_diameter: 2.0,
            length: 3.0,
            curve: [0.1, 0.6, 0.4, 1.0],
        }),
        Shape::Prism(Prism {
            corner_count: 5,
            diameter: 2.0,
            length: 1.0,
        }),
    ];
    for shape in &shapes {
        let geometry = build(shape);
        assert!(geometry.meshes.side.is_complete(), "{}", shape.family());
        assert!(geometry.meshes.side.validate(), "{}", shape.family());
        assert!(!geometry.meshes.colliders.is_empty(), "{}", shape.family());
        for piece in &geometry.meshes.colliders {
            assert!(piece.mesh.triangle_count() <= 255, "{}", shape.family());
        }
        assert_relative_eq!(geometry.volume, shape.calculate_volume());
    }
}

#[test]
fn test_collider_strategy_per_family() {
    let prism = Shape::Prism(Prism {
        corner_count: 6,
        diameter: 1.0,
        length: 1.0,
    });
    assert_eq!(
        prism.collider_strategy(),
        ColliderStrategy::PerCorner { corner_count: 6 }
    );
    assert_eq!(build(&prism).meshes.colliders.len(), 6);
    assert_eq!(cone(1.0, 2.0, 1.0).collider_strategy(), ColliderStrategy::ConvexRuns);
}

#[test]
fn test_node_positions() {
    let nodes = cone(1.0, 2.0, 4.0).node_positions();
    assert_eq!(nodes.bottom, DVec3::new(0.0, -2.0, 0.0));
    assert_eq!(nodes.top, DVec3::new(0.0, 2.0, 0.0));
}

#[test]
fn test_translate_attachments_follow_length() {
    let old = Shape::Cylinder(Cylinder {
        diameter: 2.0,
        length: 2.0,
    });
    let new = old.with_parameter(Parameter::Length, 4.0).unwrap();
    let attachments = [Attachment {
        id: 7,
        position: DVec3::new(1.0, 1.0, 0.0),
        height_mode: HeightMode::OffsetFromTop,
        radius_mode: RadiusMode::Relative,
    }];

    let moves = old.translate_attachments(&new, &attachments);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].id, 7);
    assert!(moves[0].new.abs_diff_eq(DVec3::new(1.0, 2.0, 0.0), 1e-12));
    assert!(moves[0].delta.abs_diff_eq(DVec3::Y, 1e-12));
}
