//! # Cylindric Coordinates
//!
//! Shape-relative coordinates for points attached to a part surface.
//!
//! A point is described by its angular fraction `u` around the axis, a
//! height and a radial value. Height and radius are stored in one of several
//! modes so that a point keeps its intended placement when the shape is
//! resized: a decal at 80% of the height stays at 80%, a bolt 2 units below
//! the top stays 2 units below the top.
//!
//! ```text
//!        +Y
//!         │   ● point
//!         │  /
//!         │ / r
//!         │/ u = atan2(z, x) / 2π
//!   ──────┼────── +X
//! ```

use crate::shapes::Shape;
use config::constants::DEGENERATE_EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// How the height of a point is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeightMode {
    /// Fraction of the half length: -1 at the bottom, 1 at the top
    #[default]
    Relative,
    /// Signed distance from the top end
    OffsetFromTop,
    /// Signed distance from the bottom end
    OffsetFromBottom,
    /// Signed distance from the center
    OffsetFromCenter,
}

/// How the radial distance of a point is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RadiusMode {
    /// Fraction of the local surface radius
    #[default]
    Relative,
    /// Signed distance from the local surface
    OffsetFromShapeRadius,
    /// Distance from the axis
    OffsetFromCenter,
}

/// A point in shape-relative cylindric coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylindricCoordinate {
    /// Angular fraction in `[0, 1)`, 0 on `+X`, a quarter on `+Z`
    pub u: f64,
    /// Height, interpreted through `height_mode`
    pub y: f64,
    /// Radial value, interpreted through `radius_mode`
    pub r: f64,
    /// Height storage mode
    pub height_mode: HeightMode,
    /// Radius storage mode
    pub radius_mode: RadiusMode,
}

/// Angle of `(x, z)` around the Y axis as a fraction of a full turn, in
/// `[0, 1)`. The origin maps to 0.
///
/// # Example
///
/// ```rust
/// use revolve_geometry::coords::angular_fraction;
///
/// assert_eq!(angular_fraction(1.0, 0.0), 0.0);
/// assert!((angular_fraction(0.0, 1.0) - 0.25).abs() < 1e-12);
/// assert!((angular_fraction(0.0, -1.0) - 0.75).abs() < 1e-12);
/// ```
pub fn angular_fraction(x: f64, z: f64) -> f64 {
    if x == 0.0 && z == 0.0 {
        return 0.0;
    }
    let u = z.atan2(x) / TAU;
    let u = if u < 0.0 { u + 1.0 } else { u };
    if u >= 1.0 {
        0.0
    } else {
        u
    }
}

/// Converts a point in the shape frame to shape-relative coordinates.
///
/// Relative radius divides by the local surface radius at the point's
/// (clamped) height; where that radius vanishes the stored value is 0.
pub fn normalize(
    shape: &Shape,
    point: DVec3,
    height_mode: HeightMode,
    radius_mode: RadiusMode,
) -> CylindricCoordinate {
    let half = 0.5 * shape.length();
    let u = angular_fraction(point.x, point.z);

    let y = match height_mode {
        HeightMode::Relative => {
            if half > DEGENERATE_EPSILON {
                point.y / half
            } else {
                0.0
            }
        }
        HeightMode::OffsetFromTop => point.y - half,
        HeightMode::OffsetFromBottom => point.y + half,
        HeightMode::OffsetFromCenter => point.y,
    };

    let radial = point.x.hypot(point.z);
    let local = shape.local_radius(point.y, u);
    let r = match radius_mode {
        RadiusMode::Relative => {
            if local > DEGENERATE_EPSILON {
                radial / local
            } else {
                0.0
            }
        }
        RadiusMode::OffsetFromShapeRadius => radial - local,
        RadiusMode::OffsetFromCenter => radial,
    };

    CylindricCoordinate {
        u,
        y,
        r,
        height_mode,
        radius_mode,
    }
}

/// Converts shape-relative coordinates back to a point in the shape frame.
pub fn denormalize(shape: &Shape, coordinate: &CylindricCoordinate) -> DVec3 {
    let half = 0.5 * shape.length();
    let y = match coordinate.height_mode {
        HeightMode::Relative => coordinate.y * half,
        HeightMode::OffsetFromTop => coordinate.y + half,
        HeightMode::OffsetFromBottom => coordinate.y - half,
        HeightMode::OffsetFromCenter => coordinate.y,
    };

    let local = shape.local_radius(y, coordinate.u);
    let radial = match coordinate.radius_mode {
        RadiusMode::Relative => coordinate.r * local,
        RadiusMode::OffsetFromShapeRadius => coordinate.r + local,
        RadiusMode::OffsetFromCenter => coordinate.r,
    };

    let angle = TAU * coordinate.u;
    DVec3::new(radial * angle.cos(), y, radial * angle.sin())
}
