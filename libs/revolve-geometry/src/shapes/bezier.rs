//! Frustum with a cubic Bezier side profile.

use super::Parameter;
use crate::curve::ProfileCurve;
use crate::error::{require_non_negative, require_positive, GeometryError, GeometryResult};
use crate::profile::{Profile, ProfilePoint, RingResolution};
use crate::subdivide::{flatten_curve, subdivide_diameter_changes};
use crate::tessellation::TessellationCache;
use crate::volume::{bezier_volume, VolumeRelation};
use config::constants::{GeometryConfig, DEGENERATE_EPSILON};
use serde::{Deserialize, Serialize};

/// Straight-line descriptor: inner control points on the chord.
pub const LINEAR_CURVE: [f64; 4] = [1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0];

/// Frustum whose side follows a cubic Bezier curve.
///
/// `curve` holds the normalized inner control points `[x1, y1, x2, y2]`;
/// see [`ProfileCurve::from_descriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierCone {
    /// Diameter at `y = length / 2`
    pub top_diameter: f64,
    /// Diameter at `y = -length / 2`
    pub bottom_diameter: f64,
    /// Axial extent
    pub length: f64,
    /// Normalized inner control points
    pub curve: [f64; 4],
}

impl BezierCone {
    /// The profile curve in the shape frame.
    pub fn profile_curve(&self) -> ProfileCurve {
        ProfileCurve::from_descriptor(
            self.bottom_diameter,
            self.top_diameter,
            self.length,
            self.curve,
        )
    }

    pub(super) fn validate(&self) -> GeometryResult<()> {
        require_non_negative("top_diameter", self.top_diameter)?;
        require_non_negative("bottom_diameter", self.bottom_diameter)?;
        require_positive("length", self.length)?;
        if let Some(value) = self
            .curve
            .iter()
            .find(|v| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(GeometryError::invalid_dimension(format!(
                "curve control values must lie in [0, 1]: {value}"
            )));
        }
        if self.top_diameter <= DEGENERATE_EPSILON && self.bottom_diameter <= DEGENERATE_EPSILON {
            return Err(GeometryError::degenerate(
                "bezier cone has zero diameter at both ends",
            ));
        }
        Ok(())
    }

    pub(super) fn volume(&self) -> f64 {
        bezier_volume(&self.profile_curve())
    }

    pub(super) fn radius_at(&self, y: f64) -> f64 {
        self.profile_curve().radius_at_y(y)
    }

    pub(super) fn profile(
        &self,
        cache: &mut TessellationCache,
        config: &GeometryConfig,
        resolution: RingResolution,
    ) -> Profile {
        let curve = self.profile_curve();
        let points = flatten_curve(&curve, config.max_chord_error)
            .into_iter()
            .map(|t| {
                let section = curve.point(t);
                ProfilePoint::new(2.0 * section.x, section.y, curve.normal(t))
            })
            .collect();

        let mut profile = Profile::new(points);
        profile.assign_texture_v();
        subdivide_diameter_changes(&profile, cache, config, resolution)
    }

    pub(super) fn parameter(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::TopDiameter => Some(self.top_diameter),
            Parameter::BottomDiameter => Some(self.bottom_diameter),
            Parameter::Length => Some(self.length),
            _ => None,
        }
    }

    pub(super) fn set_parameter(&mut self, parameter: Parameter, value: f64) -> bool {
        match parameter {
            Parameter::TopDiameter => self.top_diameter = value,
            Parameter::BottomDiameter => self.bottom_diameter = value,
            Parameter::Length => self.length = value,
            _ => return false,
        }
        true
    }

    /// Every control radius is affine in each end diameter and every axial
    /// coordinate scales with the length, so the volume is quadratic in a
    /// diameter and linear in the length. The coefficients are recovered by
    /// sampling the volume at 0, 1 and 2.
    pub(super) fn volume_relation(&self, parameter: Parameter, target: f64) -> VolumeRelation {
        let sample = |value: f64| {
            let mut shape = *self;
            shape.set_parameter(parameter, value);
            shape.volume()
        };
        match parameter {
            Parameter::TopDiameter | Parameter::BottomDiameter => {
                let (v0, v1, v2) = (sample(0.0), sample(1.0), sample(2.0));
                let a = 0.5 * (v2 - 2.0 * v1 + v0);
                VolumeRelation::Quadratic {
                    a,
                    b: v1 - v0 - a,
                    c: v0 - target,
                }
            }
            Parameter::Length => VolumeRelation::linear(sample(1.0), -target),
            _ => VolumeRelation::Monotone,
        }
    }
}

impl Default for BezierCone {
    fn default() -> Self {
        Self {
            top_diameter: 1.0,
            bottom_diameter: 1.0,
            length: 1.0,
            curve: LINEAR_CURVE,
        }
    }
}
