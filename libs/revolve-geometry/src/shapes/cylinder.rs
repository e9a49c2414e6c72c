//! Cylinder and conical frustum.

use super::Parameter;
use crate::error::{require_non_negative, require_positive, GeometryError, GeometryResult};
use crate::profile::{segment_normal, Profile, ProfilePoint, RingResolution};
use crate::subdivide::subdivide_diameter_changes;
use crate::tessellation::TessellationCache;
use crate::volume::{cylinder_volume, frustum_volume, VolumeRelation};
use config::constants::{GeometryConfig, DEGENERATE_EPSILON};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Straight cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    /// Diameter
    pub diameter: f64,
    /// Axial extent
    pub length: f64,
}

impl Cylinder {
    pub(super) fn validate(&self) -> GeometryResult<()> {
        require_non_negative("diameter", self.diameter)?;
        require_positive("length", self.length)
    }

    pub(super) fn volume(&self) -> f64 {
        cylinder_volume(self.diameter, self.length)
    }

    pub(super) fn radius_at(&self, _y: f64) -> f64 {
        self.diameter * 0.5
    }

    pub(super) fn profile(&self) -> Profile {
        let half = self.length * 0.5;
        let mut profile = Profile::new(vec![
            ProfilePoint::new(self.diameter, -half, DVec2::X),
            ProfilePoint::new(self.diameter, half, DVec2::X),
        ]);
        profile.assign_texture_v();
        profile
    }

    pub(super) fn parameter(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Diameter => Some(self.diameter),
            Parameter::Length => Some(self.length),
            _ => None,
        }
    }

    pub(super) fn set_parameter(&mut self, parameter: Parameter, value: f64) -> bool {
        match parameter {
            Parameter::Diameter => self.diameter = value,
            Parameter::Length => self.length = value,
            _ => return false,
        }
        true
    }

    pub(super) fn volume_relation(&self, parameter: Parameter, target: f64) -> VolumeRelation {
        match parameter {
            Parameter::Diameter => VolumeRelation::Quadratic {
                a: PI * self.length / 4.0,
                b: 0.0,
                c: -target,
            },
            Parameter::Length => {
                VolumeRelation::linear(PI * self.diameter * self.diameter / 4.0, -target)
            }
            _ => VolumeRelation::Monotone,
        }
    }
}

/// Conical frustum, either end may close to a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    /// Diameter at `y = length / 2`
    pub top_diameter: f64,
    /// Diameter at `y = -length / 2`
    pub bottom_diameter: f64,
    /// Axial extent
    pub length: f64,
}

impl Cone {
    pub(super) fn validate(&self) -> GeometryResult<()> {
        require_non_negative("top_diameter", self.top_diameter)?;
        require_non_negative("bottom_diameter", self.bottom_diameter)?;
        require_positive("length", self.length)?;
        if self.top_diameter <= DEGENERATE_EPSILON && self.bottom_diameter <= DEGENERATE_EPSILON {
            return Err(GeometryError::degenerate(
                "cone has zero diameter at both ends",
            ));
        }
        Ok(())
    }

    pub(super) fn volume(&self) -> f64 {
        frustum_volume(self.bottom_diameter, self.top_diameter, self.length)
    }

    pub(super) fn radius_at(&self, y: f64) -> f64 {
        let f = if self.length > 0.0 {
            y / self.length + 0.5
        } else {
            0.0
        };
        0.5 * (self.bottom_diameter + (self.top_diameter - self.bottom_diameter) * f)
    }

    pub(super) fn profile(
        &self,
        cache: &mut TessellationCache,
        config: &GeometryConfig,
        resolution: RingResolution,
    ) -> Profile {
        let half = self.length * 0.5;
        let bottom = DVec2::new(self.bottom_diameter * 0.5, -half);
        let top = DVec2::new(self.top_diameter * 0.5, half);
        let normal = segment_normal(bottom, top);

        let mut profile = Profile::new(vec![
            ProfilePoint::new(self.bottom_diameter, -half, normal),
            ProfilePoint::new(self.top_diameter, half, normal),
        ]);
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

    /// `V = πL(x² + x·o + o²)/12` with `o` the other diameter.
    pub(super) fn volume_relation(&self, parameter: Parameter, target: f64) -> VolumeRelation {
        let k = PI * self.length / 12.0;
        let quadratic = |other: f64| VolumeRelation::Quadratic {
            a: k,
            b: k * other,
            c: k * other * other - target,
        };
        match parameter {
            Parameter::TopDiameter => quadratic(self.bottom_diameter),
            Parameter::BottomDiameter => quadratic(self.top_diameter),
            Parameter::Length => VolumeRelation::linear(
                frustum_volume(self.bottom_diameter, self.top_diameter, 1.0),
                -target,
            ),
            _ => VolumeRelation::Monotone,
        }
    }
}
