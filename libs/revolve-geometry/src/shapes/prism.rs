//! Regular polygon prism.

use super::Parameter;
use crate::error::{require_non_negative, require_positive, GeometryError, GeometryResult};
use crate::profile::{Profile, ProfilePoint};
use crate::volume::{prism_volume, VolumeRelation};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Prism over a regular polygon whose first corner lies on `+X`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prism {
    /// Polygon corners, at least 3
    pub corner_count: u32,
    /// Circumscribed diameter
    pub diameter: f64,
    /// Axial extent
    pub length: f64,
}

impl Prism {
    pub(super) fn validate(&self) -> GeometryResult<()> {
        if self.corner_count < 3 {
            return Err(GeometryError::invalid_dimension(format!(
                "prism needs at least 3 corners, got {}",
                self.corner_count
            )));
        }
        require_non_negative("diameter", self.diameter)?;
        require_positive("length", self.length)
    }

    pub(super) fn volume(&self) -> f64 {
        prism_volume(self.corner_count, self.diameter, self.length)
    }

    /// Distance from the axis to the polygon boundary at angular fraction `u`.
    pub(super) fn radius_at(&self, u: f64) -> f64 {
        let n = f64::from(self.corner_count.max(3));
        let sector = TAU / n;
        let offset = (TAU * u).rem_euclid(sector) - 0.5 * sector;
        self.diameter * 0.5 * (PI / n).cos() / offset.cos()
    }

    /// Both end rings at the circumscribed diameter.
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
        let n = f64::from(self.corner_count.max(3));
        let area_factor = n * (TAU / n).sin() / 8.0;
        match parameter {
            Parameter::Diameter => VolumeRelation::Quadratic {
                a: area_factor * self.length,
                b: 0.0,
                c: -target,
            },
            Parameter::Length => {
                VolumeRelation::linear(area_factor * self.diameter * self.diameter, -target)
            }
            _ => VolumeRelation::Monotone,
        }
    }
}
