//! Cylinder with rounded end edges.

use super::Parameter;
use crate::error::{require_non_negative, require_positive, GeometryError, GeometryResult};
use crate::profile::{Profile, ProfilePoint, RingResolution};
use crate::subdivide::subdivide_diameter_changes;
use crate::tessellation::TessellationCache;
use crate::volume::{pill_volume, spandrel_area, spandrel_centroid_ratio, VolumeRelation};
use config::constants::{GeometryConfig, DEGENERATE_EPSILON, MAX_FILLET_SEGMENTS};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// Cylinder whose two end edges are rounded by a quarter circle.
///
/// A fillet equal to the diameter closes both ends to a point; a fillet
/// equal to the length leaves no straight section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pill {
    /// Diameter of the straight section
    pub diameter: f64,
    /// Overall length including the rounded ends
    pub length: f64,
    /// Rounding diameter, at most `min(diameter, length)`
    pub fillet: f64,
}

impl Pill {
    pub(super) fn validate(&self) -> GeometryResult<()> {
        require_non_negative("diameter", self.diameter)?;
        require_positive("length", self.length)?;
        require_non_negative("fillet", self.fillet)?;
        let limit = self.diameter.min(self.length);
        if self.fillet > limit + DEGENERATE_EPSILON {
            return Err(GeometryError::invalid_dimension(format!(
                "fillet {} exceeds min(diameter, length) = {limit}",
                self.fillet
            )));
        }
        Ok(())
    }

    pub(super) fn volume(&self) -> f64 {
        pill_volume(self.diameter, self.length, self.fillet)
    }

    pub(super) fn radius_at(&self, y: f64) -> f64 {
        let radius = self.diameter * 0.5;
        let rho = self.fillet * 0.5;
        let dy = y.abs() - (self.length * 0.5 - rho);
        if rho <= DEGENERATE_EPSILON || dy <= 0.0 {
            return radius;
        }
        radius - rho + (rho * rho - dy * dy).max(0.0).sqrt()
    }

    /// Quarter-arc segments keeping the fillet within the chord error.
    fn arc_segments(&self, max_chord_error: f64) -> u32 {
        let rho = self.fillet * 0.5;
        (1..MAX_FILLET_SEGMENTS)
            .find(|&s| rho * (1.0 - (FRAC_PI_4 / f64::from(s)).cos()) <= max_chord_error)
            .unwrap_or(MAX_FILLET_SEGMENTS)
    }

    pub(super) fn profile(
        &self,
        cache: &mut TessellationCache,
        config: &GeometryConfig,
        resolution: RingResolution,
    ) -> Profile {
        let half = self.length * 0.5;
        let rho = self.fillet * 0.5;

        let mut points = Vec::new();
        if rho <= DEGENERATE_EPSILON {
            points.push(ProfilePoint::new(self.diameter, -half, DVec2::X));
            points.push(ProfilePoint::new(self.diameter, half, DVec2::X));
        } else {
            let inner = self.diameter * 0.5 - rho;
            let segments = self.arc_segments(config.max_chord_error);
            let arcs = [
                (DVec2::new(inner, -half + rho), -FRAC_PI_2),
                (DVec2::new(inner, half - rho), 0.0),
            ];
            for (center, start) in arcs {
                for k in 0..=segments {
                    let angle = start + FRAC_PI_2 * f64::from(k) / f64::from(segments);
                    let normal = DVec2::new(angle.cos(), angle.sin());
                    let section = center + normal * rho;
                    // Zero straight section: the arcs meet in one point.
                    let duplicate = points
                        .last()
                        .map(|p: &ProfilePoint| p.section().abs_diff_eq(section, DEGENERATE_EPSILON))
                        .unwrap_or(false);
                    if !duplicate {
                        points.push(ProfilePoint::new(2.0 * section.x, section.y, normal));
                    }
                }
            }
        }

        let mut profile = Profile::new(points);
        profile.assign_texture_v();
        subdivide_diameter_changes(&profile, cache, config, resolution)
    }

    pub(super) fn parameter(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Diameter => Some(self.diameter),
            Parameter::Length => Some(self.length),
            Parameter::Fillet => Some(self.fillet),
            _ => None,
        }
    }

    pub(super) fn set_parameter(&mut self, parameter: Parameter, value: f64) -> bool {
        match parameter {
            Parameter::Diameter => self.diameter = value,
            Parameter::Length => self.length = value,
            Parameter::Fillet => self.fillet = value,
            _ => return false,
        }
        true
    }

    /// Length and diameter enter the volume at most quadratically; the
    /// fillet does not.
    pub(super) fn volume_relation(&self, parameter: Parameter, target: f64) -> VolumeRelation {
        let rho = self.fillet * 0.5;
        let area = spandrel_area(rho);
        let k = spandrel_centroid_ratio();
        match parameter {
            Parameter::Length => {
                let radius = self.diameter * 0.5;
                let centroid = radius - rho * k;
                VolumeRelation::linear(PI * radius * radius, -2.0 * TAU * centroid * area - target)
            }
            Parameter::Diameter => VolumeRelation::Quadratic {
                a: PI * self.length / 4.0,
                b: -TAU * area,
                c: 2.0 * TAU * area * rho * k - target,
            },
            _ => VolumeRelation::Monotone,
        }
    }
}
