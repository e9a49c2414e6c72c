//! # Shapes
//!
//! The closed set of part families and the capability surface they share.
//!
//! ## Families
//!
//! | Variant | Parameters | Collider |
//! |---------|------------|----------|
//! | [`Cylinder`] | diameter, length | convex runs |
//! | [`Cone`] | top/bottom diameter, length | convex runs |
//! | [`Pill`] | diameter, length, fillet | convex runs |
//! | [`BezierCone`] | top/bottom diameter, length, curve | convex runs |
//! | [`Prism`] | corner count, diameter, length | per corner |
//!
//! Every family is centered on the origin with its axis along `+Y`, so the
//! bottom end sits at `y = -length / 2` and the top end at `y = length / 2`.
//!
//! ## Capability
//!
//! [`Shape`] dispatches by `match`; there is no trait object or shared base
//! state. Each family answers the same questions: volume, parameter bounds,
//! profile, local radius and the closed form its volume has in each
//! parameter.

mod bezier;
mod cylinder;
mod pill;
mod prism;

#[cfg(test)]
mod tests;

pub use bezier::{BezierCone, LINEAR_CURVE};
pub use cylinder::{Cone, Cylinder};
pub use pill::Pill;
pub use prism::Prism;

use crate::coords::{self, CylindricCoordinate, HeightMode, RadiusMode};
use crate::error::{GeometryError, GeometryResult};
use crate::profile::{Profile, RingResolution};
use crate::rebuild::{Attachment, AttachmentMove};
use crate::tessellation::TessellationCache;
use crate::volume::{seek_value, RoundingDirection, SeekRequest, SeekResult, VolumeRelation};
use crate::writer::{ColliderStrategy, MeshWriter, ShapeMeshes};
use config::constants::GeometryConfig;
use glam::DVec3;
use serde::{Deserialize, Serialize};

// =============================================================================
// PARAMETERS AND BOUNDS
// =============================================================================

/// A scalar shape parameter the caller can edit or solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    /// Diameter of a constant-section family
    Diameter,
    /// Diameter at the top end
    TopDiameter,
    /// Diameter at the bottom end
    BottomDiameter,
    /// Axial extent
    Length,
    /// Pill rounding diameter
    Fillet,
}

/// Caller-imposed size limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeLimits {
    /// Smallest allowed diameter
    pub min_diameter: f64,
    /// Largest allowed diameter
    pub max_diameter: f64,
    /// Smallest allowed length
    pub min_length: f64,
    /// Largest allowed length
    pub max_length: f64,
}

impl Default for ShapeLimits {
    fn default() -> Self {
        Self {
            min_diameter: 0.0,
            max_diameter: 10.0,
            min_length: 0.01,
            max_length: 20.0,
        }
    }
}

/// Closed interval of allowed parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl ParameterRange {
    /// Creates a range, widening `max` to `min` when they cross.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Clamps a value into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Returns true if the value lies in the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Allowed range for every parameter of one shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeBounds {
    ranges: Vec<(Parameter, ParameterRange)>,
}

impl ShapeBounds {
    /// Adds or replaces the range of a parameter.
    pub fn with(mut self, parameter: Parameter, range: ParameterRange) -> Self {
        self.ranges.retain(|(p, _)| *p != parameter);
        self.ranges.push((parameter, range));
        self
    }

    /// Range of a parameter, if the shape has it.
    pub fn range(&self, parameter: Parameter) -> Option<ParameterRange> {
        self.ranges
            .iter()
            .find(|(p, _)| *p == parameter)
            .map(|(_, r)| *r)
    }

    /// Parameters with a range, in insertion order.
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.ranges.iter().map(|(p, _)| *p)
    }
}

/// Axis positions of the stacking nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePositions {
    /// Node at the bottom end
    pub bottom: DVec3,
    /// Node at the top end
    pub top: DVec3,
}

/// Everything a rebuild produces for one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGeometry {
    /// Densified profile the meshes were written from
    pub profile: Profile,
    /// Render and collider meshes
    pub meshes: ShapeMeshes,
    /// Analytic volume
    pub volume: f64,
}

// =============================================================================
// SHAPE
// =============================================================================

/// A part shape: one of the supported families.
///
/// # Example
///
/// ```rust
/// use revolve_geometry::shapes::{Cone, Shape};
///
/// let shape = Shape::Cone(Cone {
///     top_diameter: 1.0,
///     bottom_diameter: 2.0,
///     length: 4.0,
/// });
/// let expected = 7.0 * std::f64::consts::PI / 3.0;
/// assert!((shape.calculate_volume() - expected).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Straight cylinder
    Cylinder(Cylinder),
    /// Conical frustum
    Cone(Cone),
    /// Cylinder with rounded end edges
    Pill(Pill),
    /// Frustum with a cubic Bezier side profile
    BezierCone(BezierCone),
    /// Regular polygon prism
    Prism(Prism),
}

impl Shape {
    /// Checks every parameter for sign, finiteness and consistency.
    pub fn validate(&self) -> GeometryResult<()> {
        match self {
            Self::Cylinder(s) => s.validate(),
            Self::Cone(s) => s.validate(),
            Self::Pill(s) => s.validate(),
            Self::BezierCone(s) => s.validate(),
            Self::Prism(s) => s.validate(),
        }
    }

    /// Short family name for logs.
    pub fn family(&self) -> &'static str {
        match self {
            Self::Cylinder(_) => "cylinder",
            Self::Cone(_) => "cone",
            Self::Pill(_) => "pill",
            Self::BezierCone(_) => "bezier_cone",
            Self::Prism(_) => "prism",
        }
    }

    /// Axial extent.
    pub fn length(&self) -> f64 {
        match self {
            Self::Cylinder(s) => s.length,
            Self::Cone(s) => s.length,
            Self::Pill(s) => s.length,
            Self::BezierCone(s) => s.length,
            Self::Prism(s) => s.length,
        }
    }

    /// Analytic volume.
    pub fn calculate_volume(&self) -> f64 {
        match self {
            Self::Cylinder(s) => s.volume(),
            Self::Cone(s) => s.volume(),
            Self::Pill(s) => s.volume(),
            Self::BezierCone(s) => s.volume(),
            Self::Prism(s) => s.volume(),
        }
    }

    /// Distance from the axis to the surface at height `y` and angular
    /// fraction `u`. Heights outside the shape are clamped to its ends.
    pub fn local_radius(&self, y: f64, u: f64) -> f64 {
        let half = 0.5 * self.length();
        let y = y.max(-half).min(half);
        match self {
            Self::Cylinder(s) => s.radius_at(y),
            Self::Cone(s) => s.radius_at(y),
            Self::Pill(s) => s.radius_at(y),
            Self::BezierCone(s) => s.radius_at(y),
            Self::Prism(s) => s.radius_at(u),
        }
    }

    /// How the collider is decomposed into convex pieces.
    pub fn collider_strategy(&self) -> ColliderStrategy {
        match self {
            Self::Prism(s) => ColliderStrategy::PerCorner {
                corner_count: s.corner_count,
            },
            _ => ColliderStrategy::ConvexRuns,
        }
    }

    /// Builds the densified profile with render tessellations assigned.
    pub fn profile(
        &self,
        cache: &mut TessellationCache,
        config: &GeometryConfig,
        resolution: RingResolution,
    ) -> Profile {
        let mut profile = match self {
            Self::Cylinder(s) => s.profile(),
            Self::Cone(s) => s.profile(cache, config, resolution),
            Self::Pill(s) => s.profile(cache, config, resolution),
            Self::BezierCone(s) => s.profile(cache, config, resolution),
            Self::Prism(s) => s.profile(),
        };
        profile.assign_tessellations(cache, config, resolution);
        profile
    }

    /// Validates the shape and writes its meshes.
    pub fn rebuild_geometry(
        &self,
        cache: &mut TessellationCache,
        config: &GeometryConfig,
        resolution: RingResolution,
    ) -> GeometryResult<ShapeGeometry> {
        self.validate()?;
        config.validate()?;

        let profile = self.profile(cache, config, resolution);
        let mut writer = MeshWriter::new(cache, config).with_resolution(resolution);
        let meshes = match self {
            Self::Prism(s) => writer.write_prism(s.corner_count, s.diameter, s.length),
            _ => writer.write_meshes(&profile),
        };
        log::debug!(
            "rebuilt {} with {} profile points, {} render triangles, {} collider pieces",
            self.family(),
            profile.len(),
            meshes.render_triangle_count(),
            meshes.colliders.len()
        );

        Ok(ShapeGeometry {
            profile,
            meshes,
            volume: self.calculate_volume(),
        })
    }

    /// Stacking node positions on the axis.
    pub fn node_positions(&self) -> NodePositions {
        let half = 0.5 * self.length();
        NodePositions {
            bottom: DVec3::new(0.0, -half, 0.0),
            top: DVec3::new(0.0, half, 0.0),
        }
    }

    // =========================================================================
    // PARAMETERS
    // =========================================================================

    /// Allowed range of every parameter under the given limits.
    ///
    /// Pill fillets are capped by `min(diameter, length)`, and diameter and
    /// length cannot drop below the current fillet unless the limits force
    /// them to; [`Shape::clamp`] then shrinks the fillet.
    pub fn adjust_bounds(&self, limits: &ShapeLimits) -> ShapeBounds {
        let diameter = ParameterRange::new(limits.min_diameter, limits.max_diameter);
        let length = ParameterRange::new(limits.min_length, limits.max_length);
        let bounds = ShapeBounds::default().with(Parameter::Length, length);

        match self {
            Self::Cylinder(_) | Self::Prism(_) => bounds.with(Parameter::Diameter, diameter),
            Self::Cone(_) | Self::BezierCone(_) => bounds
                .with(Parameter::TopDiameter, diameter)
                .with(Parameter::BottomDiameter, diameter),
            Self::Pill(s) => bounds
                .with(
                    Parameter::Diameter,
                    ParameterRange::new(
                        limits.min_diameter.max(s.fillet).min(limits.max_diameter),
                        limits.max_diameter,
                    ),
                )
                .with(
                    Parameter::Length,
                    ParameterRange::new(
                        limits.min_length.max(s.fillet).min(limits.max_length),
                        limits.max_length,
                    ),
                )
                .with(
                    Parameter::Fillet,
                    ParameterRange::new(0.0, s.diameter.min(s.length)),
                ),
        }
    }

    /// Copy with every parameter clamped into its bounds.
    #[must_use]
    pub fn clamp(&self, limits: &ShapeLimits) -> Shape {
        let mut shape = self.clone();
        let bounds = shape.adjust_bounds(limits);
        for parameter in bounds.parameters().filter(|p| *p != Parameter::Fillet) {
            if let (Some(range), Some(value)) = (bounds.range(parameter), shape.parameter(parameter)) {
                shape.set_parameter(parameter, range.clamp(value));
            }
        }
        // The fillet bound depends on the clamped diameter and length.
        if let Self::Pill(pill) = &mut shape {
            pill.fillet = pill.fillet.max(0.0).min(pill.diameter.min(pill.length));
        }
        shape
    }

    /// Current value of a parameter, if the family has it.
    pub fn parameter(&self, parameter: Parameter) -> Option<f64> {
        match self {
            Self::Cylinder(s) => s.parameter(parameter),
            Self::Cone(s) => s.parameter(parameter),
            Self::Pill(s) => s.parameter(parameter),
            Self::BezierCone(s) => s.parameter(parameter),
            Self::Prism(s) => s.parameter(parameter),
        }
    }

    /// Copy with one parameter replaced, validated.
    pub fn with_parameter(&self, parameter: Parameter, value: f64) -> GeometryResult<Shape> {
        let mut shape = self.clone();
        if !shape.set_parameter(parameter, value) {
            return Err(GeometryError::unsupported(format!(
                "{} has no {parameter:?} parameter",
                self.family()
            )));
        }
        shape.validate()?;
        Ok(shape)
    }

    /// Sets a parameter in place; false if the family does not have it.
    fn set_parameter(&mut self, parameter: Parameter, value: f64) -> bool {
        match self {
            Self::Cylinder(s) => s.set_parameter(parameter, value),
            Self::Cone(s) => s.set_parameter(parameter, value),
            Self::Pill(s) => s.set_parameter(parameter, value),
            Self::BezierCone(s) => s.set_parameter(parameter, value),
            Self::Prism(s) => s.set_parameter(parameter, value),
        }
    }

    /// How the volume depends on a parameter, with `target` subtracted.
    fn volume_relation(&self, parameter: Parameter, target: f64) -> VolumeRelation {
        match self {
            Self::Cylinder(s) => s.volume_relation(parameter, target),
            Self::Cone(s) => s.volume_relation(parameter, target),
            Self::Pill(s) => s.volume_relation(parameter, target),
            Self::BezierCone(s) => s.volume_relation(parameter, target),
            Self::Prism(s) => s.volume_relation(parameter, target),
        }
    }

    /// Solves for the parameter value that gives the target volume.
    ///
    /// The result is rounded to the configured slider precision and clamped
    /// into the parameter's bounds; an unreachable target comes back with
    /// `within_tolerance == false`.
    ///
    /// # Arguments
    ///
    /// * `target` - Desired volume
    /// * `parameter` - Parameter to solve for
    /// * `direction` - Rounding direction for the slider precision
    /// * `limits` - Size limits bounding the search
    /// * `config` - Slider precision and volume tolerance
    pub fn seek_volume(
        &self,
        target: f64,
        parameter: Parameter,
        direction: RoundingDirection,
        limits: &ShapeLimits,
        config: &GeometryConfig,
    ) -> GeometryResult<SeekResult> {
        let unsupported = || {
            GeometryError::unsupported(format!(
                "{} has no {parameter:?} parameter",
                self.family()
            ))
        };
        let range = self
            .adjust_bounds(limits)
            .range(parameter)
            .ok_or_else(unsupported)?;
        let current = self.parameter(parameter).ok_or_else(unsupported)?;

        let request = SeekRequest {
            target,
            current,
            min: range.min,
            max: range.max,
            precision: config.slider_precision,
            direction,
            tolerance: config.volume_tolerance,
        };
        let result = seek_value(&request, self.volume_relation(parameter, target), |value| {
            let mut shape = self.clone();
            shape.set_parameter(parameter, value);
            shape.calculate_volume()
        });
        if !result.within_tolerance {
            log::debug!(
                "{} volume {target} not reachable through {parameter:?}, closest {}",
                self.family(),
                result.volume
            );
        }
        Ok(result)
    }

    // =========================================================================
    // COORDINATES
    // =========================================================================

    /// Converts a point in the shape frame to shape-relative coordinates.
    pub fn normalize(
        &self,
        point: DVec3,
        height_mode: HeightMode,
        radius_mode: RadiusMode,
    ) -> CylindricCoordinate {
        coords::normalize(self, point, height_mode, radius_mode)
    }

    /// Converts shape-relative coordinates back to a point in the shape frame.
    pub fn denormalize(&self, coordinate: &CylindricCoordinate) -> DVec3 {
        coords::denormalize(self, coordinate)
    }

    /// Moves attachments so they keep their relative placement on `new`.
    pub fn translate_attachments(
        &self,
        new: &Shape,
        attachments: &[Attachment],
    ) -> Vec<AttachmentMove> {
        attachments
            .iter()
            .map(|attachment| {
                let coordinate =
                    self.normalize(attachment.position, attachment.height_mode, attachment.radius_mode);
                let moved = new.denormalize(&coordinate);
                AttachmentMove {
                    id: attachment.id,
                    old: attachment.position,
                    new: moved,
                    delta: moved - attachment.position,
                }
            })
            .collect()
    }
}
