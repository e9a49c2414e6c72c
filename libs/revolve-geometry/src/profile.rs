//! # Profile Model
//!
//! Cross-section samples along the axis of revolution.
//!
//! Every shape family lowers its parameters to a [`Profile`]: an ordered
//! sequence of [`ProfilePoint`]s from the bottom of the part to the top.
//! Profiles are transient; they are rebuilt from scratch whenever a shape
//! parameter changes.
//!
//! Coordinates in the profile plane are `(radius, y)`: `x` points away from
//! the axis, `y` runs along it.

use crate::tessellation::{CircleTessellation, TessellationCache};
use config::constants::{GeometryConfig, DEGENERATE_EPSILON, MIN_COLLIDER_VERTICES};
use glam::DVec2;
use std::sync::Arc;

// =============================================================================
// PROFILE POINT
// =============================================================================

/// One cross-section of the part.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePoint {
    /// Ring diameter
    pub diameter: f64,
    /// Axial position
    pub y: f64,
    /// Texture V coordinate
    pub v: f64,
    /// Unit surface normal in the (radius, y) plane
    pub normal: DVec2,
    /// Included in the side and cap meshes
    pub in_render: bool,
    /// Included in the collider
    pub in_collider: bool,
    /// Ring used by the render meshes, chosen lazily when absent
    pub tessellation: Option<Arc<CircleTessellation>>,
    /// Coarser ring used by the collider, chosen lazily when absent
    pub collider_tessellation: Option<Arc<CircleTessellation>>,
}

impl ProfilePoint {
    /// Creates a point included in both render and collider output.
    pub fn new(diameter: f64, y: f64, normal: DVec2) -> Self {
        Self {
            diameter,
            y,
            v: 0.0,
            normal,
            in_render: true,
            in_collider: true,
            tessellation: None,
            collider_tessellation: None,
        }
    }

    /// Marks the point as visual refinement only.
    #[must_use]
    pub fn render_only(mut self) -> Self {
        self.in_render = true;
        self.in_collider = false;
        self
    }

    /// Attaches a render tessellation.
    #[must_use]
    pub fn with_tessellation(mut self, tessellation: Arc<CircleTessellation>) -> Self {
        self.tessellation = Some(tessellation);
        self
    }

    /// Attaches a collider tessellation.
    #[must_use]
    pub fn with_collider_tessellation(mut self, tessellation: Arc<CircleTessellation>) -> Self {
        self.collider_tessellation = Some(tessellation);
        self
    }

    /// Ring radius.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.diameter * 0.5
    }

    /// Position in the (radius, y) plane.
    #[inline]
    pub fn section(&self) -> DVec2 {
        DVec2::new(self.radius(), self.y)
    }
}

/// Outward normal of the profile segment from `a` to `b`.
///
/// Both points are in the (radius, y) plane. A zero-length segment yields
/// the radial direction.
pub fn segment_normal(a: DVec2, b: DVec2) -> DVec2 {
    let tangent = b - a;
    let length = tangent.length();
    if length < DEGENERATE_EPSILON {
        return DVec2::X;
    }
    DVec2::new(tangent.y, -tangent.x) / length
}

// =============================================================================
// RING RESOLUTION
// =============================================================================

/// How render rings choose their vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RingResolution {
    /// Coarsest ring within the configured chord error
    #[default]
    ChordError,
    /// At least this many vertices, to line up with a neighboring part
    Matched(u32),
}

impl RingResolution {
    /// Picks the render tessellation for a ring of the given diameter.
    pub fn select(
        self,
        cache: &mut TessellationCache,
        config: &GeometryConfig,
        diameter: f64,
    ) -> Arc<CircleTessellation> {
        match self {
            Self::ChordError => cache.for_diameter(
                diameter,
                config.max_chord_error,
                config.min_circle_vertices,
                config.max_circle_vertices,
            ),
            Self::Matched(count) => cache.for_points(count),
        }
    }
}

// =============================================================================
// PROFILE
// =============================================================================

/// Ordered sequence of profile points, bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    points: Vec<ProfilePoint>,
}

impl Profile {
    /// Wraps a point sequence after checking the profile invariants.
    ///
    /// # Panics
    ///
    /// Panics when fewer than two points are supplied or when either
    /// endpoint is excluded from the collider. Shape families construct
    /// profiles themselves, so either condition is a bug.
    pub fn new(points: Vec<ProfilePoint>) -> Self {
        assert!(
            points.len() >= 2,
            "profile needs at least 2 points, got {}",
            points.len()
        );
        assert!(
            points[0].in_collider && points[points.len() - 1].in_collider,
            "profile endpoints must be included in the collider"
        );
        Self { points }
    }

    /// All points in order.
    #[inline]
    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    /// Consumes the profile, returning its points.
    pub fn into_points(self) -> Vec<ProfilePoint> {
        self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a profile holds at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bottom point.
    pub fn first(&self) -> &ProfilePoint {
        &self.points[0]
    }

    /// Top point.
    pub fn last(&self) -> &ProfilePoint {
        &self.points[self.points.len() - 1]
    }

    /// Points included in the render meshes.
    pub fn render_points(&self) -> impl Iterator<Item = &ProfilePoint> + '_ {
        self.points.iter().filter(|p| p.in_render)
    }

    /// Points included in the collider.
    pub fn collider_points(&self) -> impl Iterator<Item = &ProfilePoint> + '_ {
        self.points.iter().filter(|p| p.in_collider)
    }

    /// Largest ring diameter.
    pub fn max_diameter(&self) -> f64 {
        self.points.iter().map(|p| p.diameter).fold(0.0, f64::max)
    }

    /// Length of the render profile measured along the surface.
    pub fn render_length(&self) -> f64 {
        let sections: Vec<DVec2> = self.render_points().map(ProfilePoint::section).collect();
        sections.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Assigns texture V by cumulative surface length, 0 at the bottom and
    /// 1 at the top. A profile of zero length gets V from its index.
    pub fn assign_texture_v(&mut self) {
        let mut cumulative = Vec::with_capacity(self.points.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in self.points.windows(2) {
            total += pair[0].section().distance(pair[1].section());
            cumulative.push(total);
        }

        let last = (self.points.len() - 1) as f64;
        for (i, (point, length)) in self.points.iter_mut().zip(cumulative).enumerate() {
            point.v = if total > DEGENERATE_EPSILON {
                length / total
            } else {
                i as f64 / last
            };
        }
    }

    /// Fills in missing tessellations: render rings on render points and
    /// collider rings, at the collider chord error, on collider points.
    ///
    /// Collider rings are chosen without the per-piece triangle budget; the
    /// writer replaces any that turn out too fine for their piece.
    pub fn assign_tessellations(
        &mut self,
        cache: &mut TessellationCache,
        config: &GeometryConfig,
        resolution: RingResolution,
    ) {
        for point in self.points.iter_mut() {
            if point.in_render && point.tessellation.is_none() {
                point.tessellation = Some(resolution.select(cache, config, point.diameter));
            }
            if point.in_collider && point.collider_tessellation.is_none() {
                point.collider_tessellation = Some(cache.for_diameter(
                    point.diameter,
                    config.collider_chord_error,
                    MIN_COLLIDER_VERTICES,
                    config.max_circle_vertices,
                ));
            }
        }
    }
}
