//! # Mesh Writer
//!
//! Turns a densified profile into render and physics meshes.
//!
//! ## Outputs
//!
//! - **Side**: one seam-closed ring per render point, consecutive rings
//!   stitched by a merge walk over their angular parameters
//! - **Caps**: a fan over the bottom and top rings, skipped for zero
//!   diameter ends
//! - **Colliders**: closed convex pieces on the collider points, each within
//!   the triangle budget
//! - **UV scale**: world size of one texture repeat, for the material layer
//!
//! Every buffer is allocated with its exact final size before the first
//! write.
//!
//! ## Frame
//!
//! The axis of revolution is `+Y`. A ring vertex at angle `θ` sits at
//! `(r·cos θ, y, r·sin θ)`. Triangles wind counter-clockwise seen from
//! outside.

mod caps;
mod collider;
mod prism;
mod side;


pub use collider::{
    per_corner_pieces, ring_vertex_budget, split_convex_runs, ColliderPiece, ColliderStrategy,
};

use crate::mesh::{MeshBuffer, Vertex};
use crate::profile::{Profile, ProfilePoint, RingResolution};
use crate::tessellation::{CircleTessellation, TessellationCache};
use config::constants::GeometryConfig;
use glam::{DVec2, DVec3, DVec4};
use std::f64::consts::PI;
use std::sync::Arc;

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// World size of one texture repeat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvScale {
    /// Side texture size: (circumference, profile length)
    pub side: DVec2,
    /// Cap texture size (largest diameter)
    pub cap: f64,
}

impl UvScale {
    /// UV scale of a revolved profile.
    pub fn for_profile(profile: &Profile) -> Self {
        let diameter = profile.max_diameter();
        Self {
            side: DVec2::new(PI * diameter, profile.render_length()),
            cap: diameter,
        }
    }
}

/// Every mesh produced for one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeMeshes {
    /// Side surface
    pub side: MeshBuffer,
    /// Cap at the bottom end, empty for a zero diameter end
    pub bottom_cap: MeshBuffer,
    /// Cap at the top end, empty for a zero diameter end
    pub top_cap: MeshBuffer,
    /// Convex collider pieces
    pub colliders: Vec<ColliderPiece>,
    /// Texture scale factors
    pub uv_scale: UvScale,
}

impl ShapeMeshes {
    /// Total render triangles over side and caps.
    pub fn render_triangle_count(&self) -> usize {
        self.side.triangle_count() + self.bottom_cap.triangle_count() + self.top_cap.triangle_count()
    }
}

// =============================================================================
// MESH WRITER
// =============================================================================

/// Writes the meshes of one shape rebuild.
///
/// The writer borrows the tessellation cache for the duration of a rebuild
/// and resolves any ring that has no tessellation yet.
///
/// # Example
///
/// ```rust
/// use config::constants::GeometryConfig;
/// use glam::DVec2;
/// use revolve_geometry::profile::{Profile, ProfilePoint};
/// use revolve_geometry::tessellation::TessellationCache;
/// use revolve_geometry::writer::MeshWriter;
///
/// let mut cache = TessellationCache::new();
/// let config = GeometryConfig::default();
/// let profile = Profile::new(vec![
///     ProfilePoint::new(1.0, -0.5, DVec2::X),
///     ProfilePoint::new(1.0, 0.5, DVec2::X),
/// ]);
///
/// let meshes = MeshWriter::new(&mut cache, &config).write_meshes(&profile);
/// assert_eq!(meshes.colliders.len(), 1);
/// assert!(meshes.side.is_complete());
/// ```
pub struct MeshWriter<'a> {
    cache: &'a mut TessellationCache,
    config: &'a GeometryConfig,
    resolution: RingResolution,
}

impl<'a> MeshWriter<'a> {
    /// Creates a writer using the configured chord error for render rings.
    pub fn new(cache: &'a mut TessellationCache, config: &'a GeometryConfig) -> Self {
        Self {
            cache,
            config,
            resolution: RingResolution::ChordError,
        }
    }

    /// Overrides how unresolved render rings pick their vertex count.
    #[must_use]
    pub fn with_resolution(mut self, resolution: RingResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Writes side, caps, convex-run colliders and UV scale.
    pub fn write_meshes(&mut self, profile: &Profile) -> ShapeMeshes {
        let rings = self.render_rings(profile);
        let side = side::write_side(&rings);
        let (bottom_cap, top_cap) = caps::write_caps(&rings, profile.max_diameter());
        let colliders = collider::convex_run_pieces(profile, self.cache, self.config);

        ShapeMeshes {
            side,
            bottom_cap,
            top_cap,
            colliders,
            uv_scale: UvScale::for_profile(profile),
        }
    }

    /// Writes only the side mesh.
    pub fn write_side(&mut self, profile: &Profile) -> MeshBuffer {
        side::write_side(&self.render_rings(profile))
    }

    /// Writes only the bottom and top caps.
    pub fn write_caps(&mut self, profile: &Profile) -> (MeshBuffer, MeshBuffer) {
        caps::write_caps(&self.render_rings(profile), profile.max_diameter())
    }

    /// Writes only the collider pieces, using the given strategy.
    pub fn write_colliders(
        &mut self,
        profile: &Profile,
        strategy: ColliderStrategy,
    ) -> Vec<ColliderPiece> {
        match strategy {
            ColliderStrategy::ConvexRuns => {
                collider::convex_run_pieces(profile, self.cache, self.config)
            }
            ColliderStrategy::PerCorner { corner_count } => {
                let first = profile.first();
                let last = profile.last();
                collider::per_corner_pieces(corner_count, first.diameter, first.y, last.y)
            }
        }
    }

    /// Writes the flat-shaded meshes of a regular polygon prism.
    ///
    /// # Arguments
    ///
    /// * `corner_count` - Polygon corners, at least 3
    /// * `diameter` - Circumscribed diameter
    /// * `length` - Axial extent, centered on the origin
    pub fn write_prism(&mut self, corner_count: u32, diameter: f64, length: f64) -> ShapeMeshes {
        prism::write_prism(corner_count, diameter, length)
    }

    /// Pairs every render point with its resolved tessellation.
    fn render_rings<'p>(&mut self, profile: &'p Profile) -> Vec<RenderRing<'p>> {
        profile
            .render_points()
            .enumerate()
            .map(|(row, point)| {
                let tessellation = match &point.tessellation {
                    Some(tessellation) => Arc::clone(tessellation),
                    None => self.resolution.select(self.cache, self.config, point.diameter),
                };
                RenderRing {
                    point,
                    tessellation,
                    odd: row % 2 == 1,
                }
            })
            .collect()
    }
}

// =============================================================================
// SHARED RING HELPERS
// =============================================================================

/// A render point with its tessellation and row parity.
pub(crate) struct RenderRing<'p> {
    pub point: &'p ProfilePoint,
    pub tessellation: Arc<CircleTessellation>,
    pub odd: bool,
}

/// Vertex index layout of one written ring.
pub(crate) struct Ring {
    /// Index of the ring's first vertex
    pub start: u32,
    /// Angular parameter per ring position, `segments + 1` entries
    pub params: Vec<f64>,
    /// Distinct vertices in the ring; positions wrap modulo the stride
    pub stride: u32,
}

impl Ring {
    #[inline]
    pub fn index(&self, k: usize) -> u32 {
        self.start + (k as u32) % self.stride
    }

    #[inline]
    pub fn segments(&self) -> usize {
        self.params.len() - 1
    }
}

/// Stitches two rings with `lower.segments() + upper.segments()` triangles.
///
/// Walks both rings in order of angular parameter, always advancing the ring
/// whose next vertex comes first.
pub(crate) fn stitch(mesh: &mut MeshBuffer, lower: &Ring, upper: &Ring) {
    let (mut i, mut j) = (0, 0);
    let (na, nb) = (lower.segments(), upper.segments());

    while i < na || j < nb {
        let advance_lower = j == nb || (i < na && lower.params[i + 1] <= upper.params[j + 1]);
        if advance_lower {
            mesh.write_triangle([lower.index(i), upper.index(j), lower.index(i + 1)]);
            i += 1;
        } else {
            mesh.write_triangle([lower.index(i), upper.index(j), upper.index(j + 1)]);
            j += 1;
        }
    }
}

/// Side vertex of a profile point at a ring direction.
pub(crate) fn ring_vertex(point: &ProfilePoint, direction: DVec2, u: f64) -> Vertex {
    let radius = point.radius();
    Vertex {
        position: DVec3::new(radius * direction.x, point.y, radius * direction.y),
        normal: DVec3::new(
            point.normal.x * direction.x,
            point.normal.y,
            point.normal.x * direction.y,
        ),
        tangent: DVec4::new(-direction.y, 0.0, direction.x, 1.0),
        uv: DVec2::new(u, point.v),
    }
}
