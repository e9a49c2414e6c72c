//! # Circle Tessellation
//!
//! Polygonal approximations of a circle, cached by subdivision level.
//!
//! ## Layout
//!
//! A tessellation at subdivision level `l` has `4 * (l + 1)` vertices.
//! Only the first quadrant is evaluated with trigonometry; the other three
//! quadrants are produced by swapping axes and signs:
//!
//! ```text
//! quadrant 0: ( cos,  sin)
//! quadrant 1: (-sin,  cos)
//! quadrant 2: (-cos, -sin)
//! quadrant 3: ( sin, -cos)
//! ```
//!
//! Rings are written with one extra vertex that repeats the first one so
//! that texture U runs continuously across the seam. Odd rows are rotated by
//! half a step so consecutive rows do not share a straight seam line.
//!
//! ## Cache Lifecycle
//!
//! [`TessellationCache`] is owned by the caller: create it once, share it
//! across every shape rebuild, and [`TessellationCache::reset`] it at a
//! reload boundary. Growth is append-only and idempotent: building a level
//! twice yields identical tessellations, so a concurrent adapter may let the
//! last writer win without locking the read path.

#[cfg(test)]
mod tests;

use config::constants::{chord_error, MAX_CIRCLE_VERTICES};
use glam::DVec2;
use std::f64::consts::TAU;
use std::sync::Arc;

// =============================================================================
// CIRCLE TESSELLATION
// =============================================================================

/// Immutable regular-polygon approximation of a unit circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleTessellation {
    level: u32,
    vertex_count: u32,
    /// First-quadrant (cos, sin) pairs for even rows
    even_quadrant: Vec<DVec2>,
    /// First-quadrant (cos, sin) pairs for odd rows, shifted half a step
    odd_quadrant: Vec<DVec2>,
    unit_chord_error: f64,
}

impl CircleTessellation {
    /// Builds the tessellation for a subdivision level.
    pub fn new(level: u32) -> Self {
        let per_quadrant = level + 1;
        let vertex_count = per_quadrant * 4;
        let step = TAU / f64::from(vertex_count);

        let quadrant = |offset: f64| -> Vec<DVec2> {
            (0..per_quadrant)
                .map(|k| {
                    let theta = (f64::from(k) + offset) * step;
                    DVec2::new(theta.cos(), theta.sin())
                })
                .collect()
        };

        Self {
            level,
            vertex_count,
            even_quadrant: quadrant(0.0),
            odd_quadrant: quadrant(0.5),
            unit_chord_error: chord_error(1.0, vertex_count),
        }
    }

    /// Subdivision level this tessellation was built for.
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Number of distinct vertices around the circle (multiple of 4).
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Worst-case chord deviation for a unit radius.
    #[inline]
    pub fn unit_chord_error(&self) -> f64 {
        self.unit_chord_error
    }

    /// Worst-case chord deviation for a circle of the given diameter.
    #[inline]
    pub fn chord_error(&self, diameter: f64) -> f64 {
        self.unit_chord_error * diameter.abs() * 0.5
    }

    /// Angular parameter of ring vertex `k` in turns.
    ///
    /// `k` runs over `0..=vertex_count`; the last entry closes the seam at
    /// one full turn past the first.
    #[inline]
    pub fn u(&self, k: u32, odd: bool) -> f64 {
        let offset = if odd { 0.5 } else { 0.0 };
        (f64::from(k) + offset) / f64::from(self.vertex_count)
    }

    /// Unit direction `(cos, sin)` of ring vertex `k`.
    pub fn direction(&self, k: u32, odd: bool) -> DVec2 {
        let per_quadrant = self.level + 1;
        let k = k % self.vertex_count;
        let quadrant = if odd {
            &self.odd_quadrant
        } else {
            &self.even_quadrant
        };
        let base = quadrant[(k % per_quadrant) as usize];

        match k / per_quadrant {
            0 => base,
            1 => DVec2::new(-base.y, base.x),
            2 => DVec2::new(-base.x, -base.y),
            _ => DVec2::new(base.y, -base.x),
        }
    }

    /// Angular parameters of a seam-closed ring (`vertex_count + 1` entries).
    pub fn ring_parameters(&self, odd: bool) -> Vec<f64> {
        (0..=self.vertex_count).map(|k| self.u(k, odd)).collect()
    }

    /// Iterates over the `vertex_count + 1` ring vertices as `(u, direction)`.
    pub fn ring(&self, odd: bool) -> impl Iterator<Item = (f64, DVec2)> + '_ {
        (0..=self.vertex_count).map(move |k| (self.u(k, odd), self.direction(k, odd)))
    }
}

// =============================================================================
// TESSELLATION CACHE
// =============================================================================

/// Append-only cache of circle tessellations indexed by subdivision level.
///
/// # Example
///
/// ```rust
/// use revolve_geometry::tessellation::TessellationCache;
///
/// let mut cache = TessellationCache::new();
/// let ring = cache.for_diameter(1.0, 0.01, 12, 512);
/// assert_eq!(ring.vertex_count() % 4, 0);
/// assert!(ring.vertex_count() >= 12);
/// ```
#[derive(Debug, Default)]
pub struct TessellationCache {
    entries: Vec<Arc<CircleTessellation>>,
}

impl TessellationCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached subdivision levels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every cached level.
    ///
    /// Tessellations already handed out stay valid; they are shared.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Returns the tessellation for a level, extending the cache up to it.
    pub fn level(&mut self, level: u32) -> Arc<CircleTessellation> {
        while self.entries.len() <= level as usize {
            let next = self.entries.len() as u32;
            log::debug!(
                "extending circle tessellation cache to level {next} ({} vertices)",
                (next + 1) * 4
            );
            self.entries.push(Arc::new(CircleTessellation::new(next)));
        }
        Arc::clone(&self.entries[level as usize])
    }

    /// Selects the coarsest tessellation meeting a chord error bound.
    ///
    /// Returns the lowest level whose vertex count is at least
    /// `min_vertex_count` and whose chord error at `diameter` does not
    /// exceed `max_chord_error`. When the next level would exceed
    /// `max_vertex_count` the best level below the ceiling is returned even
    /// if it misses the bound.
    ///
    /// # Arguments
    ///
    /// * `diameter` - Circle diameter (non-finite values count as zero)
    /// * `max_chord_error` - Allowed chord deviation in model units
    /// * `min_vertex_count` - Lower bound on the vertex count
    /// * `max_vertex_count` - Ceiling on the vertex count
    pub fn for_diameter(
        &mut self,
        diameter: f64,
        max_chord_error: f64,
        min_vertex_count: u32,
        max_vertex_count: u32,
    ) -> Arc<CircleTessellation> {
        let diameter = if diameter.is_finite() {
            diameter.abs()
        } else {
            0.0
        };

        let mut level = 0;
        loop {
            let candidate = self.level(level);
            if candidate.vertex_count() >= min_vertex_count
                && candidate.chord_error(diameter) <= max_chord_error
            {
                return candidate;
            }
            if (level + 2) * 4 > max_vertex_count {
                return candidate;
            }
            level += 1;
        }
    }

    /// Returns the coarsest tessellation with at least `vertex_count`
    /// vertices, used when a ring must match a neighbor's resolution.
    ///
    /// Requests above [`MAX_CIRCLE_VERTICES`] get the ceiling ring.
    pub fn for_points(&mut self, vertex_count: u32) -> Arc<CircleTessellation> {
        if vertex_count > MAX_CIRCLE_VERTICES {
            log::warn!(
                "{vertex_count} ring vertices requested, capping at {MAX_CIRCLE_VERTICES}"
            );
        }
        let level = vertex_count
            .min(MAX_CIRCLE_VERTICES)
            .div_ceil(4)
            .saturating_sub(1);
        self.level(level)
    }
}
