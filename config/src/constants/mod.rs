//! # Configuration Constants
//!
//! Centralized constants for revolved-part geometry. All tessellation
//! tolerances, subdivision caps, collider budgets and solver tolerances are
//! defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tessellation**: Circle chord error and vertex bounds
//! - **Subdivision**: Diameter-change and curve-flattening limits
//! - **Collider**: Physics triangle budget
//! - **Solver**: Volume seek tolerance and slider precision

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance below which a solver denominator or chord length counts as zero.
///
/// Larger than [`EPSILON`] because it guards quantities built from several
/// products of user-sized dimensions.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Maximum allowed chord error for render tessellation, in model units.
///
/// The deviation between a polygon edge and the true arc of the circle it
/// approximates must not exceed this value.
///
/// # Example
///
/// ```rust
/// use config::constants::{chord_error, MAX_CHORD_ERROR};
///
/// // A square badly approximates a 1m circle.
/// assert!(chord_error(0.5, 4) > MAX_CHORD_ERROR);
/// ```
pub const MAX_CHORD_ERROR: f64 = 0.01;

/// Chord error used for the coarser collider tessellation.
pub const COLLIDER_CHORD_ERROR: f64 = 0.05;

/// Minimum number of vertices around a render ring.
pub const MIN_CIRCLE_VERTICES: u32 = 12;

/// Maximum number of vertices around any ring.
///
/// Safety ceiling for very large diameters with tight chord errors.
pub const MAX_CIRCLE_VERTICES: u32 = 512;

/// Minimum number of vertices around a collider ring.
///
/// Four is the smallest count the quadrant-mirrored tessellation supports.
pub const MIN_COLLIDER_VERTICES: u32 = 4;

// =============================================================================
// SUBDIVISION CONSTANTS
// =============================================================================

/// Maximum diameter change, in percent of the larger diameter, allowed
/// between two consecutive render rings before extra rings are inserted.
///
/// Keeps the side texture from visibly stretching on steep cones.
pub const MAX_DIAMETER_CHANGE_PERCENT: f64 = 5.0;

/// Upper bound on rings inserted between two profile points by the
/// diameter-change pass.
///
/// # Example
///
/// ```rust
/// use config::constants::{MAX_DIAMETER_CHANGE_PERCENT, MAX_SUBDIVISIONS};
///
/// // A 100% change would ask for 20 rings, still under the cap.
/// let wanted = (100.0 / MAX_DIAMETER_CHANGE_PERCENT).floor() as u32;
/// assert!(wanted.min(MAX_SUBDIVISIONS) <= MAX_SUBDIVISIONS);
/// ```
pub const MAX_SUBDIVISIONS: u32 = 30;

/// Hard ceiling on queue iterations during curve flattening.
pub const MAX_FLATTEN_ITERATIONS: usize = 256;

/// Maximum number of segments used to approximate one fillet quarter-arc.
pub const MAX_FILLET_SEGMENTS: u32 = 16;

// =============================================================================
// COLLIDER CONSTANTS
// =============================================================================

/// Maximum triangles in a single convex collision mesh.
///
/// Imposed by the physics engine; exceeding it is recoverable.
pub const MAX_COLLIDER_TRIANGLES: usize = 255;

// =============================================================================
// SOLVER CONSTANTS
// =============================================================================

/// Relative volume error accepted by the dimension solver (1%).
///
/// Empirically chosen; kept overridable through [`GeometryConfig`].
pub const VOLUME_TOLERANCE: f64 = 0.01;

/// Default precision of the caller's dimension sliders, in model units.
pub const DEFAULT_SLIDER_PRECISION: f64 = 0.001;

/// Maximum refinement steps of the variable-step volume search.
pub const MAX_SEEK_ITERATIONS: usize = 2048;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Computes the worst-case chord deviation of a regular polygon.
///
/// For a circle of `radius` approximated by `vertex_count` evenly spaced
/// vertices the largest gap between an edge and the arc is
/// `radius * (1 - cos(PI / vertex_count))`.
///
/// # Arguments
///
/// * `radius` - Radius of the approximated circle
/// * `vertex_count` - Number of polygon vertices (0 yields the full radius)
///
/// # Example
///
/// ```rust
/// use config::constants::chord_error;
///
/// let coarse = chord_error(1.0, 8);
/// let fine = chord_error(1.0, 32);
/// assert!(fine < coarse);
/// ```
pub fn chord_error(radius: f64, vertex_count: u32) -> f64 {
    if vertex_count == 0 {
        return radius.abs();
    }
    radius.abs() * (1.0 - (std::f64::consts::PI / f64::from(vertex_count)).cos())
}

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

// =============================================================================
// GEOMETRY CONFIG
// =============================================================================

/// Immutable snapshot of the tolerances a geometry rebuild runs with.
///
/// # Examples
/// ```
/// use config::constants::GeometryConfig;
/// let config = GeometryConfig::default();
/// assert!(config.max_chord_error > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Render chord error in model units.
    pub max_chord_error: f64,
    /// Collider chord error in model units.
    pub collider_chord_error: f64,
    /// Minimum render ring vertex count.
    pub min_circle_vertices: u32,
    /// Maximum ring vertex count.
    pub max_circle_vertices: u32,
    /// Percent diameter change allowed per render segment.
    pub max_diameter_change: f64,
    /// Cap on rings inserted between two profile points.
    pub max_subdivisions: u32,
    /// Triangle budget per convex collider piece.
    pub max_collider_triangles: usize,
    /// Quantum the volume solver rounds its result to.
    pub slider_precision: f64,
    /// Relative error the volume solver accepts as "close enough".
    pub volume_tolerance: f64,
}

impl GeometryConfig {
    /// Builds a configuration with the given render chord error and
    /// diameter-change threshold, validating both.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GeometryConfig;
    /// let cfg = GeometryConfig::new(0.005, 2.5).expect("valid config");
    /// assert_eq!(cfg.max_diameter_change, 2.5);
    /// ```
    pub fn new(max_chord_error: f64, max_diameter_change: f64) -> Result<Self, ConfigError> {
        let config = Self {
            max_chord_error,
            max_diameter_change,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with a different slider precision.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GeometryConfig;
    /// let cfg = GeometryConfig::default().with_slider_precision(0.01).unwrap();
    /// assert_eq!(cfg.slider_precision, 0.01);
    /// ```
    pub fn with_slider_precision(self, slider_precision: f64) -> Result<Self, ConfigError> {
        let config = Self {
            slider_precision,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with a different volume tolerance.
    pub fn with_volume_tolerance(self, volume_tolerance: f64) -> Result<Self, ConfigError> {
        let config = Self {
            volume_tolerance,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every field against its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_chord_error", self.max_chord_error)?;
        positive("collider_chord_error", self.collider_chord_error)?;
        positive("max_diameter_change", self.max_diameter_change)?;
        positive("slider_precision", self.slider_precision)?;
        positive("volume_tolerance", self.volume_tolerance)?;

        if self.min_circle_vertices < MIN_COLLIDER_VERTICES
            || self.min_circle_vertices > self.max_circle_vertices
        {
            return Err(ConfigError::InvalidVertexRange {
                min: self.min_circle_vertices,
                max: self.max_circle_vertices,
            });
        }
        if self.max_subdivisions == 0 || self.max_subdivisions > MAX_SUBDIVISIONS {
            return Err(ConfigError::InvalidSubdivisions(self.max_subdivisions));
        }
        // A closed collider needs at least two 4-gons and their caps.
        if self.max_collider_triangles < 12 {
            return Err(ConfigError::InvalidTriangleBudget(self.max_collider_triangles));
        }
        Ok(())
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            max_chord_error: MAX_CHORD_ERROR,
            collider_chord_error: COLLIDER_CHORD_ERROR,
            min_circle_vertices: MIN_CIRCLE_VERTICES,
            max_circle_vertices: MAX_CIRCLE_VERTICES,
            max_diameter_change: MAX_DIAMETER_CHANGE_PERCENT,
            max_subdivisions: MAX_SUBDIVISIONS,
            max_collider_triangles: MAX_COLLIDER_TRIANGLES,
            slider_precision: DEFAULT_SLIDER_PRECISION,
            volume_tolerance: VOLUME_TOLERANCE,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A tolerance or threshold is zero, negative or not finite.
    #[error("{field} must be a positive finite number: {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// Ring vertex bounds are inverted or below the quadrant minimum.
    #[error("invalid ring vertex range: min={min}, max={max}")]
    InvalidVertexRange { min: u32, max: u32 },

    /// Subdivision cap is zero or above the hard limit.
    #[error("max_subdivisions must be in 1..=30: {0}")]
    InvalidSubdivisions(u32),

    /// Collider budget too small to hold a closed convex piece.
    #[error("collider triangle budget too small: {0}")]
    InvalidTriangleBudget(usize),
}
