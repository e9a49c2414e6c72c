//! # Revolve Geometry
//!
//! Geometry core for revolved parts: cylinders, cones, pills, Bezier cones
//! and polygon prisms stacked along a common axis.
//!
//! ## Architecture
//!
//! ```text
//! Shape → Profile → subdivide → MeshWriter → ShapeMeshes
//!   │                               │
//!   └── volume / seek               └── TessellationCache
//! ```
//!
//! ## Modules
//!
//! - **tessellation**: Quadrant-mirrored circle tessellations, cached by level
//! - **profile**: Ordered (diameter, y) profile points with normals and V
//! - **curve**: Cubic Bezier profile curve and its chord extrema
//! - **subdivide**: Diameter-change densification and curve flattening
//! - **volume**: Closed-form volumes and the inverse volume solver
//! - **writer**: Side, cap and collider meshes
//! - **coords**: Shape-relative cylindric coordinates
//! - **shapes**: The part families
//! - **rebuild**: Geometry plus node and attachment moves after an edit
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::GeometryConfig;
//! use revolve_geometry::profile::RingResolution;
//! use revolve_geometry::shapes::{Cone, Shape};
//! use revolve_geometry::tessellation::TessellationCache;
//!
//! let mut cache = TessellationCache::new();
//! let shape = Shape::Cone(Cone {
//!     top_diameter: 1.0,
//!     bottom_diameter: 2.0,
//!     length: 4.0,
//! });
//! let geometry = shape
//!     .rebuild_geometry(&mut cache, &GeometryConfig::default(), RingResolution::default())
//!     .unwrap();
//! assert!(geometry.meshes.side.is_complete());
//! ```

pub mod coords;
pub mod curve;
pub mod error;
pub mod mesh;
pub mod profile;
pub mod rebuild;
pub mod shapes;
pub mod subdivide;
pub mod tessellation;
pub mod volume;
pub mod writer;

pub use coords::{CylindricCoordinate, HeightMode, RadiusMode};
pub use error::{GeometryError, GeometryResult};
pub use mesh::MeshBuffer;
pub use profile::{Profile, ProfilePoint, RingResolution};
pub use rebuild::{rebuild, Attachment, RebuildResult};
pub use shapes::{Parameter, Shape, ShapeLimits};
pub use tessellation::{CircleTessellation, TessellationCache};
pub use writer::{MeshWriter, ShapeMeshes};
