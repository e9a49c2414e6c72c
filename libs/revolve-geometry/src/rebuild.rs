//! # Rebuild
//!
//! One-shot rebuild of a part after a parameter change: new geometry, new
//! volume, and the moves the caller must apply to stacking nodes and surface
//! attachments so they stay in place relative to the shape.
//!
//! The caller owns the previous shape. Passing `None` for it means a fresh
//! build with nothing to move.

use crate::coords::{HeightMode, RadiusMode};
use crate::error::GeometryResult;
use crate::profile::RingResolution;
use crate::shapes::{Shape, ShapeGeometry};
use crate::tessellation::TessellationCache;
use config::constants::{approx_zero, GeometryConfig, EPSILON};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A point attached to the part surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Caller-assigned identifier
    pub id: u32,
    /// Position in the shape frame
    pub position: DVec3,
    /// How the height follows a resize
    pub height_mode: HeightMode,
    /// How the radius follows a resize
    pub radius_mode: RadiusMode,
}

/// Where an attachment must go after a rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentMove {
    /// Attachment identifier
    pub id: u32,
    /// Position before the rebuild
    pub old: DVec3,
    /// Position after the rebuild
    pub new: DVec3,
    /// `new - old`
    pub delta: DVec3,
}

/// Stacking node at one end of the part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackNode {
    /// Node at `y = -length / 2`
    Bottom,
    /// Node at `y = length / 2`
    Top,
}

/// Where a stacking node must go after a rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeMove {
    /// Which node
    pub node: StackNode,
    /// Position before the rebuild
    pub old: DVec3,
    /// Position after the rebuild
    pub new: DVec3,
    /// `new - old`
    pub delta: DVec3,
}

/// Output of [`rebuild`].
#[derive(Debug, Clone, PartialEq)]
pub struct RebuildResult {
    /// Profile and meshes of the new shape
    pub geometry: ShapeGeometry,
    /// Volume of the new shape
    pub volume: f64,
    /// False only when the volume matches the previous shape's
    pub volume_changed: bool,
    /// Nodes that moved; a node that stayed put is omitted
    pub node_moves: Vec<NodeMove>,
    /// One move per attachment, in input order
    pub attachment_moves: Vec<AttachmentMove>,
}

/// Rebuilds `new` and reports what moved relative to `old`.
///
/// # Arguments
///
/// * `old` - Shape before the edit, or `None` for a first build
/// * `new` - Shape after the edit
/// * `attachments` - Surface points positioned against `old`
/// * `cache` - Tessellation cache shared across rebuilds
/// * `config` - Tolerances for this rebuild
/// * `resolution` - How render rings pick their vertex count
///
/// # Example
///
/// ```rust
/// use config::constants::GeometryConfig;
/// use revolve_geometry::profile::RingResolution;
/// use revolve_geometry::rebuild::rebuild;
/// use revolve_geometry::shapes::{Cylinder, Shape};
/// use revolve_geometry::tessellation::TessellationCache;
///
/// let mut cache = TessellationCache::new();
/// let config = GeometryConfig::default();
/// let old = Shape::Cylinder(Cylinder { diameter: 1.0, length: 2.0 });
/// let new = Shape::Cylinder(Cylinder { diameter: 1.0, length: 3.0 });
///
/// let result = rebuild(Some(&old), &new, &[], &mut cache, &config, RingResolution::default())
///     .unwrap();
/// assert_eq!(result.node_moves.len(), 2);
/// assert!(result.volume_changed);
/// ```
pub fn rebuild(
    old: Option<&Shape>,
    new: &Shape,
    attachments: &[Attachment],
    cache: &mut TessellationCache,
    config: &GeometryConfig,
    resolution: RingResolution,
) -> GeometryResult<RebuildResult> {
    let geometry = new.rebuild_geometry(cache, config, resolution)?;
    let volume = geometry.volume;

    let Some(old) = old else {
        return Ok(RebuildResult {
            geometry,
            volume,
            volume_changed: true,
            node_moves: Vec::new(),
            attachment_moves: Vec::new(),
        });
    };

    let previous = old.calculate_volume();
    let volume_changed = (volume - previous).abs() > EPSILON * previous.abs().max(1.0);

    let (before, after) = (old.node_positions(), new.node_positions());
    let node_moves: Vec<NodeMove> = [
        (StackNode::Bottom, before.bottom, after.bottom),
        (StackNode::Top, before.top, after.top),
    ]
    .into_iter()
    .map(|(node, from, to)| NodeMove {
        node,
        old: from,
        new: to,
        delta: to - from,
    })
    .filter(|m| !approx_zero(m.delta.length()))
    .collect();

    let attachment_moves = old.translate_attachments(new, attachments);
    log::debug!(
        "rebuild {} -> {}: volume {previous} -> {volume}, {} node moves, {} attachments",
        old.family(),
        new.family(),
        node_moves.len(),
        attachment_moves.len()
    );

    Ok(RebuildResult {
        geometry,
        volume,
        volume_changed,
        node_moves,
        attachment_moves,
    })
}
