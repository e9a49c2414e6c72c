//! End caps.

use super::RenderRing;
use crate::mesh::{MeshBuffer, Vertex};
use config::constants::DEGENERATE_EPSILON;
use glam::{DVec2, DVec3, DVec4};

/// Writes the bottom and top caps from the first and last render rings.
pub(crate) fn write_caps(rings: &[RenderRing<'_>], max_diameter: f64) -> (MeshBuffer, MeshBuffer) {
    match (rings.first(), rings.last()) {
        (Some(bottom), Some(top)) => (
            write_cap(bottom, max_diameter, false),
            write_cap(top, max_diameter, true),
        ),
        _ => (MeshBuffer::default(), MeshBuffer::default()),
    }
}

/// Fans a cap from the ring's first vertex: `n` vertices, `n - 2` triangles.
///
/// UVs are planar, normalized so the largest ring of the shape spans the
/// unit square.
fn write_cap(ring: &RenderRing<'_>, max_diameter: f64, top: bool) -> MeshBuffer {
    let point = ring.point;
    if point.diameter <= DEGENERATE_EPSILON {
        return MeshBuffer::default();
    }

    let n = ring.tessellation.vertex_count();
    let mut mesh = MeshBuffer::allocate(n as usize, n as usize - 2);
    let normal = if top { DVec3::Y } else { DVec3::NEG_Y };
    let radius = point.radius();
    let uv_radius = if max_diameter > DEGENERATE_EPSILON {
        0.5 * point.diameter / max_diameter
    } else {
        0.5
    };

    for k in 0..n {
        let direction = ring.tessellation.direction(k, ring.odd);
        mesh.write_vertex(Vertex {
            position: DVec3::new(radius * direction.x, point.y, radius * direction.y),
            normal,
            tangent: DVec4::new(1.0, 0.0, 0.0, 1.0),
            uv: DVec2::splat(0.5) + direction * uv_radius,
        });
    }

    for k in 1..n - 1 {
        if top {
            mesh.write_triangle([0, k + 1, k]);
        } else {
            mesh.write_triangle([0, k, k + 1]);
        }
    }

    debug_assert!(mesh.is_complete());
    mesh
}
