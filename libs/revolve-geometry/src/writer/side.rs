//! Side surface of a revolved profile.

use super::{ring_vertex, stitch, RenderRing, Ring};
use crate::mesh::MeshBuffer;

/// Writes one seam-closed ring per render point and stitches neighbors.
///
/// Vertex count is `Σ(n_i + 1)`; triangle count is `Σ(n_a + n_b)` over
/// consecutive rings.
pub(crate) fn write_side(rings: &[RenderRing<'_>]) -> MeshBuffer {
    let vertex_count: usize = rings
        .iter()
        .map(|r| r.tessellation.vertex_count() as usize + 1)
        .sum();
    let triangle_count: usize = rings
        .windows(2)
        .map(|w| (w[0].tessellation.vertex_count() + w[1].tessellation.vertex_count()) as usize)
        .sum();
    let mut mesh = MeshBuffer::allocate(vertex_count, triangle_count);

    let mut previous: Option<Ring> = None;
    for ring in rings {
        let tessellation = &ring.tessellation;
        let start = mesh.next_vertex_index();
        for (u, direction) in tessellation.ring(ring.odd) {
            mesh.write_vertex(ring_vertex(ring.point, direction, u));
        }

        let current = Ring {
            start,
            params: tessellation.ring_parameters(ring.odd),
            stride: tessellation.vertex_count() + 1,
        };
        if let Some(lower) = &previous {
            stitch(&mut mesh, lower, &current);
        }
        previous = Some(current);
    }

    debug_assert!(mesh.is_complete());
    mesh
}
