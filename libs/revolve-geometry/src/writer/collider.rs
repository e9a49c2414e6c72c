//! # Collider Pieces
//!
//! Closed convex meshes for the physics engine, each within a triangle
//! budget.
//!
//! Two decompositions exist:
//!
//! - [`ColliderStrategy::ConvexRuns`] walks the collider points and splits
//!   the profile wherever its curvature changes sign. Each run revolves
//!   into one convex piece.
//! - [`ColliderStrategy::PerCorner`] cuts a polygon prism into one wedge
//!   per corner.

use super::{ring_vertex, stitch, Ring};
use crate::mesh::{MeshBuffer, Vertex};
use crate::profile::{Profile, ProfilePoint};
use crate::tessellation::{CircleTessellation, TessellationCache};
use config::constants::{GeometryConfig, DEGENERATE_EPSILON, MIN_COLLIDER_VERTICES};
use glam::{DVec2, DVec3, DVec4};
use robust::{orient2d, Coord};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::sync::Arc;

/// One convex collision mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderPiece {
    /// Mesh in piece-local coordinates
    pub mesh: MeshBuffer,
    /// Offset of the piece-local origin in the shape frame
    pub center: DVec3,
}

/// How a shape is cut into convex collider pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColliderStrategy {
    /// Split the revolved profile where its orientation changes sign
    ConvexRuns,
    /// One wedge per polygon corner
    PerCorner {
        /// Polygon corners
        corner_count: u32,
    },
}

// =============================================================================
// CONVEX RUNS
// =============================================================================

/// Splits collider points into runs whose revolved solid is convex.
///
/// Returns inclusive index ranges; consecutive runs share their split
/// point. Each interior point is oriented against the chord of its
/// neighbors in the (radius, y) plane. A run ends at the first point whose
/// orientation has the opposite sign of the run's, and the next run takes
/// its sign from the point after that. A profile curving one way
/// throughout stays a single run. Collinear points never split.
pub fn split_convex_runs(points: &[DVec2]) -> Vec<(usize, usize)> {
    if points.len() < 2 {
        return Vec::new();
    }

    let coord = |p: DVec2| Coord { x: p.x, y: p.y };
    let mut runs = Vec::new();
    let mut start = 0;
    let mut run_sign: Option<bool> = None;
    for i in 1..points.len() - 1 {
        let (a, b, c) = (points[i - 1], points[i], points[i + 1]);
        let orientation = orient2d(coord(a), coord(b), coord(c));
        let noise = DEGENERATE_EPSILON * (b - a).length() * (c - b).length();
        if orientation.abs() <= noise {
            continue;
        }
        let counter_clockwise = orientation > 0.0;
        match run_sign {
            Some(sign) if sign != counter_clockwise => {
                runs.push((start, i));
                start = i;
                run_sign = None;
            }
            _ => run_sign = Some(counter_clockwise),
        }
    }
    runs.push((start, points.len() - 1));
    runs
}

/// Largest multiple of 4 ring vertex count keeping a piece of `ring_count`
/// rings within `budget` triangles.
///
/// A piece of `k` rings with `n` vertices each has `2n(k - 1)` side and
/// `2(n - 2)` cap triangles.
pub fn ring_vertex_budget(budget: usize, ring_count: usize) -> u32 {
    let per_ring = (budget + 4) / (2 * ring_count.max(2));
    let rounded = (per_ring / 4 * 4) as u32;
    rounded.max(MIN_COLLIDER_VERTICES)
}

pub(crate) fn convex_run_pieces(
    profile: &Profile,
    cache: &mut TessellationCache,
    config: &GeometryConfig,
) -> Vec<ColliderPiece> {
    let points: Vec<&ProfilePoint> = profile.collider_points().collect();
    let sections: Vec<DVec2> = points.iter().map(|p| p.section()).collect();
    let runs = split_convex_runs(&sections);
    if runs.len() > 1 {
        log::debug!("collider split into {} convex pieces", runs.len());
    }

    runs.into_iter()
        .map(|(first, last)| revolved_piece(&points[first..=last], cache, config))
        .collect()
}

/// Keeps every other interior ring.
fn decimate<'p>(run: &[&'p ProfilePoint]) -> Vec<&'p ProfilePoint> {
    let last = run.len() - 1;
    run.iter()
        .enumerate()
        .filter(|(i, _)| i % 2 == 0 || *i == last)
        .map(|(_, p)| *p)
        .collect()
}

fn revolved_piece(
    run: &[&ProfilePoint],
    cache: &mut TessellationCache,
    config: &GeometryConfig,
) -> ColliderPiece {
    let budget = config.max_collider_triangles;
    let max_rings = ((budget + 4) / (2 * MIN_COLLIDER_VERTICES as usize)).max(2);

    let mut run = run.to_vec();
    while run.len() > max_rings {
        log::warn!(
            "collider piece with {} rings exceeds the {budget} triangle budget, decimating",
            run.len()
        );
        run = decimate(&run);
    }

    let per_ring = ring_vertex_budget(budget, run.len());
    let rings: Vec<Arc<CircleTessellation>> = run
        .iter()
        .map(|point| match &point.collider_tessellation {
            Some(t) if t.vertex_count() <= per_ring => Arc::clone(t),
            _ => cache.for_diameter(
                point.diameter,
                config.collider_chord_error,
                MIN_COLLIDER_VERTICES,
                per_ring,
            ),
        })
        .collect();

    let (first, last) = (run[0], run[run.len() - 1]);
    let bottom_cap = first.diameter > DEGENERATE_EPSILON;
    let top_cap = last.diameter > DEGENERATE_EPSILON;
    let count = |t: &Arc<CircleTessellation>| t.vertex_count() as usize;

    let vertex_count: usize = rings.iter().map(count).sum();
    let side_triangles: usize = rings.windows(2).map(|w| count(&w[0]) + count(&w[1])).sum();
    let cap_triangles = usize::from(bottom_cap) * (count(&rings[0]) - 2)
        + usize::from(top_cap) * (count(&rings[rings.len() - 1]) - 2);
    let mut mesh = MeshBuffer::allocate(vertex_count, side_triangles + cap_triangles);

    let mut layout = Vec::with_capacity(rings.len());
    for (point, tessellation) in run.iter().zip(&rings) {
        let start = mesh.next_vertex_index();
        let n = tessellation.vertex_count();
        for k in 0..n {
            mesh.write_vertex(ring_vertex(
                point,
                tessellation.direction(k, false),
                tessellation.u(k, false),
            ));
        }
        layout.push(Ring {
            start,
            params: tessellation.ring_parameters(false),
            stride: n,
        });
    }

    for pair in layout.windows(2) {
        stitch(&mut mesh, &pair[0], &pair[1]);
    }
    if bottom_cap {
        let ring = &layout[0];
        for k in 1..ring.stride - 1 {
            mesh.write_triangle([ring.start, ring.start + k, ring.start + k + 1]);
        }
    }
    if top_cap {
        let ring = &layout[layout.len() - 1];
        for k in 1..ring.stride - 1 {
            mesh.write_triangle([ring.start, ring.start + k + 1, ring.start + k]);
        }
    }
    debug_assert!(mesh.is_complete());

    let center = DVec3::new(0.0, 0.5 * (first.y + last.y), 0.0);
    mesh.translate(-center);
    ColliderPiece { mesh, center }
}

// =============================================================================
// PER CORNER
// =============================================================================

/// Cuts a regular polygon prism into one wedge per corner.
///
/// Each wedge spans the axis and two adjacent corners: 6 vertices and 8
/// triangles.
pub fn per_corner_pieces(
    corner_count: u32,
    diameter: f64,
    bottom: f64,
    top: f64,
) -> Vec<ColliderPiece> {
    if corner_count < 3 {
        return Vec::new();
    }
    let radius = diameter * 0.5;
    let corner = |i: u32| {
        let angle = TAU * f64::from(i % corner_count) / f64::from(corner_count);
        DVec2::new(angle.cos(), angle.sin())
    };

    (0..corner_count)
        .map(|i| {
            let (da, db) = (corner(i), corner(i + 1));
            let a = da * radius;
            let b = db * radius;
            let centroid = (a + b) / 3.0;
            let center = DVec3::new(centroid.x, 0.5 * (bottom + top), centroid.y);

            let mut mesh = MeshBuffer::allocate(6, 8);
            for (y, cap_normal) in [(bottom, DVec3::NEG_Y), (top, DVec3::Y)] {
                mesh.write_vertex(wedge_vertex(DVec2::ZERO, y, cap_normal));
                mesh.write_vertex(wedge_vertex(a, y, DVec3::new(da.x, 0.0, da.y)));
                mesh.write_vertex(wedge_vertex(b, y, DVec3::new(db.x, 0.0, db.y)));
            }
            // c0 a0 b0 / c1 a1 b1
            let [c0, a0, b0, c1, a1, b1] = [0, 1, 2, 3, 4, 5];
            for triangle in [
                [c0, a0, b0],
                [c1, b1, a1],
                [a0, a1, b0],
                [b0, a1, b1],
                [c0, c1, a0],
                [a0, c1, a1],
                [c0, b0, c1],
                [b0, b1, c1],
            ] {
                mesh.write_triangle(triangle);
            }

            mesh.translate(-center);
            ColliderPiece { mesh, center }
        })
        .collect()
}

fn wedge_vertex(xz: DVec2, y: f64, normal: DVec3) -> Vertex {
    Vertex {
        position: DVec3::new(xz.x, y, xz.y),
        normal,
        tangent: DVec4::new(1.0, 0.0, 0.0, 1.0),
        uv: DVec2::ZERO,
    }
}
