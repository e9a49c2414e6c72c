//! Flat-shaded regular polygon prism.

use super::collider::per_corner_pieces;
use super::{ShapeMeshes, UvScale};
use crate::mesh::{MeshBuffer, Vertex};
use config::constants::DEGENERATE_EPSILON;
use glam::{DVec2, DVec3, DVec4};
use std::f64::consts::{PI, TAU};

/// Writes side, caps and per-corner colliders of a prism centered on the
/// origin.
///
/// Each side face gets its own four vertices so its normal stays flat:
/// `4n` vertices and `2n` triangles. Caps are `n`-gon fans.
pub(crate) fn write_prism(corner_count: u32, diameter: f64, length: f64) -> ShapeMeshes {
    let n = corner_count.max(3);
    let radius = diameter * 0.5;
    let (bottom, top) = (-0.5 * length, 0.5 * length);
    let corner = |i: u32| {
        let angle = TAU * f64::from(i % n) / f64::from(n);
        DVec2::new(angle.cos(), angle.sin())
    };

    let mut side = MeshBuffer::allocate(4 * n as usize, 2 * n as usize);
    for i in 0..n {
        let (da, db) = (corner(i), corner(i + 1));
        let mid = TAU * (f64::from(i) + 0.5) / f64::from(n);
        let normal = DVec3::new(mid.cos(), 0.0, mid.sin());
        let tangent = (db - da).normalize_or_zero();
        let tangent = DVec4::new(tangent.x, 0.0, tangent.y, 1.0);
        let (u0, u1) = (f64::from(i) / f64::from(n), f64::from(i + 1) / f64::from(n));

        let start = side.next_vertex_index();
        for (direction, y, uv) in [
            (da, bottom, DVec2::new(u0, 0.0)),
            (db, bottom, DVec2::new(u1, 0.0)),
            (da, top, DVec2::new(u0, 1.0)),
            (db, top, DVec2::new(u1, 1.0)),
        ] {
            side.write_vertex(Vertex {
                position: DVec3::new(radius * direction.x, y, radius * direction.y),
                normal,
                tangent,
                uv,
            });
        }
        let [a0, b0, a1, b1] = [start, start + 1, start + 2, start + 3];
        side.write_triangle([a0, a1, b0]);
        side.write_triangle([b0, a1, b1]);
    }

    let cap = |y: f64, up: bool| {
        if radius <= DEGENERATE_EPSILON {
            return MeshBuffer::default();
        }
        let mut mesh = MeshBuffer::allocate(n as usize, n as usize - 2);
        for i in 0..n {
            let direction = corner(i);
            mesh.write_vertex(Vertex {
                position: DVec3::new(radius * direction.x, y, radius * direction.y),
                normal: if up { DVec3::Y } else { DVec3::NEG_Y },
                tangent: DVec4::new(1.0, 0.0, 0.0, 1.0),
                uv: DVec2::splat(0.5) + direction * 0.5,
            });
        }
        for k in 1..n - 1 {
            if up {
                mesh.write_triangle([0, k + 1, k]);
            } else {
                mesh.write_triangle([0, k, k + 1]);
            }
        }
        mesh
    };

    let perimeter = f64::from(n) * diameter * (PI / f64::from(n)).sin();
    ShapeMeshes {
        side,
        bottom_cap: cap(bottom, false),
        top_cap: cap(top, true),
        colliders: per_corner_pieces(n, diameter, bottom, top),
        uv_scale: UvScale {
            side: DVec2::new(perimeter, length),
            cap: diameter,
        },
    }
}
