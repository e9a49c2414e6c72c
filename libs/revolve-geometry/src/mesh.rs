//! # Mesh Buffer
//!
//! Fixed-size vertex and index arrays for one output mesh.
//!
//! A buffer is allocated with its exact vertex and triangle counts before
//! the first write and never grows. Writers fill it front to back through
//! [`MeshBuffer::write_vertex`] and [`MeshBuffer::write_triangle`]; writing
//! past the allocated size is a counting bug and panics.

use glam::{DVec2, DVec3, DVec4};

/// One vertex worth of attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in the shape's local frame
    pub position: DVec3,
    /// Unit surface normal
    pub normal: DVec3,
    /// Tangent direction with handedness in `w`
    pub tangent: DVec4,
    /// Texture coordinate
    pub uv: DVec2,
}

/// Parallel vertex arrays plus a triangle index array.
///
/// All geometry is f64 internally. Export to f32 only happens when the
/// buffer is handed to the renderer or physics engine.
///
/// # Example
///
/// ```rust
/// use revolve_geometry::mesh::{MeshBuffer, Vertex};
/// use glam::{DVec2, DVec3, DVec4};
///
/// let mut mesh = MeshBuffer::allocate(3, 1);
/// for position in [DVec3::ZERO, DVec3::X, DVec3::Y] {
///     mesh.write_vertex(Vertex {
///         position,
///         normal: DVec3::Z,
///         tangent: DVec4::new(1.0, 0.0, 0.0, 1.0),
///         uv: DVec2::ZERO,
///     });
/// }
/// mesh.write_triangle([0, 1, 2]);
/// assert!(mesh.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffer {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    tangents: Vec<DVec4>,
    uvs: Vec<DVec2>,
    /// Three indices per triangle
    indices: Vec<u32>,
    written_vertices: usize,
    written_triangles: usize,
}

impl Default for MeshBuffer {
    fn default() -> Self {
        Self::allocate(0, 0)
    }
}

impl MeshBuffer {
    /// Allocates a buffer holding exactly `vertex_count` vertices and
    /// `triangle_count` triangles.
    pub fn allocate(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: vec![DVec3::ZERO; vertex_count],
            normals: vec![DVec3::ZERO; vertex_count],
            tangents: vec![DVec4::ZERO; vertex_count],
            uvs: vec![DVec2::ZERO; vertex_count],
            indices: vec![0; triangle_count * 3],
            written_vertices: 0,
            written_triangles: 0,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true once every allocated vertex and triangle was written.
    pub fn is_complete(&self) -> bool {
        self.written_vertices == self.vertex_count()
            && self.written_triangles == self.triangle_count()
    }

    /// Writes the next vertex and returns its index.
    ///
    /// # Panics
    ///
    /// Panics when the allocated vertex count is exhausted.
    pub fn write_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.written_vertices;
        assert!(
            index < self.positions.len(),
            "mesh vertex count exceeded: {} allocated",
            self.positions.len()
        );
        self.positions[index] = vertex.position;
        self.normals[index] = vertex.normal;
        self.tangents[index] = vertex.tangent;
        self.uvs[index] = vertex.uv;
        self.written_vertices += 1;
        index as u32
    }

    /// Writes the next triangle.
    ///
    /// # Panics
    ///
    /// Panics when the allocated triangle count is exhausted.
    pub fn write_triangle(&mut self, triangle: [u32; 3]) {
        let index = self.written_triangles;
        assert!(
            index < self.triangle_count(),
            "mesh triangle count exceeded: {} allocated",
            self.triangle_count()
        );
        self.indices[index * 3..index * 3 + 3].copy_from_slice(&triangle);
        self.written_triangles += 1;
    }

    /// Index the next written vertex will receive.
    #[inline]
    pub fn next_vertex_index(&self) -> u32 {
        self.written_vertices as u32
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Returns the vertex normals.
    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Returns the vertex tangents.
    #[inline]
    pub fn tangents(&self) -> &[DVec4] {
        &self.tangents
    }

    /// Returns the texture coordinates.
    #[inline]
    pub fn uvs(&self) -> &[DVec2] {
        &self.uvs
    }

    /// Returns the flat triangle index array.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Iterates over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some((first, rest)) = self.positions.split_first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        rest.iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.positions {
            *v += offset;
        }
    }

    /// Validates index ranges and index-level degeneracy.
    ///
    /// Zero-area triangles are allowed: rings of zero diameter collapse
    /// onto the axis by construction.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertex_count() as u32;

        self.triangles().all(|tri| {
            tri.iter().all(|&i| i < vertex_count)
                && tri[0] != tri[1]
                && tri[1] != tri[2]
                && tri[0] != tri[2]
        })
    }

    /// Unnormalized face normal of a triangle.
    pub fn face_normal(&self, triangle: [u32; 3]) -> DVec3 {
        let v0 = self.positions[triangle[0] as usize];
        let v1 = self.positions[triangle[1] as usize];
        let v2 = self.positions[triangle[2] as usize];
        (v1 - v0).cross(v2 - v0)
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn positions_f32(&self) -> Vec<f32> {
        self.positions
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }

    /// Exports normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Vec<f32> {
        self.normals
            .iter()
            .flat_map(|n| [n.x as f32, n.y as f32, n.z as f32])
            .collect()
    }

    /// Exports texture coordinates as f32 array.
    pub fn uvs_f32(&self) -> Vec<f32> {
        self.uvs
            .iter()
            .flat_map(|uv| [uv.x as f32, uv.y as f32])
            .collect()
    }
}
