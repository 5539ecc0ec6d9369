//! Mesh Module
//!
//! CPU-side geometry handed to the renderer: an interleaved vertex type that can
//! be uploaded as raw bytes, an indexed triangle mesh and box generation.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Vertex for voxels, decorations and previews
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(Vertex, [f32; 10]);

/// Neutral vertex tint. Block colors come from the material.
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// A mesh with vertices and indices
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, other: &Mesh) {
        let base_idx = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base_idx));
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds of all vertex positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Raw vertex bytes for buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Generate an axis-aligned box mesh
pub fn generate_box(center: Vec3, half_extents: Vec3, color: [f32; 4]) -> Mesh {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    let (hx, hy, hz) = (half_extents.x, half_extents.y, half_extents.z);

    let corners = [
        Vec3::new(-hx, -hy, -hz),
        Vec3::new(hx, -hy, -hz),
        Vec3::new(hx, hy, -hz),
        Vec3::new(-hx, hy, -hz),
        Vec3::new(-hx, -hy, hz),
        Vec3::new(hx, -hy, hz),
        Vec3::new(hx, hy, hz),
        Vec3::new(-hx, hy, hz),
    ];

    // Counter-clockwise winding seen from outside
    let faces = [
        ([1, 0, 3, 2], Vec3::NEG_Z),
        ([4, 5, 6, 7], Vec3::Z),
        ([0, 4, 7, 3], Vec3::NEG_X),
        ([5, 1, 2, 6], Vec3::X),
        ([7, 6, 2, 3], Vec3::Y),
        ([0, 1, 5, 4], Vec3::NEG_Y),
    ];

    for (face_indices, normal) in &faces {
        let base = vertices.len() as u32;
        for &i in face_indices {
            let pos = center + corners[i];
            vertices.push(Vertex {
                position: pos.to_array(),
                normal: normal.to_array(),
                color,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh { vertices, indices }
}

/// Unit-size cube centered on the origin.
pub fn generate_cube(size: f32) -> Mesh {
    generate_box(Vec3::ZERO, Vec3::splat(size * 0.5), WHITE)
}
