//! Procedural geometry for the demo scenes.
//!
//! All generators produce positions, per-vertex normals and triangle indices.

pub mod primitives;

pub use primitives::{generate_cube, generate_sphere, generate_torus};

use crate::gfx::vertex::Vertex3D;

/// CPU-side geometry buffers, ready to be uploaded as vertex/index data.
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    pub vertices: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the GPU vertex format.
    pub fn to_vertex_buffer(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .zip(self.normals.iter())
            .map(|(position, normal)| Vertex3D {
                position: *position,
                normal: *normal,
            })
            .collect()
    }
}
