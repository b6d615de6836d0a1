//! Interleaved vertex and per-draw instance types handed to a rendering backend.

use bytemuck::{Pod, Zeroable};

/// Standard vertex with position, normal, UV coordinates, and color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Size of one interleaved vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Per-draw data: model matrix and color tint.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Model matrix (4x4, column major)
    pub model: [[f32; 4]; 4],
    /// Color tint
    pub color: [f32; 4],
}

impl InstanceData {
    pub fn new(model: [[f32; 4]; 4], color: [f32; 4]) -> Self {
        Self { model, color }
    }

    pub fn model_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_cols_array_2d(&self.model)
    }
}

impl Default for InstanceData {
    fn default() -> Self {
        Self {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 12 * 4);
        let v = [Vertex::new([1.0, 2.0, 3.0], [0.0, 0.0, 1.0], [0.5, 0.5])];
        let bytes: &[u8] = bytemuck::cast_slice(&v);
        assert_eq!(bytes.len(), Vertex::STRIDE);
    }

    #[test]
    fn instance_round_trips_model_matrix() {
        let m = glam::Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let inst = InstanceData::new(m.to_cols_array_2d(), [1.0; 4]);
        assert_eq!(inst.model_matrix(), m);
    }
}
