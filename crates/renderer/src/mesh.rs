//! Mesh data structures shared by every primitive generator.

use crate::vertex::Vertex;
use glam::{Vec2, Vec3};
use thiserror::Error;

/// Reasons a mesh or a shape configuration is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("{shape}: `{field}` must be at least 1")]
    ZeroSubdivision {
        shape: &'static str,
        field: &'static str,
    },
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error(
        "attribute lengths differ: {positions} positions, {normals} normals, {tex_coords} texture coordinates"
    )]
    AttributeMismatch {
        positions: usize,
        normals: usize,
        tex_coords: usize,
    },
    #[error("index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
    #[error("vertex {0} has a non-finite position or normal")]
    NonFinite(usize),
    #[error("{shape}: vertex count exceeds the 32-bit index range")]
    TooManyVertices { shape: &'static str },
}

/// Reject a zero subdivision count.
pub(crate) fn require_subdivisions(
    value: u32,
    shape: &'static str,
    field: &'static str,
) -> Result<u32, MeshError> {
    if value == 0 {
        log::debug!("Rejecting {} with zero {}", shape, field);
        Err(MeshError::ZeroSubdivision { shape, field })
    } else {
        Ok(value)
    }
}

/// Empty buffers sized for a shape, or `TooManyVertices` when the counts
/// overflowed (`None`) or the vertices cannot be addressed by `u32` indices.
pub(crate) fn reserve(
    shape: &'static str,
    vertices: Option<u64>,
    indices: Option<u64>,
) -> Result<MeshData, MeshError> {
    let counts = vertices
        .filter(|&v| v <= u64::from(u32::MAX))
        .zip(indices)
        .and_then(|(v, i)| Some((usize::try_from(v).ok()?, usize::try_from(i).ok()?)));
    match counts {
        Some((vertices, indices)) => Ok(MeshData::with_capacity(vertices, indices)),
        None => {
            log::debug!("Rejecting {}: {:?} vertices", shape, vertices);
            Err(MeshError::TooManyVertices { shape })
        }
    }
}

/// Vertex count of a `rows` x `columns` grid of cells.
pub(crate) fn grid_vertices(rows: u32, columns: u32) -> Option<u64> {
    (u64::from(rows) + 1).checked_mul(u64::from(columns) + 1)
}

/// Index count of a `rows` x `columns` grid of cells (two triangles each).
pub(crate) fn grid_indices(rows: u32, columns: u32) -> Option<u64> {
    6u64.checked_mul(u64::from(rows))?.checked_mul(u64::from(columns))
}

/// Triangulated surface as parallel attribute buffers plus triangle indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            tex_coords: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.tex_coords.push(uv);
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Two counter-clockwise triangles for the grid cell whose top-left vertex
    /// is `i`, where the vertex below `i` sits `step + 1` positions later.
    pub fn push_quad(&mut self, i: u32, step: u32) {
        self.push_triangle(i, i + step + 1, i + 1);
        self.push_triangle(i + 1, i + step + 1, i + step + 2);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Merge another mesh into this one, offsetting its indices.
    pub fn append(&mut self, other: &MeshData) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.tex_coords.extend_from_slice(&other.tex_coords);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }

    /// Turn the surface inside out: negate every normal and swap the first
    /// two indices of every triangle. Vertices are not regenerated.
    pub fn invert(&mut self) {
        for n in &mut self.normals {
            *n = -*n;
        }
        for tri in self.indices.chunks_exact_mut(3) {
            tri.swap(0, 1);
        }
    }

    pub fn inverted(mut self) -> Self {
        self.invert();
        self
    }

    /// Check the buffer invariants a backend relies on.
    pub fn validate(&self) -> Result<(), MeshError> {
        let count = self.positions.len();
        if self.normals.len() != count || self.tex_coords.len() != count {
            return Err(MeshError::AttributeMismatch {
                positions: count,
                normals: self.normals.len(),
                tex_coords: self.tex_coords.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(self.indices.len()));
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: count,
            });
        }
        if let Some(bad) = self
            .positions
            .iter()
            .zip(&self.normals)
            .position(|(p, n)| !p.is_finite() || !n.is_finite())
        {
            return Err(MeshError::NonFinite(bad));
        }
        Ok(())
    }

    /// Interleave attributes into a single vertex buffer.
    pub fn interleave(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.tex_coords)
            .map(|((p, n), uv)| Vertex::new(p.to_array(), n.to_array(), uv.to_array()))
            .collect()
    }

    /// Raw index buffer bytes for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> MeshData {
        let mut mesh = MeshData::new();
        // Top row first, so the shared rule winds counter-clockwise about +Z.
        for (x, y) in [(0.0, 1.0), (1.0, 1.0), (0.0, 0.0), (1.0, 0.0)] {
            mesh.push_vertex(Vec3::new(x, y, 0.0), Vec3::Z, Vec2::new(x, y));
        }
        mesh.push_quad(0, 1);
        mesh
    }

    #[test]
    fn quad_rule_emits_two_ccw_triangles() {
        let mesh = unit_quad();
        assert_eq!(mesh.indices, vec![0, 2, 1, 1, 2, 3]);
        assert_eq!(test_support::misoriented_triangles(&mesh), 0);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn invert_negates_normals_and_swaps_leading_indices() {
        let original = unit_quad();
        let inverted = original.clone().inverted();

        for (a, b) in original.normals.iter().zip(&inverted.normals) {
            assert_eq!(*b, -*a);
        }
        for (a, b) in original.triangles().zip(inverted.triangles()) {
            assert_eq!(b, [a[1], a[0], a[2]]);
        }
        assert_eq!(original.positions, inverted.positions);
        // Still consistent: both the winding and the normals flipped.
        assert_eq!(test_support::misoriented_triangles(&inverted), 0);
    }

    #[test]
    fn grid_counts_widen_before_multiplying() {
        assert_eq!(grid_vertices(2, 3), Some(12));
        assert_eq!(grid_indices(2, 3), Some(36));
        assert_eq!(grid_vertices(u32::MAX, u32::MAX), None);
        assert_eq!(
            reserve("grid", grid_vertices(70_000, 70_000), grid_indices(70_000, 70_000)),
            Err(MeshError::TooManyVertices { shape: "grid" })
        );
        let mesh = reserve("grid", Some(4), Some(6)).unwrap();
        assert!(mesh.positions.capacity() >= 4 && mesh.indices.capacity() >= 6);
    }

    #[test]
    fn append_offsets_indices() {
        let mut mesh = unit_quad();
        mesh.append(&unit_quad());
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(&mesh.indices[6..], &[4, 6, 5, 5, 6, 7]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn validate_reports_out_of_range_index() {
        let mut mesh = unit_quad();
        mesh.push_triangle(0, 1, 9);
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange {
                index: 9,
                vertex_count: 4
            })
        );
    }

    #[test]
    fn validate_reports_non_finite_vertices() {
        let mut mesh = unit_quad();
        mesh.positions[3].x = f32::NAN;
        assert_eq!(mesh.validate(), Err(MeshError::NonFinite(3)));
    }

    #[test]
    fn interleave_keeps_vertex_order() {
        let mesh = unit_quad();
        let verts = mesh.interleave();
        assert_eq!(verts.len(), 4);
        assert_eq!(verts[2].position, [0.0, 0.0, 0.0]);
        assert_eq!(verts[2].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }
}
