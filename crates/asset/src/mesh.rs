//! CPU-side vertex representation handed to the GPU upload step.

use bytemuck::{Pod, Zeroable};

/// Fully resolved triangle corner. Layout is position, uv, normal, tightly
/// packed `f32`s, 32 bytes per vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FlatVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

/// Vertex input attribute: shader location, `f32` component count, byte offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: u32,
    pub offset: usize,
}

impl FlatVertex {
    pub const DEFAULT_POSITION: [f32; 3] = [0.0, 0.0, 0.0];
    pub const DEFAULT_UV: [f32; 2] = [0.0, 0.0];
    pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

    pub const STRIDE: usize = std::mem::size_of::<FlatVertex>();

    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            location: 0,
            components: 3,
            offset: std::mem::offset_of!(FlatVertex, position),
        },
        VertexAttribute {
            location: 1,
            components: 2,
            offset: std::mem::offset_of!(FlatVertex, uv),
        },
        VertexAttribute {
            location: 2,
            components: 3,
            offset: std::mem::offset_of!(FlatVertex, normal),
        },
    ];

    pub fn new(position: [f32; 3], uv: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            uv,
            normal,
        }
    }

    /// Byte view of a vertex slice, ready for a vertex buffer upload.
    pub fn as_bytes(vertices: &[FlatVertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// Indexed triangle mesh produced by welding identical corners.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<FlatVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<FlatVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    /// Expand the index buffer back into one vertex per triangle corner.
    /// Returns `None` if any index points past `vertices`.
    pub fn expand(&self) -> Option<Vec<FlatVertex>> {
        self.indices
            .iter()
            .map(|&i| self.vertices.get(i as usize).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_interleaved_pos_uv_normal() {
        assert_eq!(FlatVertex::STRIDE, 32);
        let offsets: Vec<usize> = FlatVertex::ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 20]);
        let comps: u32 = FlatVertex::ATTRIBUTES.iter().map(|a| a.components).sum();
        assert_eq!(comps as usize * 4, FlatVertex::STRIDE);
    }

    #[test]
    fn as_bytes_matches_field_order() {
        let v = FlatVertex::new([1.0, 2.0, 3.0], [4.0, 5.0], [6.0, 7.0, 8.0]);
        let bytes = FlatVertex::as_bytes(std::slice::from_ref(&v));
        assert_eq!(bytes.len(), FlatVertex::STRIDE);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn mesh_data_validity() {
        let data = MeshData::new(vec![FlatVertex::default()], vec![0]);
        assert!(data.is_valid());
        assert!(!MeshData::default().is_valid());
    }

    #[test]
    fn expand_follows_indices() {
        let a = FlatVertex::new([1.0, 0.0, 0.0], [0.0, 0.0], [0.0, 0.0, 1.0]);
        let b = FlatVertex::new([0.0, 1.0, 0.0], [1.0, 1.0], [0.0, 0.0, 1.0]);
        let data = MeshData::new(vec![a, b], vec![1, 0, 1]);
        assert_eq!(data.expand(), Some(vec![b, a, b]));
    }

    #[test]
    fn expand_rejects_dangling_index() {
        let data = MeshData::new(vec![FlatVertex::default()], vec![0, 3, 0]);
        assert_eq!(data.expand(), None);
    }
}
