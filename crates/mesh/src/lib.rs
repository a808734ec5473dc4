//! CPU-side mesh representation shared between loaders and the GPU backend.
//! Vertices are interleaved position/uv/normal, 8 floats per vertex, so the
//! buffers upload directly with a fixed stride.

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex: position.xyz, texcoord.uv, normal.xyz.
/// Field order is the wire layout; `#[repr(C)]` keeps it that way.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Bytes between consecutive vertices in the flattened buffer.
    pub const STRIDE: usize = std::mem::size_of::<MeshVertex>();
    /// Floats per vertex (3 position + 2 uv + 3 normal).
    pub const FLOATS_PER_VERTEX: usize = 8;
    /// Byte offset of the position attribute within a vertex.
    pub const POSITION_OFFSET: usize = std::mem::offset_of!(MeshVertex, position);
    /// Byte offset of the texture coordinate attribute within a vertex.
    pub const UV_OFFSET: usize = std::mem::offset_of!(MeshVertex, uv);
    /// Byte offset of the normal attribute within a vertex.
    pub const NORMAL_OFFSET: usize = std::mem::offset_of!(MeshVertex, normal);

    pub fn new(position: [f32; 3], uv: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            uv,
            normal,
        }
    }
}

/// Indexed triangle mesh with tightly-packed vertices.
///
/// `indices` holds one entry per face corner in file order; each entry
/// points into `vertices`. The caller owns both buffers outright.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both buffers are non-empty and every index
    /// points at an existing vertex.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty()
            && !self.indices.is_empty()
            && self
                .indices
                .iter()
                .all(|&i| (i as usize) < self.vertices.len())
    }

    /// Vertex buffer as raw bytes, ready for GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes, ready for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_is_eight_packed_floats() {
        assert_eq!(MeshVertex::STRIDE, 32);
        assert_eq!(
            MeshVertex::STRIDE,
            MeshVertex::FLOATS_PER_VERTEX * std::mem::size_of::<f32>()
        );
        assert_eq!(MeshVertex::POSITION_OFFSET, 0);
        assert_eq!(MeshVertex::UV_OFFSET, 12);
        assert_eq!(MeshVertex::NORMAL_OFFSET, 20);
    }

    #[test]
    fn byte_views_match_buffer_sizes() {
        let data = MeshData::new(
            vec![MeshVertex::default(); 3],
            vec![0, 1, 2],
        );
        assert_eq!(data.vertex_bytes().len(), 3 * MeshVertex::STRIDE);
        assert_eq!(data.index_bytes().len(), 3 * std::mem::size_of::<u32>());
    }

    #[test]
    fn validity_requires_in_range_indices() {
        let data = MeshData::new(vec![MeshVertex::default()], vec![0]);
        assert!(data.is_valid());

        let out_of_range = MeshData::new(vec![MeshVertex::default()], vec![1]);
        assert!(!out_of_range.is_valid());

        assert!(!MeshData::default().is_valid());
    }
}
