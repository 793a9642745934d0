use crate::AssetError;
use crate::attributes::{Attribute, AttributeMask};
use crate::layout::VertexLayout;

/// De-interleaved mesh as produced by a generator or importer.
///
/// An empty channel means the mesh does not carry that attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tangents: Vec<[f32; 3]>,
    pub bitangents: Vec<[f32; 3]>,
    pub texcoords: [Vec<[f32; 2]>; 4],
    /// Triangle list.
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Channels this mesh provides. Tangents count only when bitangents come with them.
    pub fn attribute_mask(&self) -> AttributeMask {
        let mut mask = AttributeMask::EMPTY;
        if !self.positions.is_empty() {
            mask |= AttributeMask::POSITION;
        }
        if !self.normals.is_empty() {
            mask |= AttributeMask::NORMAL;
        }
        if !self.tangents.is_empty() && !self.bitangents.is_empty() {
            mask |= AttributeMask::TANGENT | AttributeMask::BITANGENT;
        }
        let uv_bits = [
            AttributeMask::TEXCOORD0,
            AttributeMask::TEXCOORD1,
            AttributeMask::TEXCOORD2,
            AttributeMask::TEXCOORD3,
        ];
        for (uvs, bit) in self.texcoords.iter().zip(uv_bits) {
            if !uvs.is_empty() {
                mask |= bit;
            }
        }
        mask
    }

    fn channel_len(&self, attribute: Attribute) -> usize {
        match attribute {
            Attribute::Position => self.positions.len(),
            Attribute::Normal => self.normals.len(),
            Attribute::Tangent => self.tangents.len(),
            Attribute::Bitangent => self.bitangents.len(),
            Attribute::TexCoord0 => self.texcoords[0].len(),
            Attribute::TexCoord1 => self.texcoords[1].len(),
            Attribute::TexCoord2 => self.texcoords[2].len(),
            Attribute::TexCoord3 => self.texcoords[3].len(),
        }
    }

    fn push_vertex(&self, attribute: Attribute, i: usize, out: &mut Vec<f32>) {
        match attribute {
            Attribute::Position => out.extend_from_slice(&self.positions[i]),
            Attribute::Normal => out.extend_from_slice(&self.normals[i]),
            Attribute::Tangent => out.extend_from_slice(&self.tangents[i]),
            Attribute::Bitangent => out.extend_from_slice(&self.bitangents[i]),
            Attribute::TexCoord0 => out.extend_from_slice(&self.texcoords[0][i]),
            Attribute::TexCoord1 => out.extend_from_slice(&self.texcoords[1][i]),
            Attribute::TexCoord2 => out.extend_from_slice(&self.texcoords[2][i]),
            Attribute::TexCoord3 => out.extend_from_slice(&self.texcoords[3][i]),
        }
    }
}

/// Interleaved vertex data in a known layout.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBuffer {
    pub layout: VertexLayout,
    pub data: Vec<f32>,
    pub vertex_count: usize,
}

impl VertexBuffer {
    /// Interleave `mesh` in the layout selected by its attribute mask.
    pub fn build(mesh: &MeshData) -> Result<Self, AssetError> {
        let mask = mesh.attribute_mask();
        let layout = VertexLayout::for_mask(mask)?;
        if mask != mask.drawable() {
            tracing::debug!(mesh = %mesh.name, %mask, "ignoring secondary texture coordinates");
        }

        let vertex_count = mesh.vertex_count();
        for a in layout.attributes() {
            let found = mesh.channel_len(a.attribute);
            if found != vertex_count {
                return Err(AssetError::AttributeLength {
                    mesh: mesh.name.clone(),
                    attribute: a.attribute,
                    expected: vertex_count,
                    found,
                });
            }
        }

        let mut data = Vec::with_capacity(vertex_count * layout.floats_per_vertex());
        for i in 0..vertex_count {
            for a in layout.attributes() {
                mesh.push_vertex(a.attribute, i, &mut data);
            }
        }

        Ok(Self {
            layout,
            data,
            vertex_count,
        })
    }

    /// Raw bytes for upload.
    pub fn bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|f| f.to_le_bytes()).collect()
    }
}

/// Triangle index list validated against a vertex count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceBuffer {
    pub indices: Vec<u32>,
}

impl FaceBuffer {
    pub fn build(mesh: &MeshData) -> Result<Self, AssetError> {
        if mesh.indices.len() % 3 != 0 {
            return Err(AssetError::PartialTriangle {
                mesh: mesh.name.clone(),
                count: mesh.indices.len(),
            });
        }
        let vertex_count = mesh.vertex_count();
        if let Some(&index) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(AssetError::IndexOutOfRange {
                mesh: mesh.name.clone(),
                index,
                vertex_count,
            });
        }
        Ok(Self {
            indices: mesh.indices.clone(),
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Vertex and face buffers for one mesh, ready for a backend to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    pub name: String,
    pub vertices: VertexBuffer,
    pub faces: FaceBuffer,
}

impl MeshBuffers {
    pub fn build(mesh: &MeshData) -> Result<Self, AssetError> {
        Ok(Self {
            name: mesh.name.clone(),
            vertices: VertexBuffer::build(mesh)?,
            faces: FaceBuffer::build(mesh)?,
        })
    }

    pub fn layout(&self) -> VertexLayout {
        self.vertices.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        MeshData {
            name: "tri".into(),
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            indices: vec![0, 1, 2],
            ..Default::default()
        }
    }

    #[test]
    fn mask_reflects_channels() {
        let mut m = triangle();
        assert_eq!(m.attribute_mask(), AttributeMask::POSITION);
        m.normals = vec![[0.0, 0.0, 1.0]; 3];
        m.texcoords[0] = vec![[0.0, 0.0]; 3];
        assert_eq!(
            m.attribute_mask(),
            AttributeMask::POSITION | AttributeMask::NORMAL | AttributeMask::TEXCOORD0
        );
    }

    #[test]
    fn tangents_need_bitangents() {
        let mut m = triangle();
        m.tangents = vec![[1.0, 0.0, 0.0]; 3];
        assert!(!m.attribute_mask().has(Attribute::Tangent));
        m.bitangents = vec![[0.0, 1.0, 0.0]; 3];
        assert!(m.attribute_mask().has(Attribute::Tangent));
        assert!(m.attribute_mask().has(Attribute::Bitangent));
    }

    #[test]
    fn interleaves_position_normal() {
        let mut m = triangle();
        m.normals = vec![[0.0, 0.0, 1.0]; 3];
        let vb = VertexBuffer::build(&m).unwrap();
        assert_eq!(vb.layout, VertexLayout::PositionNormal);
        assert_eq!(vb.vertex_count, 3);
        assert_eq!(vb.data.len(), 18);
        assert_eq!(&vb.data[6..12], &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(vb.bytes().len(), 18 * 4);
    }

    #[test]
    fn mismatched_channel_length_is_error() {
        let mut m = triangle();
        m.normals = vec![[0.0, 0.0, 1.0]; 2];
        let err = VertexBuffer::build(&m).unwrap_err();
        assert!(matches!(
            err,
            AssetError::AttributeLength {
                attribute: Attribute::Normal,
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn unsupported_mask_is_error() {
        let m = MeshData {
            name: "normals_only".into(),
            normals: vec![[0.0, 1.0, 0.0]],
            ..Default::default()
        };
        assert!(matches!(
            VertexBuffer::build(&m),
            Err(AssetError::UnsupportedLayout(_))
        ));
    }

    #[test]
    fn face_buffer_rejects_out_of_range_index() {
        let mut m = triangle();
        m.indices = vec![0, 1, 3];
        assert!(matches!(
            FaceBuffer::build(&m),
            Err(AssetError::IndexOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn face_buffer_rejects_partial_triangle() {
        let mut m = triangle();
        m.indices = vec![0, 1];
        assert!(matches!(
            FaceBuffer::build(&m),
            Err(AssetError::PartialTriangle { count: 2, .. })
        ));
    }

    #[test]
    fn mesh_buffers_build() {
        let b = MeshBuffers::build(&triangle()).unwrap();
        assert_eq!(b.layout(), VertexLayout::Position);
        assert_eq!(b.faces.triangle_count(), 1);
        assert_eq!(b.name, "tri");
    }
}
