use std::collections::BTreeMap;

use crate::AssetError;
use crate::buffer::{MeshBuffers, MeshData};
use crate::layout::VertexLayout;

/// Flat surface colour for a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".into(),
            base_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// A set of meshes loaded once at startup and drawn together.
///
/// Meshes without a material are drawn with [`Material::default`].
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub name: String,
    meshes: Vec<MeshBuffers>,
    /// Mesh index → material. Meshes without an entry are skipped here.
    materials: BTreeMap<usize, Material>,
}

impl Model {
    /// Build buffers for every mesh. Fails on the first mesh that cannot be laid out.
    pub fn build(
        name: impl Into<String>,
        parts: Vec<(MeshData, Option<Material>)>,
    ) -> Result<Self, AssetError> {
        let name = name.into();
        let mut meshes = Vec::with_capacity(parts.len());
        let mut materials = BTreeMap::new();

        for (i, (data, material)) in parts.into_iter().enumerate() {
            let buffers = MeshBuffers::build(&data)?;
            tracing::debug!(
                model = %name,
                mesh = %buffers.name,
                layout = buffers.layout().name(),
                vertices = buffers.vertices.vertex_count,
                triangles = buffers.faces.triangle_count(),
                "mesh built"
            );
            meshes.push(buffers);
            if let Some(m) = material {
                materials.insert(i, m);
            }
        }

        tracing::info!(
            model = %name,
            meshes = meshes.len(),
            materials = materials.len(),
            "model loaded"
        );

        Ok(Self {
            name,
            meshes,
            materials,
        })
    }

    pub fn meshes(&self) -> &[MeshBuffers] {
        &self.meshes
    }

    pub fn material(&self, mesh_index: usize) -> Option<&Material> {
        self.materials.get(&mesh_index)
    }

    /// Colour to draw mesh `mesh_index` with.
    pub fn color(&self, mesh_index: usize) -> [f32; 4] {
        self.material(mesh_index)
            .map(|m| m.base_color)
            .unwrap_or(Material::default().base_color)
    }

    /// Distinct layouts used by this model, sorted.
    pub fn layouts(&self) -> Vec<VertexLayout> {
        let mut layouts: Vec<VertexLayout> = self.meshes.iter().map(|m| m.layout()).collect();
        layouts.sort();
        layouts.dedup();
        layouts
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.faces.triangle_count()).sum()
    }
}
