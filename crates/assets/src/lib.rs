//! Mesh assets: attribute masks, vertex layouts, and CPU-side buffers.
//!
//! A mesh advertises which per-vertex channels it carries as an
//! [`AttributeMask`]. The mask selects one of a closed set of
//! [`VertexLayout`]s by table lookup; the layout decides how vertices are
//! interleaved and how a backend binds them.
//!
//! # Invariants
//! - Unsupported masks are an error, never a silent fallback layout.
//! - Face buffers only reference vertices that exist.

mod attributes;
mod buffer;
mod layout;
mod model;
mod primitives;

pub use attributes::{Attribute, AttributeMask};
pub use buffer::{FaceBuffer, MeshBuffers, MeshData, VertexBuffer};
pub use layout::{LayoutAttribute, VertexLayout};
pub use model::{Material, Model};
pub use primitives::{engine_glow, ship_hull, ship_model};

/// Errors from building mesh buffers.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("no vertex layout for attribute mask {0}")]
    UnsupportedLayout(AttributeMask),
    #[error("mesh `{mesh}`: {attribute} has {found} entries, expected {expected}")]
    AttributeLength {
        mesh: String,
        attribute: Attribute,
        expected: usize,
        found: usize,
    },
    #[error("mesh `{mesh}`: index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        mesh: String,
        index: u32,
        vertex_count: usize,
    },
    #[error("mesh `{mesh}`: {count} indices is not a whole number of triangles")]
    PartialTriangle { mesh: String, count: usize },
}
