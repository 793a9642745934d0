use crate::AssetError;
use crate::attributes::{Attribute, AttributeMask};

/// One attribute's placement inside an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAttribute {
    pub attribute: Attribute,
    pub components: u32,
    /// Byte offset from the start of the vertex.
    pub offset: u32,
}

/// Closed set of interleaved vertex formats a backend knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexLayout {
    Position,
    PositionNormal,
    PositionTexCoord,
    PositionNormalTexCoord,
    PositionNormalTangentTexCoord,
}

const fn attr(attribute: Attribute, components: u32, offset: u32) -> LayoutAttribute {
    LayoutAttribute {
        attribute,
        components,
        offset,
    }
}

const P: LayoutAttribute = attr(Attribute::Position, 3, 0);

const POSITION: &[LayoutAttribute] = &[P];
const POSITION_NORMAL: &[LayoutAttribute] = &[P, attr(Attribute::Normal, 3, 12)];
const POSITION_TEXCOORD: &[LayoutAttribute] = &[P, attr(Attribute::TexCoord0, 2, 12)];
const POSITION_NORMAL_TEXCOORD: &[LayoutAttribute] = &[
    P,
    attr(Attribute::Normal, 3, 12),
    attr(Attribute::TexCoord0, 2, 24),
];
const POSITION_NORMAL_TANGENT_TEXCOORD: &[LayoutAttribute] = &[
    P,
    attr(Attribute::Normal, 3, 12),
    attr(Attribute::Tangent, 3, 24),
    attr(Attribute::Bitangent, 3, 36),
    attr(Attribute::TexCoord0, 2, 48),
];

/// Mask → layout lookup. Keys are exact drawable masks.
const LAYOUT_TABLE: [(AttributeMask, VertexLayout); 5] = [
    (AttributeMask::POSITION, VertexLayout::Position),
    (
        AttributeMask::POSITION.union(AttributeMask::NORMAL),
        VertexLayout::PositionNormal,
    ),
    (
        AttributeMask::POSITION.union(AttributeMask::TEXCOORD0),
        VertexLayout::PositionTexCoord,
    ),
    (
        AttributeMask::POSITION
            .union(AttributeMask::NORMAL)
            .union(AttributeMask::TEXCOORD0),
        VertexLayout::PositionNormalTexCoord,
    ),
    (
        AttributeMask::POSITION
            .union(AttributeMask::NORMAL)
            .union(AttributeMask::TANGENT)
            .union(AttributeMask::BITANGENT)
            .union(AttributeMask::TEXCOORD0),
        VertexLayout::PositionNormalTangentTexCoord,
    ),
];

impl VertexLayout {
    pub const ALL: [VertexLayout; 5] = [
        VertexLayout::Position,
        VertexLayout::PositionNormal,
        VertexLayout::PositionTexCoord,
        VertexLayout::PositionNormalTexCoord,
        VertexLayout::PositionNormalTangentTexCoord,
    ];

    /// Select the layout for a mesh's attribute mask.
    ///
    /// Secondary UV channels are ignored; anything else must match a table
    /// entry exactly.
    pub fn for_mask(mask: AttributeMask) -> Result<Self, AssetError> {
        let key = mask.drawable();
        LAYOUT_TABLE
            .iter()
            .find(|(m, _)| *m == key)
            .map(|(_, layout)| *layout)
            .ok_or(AssetError::UnsupportedLayout(mask))
    }

    pub fn attributes(self) -> &'static [LayoutAttribute] {
        match self {
            VertexLayout::Position => POSITION,
            VertexLayout::PositionNormal => POSITION_NORMAL,
            VertexLayout::PositionTexCoord => POSITION_TEXCOORD,
            VertexLayout::PositionNormalTexCoord => POSITION_NORMAL_TEXCOORD,
            VertexLayout::PositionNormalTangentTexCoord => POSITION_NORMAL_TANGENT_TEXCOORD,
        }
    }

    /// Mask of the channels this layout stores.
    pub fn mask(self) -> AttributeMask {
        self.attributes()
            .iter()
            .fold(AttributeMask::EMPTY, |m, a| m | a.attribute.bit())
    }

    /// Floats per vertex.
    pub fn floats_per_vertex(self) -> usize {
        self.attributes().iter().map(|a| a.components as usize).sum()
    }

    /// Bytes per vertex.
    pub fn stride(self) -> u64 {
        (self.floats_per_vertex() * std::mem::size_of::<f32>()) as u64
    }

    pub fn has_normals(self) -> bool {
        self.mask().has(Attribute::Normal)
    }

    pub fn name(self) -> &'static str {
        match self {
            VertexLayout::Position => "P",
            VertexLayout::PositionNormal => "PN",
            VertexLayout::PositionTexCoord => "PT",
            VertexLayout::PositionNormalTexCoord => "PNT",
            VertexLayout::PositionNormalTangentTexCoord => "PNTBT",
        }
    }
}
