use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A single per-vertex data channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Position,
    Normal,
    Tangent,
    Bitangent,
    TexCoord0,
    TexCoord1,
    TexCoord2,
    TexCoord3,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Attribute::Position,
        Attribute::Normal,
        Attribute::Tangent,
        Attribute::Bitangent,
        Attribute::TexCoord0,
        Attribute::TexCoord1,
        Attribute::TexCoord2,
        Attribute::TexCoord3,
    ];

    /// Float components per vertex.
    pub fn components(self) -> u32 {
        match self {
            Attribute::TexCoord0
            | Attribute::TexCoord1
            | Attribute::TexCoord2
            | Attribute::TexCoord3 => 2,
            _ => 3,
        }
    }

    pub fn bit(self) -> AttributeMask {
        AttributeMask(1 << self as u32)
    }

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Position => "position",
            Attribute::Normal => "normal",
            Attribute::Tangent => "tangent",
            Attribute::Bitangent => "bitangent",
            Attribute::TexCoord0 => "texcoord0",
            Attribute::TexCoord1 => "texcoord1",
            Attribute::TexCoord2 => "texcoord2",
            Attribute::TexCoord3 => "texcoord3",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bit set of [`Attribute`]s present on a mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeMask(pub u32);

impl AttributeMask {
    pub const EMPTY: Self = Self(0);
    pub const POSITION: Self = Self(1 << 0);
    pub const NORMAL: Self = Self(1 << 1);
    pub const TANGENT: Self = Self(1 << 2);
    pub const BITANGENT: Self = Self(1 << 3);
    pub const TEXCOORD0: Self = Self(1 << 4);
    pub const TEXCOORD1: Self = Self(1 << 5);
    pub const TEXCOORD2: Self = Self(1 << 6);
    pub const TEXCOORD3: Self = Self(1 << 7);

    /// Channels a backend actually binds; secondary UV sets are never sampled.
    pub const DRAWABLE: Self = Self(0b0001_1111);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn has(self, attribute: Attribute) -> bool {
        self.contains(attribute.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The mask restricted to [`DRAWABLE`](Self::DRAWABLE) channels.
    pub fn drawable(self) -> Self {
        Self(self.0 & Self::DRAWABLE.0)
    }

    /// Attributes set in this mask, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Attribute> {
        Attribute::ALL.into_iter().filter(move |a| self.has(*a))
    }
}

impl BitOr for AttributeMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for AttributeMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for AttributeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("{}");
        }
        let names: Vec<&str> = self.iter().map(Attribute::name).collect();
        write!(f, "{{{}}}", names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_match_constants() {
        assert_eq!(Attribute::Position.bit(), AttributeMask::POSITION);
        assert_eq!(Attribute::Normal.bit(), AttributeMask::NORMAL);
        assert_eq!(Attribute::Bitangent.bit(), AttributeMask::BITANGENT);
        assert_eq!(Attribute::TexCoord3.bit(), AttributeMask::TEXCOORD3);
    }

    #[test]
    fn contains_and_has() {
        let m = AttributeMask::POSITION | AttributeMask::NORMAL;
        assert!(m.has(Attribute::Position));
        assert!(m.has(Attribute::Normal));
        assert!(!m.has(Attribute::TexCoord0));
        assert!(m.contains(AttributeMask::POSITION));
        assert!(!AttributeMask::POSITION.contains(m));
    }

    #[test]
    fn drawable_drops_secondary_uvs() {
        let m = AttributeMask::POSITION | AttributeMask::TEXCOORD0 | AttributeMask::TEXCOORD2;
        assert_eq!(m.drawable(), AttributeMask::POSITION | AttributeMask::TEXCOORD0);
    }

    #[test]
    fn display_lists_names() {
        let m = AttributeMask::POSITION | AttributeMask::TEXCOORD0;
        assert_eq!(m.to_string(), "{position|texcoord0}");
        assert_eq!(AttributeMask::EMPTY.to_string(), "{}");
    }

    #[test]
    fn components_per_attribute() {
        assert_eq!(Attribute::Position.components(), 3);
        assert_eq!(Attribute::Tangent.components(), 3);
        assert_eq!(Attribute::TexCoord1.components(), 2);
    }
}
