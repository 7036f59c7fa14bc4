//! Layer kinds and the layer catalog
//!
//! Layers do not carry their kind on the wire. A pattern is decoded against a
//! catalog: the ordered kinds of its pattern layers, stored by the caller
//! wherever its save format keeps it.

use crate::codec::ByteBuffer;
use crate::error::{GenomeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    /// The base fill; always layer 0 and never listed in a catalog
    Base,
    Spots,
    Ridge,
    Stripes,
    Web,
}

impl LayerKind {
    /// Kinds that may appear in a pattern's layer list
    pub const PATTERN_KINDS: [LayerKind; 4] =
        [LayerKind::Spots, LayerKind::Ridge, LayerKind::Stripes, LayerKind::Web];

    pub fn tag(self) -> u8 {
        match self {
            Self::Base => 0,
            Self::Spots => 1,
            Self::Ridge => 2,
            Self::Stripes => 3,
            Self::Web => 4,
        }
    }

    /// Parse a catalog tag; the base tag is not a valid catalog entry
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(Self::Spots),
            2 => Ok(Self::Ridge),
            3 => Ok(Self::Stripes),
            4 => Ok(Self::Web),
            other => Err(GenomeError::UnknownLayerKind(other)),
        }
    }

    /// Whether layers of this kind carry a sampling plane
    pub fn has_plane(self) -> bool {
        !matches!(self, Self::Base)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Base => "base",
            Self::Spots => "spots",
            Self::Ridge => "ridge",
            Self::Stripes => "stripes",
            Self::Web => "web",
        };
        f.write_str(name)
    }
}

/// The ordered kinds of a pattern's layers, base excluded
///
/// At most `MAX_LEN` entries, so the count always fits its byte.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LayerKind>", into = "Vec<LayerKind>")]
pub struct LayerCatalog(Vec<LayerKind>);

impl LayerCatalog {
    pub const MAX_LEN: usize = u8::MAX as usize;

    pub fn new(kinds: Vec<LayerKind>) -> Result<Self> {
        if kinds.contains(&LayerKind::Base) {
            return Err(GenomeError::UnknownLayerKind(LayerKind::Base.tag()));
        }
        if kinds.len() > Self::MAX_LEN {
            return Err(GenomeError::MalformedPattern(format!(
                "catalog of {} layers exceeds {}",
                kinds.len(),
                Self::MAX_LEN
            )));
        }
        Ok(Self(kinds))
    }

    /// Build a catalog from raw tags, failing on the first unknown one
    pub fn from_tags(tags: &[u8]) -> Result<Self> {
        tags.iter()
            .map(|tag| LayerKind::from_tag(*tag))
            .collect::<Result<Vec<_>>>()
            .and_then(Self::new)
    }

    pub fn tags(&self) -> Vec<u8> {
        self.0.iter().map(|kind| kind.tag()).collect()
    }

    pub fn kinds(&self) -> &[LayerKind] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        1 + self.0.len()
    }

    /// Write as a count byte followed by one tag per layer
    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        // len <= MAX_LEN, checked in new
        buffer.write_u8(self.0.len() as u8);
        for kind in &self.0 {
            buffer.write_u8(kind.tag());
        }
    }

    pub fn deserialize(buffer: &mut ByteBuffer) -> Result<Self> {
        let count = buffer.read_u8()?;
        (0..count)
            .map(|_| buffer.read_u8().and_then(LayerKind::from_tag))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl TryFrom<Vec<LayerKind>> for LayerCatalog {
    type Error = GenomeError;

    fn try_from(kinds: Vec<LayerKind>) -> Result<Self> {
        Self::new(kinds)
    }
}

impl From<LayerCatalog> for Vec<LayerKind> {
    fn from(catalog: LayerCatalog) -> Self {
        catalog.0
    }
}
