//! Layers - the colour-bearing genetic traits of a pattern
//!
//! Every layer carries one palette index and a fixed set of trait bytes,
//! each a pre-normalised fraction in `[0, 255]`. Pattern layers also carry a
//! `Plane`. Wire layout per layer: `[plane] [palette: u8] [traits: u8...]`.

use super::{LayerKind, Plane};
use crate::codec::ByteBuffer;
use crate::error::Result;
use crate::palette::PaletteIndex;
use serde::{Deserialize, Serialize};

/// The base fill colour, also applied to fins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerBase {
    pub palette_index: PaletteIndex,
}

impl LayerBase {
    pub const BYTE_LEN: usize = 1;

    pub fn new(palette_index: PaletteIndex) -> Self {
        Self { palette_index }
    }

    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        self.palette_index.serialize(buffer);
    }

    pub fn deserialize(buffer: &mut ByteBuffer) -> Result<Self> {
        Ok(Self::new(PaletteIndex::deserialize(buffer)?))
    }
}

/// Coloured spots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpots {
    pub plane: Plane,
    pub palette_index: PaletteIndex,
    /// Noise scale
    pub scale: u8,
    /// X axis stretch
    pub stretch: u8,
    /// Noise threshold
    pub threshold: u8,
    /// Focus along the X axis
    pub x_focus: u8,
    /// Focus along the Y axis
    pub y_focus: u8,
    /// Power of the pattern near the focal point
    pub power: u8,
}

impl LayerSpots {
    pub const BYTE_LEN: usize = Plane::BYTE_LEN + 1 + 6;

    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        self.plane.serialize(buffer);
        self.palette_index.serialize(buffer);
        buffer.write_u8(self.scale);
        buffer.write_u8(self.stretch);
        buffer.write_u8(self.threshold);
        buffer.write_u8(self.x_focus);
        buffer.write_u8(self.y_focus);
        buffer.write_u8(self.power);
    }

    pub fn deserialize(buffer: &mut ByteBuffer) -> Result<Self> {
        Ok(Self {
            plane: Plane::deserialize(buffer)?,
            palette_index: PaletteIndex::deserialize(buffer)?,
            scale: buffer.read_u8()?,
            stretch: buffer.read_u8()?,
            threshold: buffer.read_u8()?,
            x_focus: buffer.read_u8()?,
            y_focus: buffer.read_u8()?,
            power: buffer.read_u8()?,
        })
    }
}

/// Distorted stripes across the body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerStripes {
    pub plane: Plane,
    pub palette_index: PaletteIndex,
    pub scale: u8,
    pub distortion: u8,
    /// Distortion frequency
    pub roughness: u8,
    pub threshold: u8,
    pub slant: u8,
    /// Stripe suppression near the edges
    pub suppression: u8,
    /// Focus along the spine
    pub focus: u8,
    pub power: u8,
}

impl LayerStripes {
    pub const BYTE_LEN: usize = Plane::BYTE_LEN + 1 + 8;

    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        self.plane.serialize(buffer);
        self.palette_index.serialize(buffer);
        buffer.write_u8(self.scale);
        buffer.write_u8(self.distortion);
        buffer.write_u8(self.roughness);
        buffer.write_u8(self.threshold);
        buffer.write_u8(self.slant);
        buffer.write_u8(self.suppression);
        buffer.write_u8(self.focus);
        buffer.write_u8(self.power);
    }

    pub fn deserialize(buffer: &mut ByteBuffer) -> Result<Self> {
        Ok(Self {
            plane: Plane::deserialize(buffer)?,
            palette_index: PaletteIndex::deserialize(buffer)?,
            scale: buffer.read_u8()?,
            distortion: buffer.read_u8()?,
            roughness: buffer.read_u8()?,
            threshold: buffer.read_u8()?,
            slant: buffer.read_u8()?,
            suppression: buffer.read_u8()?,
            focus: buffer.read_u8()?,
            power: buffer.read_u8()?,
        })
    }
}

/// A pattern along the back of the fish
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerRidge {
    pub plane: Plane,
    pub palette_index: PaletteIndex,
    pub scale: u8,
    /// Ridge power
    pub power: u8,
    pub threshold: u8,
    /// Focus along the spine
    pub focus: u8,
    /// Power of the pattern near the focal point
    pub focus_power: u8,
}

impl LayerRidge {
    pub const BYTE_LEN: usize = Plane::BYTE_LEN + 1 + 5;

    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        self.plane.serialize(buffer);
        self.palette_index.serialize(buffer);
        buffer.write_u8(self.scale);
        buffer.write_u8(self.power);
        buffer.write_u8(self.threshold);
        buffer.write_u8(self.focus);
        buffer.write_u8(self.focus_power);
    }

    pub fn deserialize(buffer: &mut ByteBuffer) -> Result<Self> {
        Ok(Self {
            plane: Plane::deserialize(buffer)?,
            palette_index: PaletteIndex::deserialize(buffer)?,
            scale: buffer.read_u8()?,
            power: buffer.read_u8()?,
            threshold: buffer.read_u8()?,
            focus: buffer.read_u8()?,
            focus_power: buffer.read_u8()?,
        })
    }
}

/// A web of thin bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerWeb {
    pub plane: Plane,
    pub palette_index: PaletteIndex,
    pub scale: u8,
    /// Band thickness
    pub thickness: u8,
    pub threshold: u8,
}

impl LayerWeb {
    pub const BYTE_LEN: usize = Plane::BYTE_LEN + 1 + 3;

    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        self.plane.serialize(buffer);
        self.palette_index.serialize(buffer);
        buffer.write_u8(self.scale);
        buffer.write_u8(self.thickness);
        buffer.write_u8(self.threshold);
    }

    pub fn deserialize(buffer: &mut ByteBuffer) -> Result<Self> {
        Ok(Self {
            plane: Plane::deserialize(buffer)?,
            palette_index: PaletteIndex::deserialize(buffer)?,
            scale: buffer.read_u8()?,
            thickness: buffer.read_u8()?,
            threshold: buffer.read_u8()?,
        })
    }
}

/// One colour-bearing layer of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Layer {
    Base(LayerBase),
    Spots(LayerSpots),
    Stripes(LayerStripes),
    Ridge(LayerRidge),
    Web(LayerWeb),
}

impl Layer {
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Base(_) => LayerKind::Base,
            Self::Spots(_) => LayerKind::Spots,
            Self::Stripes(_) => LayerKind::Stripes,
            Self::Ridge(_) => LayerKind::Ridge,
            Self::Web(_) => LayerKind::Web,
        }
    }

    pub fn palette_index(&self) -> PaletteIndex {
        match self {
            Self::Base(layer) => layer.palette_index,
            Self::Spots(layer) => layer.palette_index,
            Self::Stripes(layer) => layer.palette_index,
            Self::Ridge(layer) => layer.palette_index,
            Self::Web(layer) => layer.palette_index,
        }
    }

    pub fn set_palette_index(&mut self, palette_index: PaletteIndex) {
        match self {
            Self::Base(layer) => layer.palette_index = palette_index,
            Self::Spots(layer) => layer.palette_index = palette_index,
            Self::Stripes(layer) => layer.palette_index = palette_index,
            Self::Ridge(layer) => layer.palette_index = palette_index,
            Self::Web(layer) => layer.palette_index = palette_index,
        }
    }

    /// The sampling plane, for every kind except the base
    pub fn plane(&self) -> Option<&Plane> {
        match self {
            Self::Base(_) => None,
            Self::Spots(layer) => Some(&layer.plane),
            Self::Stripes(layer) => Some(&layer.plane),
            Self::Ridge(layer) => Some(&layer.plane),
            Self::Web(layer) => Some(&layer.plane),
        }
    }

    pub(crate) fn plane_mut(&mut self) -> Option<&mut Plane> {
        match self {
            Self::Base(_) => None,
            Self::Spots(layer) => Some(&mut layer.plane),
            Self::Stripes(layer) => Some(&mut layer.plane),
            Self::Ridge(layer) => Some(&mut layer.plane),
            Self::Web(layer) => Some(&mut layer.plane),
        }
    }

    /// A copy of this layer recoloured to `palette_index`
    pub fn with_palette_index(mut self, palette_index: PaletteIndex) -> Self {
        self.set_palette_index(palette_index);
        self
    }

    pub fn byte_len(&self) -> usize {
        Self::byte_len_of(self.kind())
    }

    /// Serialized size of a layer of the given kind
    pub fn byte_len_of(kind: LayerKind) -> usize {
        match kind {
            LayerKind::Base => LayerBase::BYTE_LEN,
            LayerKind::Spots => LayerSpots::BYTE_LEN,
            LayerKind::Stripes => LayerStripes::BYTE_LEN,
            LayerKind::Ridge => LayerRidge::BYTE_LEN,
            LayerKind::Web => LayerWeb::BYTE_LEN,
        }
    }

    /// Write this layer; the kind itself is not written
    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        match self {
            Self::Base(layer) => layer.serialize(buffer),
            Self::Spots(layer) => layer.serialize(buffer),
            Self::Stripes(layer) => layer.serialize(buffer),
            Self::Ridge(layer) => layer.serialize(buffer),
            Self::Web(layer) => layer.serialize(buffer),
        }
    }

    /// Read a layer whose kind the caller already knows
    pub fn deserialize(kind: LayerKind, buffer: &mut ByteBuffer) -> Result<Self> {
        Ok(match kind {
            LayerKind::Base => Self::Base(LayerBase::deserialize(buffer)?),
            LayerKind::Spots => Self::Spots(LayerSpots::deserialize(buffer)?),
            LayerKind::Stripes => Self::Stripes(LayerStripes::deserialize(buffer)?),
            LayerKind::Ridge => Self::Ridge(LayerRidge::deserialize(buffer)?),
            LayerKind::Web => Self::Web(LayerWeb::deserialize(buffer)?),
        })
    }
}

impl From<LayerBase> for Layer {
    fn from(layer: LayerBase) -> Self {
        Self::Base(layer)
    }
}
