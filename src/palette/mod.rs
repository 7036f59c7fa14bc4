//! Palette - the fixed table of sixteen fish colours
//!
//! Every colour-bearing layer stores a `PaletteIndex` into `PALETTE`.
//! Breeding rules may instead refer to colours indirectly, through a
//! `PaletteReference` resolved against a parent's layers, and footprints
//! inspect the `PaletteUniverse` of both parents.

mod reference;
mod universe;

pub use reference::PaletteReference;
pub use universe::PaletteUniverse;

use crate::codec::ByteBuffer;
use crate::error::{GenomeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of colours on the global palette
pub const PALETTE_SIZE: usize = 16;

/// A named palette colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub rgb: [u8; 3],
}

/// The shared palette, ordered by index
pub static PALETTE: [PaletteColor; PALETTE_SIZE] = [
    PaletteColor { name: "white", rgb: [0xF2, 0xEF, 0xE6] },
    PaletteColor { name: "black", rgb: [0x24, 0x22, 0x25] },
    PaletteColor { name: "gold", rgb: [0xE8, 0xB4, 0x2C] },
    PaletteColor { name: "orange", rgb: [0xE0, 0x73, 0x2A] },
    PaletteColor { name: "red", rgb: [0xC4, 0x31, 0x24] },
    PaletteColor { name: "brown", rgb: [0x7A, 0x4B, 0x2E] },
    PaletteColor { name: "cream", rgb: [0xF0, 0xE0, 0xB8] },
    PaletteColor { name: "grey", rgb: [0x8C, 0x8E, 0x93] },
    PaletteColor { name: "yellow", rgb: [0xF2, 0xD7, 0x4E] },
    PaletteColor { name: "amber", rgb: [0xD9, 0x8E, 0x1F] },
    PaletteColor { name: "crimson", rgb: [0x9E, 0x1B, 0x2F] },
    PaletteColor { name: "chestnut", rgb: [0x5C, 0x2E, 0x1F] },
    PaletteColor { name: "blue", rgb: [0x3A, 0x5A, 0x8C] },
    PaletteColor { name: "teal", rgb: [0x2F, 0x7F, 0x7A] },
    PaletteColor { name: "silver", rgb: [0xC9, 0xCD, 0xD2] },
    PaletteColor { name: "purple", rgb: [0x6B, 0x3E, 0x7D] },
];

/// An index into `PALETTE`, always in `[0, 15]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PaletteIndex(u8);

impl PaletteIndex {
    pub const WHITE: Self = Self(0);
    pub const BLACK: Self = Self(1);
    pub const GOLD: Self = Self(2);
    pub const ORANGE: Self = Self(3);
    pub const RED: Self = Self(4);
    pub const BROWN: Self = Self(5);
    pub const LAST: Self = Self(PALETTE_SIZE as u8 - 1);

    pub fn new(value: u8) -> Result<Self> {
        if usize::from(value) < PALETTE_SIZE {
            Ok(Self(value))
        } else {
            Err(GenomeError::InvalidPaletteIndex(u16::from(value)))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }

    pub fn color(self) -> &'static PaletteColor {
        &PALETTE[self.as_usize()]
    }

    /// All palette indices in ascending order
    pub fn all() -> impl Iterator<Item = PaletteIndex> {
        (0..PALETTE_SIZE as u8).map(PaletteIndex)
    }

    pub fn serialize(self, buffer: &mut ByteBuffer) {
        buffer.write_u8(self.0);
    }

    pub fn deserialize(buffer: &mut ByteBuffer) -> Result<Self> {
        Self::new(buffer.read_u8()?)
    }
}

impl TryFrom<u8> for PaletteIndex {
    type Error = GenomeError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PaletteIndex> for u8 {
    fn from(index: PaletteIndex) -> u8 {
        index.0
    }
}

impl fmt::Display for PaletteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.color().name)
    }
}
