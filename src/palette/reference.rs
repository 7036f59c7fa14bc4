//! PaletteReference - a colour slot in a breeding rule
//!
//! A reference is either a literal palette index or "the colour of the layer
//! `delta` positions away from the one being produced, in the mother's or the
//! father's pattern". The packed form is a 16-bit value:
//!
//! ```text
//! 0x0400  relative reference (unset: the low byte is a literal index)
//! 0x0200  magnitude is negative
//! 0x0100  read from the mother (unset: from the father)
//! 0x00FF  magnitude
//! ```

use super::PaletteIndex;
use crate::error::{GenomeError, Result};
use crate::genome::Pattern;
use serde::{Deserialize, Serialize};

/// Serialized in its packed 16-bit form, so decoding goes through `decode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum PaletteReference {
    /// A fixed palette colour
    Literal(PaletteIndex),
    /// The colour of layer `current + delta` in one of the parents
    Relative { from_mother: bool, delta: i16 },
}

impl PaletteReference {
    pub const FLAG_RELATIVE: u16 = 0x0400;
    pub const FLAG_NEGATIVE: u16 = 0x0200;
    pub const FLAG_MOTHER: u16 = 0x0100;
    pub const MAGNITUDE_MASK: u16 = 0x00FF;

    /// Create a relative reference; the magnitude must fit in eight bits
    pub fn relative(from_mother: bool, delta: i32) -> Result<Self> {
        if delta.unsigned_abs() > u32::from(Self::MAGNITUDE_MASK) {
            return Err(GenomeError::MalformedMutationRule(format!(
                "relative palette delta {} exceeds magnitude 255",
                delta
            )));
        }
        Ok(Self::Relative { from_mother, delta: delta as i16 })
    }

    /// Pack this reference into its 16-bit form
    pub fn encode(self) -> u16 {
        match self {
            Self::Literal(index) => u16::from(index.value()),
            Self::Relative { from_mother, delta } => {
                let mut flags = Self::FLAG_RELATIVE;
                if delta < 0 {
                    flags |= Self::FLAG_NEGATIVE;
                }
                if from_mother {
                    flags |= Self::FLAG_MOTHER;
                }
                flags | (delta.unsigned_abs() & Self::MAGNITUDE_MASK)
            }
        }
    }

    /// Unpack a 16-bit reference
    pub fn decode(raw: u16) -> Result<Self> {
        let known = Self::FLAG_RELATIVE | Self::FLAG_NEGATIVE | Self::FLAG_MOTHER | Self::MAGNITUDE_MASK;
        if raw & !known != 0 {
            return Err(GenomeError::InvalidPaletteIndex(raw));
        }
        let magnitude = raw & Self::MAGNITUDE_MASK;
        if raw & Self::FLAG_RELATIVE == 0 {
            if raw != magnitude {
                return Err(GenomeError::InvalidPaletteIndex(raw));
            }
            return PaletteIndex::new(magnitude as u8)
                .map(Self::Literal)
                .map_err(|_| GenomeError::InvalidPaletteIndex(raw));
        }
        let delta = if raw & Self::FLAG_NEGATIVE != 0 {
            -(magnitude as i16)
        } else {
            magnitude as i16
        };
        Ok(Self::Relative { from_mother: raw & Self::FLAG_MOTHER != 0, delta })
    }

    /// Check a reference that may have been built without `relative`
    pub fn validate(self) -> Result<()> {
        match self {
            Self::Literal(_) => Ok(()),
            Self::Relative { from_mother, delta } => Self::relative(from_mother, i32::from(delta)).map(|_| ()),
        }
    }

    pub fn is_relative(self) -> bool {
        matches!(self, Self::Relative { .. })
    }

    /// The layer index a relative reference reads from, given the index being produced
    pub fn target_index(self, current: usize) -> Option<i64> {
        match self {
            Self::Literal(_) => None,
            Self::Relative { delta, .. } => Some(current as i64 + i64::from(delta)),
        }
    }

    /// Resolve this reference to a concrete colour
    ///
    /// Layer index 0 is the base layer of the referenced pattern, index `i > 0`
    /// is `layers[i - 1]`.
    pub fn resolve(self, mother: &Pattern, father: &Pattern, current: usize) -> Result<PaletteIndex> {
        match self {
            Self::Literal(index) => Ok(index),
            Self::Relative { from_mother, delta } => {
                let source = if from_mother { mother } else { father };
                let target = current as i64 + i64::from(delta);
                let len = source.layer_count();
                if target < 0 || target >= len as i64 {
                    return Err(GenomeError::IndexOutOfRange { index: target, len });
                }
                source
                    .layer(target as usize)
                    .map(|layer| layer.palette_index())
                    .ok_or(GenomeError::IndexOutOfRange { index: target, len })
            }
        }
    }
}

impl From<PaletteIndex> for PaletteReference {
    fn from(index: PaletteIndex) -> Self {
        Self::Literal(index)
    }
}

impl TryFrom<u16> for PaletteReference {
    type Error = GenomeError;

    fn try_from(raw: u16) -> Result<Self> {
        Self::decode(raw)
    }
}

impl From<PaletteReference> for u16 {
    fn from(reference: PaletteReference) -> Self {
        reference.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{Layer, LayerBase, LayerWeb, Plane, ShapeBody, ShapeFin};

    fn web(palette: PaletteIndex) -> Layer {
        Layer::Web(LayerWeb {
            plane: Plane::default(),
            palette_index: palette,
            scale: 10,
            thickness: 20,
            threshold: 30,
        })
    }

    fn pattern(base: PaletteIndex, layers: &[PaletteIndex]) -> Pattern {
        Pattern::new(
            LayerBase::new(base),
            layers.iter().copied().map(web).collect(),
            ShapeBody::default(),
            ShapeFin::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_bit_layout() {
        let reference = PaletteReference::relative(true, -3).unwrap();
        assert_eq!(reference.encode(), 0x0400 | 0x0200 | 0x0100 | 3);

        let father = PaletteReference::relative(false, 7).unwrap();
        assert_eq!(father.encode(), 0x0407);

        assert_eq!(PaletteReference::Literal(PaletteIndex::RED).encode(), 4);
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            PaletteReference::decode(0x0701).unwrap(),
            PaletteReference::Relative { from_mother: true, delta: -1 }
        );
        assert_eq!(
            PaletteReference::decode(0x0002).unwrap(),
            PaletteReference::Literal(PaletteIndex::GOLD)
        );
        assert_eq!(
            PaletteReference::decode(0x0011),
            Err(GenomeError::InvalidPaletteIndex(0x0011))
        );
    }

    #[test]
    fn test_magnitude_limit() {
        assert!(PaletteReference::relative(true, 255).is_ok());
        assert!(PaletteReference::relative(true, -255).is_ok());
        assert!(matches!(
            PaletteReference::relative(false, 256),
            Err(GenomeError::MalformedMutationRule(_))
        ));
    }

    #[test]
    fn test_unchecked_delta_rejected() {
        let wide = PaletteReference::Relative { from_mother: true, delta: 256 };
        assert!(matches!(wide.validate(), Err(GenomeError::MalformedMutationRule(_))));
        assert!(PaletteReference::Relative { from_mother: false, delta: -255 }.validate().is_ok());

        // Serde goes through the packed form
        let json = serde_json::to_string(&PaletteReference::relative(true, -1).unwrap()).unwrap();
        assert_eq!(json, (0x0400 | 0x0200 | 0x0100 | 1).to_string());
        assert!(serde_json::from_str::<PaletteReference>("2048").is_err());
        assert!(serde_json::from_str::<PaletteReference>("258").is_err());
        assert_eq!(
            serde_json::from_str::<PaletteReference>("3").unwrap(),
            PaletteReference::Literal(PaletteIndex::ORANGE)
        );
    }

    #[test]
    fn test_resolve_relative_to_mother() {
        let five = PaletteIndex::new(5).unwrap();
        // Mother layer index 2 is layers[1]
        let mother = pattern(PaletteIndex::WHITE, &[PaletteIndex::GOLD, five, PaletteIndex::RED]);
        let father = pattern(PaletteIndex::BLACK, &[]);
        let reference = PaletteReference::relative(true, -1).unwrap();
        assert_eq!(reference.resolve(&mother, &father, 3).unwrap(), five);
    }

    #[test]
    fn test_resolve_base_and_father() {
        let mother = pattern(PaletteIndex::WHITE, &[PaletteIndex::GOLD]);
        let father = pattern(PaletteIndex::BLACK, &[PaletteIndex::ORANGE]);
        let base = PaletteReference::relative(false, -1).unwrap();
        assert_eq!(base.resolve(&mother, &father, 1).unwrap(), PaletteIndex::BLACK);
        let same = PaletteReference::relative(false, 0).unwrap();
        assert_eq!(same.resolve(&mother, &father, 1).unwrap(), PaletteIndex::ORANGE);
        let literal = PaletteReference::Literal(PaletteIndex::RED);
        assert_eq!(literal.resolve(&mother, &father, 9).unwrap(), PaletteIndex::RED);
    }

    #[test]
    fn test_resolve_out_of_range() {
        let mother = pattern(PaletteIndex::WHITE, &[PaletteIndex::GOLD]);
        let father = pattern(PaletteIndex::BLACK, &[]);
        let ahead = PaletteReference::relative(true, 2).unwrap();
        assert_eq!(
            ahead.resolve(&mother, &father, 0),
            Err(GenomeError::IndexOutOfRange { index: 2, len: 2 })
        );
        let behind = PaletteReference::relative(false, -1).unwrap();
        assert_eq!(
            behind.resolve(&mother, &father, 0),
            Err(GenomeError::IndexOutOfRange { index: -1, len: 1 })
        );
    }
}
