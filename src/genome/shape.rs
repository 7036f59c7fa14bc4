//! Shape layers - body and fin silhouettes
//!
//! Shapes carry trait bytes only, no colour. Every pattern has exactly one
//! of each, and breeding rules take them from the caller instead of copying
//! them by layer index.

use crate::codec::ByteBuffer;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Body silhouette
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeBody {
    /// Shifts the centre of the body thickness
    pub center_power: u8,
    /// Power applied to the body radius
    pub radius_power: u8,
    pub eye_position: u8,
}

impl ShapeBody {
    pub const BYTE_LEN: usize = 3;

    pub fn new(center_power: u8, radius_power: u8, eye_position: u8) -> Self {
        Self { center_power, radius_power, eye_position }
    }

    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        buffer.write_u8(self.center_power);
        buffer.write_u8(self.radius_power);
        buffer.write_u8(self.eye_position);
    }

    pub fn deserialize(buffer: &mut ByteBuffer) -> Result<Self> {
        Ok(Self::new(buffer.read_u8()?, buffer.read_u8()?, buffer.read_u8()?))
    }
}

/// Fin silhouette
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeFin {
    pub angle: u8,
    pub inset: u8,
    /// Number of dips along the fin edge
    pub dips: u8,
    pub dip_power: u8,
    pub roundness: u8,
}

impl ShapeFin {
    pub const BYTE_LEN: usize = 5;

    pub fn new(angle: u8, inset: u8, dips: u8, dip_power: u8, roundness: u8) -> Self {
        Self { angle, inset, dips, dip_power, roundness }
    }

    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        buffer.write_u8(self.angle);
        buffer.write_u8(self.inset);
        buffer.write_u8(self.dips);
        buffer.write_u8(self.dip_power);
        buffer.write_u8(self.roundness);
    }

    pub fn deserialize(buffer: &mut ByteBuffer) -> Result<Self> {
        Ok(Self::new(
            buffer.read_u8()?,
            buffer.read_u8()?,
            buffer.read_u8()?,
            buffer.read_u8()?,
            buffer.read_u8()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_wire() {
        let body = ShapeBody::new(0, 128, 255);
        let mut buffer = ByteBuffer::new();
        body.serialize(&mut buffer);
        assert_eq!(buffer.as_bytes(), &[0, 128, 255]);
        assert_eq!(ShapeBody::deserialize(&mut buffer).unwrap(), body);
    }

    #[test]
    fn test_fin_wire() {
        let fin = ShapeFin::new(1, 2, 3, 4, 255);
        let mut buffer = ByteBuffer::new();
        fin.serialize(&mut buffer);
        assert_eq!(buffer.len(), ShapeFin::BYTE_LEN);
        assert_eq!(ShapeFin::deserialize(&mut buffer).unwrap(), fin);
    }

    #[test]
    fn test_truncated_shape() {
        let mut buffer = ByteBuffer::from_bytes(vec![1, 2, 3, 4]);
        assert!(ShapeFin::deserialize(&mut buffer).is_err());
    }
}
