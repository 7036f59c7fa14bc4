//! Plane - the noise-field anchor of a pattern layer
//!
//! Opaque to breeding; it only seeds the renderer's noise sampling. On the
//! wire it is six little-endian floats: anchor xyz, then direction xyz.

use crate::codec::ByteBuffer;
use crate::error::{GenomeError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Centre of the sampling plane in noise space
    pub anchor: [f32; 3],
    /// Unit direction of the plane's X axis
    pub direction: [f32; 3],
}

impl Plane {
    pub const SPACE_LIMIT_MIN: f32 = -256.0;
    pub const SPACE_LIMIT_MAX: f32 = 256.0;
    pub const NORMAL_TOLERANCE: f32 = 0.01;
    pub const BYTE_LEN: usize = 24;

    /// Create a plane, checking the anchor limits and the direction length
    pub fn new(anchor: [f32; 3], direction: [f32; 3]) -> Result<Self> {
        let plane = Self { anchor, direction };
        plane.validate()?;
        Ok(plane)
    }

    pub fn validate(&self) -> Result<()> {
        if self.anchor.iter().chain(self.direction.iter()).any(|v| !v.is_finite()) {
            return Err(GenomeError::InvalidPlane("non-finite component".into()));
        }
        if self
            .anchor
            .iter()
            .any(|v| *v < Self::SPACE_LIMIT_MIN || *v > Self::SPACE_LIMIT_MAX)
        {
            return Err(GenomeError::InvalidPlane(format!(
                "anchor {:?} outside [{}, {}]",
                self.anchor,
                Self::SPACE_LIMIT_MIN,
                Self::SPACE_LIMIT_MAX
            )));
        }
        let length = self.direction.iter().map(|v| v * v).sum::<f32>().sqrt();
        if (length - 1.0).abs() >= Self::NORMAL_TOLERANCE {
            return Err(GenomeError::InvalidPlane(format!(
                "direction {:?} has length {}",
                self.direction, length
            )));
        }
        Ok(())
    }

    /// Pull each anchor axis back inside the space limits
    pub fn clamp_anchor(&mut self) {
        for v in &mut self.anchor {
            *v = v.clamp(Self::SPACE_LIMIT_MIN, Self::SPACE_LIMIT_MAX);
        }
    }

    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        for v in self.anchor.iter().chain(self.direction.iter()) {
            buffer.write_f32(*v);
        }
    }

    pub fn deserialize(buffer: &mut ByteBuffer) -> Result<Self> {
        let read3 = |buffer: &mut ByteBuffer| -> Result<[f32; 3]> {
            Ok([buffer.read_f32()?, buffer.read_f32()?, buffer.read_f32()?])
        };
        let anchor = read3(buffer)?;
        let direction = read3(buffer)?;
        Self::new(anchor, direction)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self { anchor: [0.0; 3], direction: [1.0, 0.0, 0.0] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let plane = Plane::new([12.5, -200.0, 3.0], [0.0, 0.6, 0.8]).unwrap();
        let mut buffer = ByteBuffer::new();
        plane.serialize(&mut buffer);
        assert_eq!(buffer.len(), Plane::BYTE_LEN);
        assert_eq!(Plane::deserialize(&mut buffer).unwrap(), plane);
    }

    #[test]
    fn test_rejects_far_anchor() {
        assert!(matches!(
            Plane::new([0.0, 300.0, 0.0], [1.0, 0.0, 0.0]),
            Err(GenomeError::InvalidPlane(_))
        ));
    }

    #[test]
    fn test_rejects_non_unit_direction() {
        assert!(Plane::new([0.0; 3], [0.5, 0.0, 0.0]).is_err());
        assert!(Plane::new([0.0; 3], [f32::NAN, 0.0, 0.0]).is_err());
        assert!(Plane::new([0.0; 3], [0.0, 0.0, 1.005]).is_ok());
    }

    #[test]
    fn test_clamp_anchor() {
        let mut plane = Plane { anchor: [300.0, -256.5, 12.0], direction: [1.0, 0.0, 0.0] };
        plane.clamp_anchor();
        assert_eq!(plane.anchor, [256.0, -256.0, 12.0]);
        assert!(plane.validate().is_ok());
    }

    #[test]
    fn test_truncated_plane() {
        let mut buffer = ByteBuffer::new();
        Plane::default().serialize(&mut buffer);
        let mut short = ByteBuffer::from_bytes(buffer.as_bytes()[..20].to_vec());
        assert!(matches!(
            Plane::deserialize(&mut short),
            Err(GenomeError::TruncatedBuffer { .. })
        ));
    }
}
