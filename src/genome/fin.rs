//! Fins - where fins attach to the body and how large they are

use crate::codec::ByteBuffer;
use crate::error::{GenomeError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fin {
    /// Position along the body
    pub at: u8,
    /// Radius as a fraction of the body width
    pub radius: u8,
}

impl Fin {
    pub const BYTE_LEN: usize = 2;

    pub fn new(at: u8, radius: u8) -> Self {
        Self { at, radius }
    }

    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        buffer.write_u8(self.at);
        buffer.write_u8(self.radius);
    }

    pub fn deserialize(buffer: &mut ByteBuffer) -> Result<Self> {
        Ok(Self::new(buffer.read_u8()?, buffer.read_u8()?))
    }
}

/// All fins of one side of a fish, written with a leading count byte
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Fin>", into = "Vec<Fin>")]
pub struct Fins {
    fins: Vec<Fin>,
}

impl Fins {
    pub const MAX_LEN: usize = u8::MAX as usize;

    pub fn new(fins: Vec<Fin>) -> Result<Self> {
        if fins.len() > Self::MAX_LEN {
            return Err(GenomeError::MalformedPattern(format!(
                "{} fins exceed {}",
                fins.len(),
                Self::MAX_LEN
            )));
        }
        Ok(Self { fins })
    }

    pub fn fins(&self) -> &[Fin] {
        &self.fins
    }

    pub fn len(&self) -> usize {
        self.fins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fins.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        1 + self.fins.len() * Fin::BYTE_LEN
    }

    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        // len <= MAX_LEN, checked in new
        buffer.write_u8(self.fins.len() as u8);
        for fin in &self.fins {
            fin.serialize(buffer);
        }
    }

    pub fn deserialize(buffer: &mut ByteBuffer) -> Result<Self> {
        let count = buffer.read_u8()?;
        let fins = (0..count)
            .map(|_| Fin::deserialize(buffer))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fins })
    }
}

impl TryFrom<Vec<Fin>> for Fins {
    type Error = GenomeError;

    fn try_from(fins: Vec<Fin>) -> Result<Self> {
        Self::new(fins)
    }
}

impl From<Fins> for Vec<Fin> {
    fn from(fins: Fins) -> Self {
        fins.fins
    }
}
