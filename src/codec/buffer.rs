//! ByteBuffer - the growable byte sequence every genome is written to
//!
//! Writers append at the end; readers consume from a cursor. All multi-byte
//! values are little-endian, floats are stored as their IEEE-754 bit pattern.

use crate::error::{GenomeError, Result};
use byteorder::{ByteOrder, LittleEndian};

/// An ordered byte sequence with a read cursor
#[derive(Debug, Clone, Default)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
    at: usize,
}

impl ByteBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer over existing bytes, with the cursor at the start
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into(), at: 0 }
    }

    /// Everything written so far, regardless of the cursor
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the written bytes, dropping the cursor
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total bytes held, read or not
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Current read cursor
    pub fn position(&self) -> usize {
        self.at
    }

    /// Number of bytes left to read
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.at
    }

    /// Move the read cursor back to the start
    pub fn rewind(&mut self) {
        self.at = 0;
    }

    /// Append one byte
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Append two bytes, little-endian
    pub fn write_u16(&mut self, value: u16) {
        let mut raw = [0u8; 2];
        LittleEndian::write_u16(&mut raw, value);
        self.bytes.extend_from_slice(&raw);
    }

    /// Append four bytes, little-endian
    pub fn write_u32(&mut self, value: u32) {
        let mut raw = [0u8; 4];
        LittleEndian::write_u32(&mut raw, value);
        self.bytes.extend_from_slice(&raw);
    }

    /// Append a two's-complement i32, little-endian
    pub fn write_i32(&mut self, value: i32) {
        let mut raw = [0u8; 4];
        LittleEndian::write_i32(&mut raw, value);
        self.bytes.extend_from_slice(&raw);
    }

    /// Append the IEEE-754 bits of `value`, little-endian
    pub fn write_f32(&mut self, value: f32) {
        let mut raw = [0u8; 4];
        LittleEndian::write_f32(&mut raw, value);
        self.bytes.extend_from_slice(&raw);
    }

    /// Read one byte; `TruncatedBuffer` at the end, with the cursor left in place
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a little-endian u16
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    /// Read a little-endian u32
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    /// Read a little-endian i32
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    /// Read a little-endian f32 bit pattern
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    /// Consume `count` bytes from the cursor
    fn take(&mut self, count: usize) -> Result<&[u8]> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(GenomeError::TruncatedBuffer { needed: count, remaining });
        }
        let start = self.at;
        self.at += count;
        Ok(&self.bytes[start..self.at])
    }
}

/// Buffers compare by content only; the cursor is not part of the value
impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for ByteBuffer {}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}
