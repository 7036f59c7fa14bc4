//! Transport text for byte buffers
//!
//! Standard base64 with padding over the whole byte sequence. There is no
//! framing or length prefix: the bytes are the payload.

use super::ByteBuffer;
use crate::error::{GenomeError, Result};
use base64::{engine::general_purpose, Engine as _};

impl ByteBuffer {
    /// Encode every byte of this buffer as transport text
    pub fn to_transport_text(&self) -> String {
        general_purpose::STANDARD.encode(self.as_bytes())
    }

    /// Decode transport text into a fresh buffer with the cursor at the start
    pub fn from_transport_text(text: &str) -> Result<Self> {
        general_purpose::STANDARD
            .decode(text.trim())
            .map(ByteBuffer::from_bytes)
            .map_err(|e| GenomeError::InvalidTransportText(e.to_string()))
    }
}
