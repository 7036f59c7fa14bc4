//! Errors raised while decoding genomes or breeding them
//!
//! None of these are retried internally: each aborts the single
//! deserialize/decide/apply call that raised it.

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GenomeError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenomeError {
    #[error("Truncated buffer: needed {needed} bytes, {remaining} remaining")]
    TruncatedBuffer { needed: usize, remaining: usize },

    #[error("Unknown layer kind: {0}")]
    UnknownLayerKind(u8),

    #[error("Layer index {index} out of range for a pattern with {len} layers")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Malformed mutation rule: {0}")]
    MalformedMutationRule(String),

    #[error("Invalid palette index: {0}")]
    InvalidPaletteIndex(u16),

    #[error("Invalid plane: {0}")]
    InvalidPlane(String),

    #[error("Malformed pattern: {0}")]
    MalformedPattern(String),

    #[error("Invalid transport text: {0}")]
    InvalidTransportText(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
