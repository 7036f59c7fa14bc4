//! Koi - genome core for a pond of breeding fish
//!
//! A byte-exact genome format for fish patterns, declarative breeding rules
//! that combine two parent genomes, and palette colour drift.

pub mod breeder;
pub mod codec;
pub mod genome;
pub mod palette;

mod error;

pub use breeder::{Breeder, BreederConfig, Footprint, LayerAction, Mutation, Mutations};
pub use codec::ByteBuffer;
pub use error::{GenomeError, Result};
pub use genome::{Layer, LayerCatalog, LayerKind, Pattern};
pub use palette::{PaletteIndex, PaletteReference, PaletteUniverse};
