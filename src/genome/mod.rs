//! Genome - the data model of a fish's appearance
//!
//! A `Pattern` is the genome: one base layer, an ordered list of pattern
//! layers and two shape layers. Everything here serializes byte-exactly into
//! a `ByteBuffer`; layer kinds travel separately in a `LayerCatalog`.

mod fin;
mod kind;
mod layer;
mod pattern;
mod plane;
mod shape;

pub use fin::{Fin, Fins};
pub use kind::{LayerCatalog, LayerKind};
pub use layer::{Layer, LayerBase, LayerRidge, LayerSpots, LayerStripes, LayerWeb};
pub use pattern::{Atlas, AtlasRegion, Pattern};
pub use plane::Plane;
pub use shape::{ShapeBody, ShapeFin};
