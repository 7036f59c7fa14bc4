//! Pattern - the complete genome of one fish's appearance
//!
//! A base layer, an ordered list of pattern layers and the two shape layers.
//! Layer index 0 is the base, index `i > 0` is `layers[i - 1]`.

use super::{Layer, LayerCatalog, LayerKind, ShapeBody, ShapeFin};
use crate::codec::ByteBuffer;
use crate::error::{GenomeError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Handle to a rendered region of the external texture atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasRegion(pub u32);

/// The texture atlas patterns are rendered onto; owns region allocation
pub trait Atlas {
    fn return_region(&mut self, region: AtlasRegion);
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "PatternRecord", into = "PatternRecord")]
pub struct Pattern {
    base: Layer,
    layers: Vec<Layer>,
    shape_body: ShapeBody,
    shape_fin: ShapeFin,
    region: Option<AtlasRegion>,
}

impl Pattern {
    /// Assemble a pattern; the base must be a base layer and no other layer may be.
    /// Every plane must be valid, so whatever is built here also decodes.
    pub fn new(
        base: impl Into<Layer>,
        layers: Vec<Layer>,
        shape_body: ShapeBody,
        shape_fin: ShapeFin,
    ) -> Result<Self> {
        let base = base.into();
        if base.kind() != LayerKind::Base {
            return Err(GenomeError::MalformedPattern(format!(
                "layer 0 must be a base layer, found {}",
                base.kind()
            )));
        }
        if let Some(position) = layers.iter().position(|l| l.kind() == LayerKind::Base) {
            return Err(GenomeError::MalformedPattern(format!(
                "base layer found at layer index {}",
                position + 1
            )));
        }
        if layers.len() > LayerCatalog::MAX_LEN {
            return Err(GenomeError::MalformedPattern(format!(
                "{} layers exceed the catalog limit of {}",
                layers.len(),
                LayerCatalog::MAX_LEN
            )));
        }
        for layer in &layers {
            if let Some(plane) = layer.plane() {
                plane.validate()?;
            }
        }
        Ok(Self { base, layers, shape_body, shape_fin, region: None })
    }

    pub fn base(&self) -> &Layer {
        &self.base
    }

    /// Pattern layers on top of the base
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn shape_body(&self) -> &ShapeBody {
        &self.shape_body
    }

    pub fn shape_fin(&self) -> &ShapeFin {
        &self.shape_fin
    }

    /// Number of colour layers, base included
    pub fn layer_count(&self) -> usize {
        1 + self.layers.len()
    }

    /// The layer at `index`, with 0 as the base layer
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        match index {
            0 => Some(&self.base),
            i => self.layers.get(i - 1),
        }
    }

    pub(crate) fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        match index {
            0 => Some(&mut self.base),
            i => self.layers.get_mut(i - 1),
        }
    }

    /// The layer at `index`, or `IndexOutOfRange`
    pub fn input_layer(&self, index: usize) -> Result<&Layer> {
        self.layer(index).ok_or(GenomeError::IndexOutOfRange {
            index: index as i64,
            len: self.layer_count(),
        })
    }

    /// Base layer first, then every pattern layer in order
    pub fn iter_layers(&self) -> impl Iterator<Item = &Layer> {
        std::iter::once(&self.base).chain(self.layers.iter())
    }

    /// The kinds of the pattern layers, needed to read this pattern back
    pub fn catalog(&self) -> LayerCatalog {
        // Layer count and kinds were checked in `new`
        LayerCatalog::new(self.layers.iter().map(|l| l.kind()).collect())
            .unwrap_or_default()
    }

    pub fn byte_len(&self) -> usize {
        self.iter_layers().map(|l| l.byte_len()).sum::<usize>()
            + ShapeBody::BYTE_LEN
            + ShapeFin::BYTE_LEN
    }

    pub fn serialize(&self, buffer: &mut ByteBuffer) {
        for layer in self.iter_layers() {
            layer.serialize(buffer);
        }
        self.shape_body.serialize(buffer);
        self.shape_fin.serialize(buffer);
    }

    /// Read a pattern whose layer kinds are listed by `catalog`
    pub fn deserialize(buffer: &mut ByteBuffer, catalog: &LayerCatalog) -> Result<Self> {
        let base = Layer::deserialize(LayerKind::Base, buffer)?;
        let layers = catalog
            .kinds()
            .iter()
            .map(|kind| Layer::deserialize(*kind, buffer))
            .collect::<Result<Vec<_>>>()?;
        let shape_body = ShapeBody::deserialize(buffer)?;
        let shape_fin = ShapeFin::deserialize(buffer)?;
        Self::new(base, layers, shape_body, shape_fin)
    }

    /// Read a pattern against raw catalog tags
    pub fn deserialize_with_tags(buffer: &mut ByteBuffer, tags: &[u8]) -> Result<Self> {
        let catalog = LayerCatalog::from_tags(tags)?;
        Self::deserialize(buffer, &catalog)
    }

    pub fn to_buffer(&self) -> ByteBuffer {
        let mut buffer = ByteBuffer::new();
        self.serialize(&mut buffer);
        buffer
    }

    /// Hex SHA-256 of the serialized genome
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.to_buffer().as_bytes()))
    }

    pub fn region(&self) -> Option<AtlasRegion> {
        self.region
    }

    /// Record the atlas region this pattern was rendered to
    pub fn attach_region(&mut self, region: AtlasRegion) {
        self.region = Some(region);
    }

    /// Return the atlas region, if any; calling again does nothing
    pub fn free(&mut self, atlas: &mut dyn Atlas) {
        if let Some(region) = self.region.take() {
            atlas.return_region(region);
        }
    }
}

/// Clones are independent genomes and do not share the atlas region
impl Clone for Pattern {
    fn clone(&self) -> Self {
        Self {
            base: self.base,
            layers: self.layers.clone(),
            shape_body: self.shape_body,
            shape_fin: self.shape_fin,
            region: None,
        }
    }
}

/// Genome equality; the atlas region is not part of the genome
impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
            && self.layers == other.layers
            && self.shape_body == other.shape_body
            && self.shape_fin == other.shape_fin
    }
}

#[derive(Serialize, Deserialize)]
struct PatternRecord {
    base: Layer,
    layers: Vec<Layer>,
    shape_body: ShapeBody,
    shape_fin: ShapeFin,
}

impl TryFrom<PatternRecord> for Pattern {
    type Error = GenomeError;

    fn try_from(record: PatternRecord) -> Result<Self> {
        Pattern::new(record.base, record.layers, record.shape_body, record.shape_fin)
    }
}

impl From<Pattern> for PatternRecord {
    fn from(pattern: Pattern) -> Self {
        Self {
            base: pattern.base,
            layers: pattern.layers,
            shape_body: pattern.shape_body,
            shape_fin: pattern.shape_fin,
        }
    }
}
