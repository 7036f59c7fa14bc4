//! LayerBlueprint - a fresh layer spawned by a breeding rule
//!
//! The template provides the layer kind and every trait field; only the
//! colour is decided at breeding time, from the blueprint's palette reference.

use crate::error::Result;
use crate::genome::{Layer, Pattern};
use crate::palette::PaletteReference;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerBlueprint {
    pub palette: PaletteReference,
    pub template: Layer,
}

impl LayerBlueprint {
    pub fn new(palette: impl Into<PaletteReference>, template: Layer) -> Self {
        Self { palette: palette.into(), template }
    }

    /// Build the layer for position `index`, resolving the colour against the parents
    pub fn spawn(&self, mother: &Pattern, father: &Pattern, index: usize) -> Result<Layer> {
        let palette_index = self.palette.resolve(mother, father, index)?;
        Ok(self.template.with_palette_index(palette_index))
    }
}
