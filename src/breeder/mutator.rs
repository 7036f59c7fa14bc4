//! Colour drift - random recolouring of offspring layers
//!
//! Every palette colour has a row in `TRANSITIONS` giving the chance of
//! landing on each colour. A landing colour already used by another layer of
//! the same pattern is rejected, and the layer keeps its colour. After its
//! colour, each layer's plane and trait bytes drift as well.

use super::drift_traits;
use crate::genome::{Layer, Pattern};
use crate::palette::{PaletteIndex, PALETTE_SIZE};
use log::trace;
use rand::Rng;

/// Row `c` is the distribution over next colours for a layer currently coloured `c`
pub type TransitionTable = [[f64; PALETTE_SIZE]; PALETTE_SIZE];

const fn identity_row(color: usize) -> [f64; PALETTE_SIZE] {
    let mut row = [0.0; PALETTE_SIZE];
    row[color] = 1.0;
    row
}

pub static TRANSITIONS: TransitionTable = [
    identity_row(0),
    identity_row(1),
    [0.0, 0.0, 0.9, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.07, 0.87, 0.06, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.06, 0.94, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    identity_row(5),
    identity_row(6),
    identity_row(7),
    identity_row(8),
    identity_row(9),
    identity_row(10),
    identity_row(11),
    identity_row(12),
    identity_row(13),
    identity_row(14),
    identity_row(15),
];

pub struct MutatorLayer<'a> {
    layer: &'a mut Layer,
    table: &'a TransitionTable,
}

impl<'a> MutatorLayer<'a> {
    pub fn new(layer: &'a mut Layer) -> Self {
        Self::with_table(layer, &TRANSITIONS)
    }

    pub fn with_table(layer: &'a mut Layer, table: &'a TransitionTable) -> Self {
        Self { layer, table }
    }

    /// Possibly recolour the layer; returns whether the colour changed
    pub fn mutate<R: Rng + ?Sized>(&mut self, excluded: &[PaletteIndex], rng: &mut R) -> bool {
        let current = self.layer.palette_index();
        let roll = rng.gen::<f64>();
        let mut cumulative = 0.0;
        for (next, chance) in PaletteIndex::all().zip(self.table[current.as_usize()].iter()) {
            cumulative += chance;
            if roll < cumulative {
                if excluded.contains(&next) {
                    trace!("Drift from {} to {} rejected", current, next);
                    return false;
                }
                self.layer.set_palette_index(next);
                return next != current;
            }
        }
        false
    }

    /// Nudge the plane and trait bytes; the colour is left alone
    pub fn drift_traits<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        drift_traits(self.layer, rng);
    }
}

/// Drifts the colour and traits of every layer of a pattern
pub struct MutatorPattern<'a> {
    pattern: &'a mut Pattern,
    table: &'a TransitionTable,
    colors: bool,
    traits: bool,
}

impl<'a> MutatorPattern<'a> {
    pub fn new(pattern: &'a mut Pattern) -> Self {
        Self::with_table(pattern, &TRANSITIONS)
    }

    pub fn with_table(pattern: &'a mut Pattern, table: &'a TransitionTable) -> Self {
        Self { pattern, table, colors: true, traits: true }
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    pub fn with_traits(mut self, enabled: bool) -> Self {
        self.traits = enabled;
        self
    }

    /// Mutate each layer in order, excluding the colours of all other layers;
    /// returns how many layers changed colour
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut changed = 0;
        for index in 0..self.pattern.layer_count() {
            let excluded: Vec<PaletteIndex> = if self.colors {
                self.pattern
                    .iter_layers()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .map(|(_, layer)| layer.palette_index())
                    .collect()
            } else {
                Vec::new()
            };
            if let Some(layer) = self.pattern.layer_mut(index) {
                let mut mutator = MutatorLayer::with_table(layer, self.table);
                if self.colors && mutator.mutate(&excluded, rng) {
                    changed += 1;
                }
                if self.traits {
                    mutator.drift_traits(rng);
                }
            }
        }
        changed
    }
}
