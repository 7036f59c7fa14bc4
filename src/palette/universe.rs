//! PaletteUniverse - every colour present in a pair of parents
//!
//! The set view (`contains`, `colors`) is deduplicated. Occurrence counts are
//! kept alongside so footprints can ask whether a colour is unique to one layer.

use super::{PaletteIndex, PALETTE_SIZE};
use crate::genome::Pattern;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteUniverse {
    counts: [u16; PALETTE_SIZE],
}

impl PaletteUniverse {
    /// Collect the base colour and every layer colour of both patterns
    pub fn collect(mother: &Pattern, father: &Pattern) -> Self {
        let mut universe = Self::default();
        universe.insert_pattern(mother);
        universe.insert_pattern(father);
        universe
    }

    fn insert_pattern(&mut self, pattern: &Pattern) {
        for layer in pattern.iter_layers() {
            self.insert(layer.palette_index());
        }
    }

    pub fn insert(&mut self, index: PaletteIndex) {
        self.counts[index.as_usize()] += 1;
    }

    pub fn contains(&self, index: PaletteIndex) -> bool {
        self.counts[index.as_usize()] > 0
    }

    /// Number of layers across both parents carrying this colour
    pub fn occurrences(&self, index: PaletteIndex) -> usize {
        usize::from(self.counts[index.as_usize()])
    }

    /// The distinct colours present, in ascending index order
    pub fn colors(&self) -> impl Iterator<Item = PaletteIndex> + '_ {
        PaletteIndex::all().filter(move |index| self.contains(*index))
    }

    /// Number of distinct colours
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|count| **count > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
