//! Footprints - predicates deciding which parent may take a rule's role
//!
//! `Footprint` is the pluggable capability rules are built from. Besides
//! closures, two concrete footprints are provided: `PatternFootprint` matches
//! a pattern layer by layer against `LayerFootprint`s.

use crate::genome::{Layer, LayerKind, Pattern};
use crate::palette::{PaletteIndex, PaletteUniverse};
use serde::{Deserialize, Serialize};

pub trait Footprint {
    /// Whether `pattern` qualifies for this role, next to `other` and the
    /// colours present in both parents
    fn matches(&self, pattern: &Pattern, other: &Pattern, colors: &PaletteUniverse) -> bool;

    /// Layer count (base included) of every pattern this footprint accepts, if fixed
    fn layer_count(&self) -> Option<usize> {
        None
    }
}

impl<F> Footprint for F
where
    F: Fn(&Pattern, &Pattern, &PaletteUniverse) -> bool,
{
    fn matches(&self, pattern: &Pattern, other: &Pattern, colors: &PaletteUniverse) -> bool {
        self(pattern, other, colors)
    }
}

/// How a layer footprint constrains a layer's colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteMatch {
    /// Exactly this colour
    Exact(PaletteIndex),
    /// Any colour
    Any,
    /// A colour occurring on exactly one layer across both parents
    Unique,
    /// A colour different from the other parent's layer at the same index
    UniqueLayer,
    /// The same colour as the other parent's layer at the same index
    Shared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerFootprint {
    pub kind: LayerKind,
    pub palette: PaletteMatch,
}

impl LayerFootprint {
    pub fn new(kind: LayerKind, palette: PaletteMatch) -> Self {
        Self { kind, palette }
    }

    pub fn matches(&self, layer: &Layer, other: Option<&Layer>, colors: &PaletteUniverse) -> bool {
        if layer.kind() != self.kind {
            return false;
        }
        let color = layer.palette_index();
        match self.palette {
            PaletteMatch::Exact(expected) => color == expected,
            PaletteMatch::Any => true,
            PaletteMatch::Unique => colors.occurrences(color) == 1,
            PaletteMatch::UniqueLayer => other.map_or(true, |o| o.palette_index() != color),
            PaletteMatch::Shared => other.map_or(false, |o| o.palette_index() == color),
        }
    }
}

/// Matches a pattern with exactly one layer footprint per layer, base first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFootprint {
    pub layers: Vec<LayerFootprint>,
}

impl PatternFootprint {
    pub fn new(layers: Vec<LayerFootprint>) -> Self {
        Self { layers }
    }
}

impl Footprint for PatternFootprint {
    fn matches(&self, pattern: &Pattern, other: &Pattern, colors: &PaletteUniverse) -> bool {
        if pattern.layer_count() != self.layers.len() {
            return false;
        }
        self.layers
            .iter()
            .zip(pattern.iter_layers())
            .enumerate()
            .all(|(index, (footprint, layer))| footprint.matches(layer, other.layer(index), colors))
    }

    fn layer_count(&self) -> Option<usize> {
        Some(self.layers.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{LayerBase, LayerSpots, Plane, ShapeBody, ShapeFin};

    fn spots(palette: PaletteIndex) -> Layer {
        Layer::Spots(LayerSpots {
            plane: Plane::default(),
            palette_index: palette,
            scale: 0,
            stretch: 0,
            threshold: 0,
            x_focus: 0,
            y_focus: 0,
            power: 0,
        })
    }

    fn pattern(base: PaletteIndex, layers: &[PaletteIndex]) -> Pattern {
        Pattern::new(
            LayerBase::new(base),
            layers.iter().copied().map(spots).collect(),
            ShapeBody::default(),
            ShapeFin::default(),
        )
        .unwrap()
    }

    fn base(palette: PaletteMatch) -> LayerFootprint {
        LayerFootprint::new(LayerKind::Base, palette)
    }

    #[test]
    fn test_exact_and_any() {
        let white = pattern(PaletteIndex::WHITE, &[]);
        let gold = pattern(PaletteIndex::GOLD, &[]);
        let colors = PaletteUniverse::collect(&white, &gold);

        let exact = PatternFootprint::new(vec![base(PaletteMatch::Exact(PaletteIndex::WHITE))]);
        assert!(exact.matches(&white, &gold, &colors));
        assert!(!exact.matches(&gold, &white, &colors));

        let any = PatternFootprint::new(vec![base(PaletteMatch::Any)]);
        assert!(any.matches(&gold, &white, &colors));
        assert_eq!(any.layer_count(), Some(1));
    }

    #[test]
    fn test_layer_count_and_kind() {
        let plain = pattern(PaletteIndex::WHITE, &[]);
        let spotted = pattern(PaletteIndex::WHITE, &[PaletteIndex::RED]);
        let colors = PaletteUniverse::collect(&plain, &spotted);

        let footprint = PatternFootprint::new(vec![
            base(PaletteMatch::Any),
            LayerFootprint::new(LayerKind::Spots, PaletteMatch::Any),
        ]);
        assert!(footprint.matches(&spotted, &plain, &colors));
        assert!(!footprint.matches(&plain, &spotted, &colors));

        let wrong_kind = PatternFootprint::new(vec![
            base(PaletteMatch::Any),
            LayerFootprint::new(LayerKind::Web, PaletteMatch::Any),
        ]);
        assert!(!wrong_kind.matches(&spotted, &plain, &colors));
    }

    #[test]
    fn test_unique_counts_both_parents() {
        let a = pattern(PaletteIndex::WHITE, &[PaletteIndex::RED]);
        let b = pattern(PaletteIndex::BLACK, &[PaletteIndex::RED]);
        let colors = PaletteUniverse::collect(&a, &b);

        let unique_base = PatternFootprint::new(vec![
            base(PaletteMatch::Unique),
            LayerFootprint::new(LayerKind::Spots, PaletteMatch::Any),
        ]);
        assert!(unique_base.matches(&a, &b, &colors));

        let unique_spots = PatternFootprint::new(vec![
            base(PaletteMatch::Any),
            LayerFootprint::new(LayerKind::Spots, PaletteMatch::Unique),
        ]);
        assert!(!unique_spots.matches(&a, &b, &colors));
    }

    #[test]
    fn test_unique_layer_and_shared() {
        let a = pattern(PaletteIndex::WHITE, &[PaletteIndex::RED]);
        let b = pattern(PaletteIndex::WHITE, &[]);
        let colors = PaletteUniverse::collect(&a, &b);

        let unique_layer = LayerFootprint::new(LayerKind::Base, PaletteMatch::UniqueLayer);
        let shared = LayerFootprint::new(LayerKind::Base, PaletteMatch::Shared);
        assert!(!unique_layer.matches(a.base(), b.layer(0), &colors));
        assert!(shared.matches(a.base(), b.layer(0), &colors));

        // No layer at this index in the other parent
        let spots_unique = LayerFootprint::new(LayerKind::Spots, PaletteMatch::UniqueLayer);
        let spots_shared = LayerFootprint::new(LayerKind::Spots, PaletteMatch::Shared);
        assert!(spots_unique.matches(&a.layers()[0], b.layer(1), &colors));
        assert!(!spots_shared.matches(&a.layers()[0], b.layer(1), &colors));
    }

    #[test]
    fn test_closure_footprint() {
        let a = pattern(PaletteIndex::WHITE, &[]);
        let colors = PaletteUniverse::collect(&a, &a);
        let always = |_: &Pattern, _: &Pattern, _: &PaletteUniverse| true;
        assert!(always.matches(&a, &a, &colors));
        assert_eq!(Footprint::layer_count(&always), None);
    }
}
