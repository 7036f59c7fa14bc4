//! Mutation - one declarative breeding rule
//!
//! A rule pairs two footprints (which parents may take the mother and father
//! roles) with a production plan: one `LayerAction` per offspring layer,
//! base first. `decide` rolls the rule's probability and checks both role
//! assignments; `apply` produces the offspring genome.

use super::{Footprint, LayerBlueprint, PatternFootprint};
use crate::error::{GenomeError, Result};
use crate::genome::{Layer, LayerKind, Pattern, ShapeBody, ShapeFin};
use crate::palette::{PaletteReference, PaletteUniverse};
use log::{debug, trace};
use rand::Rng;
use std::fmt;

/// How one layer of the offspring is produced
#[derive(Debug, Clone, PartialEq)]
pub enum LayerAction {
    CopyFromMother,
    CopyFromFather,
    /// Blend the parents' layers at this index with the caller's mix function
    MixByExternalFn,
    SpawnBlueprint(LayerBlueprint),
}

type BoxedFootprint = Box<dyn Footprint + Send + Sync>;

pub struct Mutation {
    mother: BoxedFootprint,
    father: BoxedFootprint,
    plan: Vec<LayerAction>,
    probability: f64,
    symmetrical: bool,
}

impl Mutation {
    /// Create a rule, rejecting plans that could never produce a valid pattern
    pub fn new(
        mother: impl Footprint + Send + Sync + 'static,
        father: impl Footprint + Send + Sync + 'static,
        plan: Vec<LayerAction>,
        probability: f64,
        symmetrical: bool,
    ) -> Result<Self> {
        let mutation = Self {
            mother: Box::new(mother),
            father: Box::new(father),
            plan,
            probability,
            symmetrical,
        };
        mutation.validate()?;
        Ok(mutation)
    }

    /// Create a rule from concrete footprints; it is symmetrical when both are equal
    pub fn from_footprints(
        mother: PatternFootprint,
        father: PatternFootprint,
        plan: Vec<LayerAction>,
        probability: f64,
    ) -> Result<Self> {
        let symmetrical = mother == father;
        Self::new(mother, father, plan, probability, symmetrical)
    }

    pub fn plan(&self) -> &[LayerAction] {
        &self.plan
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn is_symmetrical(&self) -> bool {
        self.symmetrical
    }

    /// Whether `mother` and `father` fit the rule in this exact role order
    pub fn is_applicable(&self, mother: &Pattern, father: &Pattern, colors: &PaletteUniverse) -> bool {
        self.mother.matches(mother, father, colors) && self.father.matches(father, mother, colors)
    }

    /// Roll the rule's probability (unless forced) and check both role orders
    pub fn decide<R: Rng + ?Sized>(
        &self,
        mother: &Pattern,
        father: &Pattern,
        force: bool,
        rng: &mut R,
    ) -> bool {
        if !force && rng.gen::<f64>() > self.probability {
            return false;
        }
        let colors = PaletteUniverse::collect(mother, father);
        self.is_applicable(mother, father, &colors) || self.is_applicable(father, mother, &colors)
    }

    /// Produce the offspring of two parents this rule was decided for
    pub fn apply<R, M>(
        &self,
        mother: &Pattern,
        father: &Pattern,
        shape_body: ShapeBody,
        shape_fin: ShapeFin,
        mut mix: M,
        rng: &mut R,
    ) -> Result<Pattern>
    where
        R: Rng + ?Sized,
        M: FnMut(&Layer, &Layer, &mut R) -> Layer,
    {
        let colors = PaletteUniverse::collect(mother, father);
        let (mother, father) = if self.symmetrical || !self.is_applicable(mother, father, &colors) {
            debug!("Swapping parent roles (symmetrical: {})", self.symmetrical);
            (father, mother)
        } else {
            (mother, father)
        };

        let mut produced = Vec::with_capacity(self.plan.len());
        for (index, action) in self.plan.iter().enumerate() {
            let layer = match action {
                LayerAction::CopyFromMother => *mother.input_layer(index)?,
                LayerAction::CopyFromFather => *father.input_layer(index)?,
                LayerAction::MixByExternalFn => {
                    let from_mother = mother.input_layer(index)?;
                    let from_father = father.input_layer(index)?;
                    mix(from_mother, from_father, &mut *rng)
                }
                LayerAction::SpawnBlueprint(blueprint) => blueprint.spawn(mother, father, index)?,
            };
            trace!("Layer {}: {} in {}", index, layer.kind(), layer.palette_index());
            produced.push(layer);
        }

        let mut layers = produced.into_iter();
        let base = layers
            .next()
            .ok_or_else(|| GenomeError::MalformedMutationRule("empty production plan".into()))?;
        Pattern::new(base, layers.collect(), shape_body, shape_fin)
    }

    /// Number of layers a parent in the given role is guaranteed to have, if known
    fn role_layer_count(&self, from_mother: bool) -> Option<usize> {
        let (own, other) = if from_mother {
            (self.mother.layer_count(), self.father.layer_count())
        } else {
            (self.father.layer_count(), self.mother.layer_count())
        };
        if self.symmetrical {
            // Roles may be swapped at apply time
            match (own, other) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            }
        } else {
            own
        }
    }

    fn check_input(&self, from_mother: bool, index: i64) -> Result<()> {
        let role = if from_mother { "mother" } else { "father" };
        if index < 0 {
            return Err(GenomeError::MalformedMutationRule(format!(
                "{} layer {} is referenced",
                role, index
            )));
        }
        match self.role_layer_count(from_mother) {
            Some(count) if index as usize >= count => Err(GenomeError::MalformedMutationRule(format!(
                "{} footprint has {} layers, layer {} is referenced",
                role, count, index
            ))),
            _ => Ok(()),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.probability.is_finite() || !(0.0..=1.0).contains(&self.probability) {
            return Err(GenomeError::MalformedMutationRule(format!(
                "probability {} outside [0, 1]",
                self.probability
            )));
        }
        if self.plan.is_empty() {
            return Err(GenomeError::MalformedMutationRule("empty production plan".into()));
        }
        for (index, action) in self.plan.iter().enumerate() {
            match action {
                LayerAction::CopyFromMother => self.check_input(true, index as i64)?,
                LayerAction::CopyFromFather => self.check_input(false, index as i64)?,
                LayerAction::MixByExternalFn => {
                    self.check_input(true, index as i64)?;
                    self.check_input(false, index as i64)?;
                }
                LayerAction::SpawnBlueprint(blueprint) => {
                    let is_base = blueprint.template.kind() == LayerKind::Base;
                    if (index == 0) != is_base {
                        return Err(GenomeError::MalformedMutationRule(format!(
                            "blueprint at layer {} spawns a {} layer",
                            index,
                            blueprint.template.kind()
                        )));
                    }
                    blueprint.palette.validate()?;
                    if let PaletteReference::Relative { from_mother, .. } = blueprint.palette {
                        if let Some(target) = blueprint.palette.target_index(index) {
                            self.check_input(from_mother, target)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutation")
            .field("plan", &self.plan)
            .field("probability", &self.probability)
            .field("symmetrical", &self.symmetrical)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breeder::{LayerFootprint, PaletteMatch, PatternFootprint};
    use crate::genome::{LayerBase, LayerSpots, Plane};
    use crate::palette::PaletteIndex;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn always(_: &Pattern, _: &Pattern, _: &PaletteUniverse) -> bool {
        true
    }

    fn spots(palette: PaletteIndex) -> Layer {
        Layer::Spots(LayerSpots {
            plane: Plane::default(),
            palette_index: palette,
            scale: 10,
            stretch: 20,
            threshold: 30,
            x_focus: 40,
            y_focus: 50,
            power: 60,
        })
    }

    fn pattern(base: PaletteIndex, layers: Vec<Layer>) -> Pattern {
        Pattern::new(LayerBase::new(base), layers, ShapeBody::default(), ShapeFin::default()).unwrap()
    }

    fn base_blueprint(from_mother: bool) -> LayerAction {
        LayerAction::SpawnBlueprint(LayerBlueprint::new(
            PaletteReference::relative(from_mother, 0).unwrap(),
            Layer::Base(LayerBase::new(PaletteIndex::WHITE)),
        ))
    }

    fn no_mix(a: &Layer, _: &Layer, _: &mut StdRng) -> Layer {
        *a
    }

    #[test]
    fn test_fire_rate() {
        let rule = Mutation::new(always, always, vec![LayerAction::CopyFromMother], 0.25, false).unwrap();
        let a = pattern(PaletteIndex::WHITE, Vec::new());
        let b = pattern(PaletteIndex::BLACK, Vec::new());
        let mut rng = StdRng::seed_from_u64(7);

        let trials = 100_000;
        let fired = (0..trials).filter(|_| rule.decide(&a, &b, false, &mut rng)).count();
        let rate = fired as f64 / trials as f64;
        assert!((rate - 0.25).abs() < 0.01, "fire rate {}", rate);
    }

    #[test]
    fn test_force_skips_roll() {
        let rule = Mutation::new(always, always, vec![LayerAction::CopyFromMother], 0.0, false).unwrap();
        let a = pattern(PaletteIndex::WHITE, Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..100).all(|_| rule.decide(&a, &a, true, &mut rng)));
    }

    #[test]
    fn test_decide_accepts_either_role_order() {
        let gold_only = PatternFootprint::new(vec![LayerFootprint::new(
            LayerKind::Base,
            PaletteMatch::Exact(PaletteIndex::GOLD),
        )]);
        let rule = Mutation::new(gold_only, always, vec![base_blueprint(true)], 1.0, false).unwrap();
        let white = pattern(PaletteIndex::WHITE, Vec::new());
        let gold = pattern(PaletteIndex::GOLD, Vec::new());
        let mut rng = StdRng::seed_from_u64(3);

        assert!(rule.decide(&white, &gold, false, &mut rng));
        assert!(rule.decide(&gold, &white, false, &mut rng));
        assert!(!rule.decide(&white, &white, true, &mut rng));
    }

    #[test]
    fn test_symmetrical_swap() {
        let gold_only = PatternFootprint::new(vec![LayerFootprint::new(
            LayerKind::Base,
            PaletteMatch::Exact(PaletteIndex::GOLD),
        )]);
        let rule = Mutation::new(gold_only, always, vec![base_blueprint(true)], 1.0, true).unwrap();
        let white = pattern(PaletteIndex::WHITE, Vec::new());
        let gold = pattern(PaletteIndex::GOLD, Vec::new());
        let colors = PaletteUniverse::collect(&white, &gold);
        assert!(!rule.is_applicable(&white, &gold, &colors));
        assert!(rule.is_applicable(&gold, &white, &colors));

        let mut rng = StdRng::seed_from_u64(5);
        let child = rule
            .apply(&white, &gold, ShapeBody::default(), ShapeFin::default(), no_mix, &mut rng)
            .unwrap();
        assert_eq!(child.base().palette_index(), PaletteIndex::GOLD);
    }

    #[test]
    fn test_swap_when_only_reverse_applies() {
        let gold_only = PatternFootprint::new(vec![LayerFootprint::new(
            LayerKind::Base,
            PaletteMatch::Exact(PaletteIndex::GOLD),
        )]);
        let rule = Mutation::new(gold_only, always, vec![LayerAction::CopyFromMother], 1.0, false).unwrap();
        let white = pattern(PaletteIndex::WHITE, Vec::new());
        let gold = pattern(PaletteIndex::GOLD, Vec::new());
        let mut rng = StdRng::seed_from_u64(5);

        let child = rule
            .apply(&white, &gold, ShapeBody::default(), ShapeFin::default(), no_mix, &mut rng)
            .unwrap();
        assert_eq!(child.base().palette_index(), PaletteIndex::GOLD);
    }

    #[test]
    fn test_apply_plan() {
        let mother = pattern(PaletteIndex::WHITE, vec![spots(PaletteIndex::RED)]);
        let father = pattern(PaletteIndex::BLACK, vec![spots(PaletteIndex::GOLD)]);
        let plan = vec![
            LayerAction::CopyFromFather,
            LayerAction::MixByExternalFn,
            LayerAction::SpawnBlueprint(LayerBlueprint::new(
                PaletteReference::relative(true, -1).unwrap(),
                spots(PaletteIndex::WHITE),
            )),
        ];
        let rule = Mutation::new(always, always, plan, 1.0, false).unwrap();
        let body = ShapeBody::new(1, 2, 3);
        let mut rng = StdRng::seed_from_u64(11);
        let mut mixes = 0;

        let child = rule
            .apply(
                &mother,
                &father,
                body,
                ShapeFin::default(),
                |a: &Layer, b: &Layer, _: &mut StdRng| {
                    mixes += 1;
                    a.with_palette_index(b.palette_index())
                },
                &mut rng,
            )
            .unwrap();

        assert_eq!(mixes, 1);
        assert_eq!(child.layer_count(), 3);
        assert_eq!(child.base().palette_index(), PaletteIndex::BLACK);
        assert_eq!(child.layers()[0].palette_index(), PaletteIndex::GOLD);
        assert_eq!(child.layers()[1].palette_index(), PaletteIndex::RED);
        assert_eq!(*child.shape_body(), body);
    }

    #[test]
    fn test_apply_out_of_range() {
        let plan = vec![LayerAction::CopyFromMother, LayerAction::CopyFromMother];
        let rule = Mutation::new(always, always, plan, 1.0, false).unwrap();
        let plain = pattern(PaletteIndex::WHITE, Vec::new());
        let mut rng = StdRng::seed_from_u64(2);

        let result = rule.apply(&plain, &plain, ShapeBody::default(), ShapeFin::default(), no_mix, &mut rng);
        assert_eq!(result.unwrap_err(), GenomeError::IndexOutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn test_malformed_rules() {
        let copy = || vec![LayerAction::CopyFromMother];
        assert!(Mutation::new(always, always, copy(), 1.5, false).is_err());
        assert!(Mutation::new(always, always, copy(), f64::NAN, false).is_err());
        assert!(Mutation::new(always, always, Vec::new(), 0.5, false).is_err());

        // Non-base blueprint at index 0
        let spawn_spots = LayerAction::SpawnBlueprint(LayerBlueprint::new(
            PaletteIndex::RED,
            spots(PaletteIndex::WHITE),
        ));
        assert!(Mutation::new(always, always, vec![spawn_spots.clone()], 0.5, false).is_err());
        assert!(Mutation::new(always, always, vec![base_blueprint(true), spawn_spots], 0.5, false).is_ok());

        // Base blueprint past index 0
        let plan = vec![LayerAction::CopyFromMother, base_blueprint(true)];
        assert!(Mutation::new(always, always, plan, 0.5, false).is_err());

        // Copy beyond the footprint's layer count
        let one_layer = PatternFootprint::new(vec![LayerFootprint::new(LayerKind::Base, PaletteMatch::Any)]);
        let plan = vec![LayerAction::CopyFromMother, LayerAction::CopyFromMother];
        assert!(matches!(
            Mutation::new(one_layer, always, plan, 0.5, false),
            Err(GenomeError::MalformedMutationRule(_))
        ));

        // Relative reference before the base
        let before_base = LayerAction::SpawnBlueprint(LayerBlueprint::new(
            PaletteReference::relative(false, -1).unwrap(),
            Layer::Base(LayerBase::new(PaletteIndex::WHITE)),
        ));
        assert!(Mutation::new(always, always, vec![before_base], 0.5, false).is_err());
    }

    #[test]
    fn test_rejects_unchecked_relative_delta() {
        let wide = LayerAction::SpawnBlueprint(LayerBlueprint::new(
            PaletteReference::Relative { from_mother: true, delta: 256 },
            Layer::Base(LayerBase::new(PaletteIndex::WHITE)),
        ));
        assert!(matches!(
            Mutation::new(always, always, vec![wide], 1.0, false),
            Err(GenomeError::MalformedMutationRule(_))
        ));
    }

    #[test]
    fn test_symmetry_from_footprints() {
        let any = || PatternFootprint::new(vec![LayerFootprint::new(LayerKind::Base, PaletteMatch::Any)]);
        let gold = PatternFootprint::new(vec![LayerFootprint::new(
            LayerKind::Base,
            PaletteMatch::Exact(PaletteIndex::GOLD),
        )]);

        let same = Mutation::from_footprints(any(), any(), vec![LayerAction::CopyFromMother], 0.5).unwrap();
        assert!(same.is_symmetrical());
        let different = Mutation::from_footprints(gold, any(), vec![LayerAction::CopyFromMother], 0.5).unwrap();
        assert!(!different.is_symmetrical());
    }
}
