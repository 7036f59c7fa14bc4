//! Breeder - one breeding event from start to finish
//!
//! Picks the first rule of the set that fires for the two parents, applies
//! it and, if enabled, lets the offspring's colours and traits drift.

use super::{BreederConfig, MutatorPattern, Mutations};
use crate::error::Result;
use crate::genome::{Layer, Pattern, ShapeBody, ShapeFin};
use log::{debug, info};
use rand::Rng;

#[derive(Debug, Default)]
pub struct Breeder {
    pub config: BreederConfig,
    mutations: Mutations,
}

impl Breeder {
    pub fn new(config: BreederConfig, mutations: Mutations) -> Self {
        Self { config, mutations }
    }

    pub fn mutations(&self) -> &Mutations {
        &self.mutations
    }

    pub fn mutations_mut(&mut self) -> &mut Mutations {
        &mut self.mutations
    }

    /// Breed two parents; `None` when no rule fires
    pub fn breed<R, M>(
        &self,
        mother: &Pattern,
        father: &Pattern,
        shape_body: ShapeBody,
        shape_fin: ShapeFin,
        mix: M,
        rng: &mut R,
    ) -> Result<Option<Pattern>>
    where
        R: Rng + ?Sized,
        M: FnMut(&Layer, &Layer, &mut R) -> Layer,
    {
        if !self.config.mutations_enabled {
            debug!("Mutations disabled, nothing to breed");
            return Ok(None);
        }

        let Some((index, rule)) =
            self.mutations.select(mother, father, self.config.force_mutations, &mut *rng)
        else {
            debug!("None of {} rules fired", self.mutations.len());
            return Ok(None);
        };
        debug!("Rule {} fired (probability {})", index, rule.probability());

        let mut offspring = rule.apply(mother, father, shape_body, shape_fin, mix, &mut *rng)?;
        if self.config.color_drift || self.config.trait_drift {
            let drifted = MutatorPattern::new(&mut offspring)
                .with_colors(self.config.color_drift)
                .with_traits(self.config.trait_drift)
                .mutate(rng);
            debug!("Colour drift changed {} layers", drifted);
        }

        let fingerprint = offspring.fingerprint();
        info!(
            "Bred offspring {} with {} layers from rule {}",
            &fingerprint[..12],
            offspring.layer_count(),
            index
        );
        Ok(Some(offspring))
    }
}
