//! Mutations - the ordered set of breeding rules currently in play

use super::Mutation;
use crate::genome::Pattern;
use rand::Rng;

#[derive(Debug, Default)]
pub struct Mutations {
    rules: Vec<Mutation>,
}

impl Mutations {
    pub fn new(rules: Vec<Mutation>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: Mutation) {
        self.rules.push(rule);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mutation> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule, in insertion order, whose `decide` fires for these parents
    ///
    /// Each rule considered draws its own roll.
    pub fn select<R: Rng + ?Sized>(
        &self,
        mother: &Pattern,
        father: &Pattern,
        force: bool,
        rng: &mut R,
    ) -> Option<(usize, &Mutation)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.decide(mother, father, force, &mut *rng))
    }
}

impl FromIterator<Mutation> for Mutations {
    fn from_iter<I: IntoIterator<Item = Mutation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
