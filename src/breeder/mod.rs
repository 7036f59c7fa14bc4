//! Breeder - declarative breeding rules and colour drift
//!
//! A `Mutation` decides whether two parents fit its footprints and builds
//! the offspring layer by layer. `MutatorPattern` then lets the offspring's
//! colours drift along the palette transition table and nudges each layer's
//! traits and plane. `Breeder` ties both together for one breeding event.

mod blueprint;
mod breeding;
mod config;
mod drift;
mod footprint;
mod mutation;
mod mutations;
mod mutator;
mod random;

pub use blueprint::LayerBlueprint;
pub use breeding::Breeder;
pub use config::BreederConfig;
pub use drift::{drift_traits, mutate_u8, PlaneDrift, SamplerPlateau, SamplerPower};
pub use footprint::{Footprint, LayerFootprint, PaletteMatch, PatternFootprint};
pub use mutation::{LayerAction, Mutation};
pub use mutations::Mutations;
pub use mutator::{MutatorLayer, MutatorPattern, TransitionTable, TRANSITIONS};
pub use random::Lcg;
