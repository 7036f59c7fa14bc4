//! Trait drift - small random offsets to a layer's trait bytes and plane
//!
//! Each pattern-layer kind has its own offset range per trait. Offsets are
//! rounded and clamped to `[0, 255]`; planes move their anchor (clamped to
//! the space limits) and turn their direction (renormalised), so a drifted
//! layer always stays a valid genome.

use crate::genome::{Layer, Plane};
use rand::Rng;
use std::f64::consts::PI;

/// Offsets bunched around the middle of `[min, max]`, more so for wider plateaus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerPlateau {
    pub min: f64,
    pub max: f64,
    pub width: f64,
}

impl SamplerPlateau {
    pub const fn new(min: f64, max: f64, width: f64) -> Self {
        Self { min, max, width }
    }

    /// Map `x` in `[0, 1]` into `[min, max]`
    pub fn sample(&self, x: f64) -> f64 {
        let at = x - 0.5;
        let multiplier = (1.0 - (PI * x).sin()).max(0.0).powf(self.width);
        self.min + (self.max - self.min) * (4.0 * at * at * at * multiplier + 0.5)
    }
}

/// `min + (max - min) * x^power`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerPower {
    pub min: f64,
    pub max: f64,
    pub power: f64,
}

impl SamplerPower {
    pub const fn new(min: f64, max: f64, power: f64) -> Self {
        Self { min, max, power }
    }

    pub fn sample(&self, x: f64) -> f64 {
        self.min + (self.max - self.min) * x.powf(self.power)
    }
}

/// Offset a trait byte by a sample drawn at `x`
pub fn mutate_u8(value: u8, sampler: &SamplerPlateau, x: f64) -> u8 {
    (f64::from(value) + sampler.sample(x)).round().clamp(0.0, 255.0) as u8
}

/// How far a plane may move and turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneDrift {
    pub anchor: SamplerPower,
    pub direction: SamplerPower,
}

impl PlaneDrift {
    pub fn apply<R: Rng + ?Sized>(&self, plane: &mut Plane, rng: &mut R) {
        let distance = self.anchor.sample(rng.gen()) as f32;
        let step = random_unit(rng);
        for (axis, offset) in plane.anchor.iter_mut().zip(step) {
            *axis += offset * distance;
        }
        plane.clamp_anchor();

        let distance = self.direction.sample(rng.gen()) as f32;
        let turn = random_unit(rng);
        let mut turned = plane.direction;
        for (axis, offset) in turned.iter_mut().zip(turn) {
            *axis += offset * distance;
        }
        let length = turned.iter().map(|v| v * v).sum::<f32>().sqrt();
        if length.is_finite() && length > f32::EPSILON {
            plane.direction = turned.map(|v| v / length);
        }
    }
}

/// Uniformly distributed direction on the unit sphere
fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> [f32; 3] {
    let z = rng.gen::<f64>() * 2.0 - 1.0;
    let angle = rng.gen::<f64>() * 2.0 * PI;
    let radius = (1.0 - z * z).max(0.0).sqrt();
    [(radius * angle.cos()) as f32, (radius * angle.sin()) as f32, z as f32]
}

const SPOTS_PLANE: PlaneDrift = PlaneDrift {
    anchor: SamplerPower::new(0.0, 2.5, 5.0),
    direction: SamplerPower::new(0.0, 2.0, 4.0),
};
const SPOTS_SCALE: SamplerPlateau = SamplerPlateau::new(-11.0, 11.0, 0.6);
const SPOTS_THRESHOLD: SamplerPlateau = SamplerPlateau::new(-20.0, 20.0, 1.0);
const SPOTS_STRETCH: SamplerPlateau = SamplerPlateau::new(-13.0, 13.0, 0.7);
const SPOTS_FOCUS: SamplerPlateau = SamplerPlateau::new(-11.0, 11.0, 0.3);
const SPOTS_POWER: SamplerPlateau = SamplerPlateau::new(-10.0, 10.0, 0.8);

const STRIPES_PLANE: PlaneDrift = PlaneDrift {
    anchor: SamplerPower::new(0.0, 4.0, 5.0),
    direction: SamplerPower::new(0.0, 0.6, 4.0),
};
const STRIPES_SCALE: SamplerPlateau = SamplerPlateau::new(-14.0, 14.0, 0.3);
const STRIPES_THRESHOLD: SamplerPlateau = SamplerPlateau::new(-12.0, 12.0, 0.4);
const STRIPES_SLANT: SamplerPlateau = SamplerPlateau::new(-10.0, 10.0, 0.2);
const STRIPES_ROUGHNESS: SamplerPlateau = SamplerPlateau::new(-11.0, 11.0, 0.8);
const STRIPES_DISTORTION: SamplerPlateau = SamplerPlateau::new(-11.0, 11.0, 0.1);
const STRIPES_SUPPRESSION: SamplerPlateau = SamplerPlateau::new(-13.0, 13.0, 0.7);
const STRIPES_FOCUS: SamplerPlateau = SamplerPlateau::new(-12.0, 12.0, 0.8);
const STRIPES_POWER: SamplerPlateau = SamplerPlateau::new(-13.0, 13.0, 0.8);

const RIDGE_PLANE: PlaneDrift = PlaneDrift {
    anchor: SamplerPower::new(0.0, 3.0, 4.0),
    direction: SamplerPower::new(0.0, 0.6, 4.0),
};
const RIDGE_SCALE: SamplerPlateau = SamplerPlateau::new(-11.0, 11.0, 0.5);
const RIDGE_THRESHOLD: SamplerPlateau = SamplerPlateau::new(-14.0, 14.0, 0.8);
const RIDGE_FOCUS: SamplerPlateau = SamplerPlateau::new(-13.0, 13.0, 0.9);
const RIDGE_FOCUS_POWER: SamplerPlateau = SamplerPlateau::new(-12.0, 12.0, 0.5);

const WEB_PLANE: PlaneDrift = PlaneDrift {
    anchor: SamplerPower::new(0.0, 4.0, 4.0),
    direction: SamplerPower::new(0.0, 3.0, 4.0),
};
const WEB_SCALE: SamplerPlateau = SamplerPlateau::new(-11.0, 11.0, 0.5);
const WEB_THICKNESS: SamplerPlateau = SamplerPlateau::new(-25.0, 25.0, 1.1);
const WEB_THRESHOLD: SamplerPlateau = SamplerPlateau::new(-14.0, 14.0, 1.0);

/// Drift the plane and every trait byte of a layer; base layers have none
pub fn drift_traits<R: Rng + ?Sized>(layer: &mut Layer, rng: &mut R) {
    match layer {
        Layer::Base(_) => {}
        Layer::Spots(spots) => {
            SPOTS_PLANE.apply(&mut spots.plane, rng);
            spots.stretch = mutate_u8(spots.stretch, &SPOTS_STRETCH, rng.gen());
            spots.scale = mutate_u8(spots.scale, &SPOTS_SCALE, rng.gen());
            spots.threshold = mutate_u8(spots.threshold, &SPOTS_THRESHOLD, rng.gen());
            spots.x_focus = mutate_u8(spots.x_focus, &SPOTS_FOCUS, rng.gen());
            spots.y_focus = mutate_u8(spots.y_focus, &SPOTS_FOCUS, rng.gen());
            spots.power = mutate_u8(spots.power, &SPOTS_POWER, rng.gen());
        }
        Layer::Stripes(stripes) => {
            STRIPES_PLANE.apply(&mut stripes.plane, rng);
            stripes.scale = mutate_u8(stripes.scale, &STRIPES_SCALE, rng.gen());
            stripes.threshold = mutate_u8(stripes.threshold, &STRIPES_THRESHOLD, rng.gen());
            stripes.slant = mutate_u8(stripes.slant, &STRIPES_SLANT, rng.gen());
            stripes.roughness = mutate_u8(stripes.roughness, &STRIPES_ROUGHNESS, rng.gen());
            stripes.distortion = mutate_u8(stripes.distortion, &STRIPES_DISTORTION, rng.gen());
            stripes.suppression = mutate_u8(stripes.suppression, &STRIPES_SUPPRESSION, rng.gen());
            stripes.focus = mutate_u8(stripes.focus, &STRIPES_FOCUS, rng.gen());
            stripes.power = mutate_u8(stripes.power, &STRIPES_POWER, rng.gen());
        }
        Layer::Ridge(ridge) => {
            RIDGE_PLANE.apply(&mut ridge.plane, rng);
            ridge.scale = mutate_u8(ridge.scale, &RIDGE_SCALE, rng.gen());
            ridge.threshold = mutate_u8(ridge.threshold, &RIDGE_THRESHOLD, rng.gen());
            ridge.focus = mutate_u8(ridge.focus, &RIDGE_FOCUS, rng.gen());
            ridge.focus_power = mutate_u8(ridge.focus_power, &RIDGE_FOCUS_POWER, rng.gen());
        }
        Layer::Web(web) => {
            WEB_PLANE.apply(&mut web.plane, rng);
            web.scale = mutate_u8(web.scale, &WEB_SCALE, rng.gen());
            web.thickness = mutate_u8(web.thickness, &WEB_THICKNESS, rng.gen());
            web.threshold = mutate_u8(web.threshold, &WEB_THRESHOLD, rng.gen());
        }
    }
}
