//! Lcg - small seedable generator for reproducible breeding
//!
//! A 32-bit linear congruential generator (`n = 69069 * n + 1 mod 2^32`).
//! Implements `RngCore` so it can drive every breeding call; `next_float`
//! gives `n / 2^32` for callers that need the raw stream.

use rand::{Error, RngCore, SeedableRng};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    n: u32,
}

impl Lcg {
    pub const MULTIPLIER: u32 = 69069;
    pub const INCREMENT: u32 = 1;

    pub fn new(seed: u32) -> Self {
        Self { n: seed }
    }

    pub fn state(&self) -> u32 {
        self.n
    }

    fn step(&mut self) -> u32 {
        self.n = self.n.wrapping_mul(Self::MULTIPLIER).wrapping_add(Self::INCREMENT);
        self.n
    }

    /// Next value in `[0, 1)`
    pub fn next_float(&mut self) -> f64 {
        f64::from(self.step()) / 4_294_967_296.0
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.step());
        let low = u64::from(self.step());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
