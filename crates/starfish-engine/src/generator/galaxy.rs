//! Scattered spherical galaxy.
//!
//! A radial falloff around the tile centre whose steepness is jittered per
//! point, giving a bursted, staticy look. The jitter comes from a hash of the
//! point's coordinates so repeated samples agree.

use super::{Capabilities, Generator, PointSampler};
use crate::rng::DeterministicRng;

/// Galaxy generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Galaxy;

#[derive(Debug, Clone)]
struct GalaxyState {
    seed: u64,
    range_min: f64,
    range_max: f64,
}

impl Generator for Galaxy {
    fn name(&self) -> &'static str {
        "galaxy"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::new(false, false)
    }

    fn init(&self, rng: &mut DeterministicRng) -> Box<dyn PointSampler> {
        let range_min = rng.frand_between(0.0, 4.0);
        let range_max = rng.frand_between(1.0, 48.0);
        let seed = ((rng.gen_u32() as u64) << 32) | rng.gen_u32() as u64;
        Box::new(GalaxyState {
            seed,
            range_min,
            range_max,
        })
    }
}

impl GalaxyState {
    #[inline]
    fn splitmix64(mut x: u64) -> u64 {
        x = x.wrapping_add(0x9e3779b97f4a7c15);
        x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
        x ^ (x >> 31)
    }

    /// Uniform value in `[0, 1]` tied to the exact coordinates.
    #[inline]
    fn hash_unit(&self, x: f64, y: f64) -> f64 {
        let mut h = self.seed;
        h ^= x.to_bits().wrapping_mul(0x9e3779b185ebca87);
        h ^= y.to_bits().wrapping_mul(0xc2b2ae3d27d4eb4f);
        let h = (Self::splitmix64(h) >> 32) as u32;
        h as f64 / u32::MAX as f64
    }
}

impl PointSampler for GalaxyState {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let dist = (x - 0.5).hypot(y - 0.5);
        let k = self.range_min + (self.range_max - self.range_min) * self.hash_unit(x, y);
        1.0 - dist * dist * k
    }
}
