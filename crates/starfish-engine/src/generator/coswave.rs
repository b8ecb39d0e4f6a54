//! Radial cosine waves around a random origin.
//!
//! The simplest generator, and with edge wrapping one of the most versatile:
//! the distance to the origin is squished along a random axis and run
//! through a cosine. Roughly one layer in 64 gets an accelerating wavescale,
//! which turns into moiré chaos once the wavelength drops under a pixel.

use std::f64::consts::PI;

use super::{packed_cos, Capabilities, Generator, PackMethod, PointSampler};
use crate::rng::DeterministicRng;

/// Coswave generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coswave;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Accel {
    None,
    Linear(f64),
}

#[derive(Debug, Clone)]
struct CoswaveState {
    origin_x: f64,
    origin_y: f64,
    wavescale: f64,
    squish: f64,
    sqangle: f64,
    distortion: f64,
    pack: PackMethod,
    accel: Accel,
}

impl Generator for Coswave {
    fn name(&self) -> &'static str {
        "coswave"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::new(false, false)
    }

    fn init(&self, rng: &mut DeterministicRng) -> Box<dyn PointSampler> {
        let origin_x = rng.frand(1.0);
        let origin_y = rng.frand(1.0);
        let pack = PackMethod::random(rng);

        let rare = (0..6).all(|_| rng.coin());
        let accel = if rare {
            Accel::Linear(rng.frand(2.0) + 1.0)
        } else {
            Accel::None
        };

        // Scale packing keeps only one peak per cycle, the others fold troughs
        // into peaks too.
        let mut wavescale = rng.frand(25.0) + 1.0;
        if pack == PackMethod::Scale {
            wavescale *= 2.0;
        }

        let mut squish = rng.frand(2.0) + 0.5;
        if rng.coin() {
            squish = -squish;
        }
        let sqangle = rng.frand(PI);
        let distortion = rng.frand(1.5) + 0.5;

        Box::new(CoswaveState {
            origin_x,
            origin_y,
            wavescale,
            squish,
            sqangle,
            distortion,
            pack,
            accel,
        })
    }
}

impl PointSampler for CoswaveState {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.origin_x;
        let dy = y - self.origin_y;
        let angle = ((dy / dx) * self.distortion).atan() + self.sqangle;
        let hyp = dx.hypot(dy);
        let rx = angle.cos() * hyp;
        let ry = angle.sin() * hyp;

        let distance = (rx * self.squish).hypot(ry / self.squish);
        let scale = match self.accel {
            Accel::None => self.wavescale,
            Accel::Linear(accel) => self.wavescale.powf(distance * accel),
        };
        packed_cos(distance, scale, self.pack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_in_range() {
        for seed in 0..20 {
            let state = Coswave.init(&mut DeterministicRng::new(seed));
            for i in 0..100 {
                let x = i as f64 / 33.0 - 1.0;
                let y = 2.0 - i as f64 / 40.0;
                let v = state.sample(x, y);
                assert!(v.is_nan() || (0.0..=1.0).contains(&v), "got {}", v);
            }
        }
    }

    #[test]
    fn test_seeds_differ() {
        let a = Coswave.init(&mut DeterministicRng::new(1));
        let b = Coswave.init(&mut DeterministicRng::new(2));
        let differs = (0..32).any(|i| {
            let p = i as f64 / 32.0 + 0.01;
            a.sample(p, 0.3) != b.sample(p, 0.3)
        });
        assert!(differs);
    }
}
