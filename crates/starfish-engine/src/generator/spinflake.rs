//! Rotationally symmetric flakes.
//!
//! A circle of random radius is perturbed by one to three "florets", each a
//! sine wave around the circle with its own spine count and twirl. A point's
//! value is its distance to that outline, relative to the outline's distance
//! from the origin: `sqrt` of it inside the shape, `1 - 1/(1 + d)` outside.
//!
//! Engine wrapping flattens the contrast of these shapes, so spinflake blends
//! the far half of the tile with the neighbouring tile itself.

use std::f64::consts::{FRAC_PI_2, PI};

use super::{half_angle, Capabilities, Generator, PointSampler};
use crate::rng::DeterministicRng;

const MAX_FLORETS: usize = 3;
const MAX_SPINES: u32 = 16;
const MAX_TWIRL: f64 = 14.0;
const MAX_SINE_AMP: f64 = 4.0;

/// Spinflake generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spinflake;

/// How a floret folds its sine into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SineFold {
    Compress,
    Truncate,
    Absolute,
    Sawblade,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Twirl {
    None,
    Curve { speed: f64, amp: f64 },
    Sine { speed: f64, amp: f64 },
}

#[derive(Debug, Clone)]
struct Floret {
    fold: SineFold,
    backward: bool,
    spines: u32,
    spine_radius: f64,
    twirl_base: f64,
    twirl: Twirl,
}

impl Floret {
    fn random(rng: &mut DeterministicRng) -> Self {
        let fold = match rng.pick(4) {
            0 => SineFold::Compress,
            1 => SineFold::Truncate,
            2 => SineFold::Absolute,
            _ => SineFold::Sawblade,
        };
        let backward = rng.coin();
        let mut spines = rng.gen_range(1..MAX_SPINES);
        // Only the absolute fold is symmetric for odd spine counts.
        if fold != SineFold::Absolute && spines % 2 == 1 {
            spines += 1;
        }
        let spine_radius = rng.frand(0.5);
        let twirl_base = rng.frand(PI);
        let twirl = match rng.pick(4) {
            1 => Twirl::Curve {
                speed: rng.frand(MAX_TWIRL * 2.0) - MAX_TWIRL,
                amp: rng.frand(MAX_SINE_AMP * 2.0) - MAX_SINE_AMP,
            },
            2 => Twirl::Sine {
                speed: rng.frand(MAX_TWIRL * PI),
                amp: rng.frand(MAX_SINE_AMP * 2.0) - MAX_SINE_AMP,
            },
            // Acceleration never got a formula; it twirls like none.
            _ => Twirl::None,
        };
        Self {
            fold,
            backward,
            spines,
            spine_radius,
            twirl_base,
            twirl,
        }
    }

    fn folded_sin(&self, theta: f64) -> f64 {
        let raw = theta.sin();
        let out = match self.fold {
            SineFold::Compress => (raw + 1.0) / 2.0,
            SineFold::Absolute => raw.abs(),
            SineFold::Truncate => {
                if raw < 0.0 {
                    raw + 1.0
                } else {
                    raw
                }
            }
            SineFold::Sawblade => (theta / 4.0).rem_euclid(FRAC_PI_2).sin(),
        };
        if self.backward {
            1.0 - out
        } else {
            out
        }
    }

    /// Distance this floret adds to the outline at angle `theta`.
    fn wave(&self, theta: f64, dist: f64) -> f64 {
        let base = theta * self.spines as f64 + self.twirl_base;
        let param = match self.twirl {
            Twirl::None => base,
            Twirl::Curve { speed, amp } => base + dist * (speed + dist * amp),
            Twirl::Sine { speed, amp } => base + (dist * speed).sin() * (amp + dist * amp),
        };
        self.folded_sin(param) * self.spine_radius
    }
}

#[derive(Debug, Clone)]
struct SpinflakeState {
    origin_x: f64,
    origin_y: f64,
    radius: f64,
    squish: f64,
    twist: f64,
    average_florets: bool,
    florets: Vec<Floret>,
}

impl Generator for Spinflake {
    fn name(&self) -> &'static str {
        "spinflake"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::new(false, true)
    }

    fn init(&self, rng: &mut DeterministicRng) -> Box<dyn PointSampler> {
        let origin_x = rng.frand(1.0);
        let origin_y = rng.frand(1.0);
        let radius = rng.frand(0.5);
        let squish = 0.25 + rng.frand(2.75);
        let twist = rng.frand(PI);
        let average_florets = rng.coin();
        let count = rng.gen_range(1..=MAX_FLORETS);
        let florets = (0..count).map(|_| Floret::random(rng)).collect();
        Box::new(SpinflakeState {
            origin_x,
            origin_y,
            radius,
            squish,
            twist,
            average_florets,
            florets,
        })
    }
}

impl SpinflakeState {
    fn raw_point(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.origin_x;
        let dy = y - self.origin_y;
        let hyp = dx.hypot(dy);
        if hyp == 0.0 {
            return 1.0;
        }
        let angle = half_angle(dx, dy) + self.twist;
        let rx = angle.cos() * hyp;
        let ry = angle.sin() * hyp;

        let origin_dist = (rx * self.squish).hypot(ry / self.squish);
        if origin_dist == 0.0 {
            return 1.0;
        }

        let theta = half_angle(rx, ry);
        let mut edge_dist = self.radius;
        for floret in &self.florets {
            edge_dist += floret.wave(theta, origin_dist);
        }
        if self.average_florets {
            edge_dist /= self.florets.len() as f64;
        }

        let proportion = (edge_dist - origin_dist) / edge_dist;
        if proportion >= 0.0 {
            proportion.sqrt()
        } else {
            1.0 - 1.0 / (1.0 - proportion)
        }
    }

    fn vtiled_point(&self, x: f64, y: f64) -> f64 {
        let point = self.raw_point(x, y);
        if y > 0.5 {
            let far_weight = (y - 0.5) * 2.0;
            point * (1.0 - far_weight) + self.raw_point(x, y - 1.0) * far_weight
        } else {
            point
        }
    }
}

impl PointSampler for SpinflakeState {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let point = self.vtiled_point(x, y);
        if x > 0.5 {
            let far_weight = (x - 0.5) * 2.0;
            point * (1.0 - far_weight) + self.vtiled_point(x - 1.0, y) * far_weight
        } else {
            point
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(seed: u32) -> SpinflakeState {
        let mut rng = DeterministicRng::new(seed);
        let origin_x = rng.frand(1.0);
        let origin_y = rng.frand(1.0);
        SpinflakeState {
            origin_x,
            origin_y,
            radius: 0.3,
            squish: 1.0,
            twist: 0.0,
            average_florets: false,
            florets: vec![Floret::random(&mut rng)],
        }
    }

    #[test]
    fn test_origin_is_white() {
        let s = state(4);
        assert_eq!(s.raw_point(s.origin_x, s.origin_y), 1.0);
    }

    #[test]
    fn test_even_spines_unless_absolute() {
        let mut rng = DeterministicRng::new(9);
        for _ in 0..200 {
            let f = Floret::random(&mut rng);
            assert!((1..=MAX_SPINES).contains(&f.spines));
            if f.fold != SineFold::Absolute {
                assert_eq!(f.spines % 2, 0);
            }
        }
    }

    #[test]
    fn test_samples_are_finite() {
        let mut rng = DeterministicRng::new(12);
        for _ in 0..100 {
            let s = Spinflake.init(&mut rng);
            let v = s.sample(0.25, 0.75);
            assert!(v.is_nan() || v.is_finite());
        }
    }

    #[test]
    fn test_horizontal_edges_match() {
        let s = Spinflake.init(&mut DeterministicRng::new(21));
        for i in 0..10 {
            let y = i as f64 / 10.0 + 0.03;
            let left = s.sample(0.0, y);
            let right = s.sample(1.0, y);
            if left.is_finite() && right.is_finite() {
                assert!((left - right).abs() < 1e-9, "{} vs {}", left, right);
            }
        }
    }

    #[test]
    fn test_sawblade_fold_in_range() {
        let floret = Floret {
            fold: SineFold::Sawblade,
            backward: false,
            spines: 4,
            spine_radius: 0.2,
            twirl_base: 0.0,
            twirl: Twirl::None,
        };
        for i in -50..50 {
            let v = floret.folded_sin(i as f64 * 0.3);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
