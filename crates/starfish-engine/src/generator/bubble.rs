//! A field of hemispheric bubbles.
//!
//! Bubbles vary in size, aspect ratio and rotation within bounds picked once
//! per field, so a field can be uniform or all over the map. A point takes
//! the highest bubble surface above it. Bubbles from the eight neighbouring
//! tiles spill over the edges, damped by their distance to the main tile, so
//! the field tiles seamlessly and stays smooth.

use std::f64::consts::{FRAC_PI_2, PI};

use super::{Capabilities, Generator, PointSampler};
use crate::rng::DeterministicRng;

const MAX_BUBBLES: usize = 32;
const MIN_BUBBLES: usize = MAX_BUBBLES / 4;
const MAX_SCALE: f64 = 0.2;

/// Bubble generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bubble;

#[derive(Debug, Clone, Copy)]
struct Bounds {
    lo: f64,
    hi: f64,
}

impl Bounds {
    fn pick(self, rng: &mut DeterministicRng) -> f64 {
        rng.frand_between(self.lo, self.hi)
    }
}

#[derive(Debug, Clone, Copy)]
struct BubbleShape {
    x: f64,
    y: f64,
    scale: f64,
    squish: f64,
    angle: f64,
}

impl BubbleShape {
    /// Height of this bubble at `(x, y)`; negative outside it.
    fn height(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        let hyp = dx.hypot(dy);
        let mut angle = (dy / dx).atan() + self.angle;
        if dx < 0.0 {
            angle += PI;
        }
        let tx = angle.cos() * hyp * self.squish;
        let ty = angle.sin() * hyp / self.squish;
        let r = tx.hypot(ty);
        1.0 - r * r / self.scale
    }
}

#[derive(Debug, Clone)]
struct BubbleField {
    bubbles: Vec<BubbleShape>,
}

fn random_squish(rng: &mut DeterministicRng) -> f64 {
    if rng.coin() {
        let squish = rng.frand_between(1.0, 4.0);
        if rng.coin() {
            1.0 / squish
        } else {
            squish
        }
    } else {
        1.0
    }
}

impl Generator for Bubble {
    fn name(&self) -> &'static str {
        "bubble"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::new(true, true)
    }

    fn init(&self, rng: &mut DeterministicRng) -> Box<dyn PointSampler> {
        let count = rng.gen_range(MIN_BUBBLES..MAX_BUBBLES);
        let scale = Bounds {
            lo: rng.frand(MAX_SCALE),
            hi: rng.frand(MAX_SCALE),
        };
        let squish = Bounds {
            lo: random_squish(rng),
            hi: random_squish(rng),
        };
        let angle = Bounds {
            lo: rng.frand(FRAC_PI_2),
            hi: rng.frand(FRAC_PI_2),
        };

        let bubbles = (0..count)
            .map(|_| BubbleShape {
                x: rng.frand(1.0),
                y: rng.frand(1.0),
                scale: scale.pick(rng),
                squish: squish.pick(rng),
                angle: angle.pick(rng),
            })
            .collect();
        Box::new(BubbleField { bubbles })
    }
}

impl BubbleField {
    fn tile_value(&self, x: f64, y: f64) -> f64 {
        self.bubbles
            .iter()
            .map(|b| b.height(x, y))
            .fold(0.0, |best, h| if h > best { h } else { best })
    }
}

impl PointSampler for BubbleField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let neighbours = [
            (1.0, 0.0, 1.0 - x),
            (-1.0, 0.0, x),
            (0.0, 1.0, 1.0 - y),
            (0.0, -1.0, y),
            (1.0, 1.0, (1.0 - x) * (1.0 - y)),
            (1.0, -1.0, (1.0 - x) * y),
            (-1.0, 1.0, x * (1.0 - y)),
            (-1.0, -1.0, x * y),
        ];
        let mut best = self.tile_value(x, y);
        for (ox, oy, damping) in neighbours {
            let v = self.tile_value(x + ox, y + oy) * damping;
            if v > best {
                best = v;
            }
        }
        best
    }
}
