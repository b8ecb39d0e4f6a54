//! Linear waves at arbitrary angles.
//!
//! Like coswave, but each wave runs along a line instead of radiating from a
//! point. Several wave packets are laid over each other and combined with one
//! interference rule. A wave may be squiggled sideways by a second wave
//! running across it.

use std::f64::consts::PI;

use super::{packed_cos, Capabilities, Generator, PackMethod, PointSampler};
use crate::rng::DeterministicRng;

const MAX_WAVE_PACKETS: usize = 3;

/// Flatwave generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flatwave;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interference {
    MostExtreme,
    LeastExtreme,
    Max,
    Min,
    Average,
}

impl Interference {
    fn random(rng: &mut DeterministicRng) -> Self {
        match rng.pick(5) {
            0 => Interference::MostExtreme,
            1 => Interference::LeastExtreme,
            2 => Interference::Max,
            3 => Interference::Min,
            _ => Interference::Average,
        }
    }

    fn start(self) -> f64 {
        match self {
            Interference::MostExtreme => 0.5,
            Interference::Min => 1.0,
            Interference::LeastExtreme | Interference::Max | Interference::Average => 0.0,
        }
    }

    fn combine(self, acc: f64, layer: f64) -> f64 {
        match self {
            Interference::MostExtreme if (layer - 0.5).abs() > (acc - 0.5).abs() => layer,
            Interference::LeastExtreme if (layer - 0.5).abs() < (acc - 0.5).abs() => layer,
            Interference::Max => acc.max(layer),
            Interference::Min => acc.min(layer),
            Interference::Average => acc + layer,
            _ => acc,
        }
    }
}

/// Sideways modulation of a wave.
#[derive(Debug, Clone, Copy)]
struct Squiggle {
    scale: f64,
    amp: f64,
    pack: PackMethod,
}

#[derive(Debug, Clone)]
struct WavePacket {
    origin_x: f64,
    origin_y: f64,
    angle: f64,
    scale: f64,
    pack: PackMethod,
    squiggle: Option<Squiggle>,
}

impl WavePacket {
    fn random(rng: &mut DeterministicRng) -> Self {
        let origin_x = rng.frand(1.0);
        let origin_y = rng.frand(1.0);
        let angle = rng.frand(PI);

        let mut scale = rng.frand_between(2.0, 30.0);
        let pack = PackMethod::random(rng);
        if pack == PackMethod::Scale {
            scale *= 2.0;
        }
        let squiggle = if rng.coin() {
            Some(Squiggle {
                scale: rng.frand_between(2.0, 30.0),
                amp: rng.frand(0.1),
                pack: PackMethod::random(rng),
            })
        } else {
            None
        };

        Self {
            origin_x,
            origin_y,
            angle,
            scale,
            pack,
            squiggle,
        }
    }

    fn value(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.origin_x;
        let dy = y - self.origin_y;
        let hyp = dx.hypot(dy);
        let mut angle = (dy / dx).atan() + self.angle;
        if dx < 0.0 {
            angle += PI;
        }
        let transverse = angle.cos() * hyp;
        let mut distance = angle.sin() * hyp;

        if let Some(squiggle) = self.squiggle {
            distance += packed_cos(transverse, squiggle.scale, squiggle.pack) * squiggle.amp;
        }
        packed_cos(distance, self.scale, self.pack)
    }
}

#[derive(Debug, Clone)]
struct FlatwaveState {
    /// Nominal packet count. One more packet than this is evaluated.
    packets: usize,
    interference: Interference,
    waves: Vec<WavePacket>,
}

impl Generator for Flatwave {
    fn name(&self) -> &'static str {
        "flatwave"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::new(false, false)
    }

    fn init(&self, rng: &mut DeterministicRng) -> Box<dyn PointSampler> {
        let packets = rng.gen_range(1..=MAX_WAVE_PACKETS);
        let interference = Interference::random(rng);
        let waves = (0..=packets).map(|_| WavePacket::random(rng)).collect();
        Box::new(FlatwaveState {
            packets,
            interference,
            waves,
        })
    }
}

impl PointSampler for FlatwaveState {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let mut out = self.interference.start();
        for wave in &self.waves {
            let layer = wave.value(x, y);
            out = if self.packets > 1 {
                self.interference.combine(out, layer)
            } else {
                layer
            };
        }
        if self.interference == Interference::Average {
            out /= self.packets as f64;
        }
        out
    }
}
