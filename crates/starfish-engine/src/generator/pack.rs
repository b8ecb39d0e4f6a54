//! Folding a cosine wave into the `[0, 1]` output range.

use std::f64::consts::PI;

use crate::rng::DeterministicRng;

/// How a `[-1, 1]` cosine is packed into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackMethod {
    /// Compress the whole range: `(cos + 1) / 2`.
    Scale,
    /// Mirror negative lobes: `|cos|`.
    FlipSign,
    /// Lift negative lobes by one.
    Truncate,
    /// Use only the falling half of each cycle, a saw-edge.
    Slope,
}

impl PackMethod {
    const ALL: [PackMethod; 4] = [
        PackMethod::Scale,
        PackMethod::FlipSign,
        PackMethod::Truncate,
        PackMethod::Slope,
    ];

    /// Pick a method uniformly.
    pub fn random(rng: &mut DeterministicRng) -> Self {
        Self::ALL[rng.pick(Self::ALL.len())]
    }
}

/// `cos(distance * scale)` packed into `[0, 1]`.
pub fn packed_cos(distance: f64, scale: f64, method: PackMethod) -> f64 {
    let raw = (distance * scale).cos();
    match method {
        PackMethod::Scale => (raw + 1.0) / 2.0,
        PackMethod::FlipSign => raw.abs(),
        PackMethod::Truncate => {
            if raw >= 0.0 {
                raw
            } else {
                raw + 1.0
            }
        }
        PackMethod::Slope => (((distance * scale) % PI).cos() + 1.0) / 2.0,
    }
}
