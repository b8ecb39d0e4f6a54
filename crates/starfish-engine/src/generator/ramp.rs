//! Predictable test pattern: `exp(x * y)`.

use super::{Capabilities, Generator, PointSampler};
use crate::rng::DeterministicRng;

/// Ramp generator. Has no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ramp;

#[derive(Debug, Clone, Copy)]
struct RampState;

impl Generator for Ramp {
    fn name(&self) -> &'static str {
        "ramp"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::new(false, false)
    }

    fn init(&self, _rng: &mut DeterministicRng) -> Box<dyn PointSampler> {
        Box::new(RampState)
    }
}

impl PointSampler for RampState {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (x * y).exp()
    }
}
