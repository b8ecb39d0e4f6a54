//! Point generators.
//!
//! A generator is an algorithm that maps a 2D point to an intensity. The
//! texture covers `[0, 1)` in both directions, but the engine's wrap logic
//! also asks for points up to one tile away, so every generator must return
//! sane values for coordinates roughly in `[-1, 2]`.
//!
//! Generators never have to worry about tiling or anti-aliasing: the engine
//! applies both generically. A generator that handles either itself (for
//! speed or for a better look) says so through its [`Capabilities`], and the
//! engine skips that step for it.

mod branchfrac;
mod bubble;
mod coswave;
mod flatwave;
mod galaxy;
mod pack;
mod ramp;
mod rangefrac;
mod spinflake;

pub use branchfrac::Branchfrac;
pub use bubble::Bubble;
pub use coswave::Coswave;
pub use flatwave::Flatwave;
pub use galaxy::Galaxy;
pub use pack::{packed_cos, PackMethod};
pub use ramp::Ramp;
pub use rangefrac::Rangefrac;
pub use spinflake::Spinflake;

use std::sync::Arc;

use crate::rng::DeterministicRng;

/// What a generator handles on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities {
    /// Output is already smooth; skip supersampling.
    pub anti_aliased: bool,
    /// Output already matches at opposite tile edges; skip wrap blending.
    pub seamless: bool,
}

impl Capabilities {
    /// Create a capability pair.
    pub const fn new(anti_aliased: bool, seamless: bool) -> Self {
        Self {
            anti_aliased,
            seamless,
        }
    }
}

/// Per-instance generator state: the randomized parameters of one layer.
pub trait PointSampler: Send + Sync {
    /// Sample the intensity at `(x, y)`.
    ///
    /// Should return a value in `[0, 1]`; anything else is clamped by the
    /// engine. Must not draw randomness: equal inputs give equal outputs.
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// A registered generator algorithm.
pub trait Generator: Send + Sync {
    /// Short, stable name.
    fn name(&self) -> &'static str;

    /// What the generator handles itself.
    fn capabilities(&self) -> Capabilities;

    /// Pick random parameters for a new layer.
    fn init(&self, rng: &mut DeterministicRng) -> Box<dyn PointSampler>;

    /// Release a layer's state. Called exactly once per `init`.
    fn shutdown(&self, state: Box<dyn PointSampler>) {
        drop(state);
    }
}

/// Generators shipped in the production table.
pub fn production_generators() -> Vec<Arc<dyn Generator>> {
    vec![
        Arc::new(Coswave),
        Arc::new(Spinflake),
        Arc::new(Rangefrac),
        Arc::new(Flatwave),
        Arc::new(Bubble),
    ]
}

/// Generators that work but are kept out of the production table.
pub fn experimental_generators() -> Vec<Arc<dyn Generator>> {
    vec![Arc::new(Branchfrac), Arc::new(Galaxy), Arc::new(Ramp)]
}

/// Polar angle of `(x, y)` in the half-plane convention the generators share:
/// `atan(y / x)`, so opposite quadrants map onto the same angle.
#[inline]
pub(crate) fn half_angle(x: f64, y: f64) -> f64 {
    (y / x).atan()
}
