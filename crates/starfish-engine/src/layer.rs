//! Layers and the sampling engine.
//!
//! A [`Layer`] is one generator instance bound to output dimensions. Pixel
//! queries go through the sampling engine, which does the two things no
//! generator has to do for itself:
//!
//! - **Wrapping.** A point is blended with the same point one tile to the
//!   right, one tile down and one tile diagonally, weighted by its position,
//!   so opposite edges of the tile fade into each other.
//! - **Anti-aliasing.** Four points a fraction of a pixel apart are averaged,
//!   which softens hard transitions without touching smooth gradients.
//!
//! Generators that declare either capability skip the matching step.

use std::fmt;
use std::sync::Arc;

use crate::buffer::GreyBuffer;
use crate::color::MAX_CHANNEL;
use crate::error::{validate_dimensions, EngineError};
use crate::generator::{Capabilities, Generator, PointSampler};
use crate::registry::Registry;
use crate::rng::DeterministicRng;

/// A generator instance with its own random parameters.
///
/// Dropping a layer shuts its generator state down exactly once.
pub struct Layer {
    generator: Arc<dyn Generator>,
    state: Option<Box<dyn PointSampler>>,
    width: u32,
    height: u32,
    roll_x: u32,
    roll_y: u32,
}

impl Layer {
    /// Instantiate generator `index` from `registry` for a `width` x `height` output.
    ///
    /// With `roll` set, the layer's origin is moved to a random pixel so the
    /// wrap seams of stacked layers don't line up.
    pub fn new(
        registry: &Registry,
        index: usize,
        width: u32,
        height: u32,
        roll: bool,
        rng: &mut DeterministicRng,
    ) -> Result<Self, EngineError> {
        let generator = registry.get(index).ok_or(EngineError::UnknownGenerator {
            index,
            count: registry.count(),
        })?;
        Self::with_generator(generator, width, height, roll, rng)
    }

    /// Instantiate a generator that need not come from a registry.
    pub fn with_generator(
        generator: Arc<dyn Generator>,
        width: u32,
        height: u32,
        roll: bool,
        rng: &mut DeterministicRng,
    ) -> Result<Self, EngineError> {
        validate_dimensions(width, height)?;
        let state = generator.init(rng);
        let (roll_x, roll_y) = if roll {
            (rng.gen_range(0..width), rng.gen_range(0..height))
        } else {
            (0, 0)
        };
        Ok(Self {
            generator,
            state: Some(state),
            width,
            height,
            roll_x,
            roll_y,
        })
    }

    /// Output width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The origin offset as `(x, y)`.
    pub fn roll(&self) -> (u32, u32) {
        (self.roll_x, self.roll_y)
    }

    /// The generator this layer samples.
    pub fn generator(&self) -> &Arc<dyn Generator> {
        &self.generator
    }

    /// Name of the generator.
    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    /// Intensity at pixel `(x, y)`; 0 outside the layer.
    pub fn pixel(&self, x: i32, y: i32) -> u8 {
        let Some(state) = self.state.as_deref() else {
            return 0;
        };
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return 0;
        }

        let px = (x as u64 + self.roll_x as u64) % self.width as u64;
        let py = (y as u64 + self.roll_y as u64) % self.height as u64;
        let w = self.width as f64;
        let h = self.height as f64;
        let fudge = 1.0 / (w + h);

        let sampler = Sampler {
            state,
            caps: self.generator.capabilities(),
        };
        let value = sampler.anti_aliased_point(px as f64 / w, py as f64 / h, fudge);
        (value * MAX_CHANNEL as f64).clamp(0.0, MAX_CHANNEL as f64) as u8
    }

    /// Render the whole layer into a greyscale buffer.
    pub fn render(&self) -> GreyBuffer {
        GreyBuffer::from_fn(self.width, self.height, |x, y| {
            self.pixel(x as i32, y as i32)
        })
    }
}

impl Drop for Layer {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.generator.shutdown(state);
        }
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("generator", &self.generator.name())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("roll", &(self.roll_x, self.roll_y))
            .finish()
    }
}

/// Map a raw generator value into `[0, 1]`; NaN becomes 0.
#[inline]
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Generic wrap and anti-alias decorators over one generator state.
#[derive(Clone, Copy)]
struct Sampler<'a> {
    state: &'a dyn PointSampler,
    caps: Capabilities,
}

impl Sampler<'_> {
    #[inline]
    fn raw(&self, x: f64, y: f64) -> f64 {
        clamp_unit(self.state.sample(x, y))
    }

    /// A point blended with its copies in the neighbouring tiles.
    fn wrapped_point(&self, x: f64, y: f64) -> f64 {
        let home = self.raw(x, y);
        if self.caps.seamless {
            return home;
        }

        let far_x = x + 1.0;
        let far_y = y + 1.0;
        let below = self.raw(x, far_y);
        let right = self.raw(far_x, y);
        let diagonal = self.raw(far_x, far_y);

        let weight = x * y;
        let below_weight = x * (2.0 - far_y);
        let right_weight = (2.0 - far_x) * y;
        let diagonal_weight = (2.0 - far_x) * (2.0 - far_y);
        let total = weight + below_weight + right_weight + diagonal_weight;
        if total == 0.0 || !total.is_finite() {
            return home;
        }

        clamp_unit(
            (home * weight
                + below * below_weight
                + right * right_weight
                + diagonal * diagonal_weight)
                / total,
        )
    }

    /// A wrapped point, box-filtered over a `fudge`-sized square.
    fn anti_aliased_point(&self, x: f64, y: f64, fudge: f64) -> f64 {
        let value = self.wrapped_point(x, y);
        if self.caps.anti_aliased {
            return value;
        }
        let sum = value
            + self.wrapped_point(x + fudge, y)
            + self.wrapped_point(x, y + fudge)
            + self.wrapped_point(x + fudge, y + fudge);
        sum / 4.0
    }
}

/// Render generator `index` into a greyscale buffer in one step.
pub fn render_layer(
    registry: &Registry,
    index: usize,
    width: u32,
    height: u32,
    roll: bool,
    rng: &mut DeterministicRng,
) -> Result<GreyBuffer, EngineError> {
    let layer = Layer::new(registry, index, width, height, roll, rng)?;
    Ok(layer.render())
}
