//! Texture composer.
//!
//! A texture is a short stack of colour layers. Each pixel is composited
//! front to back: every further layer goes *behind* what has been
//! accumulated so far and only shows through where the stack is not yet
//! opaque. Once the accumulated opacity is within the texture's cutoff of
//! fully opaque, deeper layers are skipped.

mod color_layer;

pub use color_layer::ColorLayer;

use std::ops::Range;

use log::{debug, trace, warn};

use crate::buffer::{BufferError, PixelBuffer};
use crate::color::{Palette, Rgb, Rgba, MAX_CHANNEL};
use crate::config::EngineConfig;
use crate::error::{validate_dimensions, EngineError};
use crate::layer::Layer;
use crate::registry::Registry;
use crate::rng::DeterministicRng;

/// A composited stack of colour layers.
#[derive(Debug)]
pub struct Texture {
    layers: Vec<ColorLayer>,
    width: u32,
    height: u32,
    cutoff: u8,
    palette: Option<Palette>,
}

impl Texture {
    /// Build a random texture from the generator table named in `config`.
    pub fn new(
        width: u32,
        height: u32,
        palette: Option<&Palette>,
        config: &EngineConfig,
        rng: &mut DeterministicRng,
    ) -> Result<Self, EngineError> {
        let registry = Registry::load_set(config.generators);
        Self::with_registry(&registry, width, height, palette, config, rng)
    }

    /// Build a random texture drawing generators from `registry`.
    ///
    /// On failure every layer built so far is dropped before returning.
    pub fn with_registry(
        registry: &Registry,
        width: u32,
        height: u32,
        palette: Option<&Palette>,
        config: &EngineConfig,
        rng: &mut DeterministicRng,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        validate_dimensions(width, height)?;
        if registry.is_empty() {
            return Err(EngineError::EmptyRegistry);
        }

        let count = rng.gen_range(config.min_layers..=config.max_layers);
        let cutoff = rng.gen_range(0..config.cutoff_range) as u8;
        let palette = palette
            .filter(|p| p.len() >= 2)
            .map(|p| p.truncated(config.max_palette_entries));
        debug!(
            "creating {}x{} texture: {} layers, cutoff {}, palette {}",
            width,
            height,
            count,
            cutoff,
            palette.as_ref().map_or(0, Palette::len)
        );

        let generators = registry.count();
        let mut layers = Vec::with_capacity(count);
        for index in 0..count {
            let image = Layer::new(
                registry,
                rng.pick(generators),
                width,
                height,
                config.roll_texture,
                rng,
            )?;
            let mask = if rng.coin() {
                Some(Layer::new(
                    registry,
                    rng.pick(generators),
                    width,
                    height,
                    config.roll_texture,
                    rng,
                )?)
            } else {
                None
            };
            let invert_mask = rng.coin();
            let (fore, back) = pick_gradient(palette.as_ref(), config.max_color_retries, rng);

            trace!(
                "layer {}: image {}, mask {}, invert {}, {:?} -> {:?}",
                index,
                image.generator_name(),
                mask.as_ref().map_or("none", |m| m.generator_name()),
                invert_mask,
                back,
                fore
            );
            layers.push(ColorLayer::new(image, mask, fore, back, invert_mask)?);
        }

        Ok(Self {
            layers,
            width,
            height,
            cutoff,
            palette,
        })
    }

    /// A texture with exactly one opaque black-to-white layer of generator `index`.
    ///
    /// Shows a single generator as the compositor sees it.
    pub fn single_layer(
        registry: &Registry,
        index: usize,
        width: u32,
        height: u32,
        config: &EngineConfig,
        rng: &mut DeterministicRng,
    ) -> Result<Self, EngineError> {
        let image = Layer::new(registry, index, width, height, config.roll_texture, rng)?;
        debug!(
            "creating {}x{} single-layer texture with {}",
            width,
            height,
            image.generator_name()
        );
        Ok(Self {
            layers: vec![ColorLayer::opaque(image)],
            width,
            height,
            cutoff: 0,
            palette: None,
        })
    }

    /// Assemble a texture from prepared layers.
    ///
    /// Layers are composited in order, so `layers[0]` ends up on top.
    pub fn from_layers(layers: Vec<ColorLayer>, cutoff: u8) -> Result<Self, EngineError> {
        let (width, height) = match layers.first() {
            Some(first) => (first.image().width(), first.image().height()),
            None => {
                return Err(EngineError::InvalidLayers(
                    "a texture needs at least one layer".into(),
                ))
            }
        };
        for (i, layer) in layers.iter().enumerate() {
            let sizes = std::iter::once(layer.image()).chain(layer.mask());
            for l in sizes {
                if (l.width(), l.height()) != (width, height) {
                    return Err(EngineError::InvalidLayers(format!(
                        "layer {} is {}x{}, expected {}x{}",
                        i,
                        l.width(),
                        l.height(),
                        width,
                        height
                    )));
                }
            }
        }
        Ok(Self {
            layers,
            width,
            height,
            cutoff,
            palette: None,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Early-exit slack: how far short of opaque still counts as opaque.
    pub fn cutoff(&self) -> u8 {
        self.cutoff
    }

    /// The colour layers, topmost first.
    pub fn layers(&self) -> &[ColorLayer] {
        &self.layers
    }

    /// The palette colours were drawn from, if any.
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Composited colour at `(x, y)`; transparent black outside the texture.
    pub fn pixel(&self, x: i32, y: i32) -> Rgba {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Rgba::transparent();
        }

        let max = MAX_CHANNEL as i32;
        let cutoff = self.cutoff as i32;
        let (mut r, mut g, mut b, mut a) = (0i32, 0i32, 0i32, 0i32);
        for layer in &self.layers {
            let px = layer.pixel(x, y);
            let behind = max - a;
            r = (r * a + px.r as i32 * behind) / max;
            g = (g * a + px.g as i32 * behind) / max;
            b = (b * a + px.b as i32 * behind) / max;

            let contribution = px.a as i32 * behind / max;
            if a + contribution + cutoff >= max {
                a = max;
                break;
            }
            a += contribution;
        }
        Rgba::new(r as u8, g as u8, b as u8, a as u8)
    }

    /// Render the whole texture.
    pub fn render(&self) -> PixelBuffer {
        PixelBuffer::from_fn(self.width, self.height, |x, y| {
            self.pixel(x as i32, y as i32)
        })
    }

    /// Render a band of rows, e.g. one thread's share of the image.
    ///
    /// Row `0` of the result is texture row `rows.start`.
    pub fn render_rows(&self, rows: Range<u32>) -> Result<PixelBuffer, EngineError> {
        if rows.start >= rows.end || rows.end > self.height {
            return Err(BufferError::OutOfBounds {
                x: 0,
                y: rows.end.max(rows.start),
                width: self.width,
                height: self.height,
            }
            .into());
        }
        let start = rows.start;
        Ok(PixelBuffer::from_fn(self.width, rows.end - start, |x, y| {
            self.pixel(x as i32, (start + y) as i32)
        }))
    }
}

fn pick_color(palette: Option<&Palette>, rng: &mut DeterministicRng) -> Rgb {
    match palette.and_then(|p| p.pick(rng)) {
        Some(color) => color,
        None => Rgb::random(rng),
    }
}

/// Pick a `(fore, back)` gradient with distinct ends.
///
/// The fore colour is re-drawn up to `retries` times; after that it is
/// forced to the complement of the back colour.
fn pick_gradient(
    palette: Option<&Palette>,
    retries: u32,
    rng: &mut DeterministicRng,
) -> (Rgb, Rgb) {
    let back = pick_color(palette, rng);
    for _ in 0..retries {
        let fore = pick_color(palette, rng);
        if fore != back {
            return (fore, back);
        }
    }
    warn!(
        "no colour distinct from {:?} after {} picks; using its complement",
        back, retries
    );
    // 255 - c == c has no integer solution, so the complement always differs.
    (back.complement(), back)
}

/// Build a random texture, render it, and drop it.
pub fn render_texture(
    width: u32,
    height: u32,
    palette: Option<&Palette>,
    config: &EngineConfig,
    rng: &mut DeterministicRng,
) -> Result<PixelBuffer, EngineError> {
    let texture = Texture::new(width, height, palette, config, rng)?;
    Ok(texture.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque_texture(seed: u32) -> Texture {
        Texture::single_layer(
            &Registry::load(),
            0,
            16,
            16,
            &EngineConfig::default(),
            &mut DeterministicRng::new(seed),
        )
        .unwrap()
    }

    #[test]
    fn test_layer_count_and_cutoff_bounds() {
        let config = EngineConfig::default();
        for seed in 0..30 {
            let tex = Texture::new(8, 8, None, &config, &mut DeterministicRng::new(seed)).unwrap();
            assert!((2..=6).contains(&tex.layers().len()));
            assert!(tex.cutoff() < 16);
        }
    }

    #[test]
    fn test_oversized_layer_count_fails() {
        let config = EngineConfig {
            min_layers: usize::MAX,
            max_layers: usize::MAX,
            ..EngineConfig::default()
        };
        let err = Texture::new(4, 4, None, &config, &mut DeterministicRng::new(1)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_registry_fails() {
        let err = Texture::with_registry(
            &Registry::empty(),
            8,
            8,
            None,
            &EngineConfig::default(),
            &mut DeterministicRng::new(1),
        )
        .unwrap_err();
        assert_eq!(err, EngineError::EmptyRegistry);
    }

    #[test]
    fn test_zero_size_fails() {
        let err = Texture::new(
            0,
            8,
            None,
            &EngineConfig::default(),
            &mut DeterministicRng::new(1),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_small_palette_is_ignored() {
        let palette = Palette::new(vec![Rgb::new(9, 9, 9)]);
        let tex = Texture::new(
            8,
            8,
            Some(&palette),
            &EngineConfig::default(),
            &mut DeterministicRng::new(2),
        )
        .unwrap();
        assert!(tex.palette().is_none());
    }

    #[test]
    fn test_full_palette_is_truncated() {
        let palette: Palette = (0..=255u8).map(|i| Rgb::new(i, i, 255 - i)).collect();
        assert_eq!(palette.len(), 256);
        let tex = Texture::new(
            8,
            8,
            Some(&palette),
            &EngineConfig::default(),
            &mut DeterministicRng::new(2),
        )
        .unwrap();
        assert_eq!(tex.palette().map(Palette::len), Some(255));
    }

    #[test]
    fn test_gradient_falls_back_to_complement() {
        let palette = Palette::new(vec![Rgb::new(10, 20, 30), Rgb::new(10, 20, 30)]);
        let (fore, back) = pick_gradient(Some(&palette), 4, &mut DeterministicRng::new(0));
        assert_eq!(back, Rgb::new(10, 20, 30));
        assert_eq!(fore, Rgb::new(245, 235, 225));
    }

    #[test]
    fn test_single_layer_is_opaque_grey() {
        let tex = opaque_texture(5);
        assert_eq!(tex.layers().len(), 1);
        let image = tex.layers()[0].image();
        for (x, y) in [(0, 0), (3, 7), (15, 15)] {
            let v = image.pixel(x, y);
            assert_eq!(tex.pixel(x, y), Rgba::new(v, v, v, 255));
        }
    }

    #[test]
    fn test_out_of_bounds_is_transparent() {
        let tex = opaque_texture(5);
        assert_eq!(tex.pixel(-1, 0), Rgba::transparent());
        assert_eq!(tex.pixel(16, 0), Rgba::transparent());
        assert_eq!(tex.pixel(0, 16), Rgba::transparent());
    }

    #[test]
    fn test_render_rows_band() {
        let tex = opaque_texture(6);
        let band = tex.render_rows(4..7).unwrap();
        assert_eq!((band.width(), band.height()), (16, 3));
        assert_eq!(band.get(2, 0).unwrap(), tex.pixel(2, 4));
        assert_eq!(band.get(9, 2).unwrap(), tex.pixel(9, 6));
        assert!(tex.render_rows(10..17).is_err());
        assert!(tex.render_rows(5..5).is_err());
    }

    #[test]
    fn test_from_layers_requires_layers() {
        assert!(matches!(
            Texture::from_layers(Vec::new(), 0),
            Err(EngineError::InvalidLayers(_))
        ));
    }
}
