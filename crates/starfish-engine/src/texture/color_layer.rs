//! One colour layer of a texture.

use crate::color::{Rgb, Rgba, MAX_CHANNEL};
use crate::error::EngineError;
use crate::layer::Layer;

/// A greyscale image layer mapped onto a two-colour gradient, with a mask
/// for its opacity.
///
/// Without a mask layer the image doubles as its own mask.
#[derive(Debug)]
pub struct ColorLayer {
    image: Layer,
    mask: Option<Layer>,
    fore: Rgb,
    back: Rgb,
    invert_mask: bool,
    opaque: bool,
}

impl ColorLayer {
    /// Assemble a colour layer. `fore` and `back` must differ.
    pub fn new(
        image: Layer,
        mask: Option<Layer>,
        fore: Rgb,
        back: Rgb,
        invert_mask: bool,
    ) -> Result<Self, EngineError> {
        if fore == back {
            return Err(EngineError::InvalidLayers(format!(
                "fore and back colours are both {:?}",
                fore
            )));
        }
        Ok(Self {
            image,
            mask,
            fore,
            back,
            invert_mask,
            opaque: false,
        })
    }

    /// A fully opaque black-to-white layer showing `image` as is.
    pub fn opaque(image: Layer) -> Self {
        Self {
            image,
            mask: None,
            fore: Rgb::white(),
            back: Rgb::black(),
            invert_mask: false,
            opaque: true,
        }
    }

    /// The image layer.
    pub fn image(&self) -> &Layer {
        &self.image
    }

    /// The mask layer, if separate from the image.
    pub fn mask(&self) -> Option<&Layer> {
        self.mask.as_ref()
    }

    /// Colour for high image values.
    pub fn fore(&self) -> Rgb {
        self.fore
    }

    /// Colour for low image values.
    pub fn back(&self) -> Rgb {
        self.back
    }

    /// Whether the mask is inverted.
    pub fn invert_mask(&self) -> bool {
        self.invert_mask
    }

    /// This layer's own colour at `(x, y)`, with the mask as alpha.
    pub fn pixel(&self, x: i32, y: i32) -> Rgba {
        let image = self.image.pixel(x, y);
        let alpha = if self.opaque {
            MAX_CHANNEL
        } else {
            let mask = match &self.mask {
                Some(mask) => mask.pixel(x, y),
                None => image,
            };
            if self.invert_mask {
                MAX_CHANNEL - mask
            } else {
                mask
            }
        };
        self.back.lerp8(self.fore, image).with_alpha(alpha)
    }
}
