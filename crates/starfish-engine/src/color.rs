//! Colour utilities for texture generation.

use serde::{Deserialize, Serialize};

use crate::rng::DeterministicRng;

/// Largest channel value.
pub const MAX_CHANNEL: u8 = 255;

/// Largest number of entries a palette may carry.
pub const MAX_PALETTE_ENTRIES: usize = 256;

/// 8-bit RGB colour.
///
/// Serialized as a `[r, g, b]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new colour.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create black.
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Create white.
    pub const fn white() -> Self {
        Self::new(MAX_CHANNEL, MAX_CHANNEL, MAX_CHANNEL)
    }

    /// Draw a colour uniformly from the full RGB space.
    pub fn random(rng: &mut DeterministicRng) -> Self {
        Self::new(
            rng.gen_range(0..=MAX_CHANNEL),
            rng.gen_range(0..=MAX_CHANNEL),
            rng.gen_range(0..=MAX_CHANNEL),
        )
    }

    /// Channel-wise complement.
    pub const fn complement(self) -> Self {
        Self::new(
            MAX_CHANNEL - self.r,
            MAX_CHANNEL - self.g,
            MAX_CHANNEL - self.b,
        )
    }

    /// Interpolate from `self` (at 0) towards `other` (at 255) by an 8-bit amount.
    ///
    /// Each channel is `self + amount * (other - self) / 255`, truncated toward zero.
    pub fn lerp8(self, other: Rgb, amount: u8) -> Rgb {
        #[inline]
        fn channel(low: u8, high: u8, amount: u8) -> u8 {
            let low = low as i32;
            let span = high as i32 - low;
            (low + amount as i32 * span / MAX_CHANNEL as i32) as u8
        }

        Rgb::new(
            channel(self.r, other.r, amount),
            channel(self.g, other.g, amount),
            channel(self.b, other.b, amount),
        )
    }

    /// Attach an alpha value.
    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// 8-bit RGBA pixel. Alpha is opacity: 255 is fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new pixel.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Convert to 8-bit RGBA bytes.
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Convert to 8-bit RGB bytes.
    pub const fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// An ordered, read-only list of colours to draw layer gradients from.
///
/// Serialized as a JSON array of `[r, g, b]` triples.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette, keeping at most [`MAX_PALETTE_ENTRIES`] colours.
    pub fn new(mut colors: Vec<Rgb>) -> Self {
        colors.truncate(MAX_PALETTE_ENTRIES);
        Self { colors }
    }

    /// Number of colours.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no colours.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The colours, in order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Copy of this palette cut down to `max` entries.
    pub fn truncated(&self, max: usize) -> Palette {
        Palette {
            colors: self.colors.iter().take(max).copied().collect(),
        }
    }

    /// Pick a colour uniformly, or `None` from an empty palette.
    pub fn pick(&self, rng: &mut DeterministicRng) -> Option<Rgb> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[rng.pick(self.colors.len())])
    }
}

impl FromIterator<Rgb> for Palette {
    fn from_iter<I: IntoIterator<Item = Rgb>>(iter: I) -> Self {
        Palette::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp8_endpoints() {
        let back = Rgb::new(0, 0, 255);
        let fore = Rgb::new(255, 0, 0);
        assert_eq!(back.lerp8(fore, 0), back);
        assert_eq!(back.lerp8(fore, 255), fore);
    }

    #[test]
    fn test_lerp8_midpoint() {
        let back = Rgb::new(0, 0, 255);
        let fore = Rgb::new(255, 0, 0);
        assert_eq!(back.lerp8(fore, 128), Rgb::new(128, 0, 127));
    }

    #[test]
    fn test_complement() {
        assert_eq!(Rgb::new(0, 100, 255).complement(), Rgb::new(255, 155, 0));
    }

    #[test]
    fn test_palette_truncates_to_max_entries() {
        let palette: Palette = (0..300).map(|i| Rgb::new((i % 256) as u8, 0, 0)).collect();
        assert_eq!(palette.len(), MAX_PALETTE_ENTRIES);
        assert_eq!(palette.truncated(10).len(), 10);
    }

    #[test]
    fn test_palette_json_round_trip() {
        let json = "[[255,0,0],[0,128,255]]";
        let palette: Palette = serde_json::from_str(json).unwrap();
        assert_eq!(palette.colors(), &[Rgb::new(255, 0, 0), Rgb::new(0, 128, 255)]);
        assert_eq!(serde_json::to_string(&palette).unwrap(), json);
    }

    #[test]
    fn test_palette_pick_is_member() {
        let palette = Palette::new(vec![Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]);
        let mut rng = DeterministicRng::new(3);
        for _ in 0..50 {
            assert!(palette.colors().contains(&palette.pick(&mut rng).unwrap()));
        }
    }
}
