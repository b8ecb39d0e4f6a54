//! Starfish Seamless Texture Engine
//!
//! Builds seamless, tileable wallpaper textures by stacking layers of
//! procedural point generators. Every structural and colour choice is drawn
//! from a [`DeterministicRng`], so a seed always reproduces its texture.
//!
//! # Pieces
//!
//! - **Generators**: coswave, spinflake, rangefrac, flatwave, bubble, plus
//!   the experimental branchfrac, galaxy and ramp
//! - **Registry**: the fixed generator table layers pick from
//! - **Layer**: one generator instance with wrap blending and anti-aliasing
//!   applied generically
//! - **Texture**: 2 to 6 colour layers composited front to back with an
//!   early-exit opacity cutoff
//! - **Buffers and PNG**: greyscale and RGBA rasters with deterministic
//!   PNG export
//!
//! # Example
//!
//! ```no_run
//! use starfish_engine::{render_texture, DeterministicRng, EngineConfig};
//! use starfish_engine::png::{write_pixels, PngConfig};
//! use std::path::Path;
//!
//! let mut rng = DeterministicRng::new(42);
//! let pixels = render_texture(256, 256, None, &EngineConfig::default(), &mut rng).unwrap();
//! write_pixels(&pixels, Path::new("starfish.png"), &PngConfig::default()).unwrap();
//! ```
//!
//! Pixels can also be pulled one at a time through [`Texture::pixel`],
//! which gives the same result as the one-step path for the same seed.

pub mod buffer;
pub mod color;
pub mod config;
pub mod error;
pub mod generator;
pub mod layer;
pub mod png;
pub mod registry;
pub mod rng;
pub mod texture;

pub use buffer::{BufferError, GreyBuffer, PixelBuffer, Raster};
pub use color::{Palette, Rgb, Rgba};
pub use config::{EngineConfig, GeneratorSet};
pub use error::EngineError;
pub use generator::{Capabilities, Generator, PointSampler};
pub use layer::{render_layer, Layer};
pub use png::{PngConfig, PngError};
pub use registry::Registry;
pub use rng::DeterministicRng;
pub use texture::{render_texture, ColorLayer, Texture};
