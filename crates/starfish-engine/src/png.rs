//! Deterministic PNG writer.
//!
//! Fixed compression and filter settings, no timestamps: the same buffer
//! always encodes to the same bytes, so a seed can be checked by hash.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

use crate::buffer::{GreyBuffer, PixelBuffer};

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),
}

/// PNG export configuration.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level.
    pub compression: Compression,
    /// Row filter.
    pub filter: FilterType,
    /// Drop the alpha channel of colour buffers.
    pub opaque: bool,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
            opaque: false,
        }
    }
}

impl PngConfig {
    /// Faster encoding, larger files.
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
            opaque: false,
        }
    }

    /// Same settings, writing RGB instead of RGBA.
    pub fn without_alpha(mut self) -> Self {
        self.opaque = true;
        self
    }
}

fn encode<W: Write>(
    writer: W,
    width: u32,
    height: u32,
    color: ColorType,
    data: &[u8],
    config: &PngConfig,
) -> Result<(), PngError> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(data)?;
    Ok(())
}

/// Write a colour buffer to any writer.
pub fn write_pixels_to_writer<W: Write>(
    buffer: &PixelBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if config.opaque {
        encode(
            writer,
            buffer.width(),
            buffer.height(),
            ColorType::Rgb,
            &buffer.to_rgb8(),
            config,
        )
    } else {
        encode(
            writer,
            buffer.width(),
            buffer.height(),
            ColorType::Rgba,
            &buffer.to_rgba8(),
            config,
        )
    }
}

/// Write a colour buffer to a PNG file.
pub fn write_pixels(
    buffer: &PixelBuffer,
    path: &Path,
    config: &PngConfig,
) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    write_pixels_to_writer(buffer, writer, config)
}

/// Write a greyscale buffer to any writer.
pub fn write_grey_to_writer<W: Write>(
    buffer: &GreyBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    encode(
        writer,
        buffer.width(),
        buffer.height(),
        ColorType::Grayscale,
        buffer.as_bytes(),
        config,
    )
}

/// Write a greyscale buffer to a PNG file.
pub fn write_grey(
    buffer: &GreyBuffer,
    path: &Path,
    config: &PngConfig,
) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    write_grey_to_writer(buffer, writer, config)
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Encode a colour buffer in memory and return the bytes with their hash.
pub fn write_pixels_to_vec_with_hash(
    buffer: &PixelBuffer,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_pixels_to_writer(buffer, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

/// Encode a greyscale buffer in memory and return the bytes with their hash.
pub fn write_grey_to_vec_with_hash(
    buffer: &GreyBuffer,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_grey_to_writer(buffer, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}
