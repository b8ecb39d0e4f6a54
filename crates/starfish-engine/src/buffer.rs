//! Greyscale and RGBA pixel buffers.
//!
//! Both buffers are row-major grids with bounds-checked accessors. The engine
//! only ever writes into them; callers that want pixels one at a time can skip
//! buffers entirely and query a [`Texture`](crate::texture::Texture) directly.

use thiserror::Error;

use crate::color::{Rgb, Rgba, MAX_CHANNEL};

/// Errors from buffer access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Invalid buffer dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Position ({x}, {y}) is outside a {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// A 2D grid of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

/// Single-channel 8-bit buffer.
pub type GreyBuffer = Raster<u8>;

/// RGBA 8-bit buffer.
pub type PixelBuffer = Raster<Rgba>;

impl<T: Copy + Default> Raster<T> {
    /// Create a buffer filled with the default value (black / transparent).
    pub fn new(width: u32, height: u32) -> Result<Self, BufferError> {
        Self::filled(width, height, T::default())
    }

    /// Create a buffer filled with `fill`.
    pub fn filled(width: u32, height: u32, fill: T) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![fill; width as usize * height as usize],
        })
    }

    /// Build a buffer by evaluating `f(x, y)` in row-major order.
    ///
    /// Callers must have validated that both dimensions are non-zero.
    pub(crate) fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All values, row-major.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Result<usize, BufferError> {
        if x >= self.width || y >= self.height {
            return Err(BufferError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Get a value.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Result<T, BufferError> {
        let idx = self.index(x, y)?;
        Ok(self.data[idx])
    }

    /// Set a value.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: T) -> Result<(), BufferError> {
        let idx = self.index(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Fill every position with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Direct access to one row, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.data[start..start + self.width as usize])
    }

    /// Direct mutable access to one row, or `None` past the last row.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [T]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        let width = self.width as usize;
        Some(&mut self.data[start..start + width])
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.width as usize)
    }

    /// Copy `dest.len()` values out of row `y`, starting at column `start`.
    pub fn read_row(&self, start: u32, y: u32, dest: &mut [T]) -> Result<(), BufferError> {
        let span = self.row_span(start, y, dest.len())?;
        dest.copy_from_slice(&self.data[span]);
        Ok(())
    }

    /// Copy `src` into row `y`, starting at column `start`.
    pub fn write_row(&mut self, start: u32, y: u32, src: &[T]) -> Result<(), BufferError> {
        let span = self.row_span(start, y, src.len())?;
        self.data[span].copy_from_slice(src);
        Ok(())
    }

    fn row_span(
        &self,
        start: u32,
        y: u32,
        count: usize,
    ) -> Result<std::ops::Range<usize>, BufferError> {
        let first = self.index(start, y)?;
        let available = (self.width - start) as usize;
        if count > available {
            return Err(BufferError::SizeMismatch {
                expected: available,
                actual: count,
            });
        }
        Ok(first..first + count)
    }

    /// Swap quadrants diagonally so the tile corners meet in the centre.
    ///
    /// Any seam in a tiling texture shows up as a cross through the middle.
    pub fn swap_corners(&mut self) {
        let width = self.width as usize;
        let height = self.height as usize;
        let half_w = width / 2;
        let half_h = height / 2;
        let mut swapped = Vec::with_capacity(self.data.len());
        for y in 0..height {
            let sy = (y + half_h) % height;
            for x in 0..width {
                let sx = (x + half_w) % width;
                swapped.push(self.data[sy * width + sx]);
            }
        }
        self.data = swapped;
    }
}

impl GreyBuffer {
    /// Invert every value.
    pub fn invert(&mut self) {
        for v in &mut self.data {
            *v = MAX_CHANNEL - *v;
        }
    }

    /// The raw bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl PixelBuffer {
    /// Expand a greyscale buffer into colour using a `low`..`high` gradient.
    ///
    /// Alpha is set from the grey value itself.
    pub fn from_grey_gradient(grey: &GreyBuffer, low: Rgb, high: Rgb) -> PixelBuffer {
        PixelBuffer {
            width: grey.width,
            height: grey.height,
            data: grey
                .data
                .iter()
                .map(|&v| low.lerp8(high, v).with_alpha(v))
                .collect(),
        }
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data.iter().flat_map(|p| p.to_rgba8()).collect()
    }

    /// Convert to 8-bit RGB bytes, discarding alpha.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.data.iter().flat_map(|p| p.to_rgb8()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            GreyBuffer::new(0, 4),
            Err(BufferError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(PixelBuffer::new(4, 0).is_err());
    }

    #[test]
    fn test_get_set() {
        let mut buf = GreyBuffer::new(4, 3).unwrap();
        buf.set(3, 2, 200).unwrap();
        assert_eq!(buf.get(3, 2), Ok(200));
        assert_eq!(buf.get(0, 0), Ok(0));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut buf = GreyBuffer::new(4, 3).unwrap();
        assert!(matches!(
            buf.get(4, 0),
            Err(BufferError::OutOfBounds { x: 4, y: 0, .. })
        ));
        assert!(buf.set(0, 3, 1).is_err());
    }

    #[test]
    fn test_row_access() {
        let mut buf = GreyBuffer::new(3, 2).unwrap();
        buf.row_mut(1).unwrap().copy_from_slice(&[1, 2, 3]);
        assert_eq!(buf.row(1), Some(&[1u8, 2, 3][..]));
        assert_eq!(buf.row(2), None);
        assert_eq!(buf.rows().count(), 2);
    }

    #[test]
    fn test_read_write_row_range() {
        let mut buf = GreyBuffer::new(5, 2).unwrap();
        buf.write_row(1, 0, &[7, 8, 9]).unwrap();
        let mut out = [0u8; 4];
        buf.read_row(1, 0, &mut out).unwrap();
        assert_eq!(out, [7, 8, 9, 0]);
        assert_eq!(
            buf.write_row(3, 1, &[1, 2, 3]),
            Err(BufferError::SizeMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_swap_corners_moves_origin_to_centre() {
        let mut buf = GreyBuffer::new(4, 4).unwrap();
        buf.set(0, 0, 9).unwrap();
        buf.swap_corners();
        assert_eq!(buf.get(2, 2), Ok(9));
        assert_eq!(buf.get(0, 0), Ok(0));
    }

    #[test]
    fn test_invert() {
        let mut buf = GreyBuffer::filled(2, 2, 10).unwrap();
        buf.invert();
        assert_eq!(buf.as_bytes(), &[245, 245, 245, 245]);
    }

    #[test]
    fn test_grey_gradient() {
        let mut grey = GreyBuffer::new(2, 1).unwrap();
        grey.set(1, 0, 255).unwrap();
        let low = Rgb::new(10, 20, 30);
        let high = Rgb::new(200, 100, 0);
        let pix = PixelBuffer::from_grey_gradient(&grey, low, high);
        assert_eq!(pix.get(0, 0), Ok(low.with_alpha(0)));
        assert_eq!(pix.get(1, 0), Ok(high.with_alpha(255)));
    }

    #[test]
    fn test_rgba_bytes() {
        let pix = PixelBuffer::filled(2, 1, Rgba::new(1, 2, 3, 4)).unwrap();
        assert_eq!(pix.to_rgba8(), vec![1, 2, 3, 4, 1, 2, 3, 4]);
        assert_eq!(pix.to_rgb8(), vec![1, 2, 3, 1, 2, 3]);
    }
}
