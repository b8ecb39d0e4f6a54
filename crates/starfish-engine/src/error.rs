//! Errors raised while building layers and textures.

use thiserror::Error;

use crate::buffer::BufferError;

/// Errors from layer and texture creation.
///
/// Sampling never fails: out-of-range queries return a saturating default
/// and bad generator output is clamped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid dimensions: {width}x{height} (both must be greater than zero)")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unknown generator index {index} (registry has {count})")]
    UnknownGenerator { index: usize, count: usize },

    #[error("Generator registry is empty")]
    EmptyRegistry,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid layer stack: {0}")]
    InvalidLayers(String),

    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),
}

/// Check that both dimensions are non-zero.
pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<(), EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidDimensions { width, height });
    }
    Ok(())
}
