//! Error type for malformed rasters.

use thiserror::Error;

/// Returned when a pixel buffer does not describe a valid raster.
///
/// Every stage indexes pixels as `(y * width + x) * channels`, so a raster
/// is validated once at construction instead of being trusted per access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Width or height is zero
    #[error("raster dimensions must be positive, got {width}x{height}")]
    ZeroDimension {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// Channel count other than 3 (RGB) or 4 (RGBA)
    #[error("unsupported channel count {0} (expected 3 or 4)")]
    UnsupportedChannels(usize),
    /// Buffer length does not equal width * height * channels
    #[error("raster buffer holds {actual} bytes, expected {expected}")]
    BufferLength {
        /// width * height * channels
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },
    /// width * height * channels does not fit in memory
    #[error("raster dimensions {width}x{height} overflow")]
    Overflow {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
}
