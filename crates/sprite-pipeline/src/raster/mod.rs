//! Raster buffer type
//!
//! [`Raster`] owns an interleaved 8-bit RGB or RGBA buffer and guarantees
//! that its length matches the declared dimensions. All pipeline stages
//! operate on it.

mod error;
mod raster;

pub use error::RasterError;
pub use raster::{Raster, SOLID_ALPHA, TRANSPARENT};
