//! Unified error type for the sprite-pipeline public API.

use thiserror::Error;

use crate::palette::PaletteError;
use crate::raster::RasterError;

/// Unified error type for the sprite-pipeline public API.
///
/// Wraps every error the crate produces for convenient `?` propagation in
/// application code.
///
/// # Example
///
/// ```
/// use sprite_pipeline::{PipelineError, Raster, SemanticPalette};
///
/// fn load(pairs: &[(&str, &str)], pixels: Vec<u8>) -> Result<(SemanticPalette, Raster), PipelineError> {
///     let palette = SemanticPalette::from_pairs(pairs.iter().copied())?;
///     let raster = Raster::new(1, 1, 4, pixels)?;
///     Ok((palette, raster))
/// }
///
/// assert!(matches!(
///     load(&[("hair", "#000000")], vec![0; 4]),
///     Err(PipelineError::Palette(_))
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The raster (input or requested output size) is invalid
    #[error("invalid raster: {0}")]
    Raster(#[from] RasterError),
    /// The palette is incomplete or has an unparseable color
    #[error("invalid palette: {0}")]
    Palette(#[from] PaletteError),
}
