//! SpritePipeline builder -- the primary ergonomic entry point for the crate.
//!
//! [`SpritePipeline`] runs the pixel stages in their fixed order with fluent
//! configuration of each stage.

use super::error::PipelineError;
use crate::cleanup::{clean_background, remove_islands, BackgroundOptions};
use crate::output::{PipelineReport, TransparencyCheck};
use crate::preprocess::downscale;
use crate::quantize::quantize;
use crate::raster::Raster;

/// Default sprite width and height.
pub const DEFAULT_SPRITE_SIZE: usize = 64;
/// Default cap on distinct visible colors.
pub const DEFAULT_MAX_COLORS: usize = 12;

/// The finished sprite and what happened along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub raster: Raster,
    pub report: PipelineReport,
}

/// High-level pixel-art post-processor.
///
/// Stages run in this order:
///
/// 1. [`downscale`](crate::downscale) to the target size (contain, nearest neighbor)
/// 2. [`clean_background`](crate::clean_background)
/// 3. [`remove_islands`](crate::remove_islands) (unless disabled)
/// 4. [`quantize`](crate::quantize) to `max_colors`
///
/// # Design
///
/// - Configuration methods consume and return `self` (standard builder pattern)
/// - [`run()`](Self::run) takes `&self` so the builder is **reusable**
///   across multiple images and threads
///
/// # Example
///
/// ```
/// use sprite_pipeline::{Raster, SpritePipeline};
///
/// let pipeline = SpritePipeline::new()
///     .target_size(32, 32)
///     .max_colors(8);
///
/// let mut source = Raster::filled(128, 128, [255, 255, 255, 255]).unwrap();
/// for y in 32..96 {
///     for x in 32..96 {
///         source.set_pixel(x, y, [200, 30, 30, 255]);
///     }
/// }
///
/// let output = pipeline.run(&source).unwrap();
///
/// assert_eq!(output.raster.width(), 32);
/// assert_eq!(output.raster.pixel(0, 0), [0, 0, 0, 0]);
/// assert_eq!(output.raster.pixel(16, 16), [200, 30, 30, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SpritePipeline {
    target_width: usize,
    target_height: usize,
    background: BackgroundOptions,
    remove_islands: bool,
    max_colors: usize,
}

impl Default for SpritePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl SpritePipeline {
    /// Create a pipeline producing 64×64 sprites with at most 12 colors.
    pub fn new() -> Self {
        Self {
            target_width: DEFAULT_SPRITE_SIZE,
            target_height: DEFAULT_SPRITE_SIZE,
            background: BackgroundOptions::default(),
            remove_islands: true,
            max_colors: DEFAULT_MAX_COLORS,
        }
    }

    /// Set output dimensions.
    #[inline]
    pub fn target_size(mut self, width: usize, height: usize) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    /// Set background removal options.
    #[inline]
    pub fn background(mut self, options: BackgroundOptions) -> Self {
        self.background = options;
        self
    }

    /// Enable or disable stray pixel removal.
    #[inline]
    pub fn remove_islands(mut self, enabled: bool) -> Self {
        self.remove_islands = enabled;
        self
    }

    /// Set the maximum number of distinct visible colors (clamped to 1..=256).
    #[inline]
    pub fn max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors;
        self
    }

    pub fn target_width(&self) -> usize {
        self.target_width
    }

    pub fn target_height(&self) -> usize {
        self.target_height
    }

    pub fn colors(&self) -> usize {
        self.max_colors
    }

    /// Run every stage on `source`, leaving `source` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Raster`] if the target size is zero.
    pub fn run(&self, source: &Raster) -> Result<PipelineOutput, PipelineError> {
        let mut raster = downscale(source, self.target_width, self.target_height)?;
        let downscaled = TransparencyCheck::measure(&raster, TransparencyCheck::DOWNSCALED);
        tracing::debug!(
            alpha_zero = downscaled.alpha_zero,
            total = downscaled.total,
            verdict = downscaled.verdict.as_str(),
            "Transparency after downscale"
        );

        let background = clean_background(&mut raster, &self.background);

        let islands_removed = if self.remove_islands {
            remove_islands(&mut raster)
        } else {
            0
        };

        let quantize = quantize(&mut raster, self.max_colors);

        let final_check = TransparencyCheck::measure(&raster, TransparencyCheck::FINAL);
        tracing::debug!(
            alpha_zero = final_check.alpha_zero,
            total = final_check.total,
            verdict = final_check.verdict.as_str(),
            colors = quantize.output_colors,
            "Sprite finished"
        );

        Ok(PipelineOutput {
            raster,
            report: PipelineReport {
                source_width: source.width(),
                source_height: source.height(),
                downscaled,
                background,
                islands_removed,
                quantize,
                final_check,
            },
        })
    }
}
