//! Diagnostics collected while running the pipeline.

use crate::cleanup::BackgroundReport;
use crate::quantize::QuantizeReport;
use crate::raster::Raster;

/// Coarse classification of how much of an image is fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransparencyVerdict {
    /// Mostly transparent: the sprite sits on a cleared background
    Transparent,
    /// Some transparency, but less than expected for a sprite
    Partial,
    /// Virtually no transparency: the background is probably still there
    Opaque,
}

impl TransparencyVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            TransparencyVerdict::Transparent => "transparent",
            TransparencyVerdict::Partial => "partial",
            TransparencyVerdict::Opaque => "opaque",
        }
    }
}

/// Count of alpha-0 pixels with a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransparencyCheck {
    pub alpha_zero: usize,
    pub total: usize,
    pub verdict: TransparencyVerdict,
}

impl TransparencyCheck {
    /// Ratio thresholds applied right after downscaling.
    pub const DOWNSCALED: (f64, f64) = (0.30, 0.05);
    /// Ratio thresholds applied to the final sprite.
    pub const FINAL: (f64, f64) = (0.10, 0.01);

    /// Measure `raster`: a ratio above `transparent_above` is
    /// [`Transparent`](TransparencyVerdict::Transparent), below
    /// `opaque_below` is [`Opaque`](TransparencyVerdict::Opaque).
    pub fn measure(raster: &Raster, (transparent_above, opaque_below): (f64, f64)) -> Self {
        let alpha_zero = raster.count_alpha_below(1);
        let total = raster.pixel_count();
        let ratio = alpha_zero as f64 / total as f64;

        let verdict = if ratio > transparent_above {
            TransparencyVerdict::Transparent
        } else if ratio < opaque_below {
            TransparencyVerdict::Opaque
        } else {
            TransparencyVerdict::Partial
        };

        Self {
            alpha_zero,
            total,
            verdict,
        }
    }
}

/// Everything the pipeline learned about one image.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub source_width: usize,
    pub source_height: usize,
    /// Transparency right after downscaling
    pub downscaled: TransparencyCheck,
    pub background: BackgroundReport,
    /// Pixels removed by island cleanup (0 when disabled)
    pub islands_removed: usize,
    pub quantize: QuantizeReport,
    /// Transparency of the finished sprite
    pub final_check: TransparencyCheck,
}
