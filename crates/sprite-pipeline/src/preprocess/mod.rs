//! Geometry stage of the pipeline.
//!
//! Image generators draw "pixel art" at high resolution: every logical pixel
//! is a block of identical color several hundred device pixels wide. The
//! first real stage maps that back onto the sprite grid.
//!
//! # Contain Fit
//!
//! [`downscale`] keeps the whole source visible. The source is scaled by
//! `min(target_w / source_w, target_h / source_h)`, centered in the target,
//! and the leftover area is padded with `(0, 0, 0, 0)`. Nothing is cropped
//! and the output is always exactly the requested size with an alpha
//! channel.
//!
//! # Why Nearest Neighbor
//!
//! Any filtering resampler (bilinear, Lanczos) blends block edges into
//! colors that were never in the source. Those in-between colors survive as
//! noise through background removal and quantization, so sampling is strictly
//! nearest neighbor: every output color exists in the input.
//!
//! ```
//! use sprite_pipeline::{downscale, Raster};
//!
//! let source = Raster::filled(512, 512, [200, 40, 40, 255]).unwrap();
//! let sprite = downscale(&source, 64, 64).unwrap();
//!
//! assert_eq!(sprite.pixel_count(), 64 * 64);
//! assert_eq!(sprite.visible_colors().len(), 1);
//! ```

mod downscale;

pub use downscale::{downscale, ContainFit};
