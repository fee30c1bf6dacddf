#![allow(clippy::module_inception, clippy::needless_range_loop)]

//! sprite-pipeline: pixel-art post-processing for generated character sprites
//!
//! Image generators are good at drawing a character "in pixel-art style" but
//! bad at producing actual pixel art. Their output is a large RGB(A) image on
//! a flat backdrop, with soft block edges and dozens of near-identical
//! shades. This crate turns such an image into a small, transparent,
//! limited-color sprite.
//!
//! # Quick Start
//!
//! The [`SpritePipeline`] builder is the primary entry point:
//!
//! ```
//! use sprite_pipeline::{Raster, SpritePipeline};
//!
//! let source = Raster::filled(256, 256, [255, 255, 255, 255]).unwrap();
//! let output = SpritePipeline::new().run(&source).unwrap();
//!
//! assert_eq!(output.raster.width(), 64);
//! assert_eq!(output.raster.height(), 64);
//! ```
//!
//! # Stages
//!
//! Each stage is also available as a free function operating on a
//! [`Raster`]:
//!
//! | Stage | Function | Effect |
//! |-------|----------|--------|
//! | Downscale | [`downscale`] | Nearest-neighbor "contain" fit, transparent padding |
//! | Background | [`clean_background`] | Erases the edge-connected backdrop |
//! | Islands | [`remove_islands`] | Erases solid pixels with ≤ 1 solid neighbor |
//! | Quantize | [`quantize`] | Median cut to at most `max_colors` visible colors |
//!
//! Independently of the pixel stages, [`normalize_palette`] cleans up the
//! five-role [`SemanticPalette`] a vision model reports for the character
//! (snapping garments to pure white or black, brightening dark footwear).
//!
//! # Transparency Rules
//!
//! The only transparency any stage writes is `(0, 0, 0, 0)`. A pixel counts as
//! *solid* when its alpha is at least 128 ([`SOLID_ALPHA`]); background
//! removal is skipped when 10% or more of the image is already non-solid,
//! because the generator evidently produced real transparency.
//!
//! # Pipeline Overview
//!
//! ```text
//! source Raster (RGB or RGBA, any size)
//!     |
//!     v
//! downscale            (contain, nearest neighbor, centered)
//!     |                  -> TransparencyCheck::DOWNSCALED
//!     v
//! clean_background     (edge histogram -> candidates -> flood fill)
//!     |
//!     v
//! remove_islands       (single pass over a snapshot)
//!     |
//!     v
//! quantize             (median cut, no dithering)
//!     |                  -> TransparencyCheck::FINAL
//!     v
//! sprite Raster (RGBA, target size) + PipelineReport
//! ```
//!
//! Every stage is deterministic and free of global state, so a
//! [`SpritePipeline`] can be shared across threads and run on many images
//! at once.

pub mod api;
pub mod cleanup;
pub mod color;
pub mod output;
pub mod palette;
pub mod preprocess;
pub mod quantize;
pub mod raster;


pub use api::{PipelineError, PipelineOutput, SpritePipeline};
pub use cleanup::{
    clean_background, remove_islands, BackgroundOptions, BackgroundOutcome, BackgroundReport,
};
pub use color::Rgb8;
pub use output::{PipelineReport, TransparencyCheck, TransparencyVerdict};
pub use palette::{normalize_palette, PaletteError, PaletteRole, ParseColorError, SemanticPalette};
pub use preprocess::downscale;
pub use quantize::{quantize, QuantizeReport};
pub use raster::{Raster, RasterError, SOLID_ALPHA, TRANSPARENT};
