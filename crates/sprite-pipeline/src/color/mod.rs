//! Color type used by palettes and rasters
//!
//! The pipeline works on raw 8-bit sRGB channel values. [`Rgb8`] carries the
//! brightness and distance helpers shared by the palette normalizer, the
//! background cleaner and the quantizer.
//!
//! # Example
//!
//! ```
//! use sprite_pipeline::Rgb8;
//!
//! let skin: Rgb8 = "#F3B38D".parse().unwrap();
//! assert_eq!(skin.to_hex(), "#F3B38D");
//! ```

mod rgb;

pub use rgb::Rgb8;
