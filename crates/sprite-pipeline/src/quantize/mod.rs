//! Final color reduction.
//!
//! The last stage caps the number of distinct visible colors so the sprite
//! looks like hand-made pixel art and fits a small PNG palette. No dithering
//! is applied: each source color maps to exactly one output color, which
//! keeps flat regions flat.
//!
//! The algorithm is median cut over the histogram of visible colors:
//!
//! 1. Start with one box holding every distinct color and its pixel count.
//! 2. Split the box with the widest channel range at the count-weighted
//!    median of that channel.
//! 3. Repeat until there are `max_colors` boxes or no box has two colors.
//! 4. Replace every color with the count-weighted mean of its box.

mod median_cut;

pub use median_cut::{quantize, QuantizeReport, MAX_PALETTE_SIZE};
