//! Semantic palette types and normalization
//!
//! This module provides the five-role [`SemanticPalette`], the
//! [`normalize_palette`] correction pass, and error types for parsing and
//! validation.

mod error;
mod normalize;
mod semantic;

pub use error::{PaletteError, ParseColorError};
pub use normalize::{lighten_dark, normalize_palette, snap_to_pure};
pub use semantic::{PaletteRole, SemanticPalette};
