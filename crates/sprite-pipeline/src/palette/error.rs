//! Error types for palette operations
//!
//! This module provides error types for color parsing and semantic palette
//! validation.

use thiserror::Error;

use super::PaletteRole;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string is not exactly 6 digits after stripping '#'
    #[error("invalid hex color length in {0:?} (expected 6 hex digits)")]
    InvalidLength(String),
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character in {0:?}")]
    InvalidHex(String),
}

/// Error type for semantic palette validation.
///
/// Normalization never guesses a missing role, so an incomplete palette is
/// rejected before any stage runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// A required role was not supplied
    #[error("palette is missing the {0} role")]
    MissingRole(PaletteRole),
    /// A role was supplied with an unparsable color
    #[error("invalid color for {role}: {source}")]
    InvalidColor {
        /// Role whose value failed to parse
        role: PaletteRole,
        /// Underlying parse failure
        #[source]
        source: ParseColorError,
    },
}
