//! Palette normalization.
//!
//! Vision models describe clothing with slightly-off colors: a white shirt
//! comes back as `#FAFAFA`, black jeans as `#111316`. Garments are snapped
//! to pure white or black so the sprite uses crisp flat colors, and dark
//! footwear is brightened so it stays distinguishable from dark trousers.

use super::semantic::{PaletteRole, SemanticPalette};
use crate::color::Rgb8;

/// Garments brighter than this (and nearly grey) become pure white.
const NEAR_WHITE_BRIGHTNESS: f64 = 220.0;
/// Maximum |r-g| and |g-b| for a garment to count as nearly grey.
const NEAR_WHITE_MAX_SPREAD: i16 = 20;
/// Garments darker than this become pure black.
const NEAR_BLACK_BRIGHTNESS: f64 = 35.0;
/// Footwear darker than this is brightened.
const DARK_FOOTWEAR_BRIGHTNESS: f64 = 100.0;
/// Brightness that dark footwear is scaled up to.
const FOOTWEAR_TARGET_BRIGHTNESS: f64 = 140.0;

/// Return a corrected copy of `palette`.
///
/// - `topGarment` / `bottomGarment`: near-white → `#FFFFFF`, near-black → `#000000`
/// - `footwear`: brightness below 100 is scaled towards 140, preserving hue
/// - `hair` / `skin`: unchanged
///
/// # Example
///
/// ```
/// use sprite_pipeline::{normalize_palette, Rgb8, SemanticPalette};
///
/// let seed = SemanticPalette::new(
///     Rgb8::new(0x2A, 0x1B, 0x16),
///     Rgb8::new(0xF3, 0xB3, 0x8D),
///     Rgb8::new(0xF5, 0xF5, 0xF0),
///     Rgb8::new(0x11, 0x13, 0x16),
///     Rgb8::new(0x9B, 0x30, 0xFF),
/// );
/// let normalized = normalize_palette(&seed);
///
/// assert_eq!(normalized.top_garment, Rgb8::WHITE);
/// assert_eq!(normalized.bottom_garment, Rgb8::BLACK);
/// assert_eq!(normalized.hair, seed.hair);
/// ```
pub fn normalize_palette(palette: &SemanticPalette) -> SemanticPalette {
    let mut normalized = *palette;

    for role in PaletteRole::ALL {
        let original = palette.get(role);
        let adjusted = match role {
            PaletteRole::TopGarment | PaletteRole::BottomGarment => snap_to_pure(original),
            PaletteRole::Footwear => lighten_dark(original),
            PaletteRole::Hair | PaletteRole::Skin => original,
        };

        if adjusted != original {
            tracing::debug!(
                role = %role,
                from = %original.to_hex(),
                to = %adjusted.to_hex(),
                "Adjusted palette color"
            );
            normalized.set(role, adjusted);
        }
    }

    normalized
}

/// Snap near-white colors to pure white and near-black colors to pure black.
///
/// Near-white requires both high brightness and a low channel spread, so
/// saturated light colors (pastel yellow, light pink) are left alone.
pub fn snap_to_pure(color: Rgb8) -> Rgb8 {
    let brightness = color.brightness();
    let spread_rg = (color.r as i16 - color.g as i16).abs();
    let spread_gb = (color.g as i16 - color.b as i16).abs();

    if brightness > NEAR_WHITE_BRIGHTNESS
        && spread_rg < NEAR_WHITE_MAX_SPREAD
        && spread_gb < NEAR_WHITE_MAX_SPREAD
    {
        Rgb8::WHITE
    } else if brightness < NEAR_BLACK_BRIGHTNESS {
        Rgb8::BLACK
    } else {
        color
    }
}

/// Scale a dark color up to the footwear target brightness.
///
/// All channels are multiplied by the same factor, so the channel ratios
/// (hue) survive until a channel clips at 255. Pure black has no hue to
/// preserve and is returned unchanged.
pub fn lighten_dark(color: Rgb8) -> Rgb8 {
    let brightness = color.brightness();
    if brightness >= DARK_FOOTWEAR_BRIGHTNESS || brightness <= 0.0 {
        return color;
    }

    let factor = FOOTWEAR_TARGET_BRIGHTNESS / brightness;
    let scale = |c: u8| (c as f64 * factor).round().min(255.0) as u8;

    Rgb8::new(scale(color.r), scale(color.g), scale(color.b))
}
