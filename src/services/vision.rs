//! Palette resolution from caller input or a vision model reply.
//!
//! A vision model is asked to describe the character's colors as a JSON
//! object, but replies are free text: the object may be wrapped in prose or
//! a code fence. The first `{...}` block is extracted and parsed; anything
//! unusable falls back to the built-in palette.

use regex::Regex;
use serde_json::Value;
use sprite_pipeline::{normalize_palette, PaletteError, Rgb8, SemanticPalette};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

use crate::models::{PaletteDto, PaletteSource};

/// Palette used when no usable palette was supplied.
pub const DEFAULT_PALETTE: SemanticPalette = SemanticPalette {
    hair: Rgb8::new(0x2A, 0x1B, 0x16),
    skin: Rgb8::new(0xF3, 0xB3, 0x8D),
    top_garment: Rgb8::new(0xF2, 0xF2, 0xF2),
    bottom_garment: Rgb8::new(0x11, 0x13, 0x16),
    footwear: Rgb8::new(0x9B, 0x30, 0xFF),
};

#[derive(Debug, Error)]
pub enum VisionReplyError {
    #[error("no JSON object in reply")]
    NoJsonObject,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Palette(#[from] PaletteError),
}

fn json_object_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{[^}]+\}").expect("JSON object pattern is valid"))
}

/// Extract a [`SemanticPalette`] from a free-text vision model reply.
///
/// Only the first flat `{...}` block is considered. Every role must be
/// present with a `#RRGGBB` string value; extra keys are ignored.
pub fn parse_vision_reply(reply: &str) -> Result<SemanticPalette, VisionReplyError> {
    let object = json_object_regex()
        .find(reply)
        .ok_or(VisionReplyError::NoJsonObject)?;
    let fields: HashMap<String, Value> = serde_json::from_str(object.as_str())?;

    let pairs = fields
        .iter()
        .filter_map(|(key, value)| value.as_str().map(|v| (key.as_str(), v)));
    Ok(SemanticPalette::from_pairs(pairs)?)
}

/// Pick the palette for a request and normalize it.
///
/// An explicit palette wins and must be valid. Otherwise a vision reply is
/// parsed, falling back to [`DEFAULT_PALETTE`] with a warning when it is
/// unusable. Provided and vision palettes are normalized; the default is
/// returned as is.
pub fn resolve_palette(
    explicit: Option<&PaletteDto>,
    vision_reply: Option<&str>,
) -> Result<(SemanticPalette, PaletteSource), PaletteError> {
    let resolved = match (explicit, vision_reply) {
        (Some(dto), _) => (
            normalize_palette(&SemanticPalette::try_from(dto)?),
            PaletteSource::Provided,
        ),
        (None, Some(reply)) => match parse_vision_reply(reply) {
            Ok(palette) => (normalize_palette(&palette), PaletteSource::Vision),
            Err(e) => {
                tracing::warn!(%e, "Unusable vision reply, using default palette");
                (DEFAULT_PALETTE, PaletteSource::Default)
            }
        },
        (None, None) => (DEFAULT_PALETTE, PaletteSource::Default),
    };

    Ok(resolved)
}
