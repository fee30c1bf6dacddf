//! `data:` URL framing for images exchanged as JSON strings.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::CodecError;

/// MIME types of the formats the codec can decode.
const SUPPORTED_MIME_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/jpg", "image/webp"];

/// Prefix of every data URL this service produces.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Decode the payload of an image data URL.
///
/// Accepts `data:image/{png,jpeg,webp};base64,<payload>` or a bare base64
/// payload.
/// ASCII whitespace inside the payload is ignored.
pub fn parse_data_url(input: &str) -> Result<Vec<u8>, CodecError> {
    let input = input.trim();

    let payload = match input.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| CodecError::UnsupportedDataUrl("missing ',' separator".into()))?;
            let mime = header.strip_suffix(";base64").ok_or_else(|| {
                CodecError::UnsupportedDataUrl(format!("{header} (expected base64 encoding)"))
            })?;
            if !SUPPORTED_MIME_TYPES.contains(&mime.to_ascii_lowercase().as_str()) {
                return Err(CodecError::UnsupportedDataUrl(mime.to_string()));
            }
            payload
        }
        None => input,
    };

    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(STANDARD.decode(compact)?)
}

/// Wrap PNG bytes as a `data:image/png;base64,` URL.
pub fn to_png_data_url(png: &[u8]) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png))
}
