//! 8-bit RGB color type
//!
//! Palette entries and raster samples are plain sRGB bytes. No color space
//! conversion happens anywhere in the pipeline: brightness and distance are
//! computed directly on the stored channel values.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// An opaque color with 8-bit channels.
///
/// Ordering is lexicographic over `(r, g, b)`, which gives histograms keyed
/// by `Rgb8` a stable iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb8 {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb8 {
    /// Pure white, `#FFFFFF`.
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    /// Pure black, `#000000`.
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);

    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Mean of the three channels.
    ///
    /// # Example
    /// ```
    /// use sprite_pipeline::Rgb8;
    /// assert_eq!(Rgb8::new(30, 60, 90).brightness(), 60.0);
    /// ```
    #[inline]
    pub fn brightness(self) -> f64 {
        (self.r as f64 + self.g as f64 + self.b as f64) / 3.0
    }

    /// Squared Euclidean distance in RGB space.
    #[inline]
    pub fn distance_squared(self, other: Rgb8) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Euclidean distance in RGB space.
    #[inline]
    pub fn distance(self, other: Rgb8) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// Format as an uppercase `#RRGGBB` string.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = ParseColorError;

    /// Parse a 6-digit hex color, `#RRGGBB` or `RRGGBB`.
    ///
    /// Parsing is case-insensitive and trims surrounding whitespace.
    /// Shorthand `#RGB` forms are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprite_pipeline::Rgb8;
    ///
    /// let c: Rgb8 = "#9b30ff".parse().unwrap();
    /// assert_eq!(c, Rgb8::new(0x9B, 0x30, 0xFF));
    /// assert!("#FFF".parse::<Rgb8>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);

        if digits.chars().count() != 6 {
            return Err(ParseColorError::InvalidLength(s.to_string()));
        }
        // from_str_radix tolerates a leading '+', so check digits up front
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidHex(s.to_string()));
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);

        Ok(Self::new(channel(0), channel(2), channel(4)))
    }
}
