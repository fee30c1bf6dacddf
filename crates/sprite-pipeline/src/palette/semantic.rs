//! The five-role character palette.
//!
//! A [`SemanticPalette`] names the colors of a sprite by what they paint
//! rather than by index. Every role is always present: construction from
//! loose key/value input fails with [`PaletteError::MissingRole`] instead of
//! inventing a color.

use std::fmt;
use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Rgb8;

/// A named slot in the [`SemanticPalette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaletteRole {
    /// Hair, or the hat covering it
    Hair,
    /// Face and exposed skin
    Skin,
    /// Shirt, jacket, hoodie or dress top
    TopGarment,
    /// Pants, skirt, shorts or dress bottom
    BottomGarment,
    /// Shoes, boots or an accent color when feet are not visible
    Footwear,
}

impl PaletteRole {
    /// All roles in canonical order.
    pub const ALL: [PaletteRole; 5] = [
        PaletteRole::Hair,
        PaletteRole::Skin,
        PaletteRole::TopGarment,
        PaletteRole::BottomGarment,
        PaletteRole::Footwear,
    ];

    /// Wire name of the role, as used in JSON payloads.
    pub fn name(self) -> &'static str {
        match self {
            PaletteRole::Hair => "hair",
            PaletteRole::Skin => "skin",
            PaletteRole::TopGarment => "topGarment",
            PaletteRole::BottomGarment => "bottomGarment",
            PaletteRole::Footwear => "footwear",
        }
    }
}

impl fmt::Display for PaletteRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteRole::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or(())
    }
}

/// Colors for the five character roles.
///
/// # Example
///
/// ```
/// use sprite_pipeline::{PaletteRole, SemanticPalette};
///
/// let palette = SemanticPalette::from_pairs([
///     ("hair", "#2A1B16"),
///     ("skin", "#F3B38D"),
///     ("topGarment", "#F2F2F2"),
///     ("bottomGarment", "#111316"),
///     ("footwear", "#9B30FF"),
/// ])
/// .unwrap();
///
/// assert_eq!(palette.get(PaletteRole::Footwear).to_hex(), "#9B30FF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticPalette {
    pub hair: Rgb8,
    pub skin: Rgb8,
    pub top_garment: Rgb8,
    pub bottom_garment: Rgb8,
    pub footwear: Rgb8,
}

impl SemanticPalette {
    /// Build a palette from five parsed colors in canonical role order.
    pub fn new(
        hair: Rgb8,
        skin: Rgb8,
        top_garment: Rgb8,
        bottom_garment: Rgb8,
        footwear: Rgb8,
    ) -> Self {
        Self {
            hair,
            skin,
            top_garment,
            bottom_garment,
            footwear,
        }
    }

    /// Build a palette from `(role name, hex color)` pairs.
    ///
    /// Keys that do not name a role are ignored. A later pair for the same
    /// role overrides an earlier one.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::InvalidColor`] if a role's value is not a 6-digit hex color
    /// - [`PaletteError::MissingRole`] for the first role (in canonical order)
    ///   that was never supplied
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut slots: [Option<Rgb8>; 5] = [None; 5];

        for (key, value) in pairs {
            let Ok(role) = key.parse::<PaletteRole>() else {
                continue;
            };
            let color = value
                .parse::<Rgb8>()
                .map_err(|source| PaletteError::InvalidColor { role, source })?;
            slots[role as usize] = Some(color);
        }

        let mut take = |role: PaletteRole| {
            slots[role as usize]
                .take()
                .ok_or(PaletteError::MissingRole(role))
        };

        Ok(Self {
            hair: take(PaletteRole::Hair)?,
            skin: take(PaletteRole::Skin)?,
            top_garment: take(PaletteRole::TopGarment)?,
            bottom_garment: take(PaletteRole::BottomGarment)?,
            footwear: take(PaletteRole::Footwear)?,
        })
    }

    /// Color assigned to `role`.
    #[inline]
    pub fn get(&self, role: PaletteRole) -> Rgb8 {
        match role {
            PaletteRole::Hair => self.hair,
            PaletteRole::Skin => self.skin,
            PaletteRole::TopGarment => self.top_garment,
            PaletteRole::BottomGarment => self.bottom_garment,
            PaletteRole::Footwear => self.footwear,
        }
    }

    /// Replace the color assigned to `role`.
    #[inline]
    pub fn set(&mut self, role: PaletteRole, color: Rgb8) {
        match role {
            PaletteRole::Hair => self.hair = color,
            PaletteRole::Skin => self.skin = color,
            PaletteRole::TopGarment => self.top_garment = color,
            PaletteRole::BottomGarment => self.bottom_garment = color,
            PaletteRole::Footwear => self.footwear = color,
        }
    }

    /// Iterate `(role, color)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (PaletteRole, Rgb8)> + '_ {
        PaletteRole::ALL.into_iter().map(|role| (role, self.get(role)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE: [(&str, &str); 5] = [
        ("hair", "#2A1B16"),
        ("skin", "#F3B38D"),
        ("topGarment", "#F2F2F2"),
        ("bottomGarment", "#111316"),
        ("footwear", "#9B30FF"),
    ];

    #[test]
    fn test_from_pairs_complete() {
        let palette = SemanticPalette::from_pairs(COMPLETE).unwrap();
        assert_eq!(palette.hair, Rgb8::new(0x2A, 0x1B, 0x16));
        assert_eq!(palette.bottom_garment, Rgb8::new(0x11, 0x13, 0x16));
        assert_eq!(palette.iter().count(), 5);
    }

    #[test]
    fn test_from_pairs_missing_role() {
        let result = SemanticPalette::from_pairs(COMPLETE[..4].iter().copied());
        assert_eq!(
            result,
            Err(PaletteError::MissingRole(PaletteRole::Footwear))
        );
    }

    #[test]
    fn test_from_pairs_invalid_hex_names_role() {
        let mut pairs = COMPLETE;
        pairs[1] = ("skin", "peach");
        let result = SemanticPalette::from_pairs(pairs);
        assert!(matches!(
            result,
            Err(PaletteError::InvalidColor {
                role: PaletteRole::Skin,
                ..
            })
        ));
    }

    #[test]
    fn test_from_pairs_ignores_unknown_keys() {
        let pairs = COMPLETE.iter().copied().chain([("accessory", "#123456")]);
        assert!(SemanticPalette::from_pairs(pairs).is_ok());
    }

    #[test]
    fn test_role_names_round_trip() {
        for role in PaletteRole::ALL {
            assert_eq!(role.name().parse::<PaletteRole>(), Ok(role));
        }
        assert!("TopGarment".parse::<PaletteRole>().is_err());
    }

    #[test]
    fn test_set_and_get() {
        let mut palette = SemanticPalette::from_pairs(COMPLETE).unwrap();
        palette.set(PaletteRole::Skin, Rgb8::BLACK);
        assert_eq!(palette.get(PaletteRole::Skin), Rgb8::BLACK);
    }
}
