use serde::{Deserialize, Serialize};
use sprite_pipeline::{PaletteError, SemanticPalette};
use utoipa::ToSchema;

/// Five-role character palette as hex strings (`#RRGGBB`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaletteDto {
    /// Hair or headwear color
    #[schema(example = "#2A1B16")]
    pub hair: String,
    /// Skin color
    #[schema(example = "#F3B38D")]
    pub skin: String,
    /// Shirt, jacket or dress top color
    #[schema(example = "#FFFFFF")]
    pub top_garment: String,
    /// Pants, skirt or shorts color
    #[schema(example = "#000000")]
    pub bottom_garment: String,
    /// Shoe color, or an accent color
    #[schema(example = "#9B30FF")]
    pub footwear: String,
}

impl From<&SemanticPalette> for PaletteDto {
    fn from(palette: &SemanticPalette) -> Self {
        Self {
            hair: palette.hair.to_hex(),
            skin: palette.skin.to_hex(),
            top_garment: palette.top_garment.to_hex(),
            bottom_garment: palette.bottom_garment.to_hex(),
            footwear: palette.footwear.to_hex(),
        }
    }
}

impl TryFrom<&PaletteDto> for SemanticPalette {
    type Error = PaletteError;

    fn try_from(dto: &PaletteDto) -> Result<Self, Self::Error> {
        SemanticPalette::from_pairs([
            ("hair", dto.hair.as_str()),
            ("skin", dto.skin.as_str()),
            ("topGarment", dto.top_garment.as_str()),
            ("bottomGarment", dto.bottom_garment.as_str()),
            ("footwear", dto.footwear.as_str()),
        ])
    }
}

/// Where the palette in a response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaletteSource {
    /// Supplied explicitly by the caller
    Provided,
    /// Parsed from a vision model reply
    Vision,
    /// Built-in default palette
    Default,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprite_pipeline::{PaletteRole, Rgb8};

    fn dto() -> PaletteDto {
        PaletteDto {
            hair: "#2A1B16".to_string(),
            skin: "#F3B38D".to_string(),
            top_garment: "#F2F2F2".to_string(),
            bottom_garment: "#111316".to_string(),
            footwear: "#9B30FF".to_string(),
        }
    }

    #[test]
    fn test_dto_json_uses_camel_case() {
        let json = serde_json::to_value(dto()).unwrap();
        assert_eq!(json["topGarment"], "#F2F2F2");
        assert_eq!(json["bottomGarment"], "#111316");
    }

    #[test]
    fn test_dto_to_palette_and_back() {
        let palette = SemanticPalette::try_from(&dto()).unwrap();
        assert_eq!(palette.footwear, Rgb8::new(0x9B, 0x30, 0xFF));
        assert_eq!(PaletteDto::from(&palette), dto());
    }

    #[test]
    fn test_invalid_dto_color() {
        let mut bad = dto();
        bad.skin = "peach".to_string();
        let err = SemanticPalette::try_from(&bad).unwrap_err();
        assert!(matches!(
            err,
            PaletteError::InvalidColor {
                role: PaletteRole::Skin,
                ..
            }
        ));
    }

    #[test]
    fn test_palette_source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaletteSource::Vision).unwrap(),
            "\"vision\""
        );
    }
}
