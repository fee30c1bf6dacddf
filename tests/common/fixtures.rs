//! Test fixtures and constants.

use std::io::Cursor;

use sprite_pipeline::Raster;
use spriteforge::codec::{encode_png, to_png_data_url};

/// Backdrop color of the generated character fixture
pub const BACKDROP: [u8; 4] = [248, 248, 246, 255];

/// Figure colors of the generated character fixture
pub mod figure {
    pub const HAIR: [u8; 4] = [60, 36, 22, 255];
    pub const SKIN: [u8; 4] = [224, 169, 130, 255];
    pub const TOP: [u8; 4] = [200, 40, 40, 255];
    pub const BOTTOM: [u8; 4] = [31, 58, 147, 255];
}

/// A 200x200 "generated" character: four stacked color blocks on an opaque
/// off-white backdrop.
pub fn character_raster() -> Raster {
    let mut raster = Raster::filled(200, 200, BACKDROP).unwrap();
    let bands = [
        (40..70, figure::HAIR),
        (70..100, figure::SKIN),
        (100..130, figure::TOP),
        (130..160, figure::BOTTOM),
    ];
    for (rows, color) in bands {
        for y in rows {
            for x in 70..130 {
                raster.set_pixel(x, y, color);
            }
        }
    }
    raster
}

/// The character fixture as PNG bytes
pub fn character_png() -> Vec<u8> {
    encode_png(&character_raster()).unwrap()
}

/// The character fixture as a PNG data URL
pub fn character_data_url() -> String {
    to_png_data_url(&character_png())
}

/// The character fixture as a JPEG data URL, the way photo-oriented
/// generators return it
pub fn character_jpeg_data_url() -> String {
    use base64::{engine::general_purpose::STANDARD, Engine};

    let raster = character_raster();
    let rgb: Vec<u8> = raster.data().chunks_exact(4).flat_map(|p| [p[0], p[1], p[2]]).collect();
    let image = image::RgbImage::from_raw(200, 200, rgb).unwrap();

    let mut jpeg = Vec::new();
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .unwrap();
    format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg))
}

/// A vision model reply wrapping the palette in prose and a code fence
pub const VISION_REPLY: &str = r##"Sure! Here are the colors:
```json
{"hair": "#3C2416", "skin": "#E0A982", "topGarment": "#F5F5F0", "bottomGarment": "#1F3A93", "footwear": "#201000"}
```"##;

/// Explicit palette JSON in request format
pub fn palette_json() -> serde_json::Value {
    serde_json::json!({
        "hair": "#3C2416",
        "skin": "#E0A982",
        "topGarment": "#C82828",
        "bottomGarment": "#0A0A0A",
        "footwear": "#402010"
    })
}
