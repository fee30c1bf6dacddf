pub mod convert;
pub mod palette;

pub use convert::{
    handle_convert, ConvertMetrics, ConvertRequest, ConvertResponse, TransparencyMetrics,
    __path_handle_convert,
};
pub use palette::{handle_palette, PaletteRequest, PaletteResponse, __path_handle_palette};
