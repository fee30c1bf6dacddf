pub mod config;
pub mod palette;

pub use config::{AppConfig, BackgroundSettings, PipelineSettings, ServerSettings};
pub use palette::{PaletteDto, PaletteSource};
