pub mod converter;
pub mod vision;

pub use converter::{Conversion, ConversionMethod, ConverterService};
pub use vision::{parse_vision_reply, resolve_palette, VisionReplyError, DEFAULT_PALETTE};
