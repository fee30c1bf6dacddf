//! Image framing: PNG, JPEG or WebP bytes and `data:` URLs in, PNG bytes and
//! `data:` URLs out.

pub mod data_url;
pub mod png_io;

pub use data_url::{parse_data_url, to_png_data_url, PNG_DATA_URL_PREFIX};
pub use png_io::{decode_image, decode_png, encode_png};
