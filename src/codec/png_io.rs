//! PNG decoding into a [`Raster`] and sprite encoding.

use std::collections::BTreeMap;
use std::io::Cursor;

use sprite_pipeline::Raster;

use crate::error::CodecError;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Decode an uploaded image of any supported format (PNG, JPEG, WebP).
///
/// PNG goes through [`decode_png`] so palette and low-bit images keep their
/// exact colors. Other formats are sniffed from their magic bytes and
/// decoded to RGBA. The size guard runs on the header before any pixel
/// data is decoded.
pub fn decode_image(bytes: &[u8], max_dimension: u32) -> Result<Raster, CodecError> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        return decode_png(bytes, max_dimension);
    }

    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    if width > max_dimension || height > max_dimension {
        return Err(CodecError::ImageTooLarge {
            width,
            height,
            max: max_dimension,
        });
    }

    let rgba = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?
        .to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Raster::new(width as usize, height as usize, 4, rgba.into_raw())?)
}

/// Decode a PNG of any color type and bit depth.
///
/// Palette and low-bit images are expanded and 16-bit channels stripped to
/// 8 bits. Grayscale is widened to RGB, so the result always has 3 (RGB) or
/// 4 (RGBA) channels. Images wider or taller than `max_dimension` are
/// rejected before the pixel buffer is allocated.
pub fn decode_png(bytes: &[u8], max_dimension: u32) -> Result<Raster, CodecError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| CodecError::PngDecode(e.to_string()))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    if width > max_dimension || height > max_dimension {
        return Err(CodecError::ImageTooLarge {
            width,
            height,
            max: max_dimension,
        });
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| CodecError::PngDecode(e.to_string()))?;
    buf.truncate(frame.buffer_size());

    let (channels, data) = match frame.color_type {
        png::ColorType::Rgb => (3, buf),
        png::ColorType::Rgba => (4, buf),
        png::ColorType::Grayscale => (3, buf.iter().flat_map(|&v| [v, v, v]).collect()),
        png::ColorType::GrayscaleAlpha => (
            4,
            buf.chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect(),
        ),
        png::ColorType::Indexed => {
            return Err(CodecError::PngDecode(
                "indexed output after expansion".to_string(),
            ))
        }
    };

    Ok(Raster::new(width as usize, height as usize, channels, data)?)
}

/// Encode a raster as an optimized PNG.
///
/// Rasters with at most 256 distinct RGBA values (every quantized sprite)
/// become an indexed PNG with a PLTE chunk and, when needed, a tRNS chunk.
/// Anything else is written as 8-bit RGB or RGBA. The result is re-compressed
/// with oxipng; if that fails the unoptimized bytes are returned.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, CodecError> {
    let width = raster.width() as u32;
    let height = raster.height() as u32;

    let png_bytes = match index_pixels(raster) {
        Some(indexed) => write_png(
            width,
            height,
            png::ColorType::Indexed,
            indexed.depth,
            Some(&indexed.plte),
            indexed.trns.as_deref(),
            &indexed.packed,
        )?,
        None if raster.has_alpha() => write_png(
            width,
            height,
            png::ColorType::Rgba,
            png::BitDepth::Eight,
            None,
            None,
            raster.data(),
        )?,
        None => write_png(
            width,
            height,
            png::ColorType::Rgb,
            png::BitDepth::Eight,
            None,
            None,
            raster.data(),
        )?,
    };

    // Re-compress with oxipng (zopfli + adaptive filter selection)
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);

    Ok(optimized)
}

/// Palette-indexed form of a raster.
struct Indexed {
    depth: png::BitDepth,
    plte: Vec<u8>,
    trns: Option<Vec<u8>>,
    packed: Vec<u8>,
}

/// Build a palette for the raster, or `None` if it has over 256 colors.
///
/// Translucent entries are sorted first so the tRNS chunk only needs to
/// cover them.
fn index_pixels(raster: &Raster) -> Option<Indexed> {
    let mut colors: BTreeMap<(u8, [u8; 3]), u8> = BTreeMap::new();
    for idx in 0..raster.pixel_count() {
        let [r, g, b, a] = raster.pixel_at(idx);
        colors.insert((a, [r, g, b]), 0);
        if colors.len() > 256 {
            return None;
        }
    }

    // Keys sort by alpha first: translucent entries, then opaque (255)
    let mut plte = Vec::with_capacity(colors.len() * 3);
    let mut trns = Vec::new();
    for (i, ((alpha, rgb), slot)) in colors.iter_mut().enumerate() {
        *slot = i as u8;
        plte.extend_from_slice(rgb);
        if *alpha < 255 {
            trns.push(*alpha);
        }
    }

    let indices: Vec<u8> = (0..raster.pixel_count())
        .map(|idx| {
            let [r, g, b, a] = raster.pixel_at(idx);
            colors[&(a, [r, g, b])]
        })
        .collect();

    let (depth, bits) = match colors.len() {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    };
    let packed = if bits == 8 {
        indices
    } else {
        pack_nbits(&indices, raster.width(), bits)
    };

    Some(Indexed {
        depth,
        plte,
        trns: (!trns.is_empty()).then_some(trns),
        packed,
    })
}

/// Encode packed pixel data as a PNG.
fn write_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    trns: Option<&[u8]>,
    packed: &[u8],
) -> Result<Vec<u8>, CodecError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        if let Some(trns) = trns {
            encoder.set_trns(trns);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| CodecError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(packed)
            .map_err(|e| CodecError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: usize, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = width.div_ceil(pixels_per_byte);
    let height = indices.len() / width;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}
