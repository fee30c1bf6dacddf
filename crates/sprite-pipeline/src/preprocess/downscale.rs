//! Nearest-neighbor "contain" downscale.
//!
//! Generated sprites arrive as large upscaled images whose "pixels" are
//! blocks of identical color. Nearest-neighbor sampling picks one source
//! pixel per destination pixel, so block colors survive exactly instead of
//! being blended into new in-between colors.

use crate::raster::{Raster, RasterError, TRANSPARENT};

/// Placement of the scaled source inside the target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainFit {
    /// Width of the scaled source content
    pub content_width: usize,
    /// Height of the scaled source content
    pub content_height: usize,
    /// Left padding (transparent columns)
    pub offset_x: usize,
    /// Top padding (transparent rows)
    pub offset_y: usize,
}

impl ContainFit {
    /// Fit a `source_width`×`source_height` image inside the target box,
    /// preserving aspect ratio and centering it.
    ///
    /// Content dimensions are rounded and never drop below one pixel, so
    /// extreme aspect ratios still show a 1-pixel sliver of content.
    pub fn new(
        source_width: usize,
        source_height: usize,
        target_width: usize,
        target_height: usize,
    ) -> Self {
        let scale_x = target_width as f64 / source_width as f64;
        let scale_y = target_height as f64 / source_height as f64;
        let scale = scale_x.min(scale_y);

        let content_width = ((source_width as f64 * scale).round() as usize).clamp(1, target_width);
        let content_height =
            ((source_height as f64 * scale).round() as usize).clamp(1, target_height);

        Self {
            content_width,
            content_height,
            offset_x: (target_width - content_width) / 2,
            offset_y: (target_height - content_height) / 2,
        }
    }
}

/// Source coordinate sampled for destination coordinate `dst`.
///
/// Samples at the destination pixel center: `floor((dst + 0.5) * src / dst_len)`,
/// computed in integers.
#[inline]
fn nearest_source(dst: usize, dst_len: usize, src_len: usize) -> usize {
    (((2 * dst + 1) * src_len) / (2 * dst_len)).min(src_len - 1)
}

/// Resize `source` to exactly `target_width`×`target_height`.
///
/// The whole source is kept ("contain"); the area outside the scaled content
/// is padded with fully transparent pixels. The output always has an alpha
/// channel: RGB sources are treated as opaque.
///
/// # Errors
///
/// Returns [`RasterError::ZeroDimension`] if either target dimension is zero.
///
/// # Example
///
/// ```
/// use sprite_pipeline::{downscale, Raster};
///
/// // A wide 4x2 opaque source fits a 4x4 box with a transparent row above and below
/// let source = Raster::filled(4, 2, [255, 0, 0, 255]).unwrap();
/// let out = downscale(&source, 4, 4).unwrap();
///
/// assert_eq!((out.width(), out.height()), (4, 4));
/// assert_eq!(out.pixel(0, 0)[3], 0);
/// assert_eq!(out.pixel(0, 1), [255, 0, 0, 255]);
/// assert_eq!(out.pixel(0, 3)[3], 0);
/// ```
pub fn downscale(
    source: &Raster,
    target_width: usize,
    target_height: usize,
) -> Result<Raster, RasterError> {
    let mut out = Raster::filled(target_width, target_height, TRANSPARENT)?;
    let fit = ContainFit::new(source.width(), source.height(), target_width, target_height);

    for dy in 0..fit.content_height {
        let sy = nearest_source(dy, fit.content_height, source.height());
        for dx in 0..fit.content_width {
            let sx = nearest_source(dx, fit.content_width, source.width());
            out.set_pixel(fit.offset_x + dx, fit.offset_y + dy, source.pixel(sx, sy));
        }
    }

    tracing::debug!(
        source_width = source.width(),
        source_height = source.height(),
        content_width = fit.content_width,
        content_height = fit.content_height,
        offset_x = fit.offset_x,
        offset_y = fit.offset_y,
        "Downscaled source"
    );

    Ok(out)
}
