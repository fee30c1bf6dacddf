//! Owned pixel buffer with dimension metadata.

use std::collections::BTreeSet;

use super::error::RasterError;
use crate::color::Rgb8;

/// Alpha at or above this value counts as solid (foreground).
pub const SOLID_ALPHA: u8 = 128;

/// A fully transparent pixel, written wherever a stage erases content.
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// An 8-bit RGB or RGBA image in row-major order.
///
/// The alpha channel is optional until a stage explicitly needs it; pixel
/// reads on an RGB raster report alpha 255. Stages that write transparency
/// call [`Raster::ensure_alpha`] first.
///
/// # Example
///
/// ```
/// use sprite_pipeline::Raster;
///
/// let raster = Raster::new(2, 1, 3, vec![255, 0, 0, 0, 0, 255]).unwrap();
/// assert_eq!(raster.pixel(1, 0), [0, 0, 255, 255]);
/// assert!(!raster.has_alpha());
///
/// assert!(Raster::new(0, 4, 4, Vec::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap a pixel buffer after validating its shape.
    ///
    /// # Errors
    ///
    /// - [`RasterError::ZeroDimension`] if `width` or `height` is zero
    /// - [`RasterError::UnsupportedChannels`] unless `channels` is 3 or 4
    /// - [`RasterError::BufferLength`] if `data.len() != width * height * channels`
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroDimension { width, height });
        }
        if channels != 3 && channels != 4 {
            return Err(RasterError::UnsupportedChannels(channels));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(channels))
            .ok_or(RasterError::Overflow { width, height })?;
        if data.len() != expected {
            return Err(RasterError::BufferLength {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Create an RGBA raster with every pixel set to `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self, RasterError> {
        let pixels = width
            .checked_mul(height)
            .ok_or(RasterError::Overflow { width, height })?;
        Self::new(width, height, 4, rgba.repeat(pixels))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// 3 for RGB, 4 for RGBA.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Raw interleaved channel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Linear index of `(x, y)`.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Pixel at `(x, y)` as RGBA.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixel_at(self.index_of(x, y))
    }

    /// Pixel at linear index `idx` as RGBA.
    #[inline]
    pub fn pixel_at(&self, idx: usize) -> [u8; 4] {
        let o = idx * self.channels;
        let alpha = if self.channels == 4 { self.data[o + 3] } else { 255 };
        [self.data[o], self.data[o + 1], self.data[o + 2], alpha]
    }

    /// RGB part of the pixel at linear index `idx`.
    #[inline]
    pub fn rgb_at(&self, idx: usize) -> Rgb8 {
        let o = idx * self.channels;
        Rgb8::new(self.data[o], self.data[o + 1], self.data[o + 2])
    }

    /// Alpha of the pixel at linear index `idx` (255 for RGB rasters).
    #[inline]
    pub fn alpha_at(&self, idx: usize) -> u8 {
        if self.channels == 4 {
            self.data[idx * 4 + 3]
        } else {
            255
        }
    }

    /// Write the pixel at linear index `idx`.
    ///
    /// On an RGB raster the alpha component is dropped.
    #[inline]
    pub fn set_pixel_at(&mut self, idx: usize, rgba: [u8; 4]) {
        let o = idx * self.channels;
        self.data[o..o + 3].copy_from_slice(&rgba[..3]);
        if self.channels == 4 {
            self.data[o + 3] = rgba[3];
        }
    }

    /// Write the pixel at `(x, y)`.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let idx = self.index_of(x, y);
        self.set_pixel_at(idx, rgba);
    }

    /// Add an opaque alpha channel to an RGB raster. No-op for RGBA.
    pub fn ensure_alpha(&mut self) {
        if self.channels == 4 {
            return;
        }
        let mut rgba = Vec::with_capacity(self.pixel_count() * 4);
        for rgb in self.data.chunks_exact(3) {
            rgba.extend_from_slice(rgb);
            rgba.push(255);
        }
        self.data = rgba;
        self.channels = 4;
    }

    /// Number of pixels whose alpha is strictly below `threshold`.
    pub fn count_alpha_below(&self, threshold: u8) -> usize {
        (0..self.pixel_count())
            .filter(|&idx| self.alpha_at(idx) < threshold)
            .count()
    }

    /// Fraction of pixels that are not solid (alpha < 128).
    pub fn transparency_ratio(&self) -> f64 {
        self.count_alpha_below(SOLID_ALPHA) as f64 / self.pixel_count() as f64
    }

    /// Distinct RGB values among pixels with alpha > 0.
    pub fn visible_colors(&self) -> BTreeSet<Rgb8> {
        (0..self.pixel_count())
            .filter(|&idx| self.alpha_at(idx) > 0)
            .map(|idx| self.rgb_at(idx))
            .collect()
    }

    /// Whether the linear index lies on the outermost ring of pixels.
    #[inline]
    pub fn is_border(&self, idx: usize) -> bool {
        let (x, y) = (idx % self.width, idx / self.width);
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_shape() {
        assert_eq!(
            Raster::new(0, 1, 4, vec![]),
            Err(RasterError::ZeroDimension {
                width: 0,
                height: 1
            })
        );
        assert_eq!(
            Raster::new(1, 1, 2, vec![0, 0]),
            Err(RasterError::UnsupportedChannels(2))
        );
        assert_eq!(
            Raster::new(2, 2, 4, vec![0; 15]),
            Err(RasterError::BufferLength {
                expected: 16,
                actual: 15
            })
        );
        assert!(Raster::new(usize::MAX, 2, 4, vec![]).is_err());
    }

    #[test]
    fn test_rgb_pixels_read_as_opaque() {
        let raster = Raster::new(1, 1, 3, vec![1, 2, 3]).unwrap();
        assert_eq!(raster.pixel(0, 0), [1, 2, 3, 255]);
        assert_eq!(raster.alpha_at(0), 255);
        assert_eq!(raster.transparency_ratio(), 0.0);
    }

    #[test]
    fn test_ensure_alpha_expands_buffer() {
        let mut raster = Raster::new(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        raster.ensure_alpha();
        assert!(raster.has_alpha());
        assert_eq!(raster.data(), &[1, 2, 3, 255, 4, 5, 6, 255]);

        // Second call is a no-op
        let before = raster.clone();
        raster.ensure_alpha();
        assert_eq!(raster, before);
    }

    #[test]
    fn test_set_pixel_on_rgb_drops_alpha() {
        let mut raster = Raster::new(1, 1, 3, vec![9, 9, 9]).unwrap();
        raster.set_pixel(0, 0, TRANSPARENT);
        assert_eq!(raster.data(), &[0, 0, 0]);
    }

    #[test]
    fn test_ratios() {
        let mut raster = Raster::filled(2, 2, [10, 10, 10, 255]).unwrap();
        raster.set_pixel(0, 0, [0, 0, 0, 0]);
        raster.set_pixel(1, 0, [5, 5, 5, 100]);
        assert_eq!(raster.count_alpha_below(1), 1);
        assert_eq!(raster.transparency_ratio(), 0.5);
    }

    #[test]
    fn test_visible_colors_skip_transparent() {
        let mut raster = Raster::filled(3, 1, [1, 1, 1, 255]).unwrap();
        raster.set_pixel(1, 0, [200, 0, 0, 0]);
        raster.set_pixel(2, 0, [2, 2, 2, 1]);
        let colors: Vec<_> = raster.visible_colors().into_iter().collect();
        assert_eq!(colors, vec![Rgb8::new(1, 1, 1), Rgb8::new(2, 2, 2)]);
    }

    #[test]
    fn test_is_border() {
        let raster = Raster::filled(3, 3, TRANSPARENT).unwrap();
        let border: Vec<bool> = (0..9).map(|i| raster.is_border(i)).collect();
        assert_eq!(
            border,
            vec![true, true, true, true, false, true, true, true, true]
        );
    }
}
