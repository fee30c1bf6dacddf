//! Edge-connected background removal.
//!
//! Generators usually paint the sprite on a flat backdrop even when asked for
//! transparency. The backdrop is the color that dominates the image border;
//! everything similar to it and reachable from the border becomes transparent.

use std::collections::BTreeMap;

use crate::color::Rgb8;
use crate::raster::{Raster, TRANSPARENT};

/// Tuning knobs for [`clean_background`].
///
/// # Example
///
/// ```
/// use sprite_pipeline::BackgroundOptions;
///
/// let options = BackgroundOptions::default().color_threshold(25.0);
/// assert_eq!(options.threshold(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundOptions {
    color_threshold: f64,
    edge_dominance: f64,
    skip_transparency_ratio: f64,
    fallback_to_all_edge_colors: bool,
}

impl Default for BackgroundOptions {
    fn default() -> Self {
        Self {
            color_threshold: 40.0,
            edge_dominance: 0.30,
            skip_transparency_ratio: 0.10,
            fallback_to_all_edge_colors: true,
        }
    }
}

impl BackgroundOptions {
    /// Pixels closer than this Euclidean RGB distance to a candidate color
    /// count as background (default 40).
    #[inline]
    pub fn color_threshold(mut self, threshold: f64) -> Self {
        self.color_threshold = threshold;
        self
    }

    /// Share of `width + height` an edge color must exceed to count as
    /// background (default 0.30).
    #[inline]
    pub fn edge_dominance(mut self, dominance: f64) -> Self {
        self.edge_dominance = dominance;
        self
    }

    /// Images already at least this transparent are left alone (default 0.10).
    #[inline]
    pub fn skip_transparency_ratio(mut self, ratio: f64) -> Self {
        self.skip_transparency_ratio = ratio;
        self
    }

    /// Whether to treat every edge color as background when none dominates
    /// (default true).
    #[inline]
    pub fn fallback_to_all_edge_colors(mut self, fallback: bool) -> Self {
        self.fallback_to_all_edge_colors = fallback;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.color_threshold
    }

    pub fn dominance(&self) -> f64 {
        self.edge_dominance
    }

    pub fn skip_ratio(&self) -> f64 {
        self.skip_transparency_ratio
    }

    pub fn fallback(&self) -> bool {
        self.fallback_to_all_edge_colors
    }
}

/// What [`clean_background`] decided to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundOutcome {
    /// The image already had enough transparency; nothing was touched.
    AlreadyTransparent,
    /// A single pixel has nothing to separate from.
    SinglePixel,
    /// No edge color qualified as background.
    NoCandidates,
    /// Flood fill ran (possibly removing zero pixels).
    Cleaned,
}

impl BackgroundOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            BackgroundOutcome::AlreadyTransparent => "alreadyTransparent",
            BackgroundOutcome::SinglePixel => "singlePixel",
            BackgroundOutcome::NoCandidates => "noCandidates",
            BackgroundOutcome::Cleaned => "cleaned",
        }
    }
}

/// Summary of one [`clean_background`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundReport {
    /// Fraction of pixels with alpha < 128 before cleaning
    pub transparency_ratio: f64,
    pub outcome: BackgroundOutcome,
    /// Colors treated as background, in ascending RGB order
    pub candidates: Vec<Rgb8>,
    /// Number of pixels made transparent
    pub removed: usize,
}

/// Erase the border-connected background of `raster` in place.
///
/// 1. If at least `skip_transparency_ratio` of the pixels are already
///    non-solid (alpha < 128), return without changes.
/// 2. Count the colors of visible pixels along the top and bottom rows and
///    the left and right columns. Corners are counted twice.
/// 3. Colors seen more than `floor((width + height) * edge_dominance)` times
///    are background candidates. With none, all edge colors are used when
///    the fallback is enabled.
/// 4. Flood fill (4-connected) from every border pixel through pixels closer than
///    `color_threshold` of any candidate, then set them all to `(0,0,0,0)`.
///
/// A background color that also appears inside the sprite survives unless it
/// touches a connected region reaching the border.
///
/// # Example
///
/// ```
/// use sprite_pipeline::{clean_background, BackgroundOptions, Raster};
///
/// let mut raster = Raster::filled(5, 5, [255, 255, 255, 255]).unwrap();
/// raster.set_pixel(2, 2, [200, 0, 0, 255]);
///
/// let report = clean_background(&mut raster, &BackgroundOptions::default());
///
/// assert_eq!(report.removed, 24);
/// assert_eq!(raster.pixel(0, 0), [0, 0, 0, 0]);
/// assert_eq!(raster.pixel(2, 2), [200, 0, 0, 255]);
/// ```
pub fn clean_background(raster: &mut Raster, options: &BackgroundOptions) -> BackgroundReport {
    let transparency_ratio = raster.transparency_ratio();
    let mut report = BackgroundReport {
        transparency_ratio,
        outcome: BackgroundOutcome::Cleaned,
        candidates: Vec::new(),
        removed: 0,
    };

    if transparency_ratio >= options.skip_transparency_ratio {
        tracing::debug!(transparency_ratio, "Background already transparent, skipping");
        report.outcome = BackgroundOutcome::AlreadyTransparent;
        return report;
    }

    if raster.pixel_count() == 1 {
        report.outcome = BackgroundOutcome::SinglePixel;
        return report;
    }

    let candidates = background_candidates(raster, options);
    if candidates.is_empty() {
        tracing::debug!("No background candidates on the image edge");
        report.outcome = BackgroundOutcome::NoCandidates;
        return report;
    }

    let threshold_sq = options.color_threshold * options.color_threshold;
    let background_like: Vec<bool> = (0..raster.pixel_count())
        .map(|idx| {
            let color = raster.rgb_at(idx);
            candidates
                .iter()
                .any(|&c| (color.distance_squared(c) as f64) < threshold_sq)
        })
        .collect();

    let remove = flood_from_border(raster, &background_like);

    raster.ensure_alpha();
    for idx in (0..remove.len()).filter(|&idx| remove[idx]) {
        raster.set_pixel_at(idx, TRANSPARENT);
        report.removed += 1;
    }

    tracing::debug!(
        candidates = candidates.len(),
        removed = report.removed,
        "Removed edge-connected background"
    );

    report.candidates = candidates;
    report
}

/// Histogram of visible border colors with corners counted twice.
fn edge_histogram(raster: &Raster) -> BTreeMap<Rgb8, usize> {
    let (width, height) = (raster.width(), raster.height());
    let mut counts = BTreeMap::new();
    let mut sample = |x: usize, y: usize| {
        let idx = raster.index_of(x, y);
        if raster.alpha_at(idx) > 0 {
            *counts.entry(raster.rgb_at(idx)).or_insert(0) += 1;
        }
    };

    for x in 0..width {
        sample(x, 0);
        sample(x, height - 1);
    }
    for y in 0..height {
        sample(0, y);
        sample(width - 1, y);
    }

    counts
}

fn background_candidates(raster: &Raster, options: &BackgroundOptions) -> Vec<Rgb8> {
    let counts = edge_histogram(raster);
    let min_count = ((raster.width() + raster.height()) as f64 * options.edge_dominance).floor();

    let dominant: Vec<Rgb8> = counts
        .iter()
        .filter(|&(_, &count)| count as f64 > min_count)
        .map(|(&color, _)| color)
        .collect();

    if !dominant.is_empty() || !options.fallback_to_all_edge_colors {
        return dominant;
    }

    counts.into_keys().collect()
}

/// 4-connected fill seeded from every border pixel that is background-like.
///
/// Uses an explicit stack; recursion would overflow on large backgrounds.
fn flood_from_border(raster: &Raster, background_like: &[bool]) -> Vec<bool> {
    let (width, height) = (raster.width(), raster.height());
    let mut visited = vec![false; background_like.len()];
    let mut remove = vec![false; background_like.len()];
    let mut stack: Vec<usize> = (0..background_like.len())
        .filter(|&idx| raster.is_border(idx))
        .collect();

    while let Some(idx) = stack.pop() {
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        if !background_like[idx] {
            continue;
        }
        remove[idx] = true;

        let (x, y) = (idx % width, idx / width);
        if x > 0 && !visited[idx - 1] {
            stack.push(idx - 1);
        }
        if x + 1 < width && !visited[idx + 1] {
            stack.push(idx + 1);
        }
        if y > 0 && !visited[idx - width] {
            stack.push(idx - width);
        }
        if y + 1 < height && !visited[idx + width] {
            stack.push(idx + width);
        }
    }

    remove
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const RED: [u8; 4] = [220, 20, 20, 255];

    fn fill_rect(raster: &mut Raster, x0: usize, y0: usize, w: usize, h: usize, rgba: [u8; 4]) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                raster.set_pixel(x, y, rgba);
            }
        }
    }

    #[test]
    fn test_white_backdrop_removed_sprite_kept() {
        let mut raster = Raster::filled(16, 16, WHITE).unwrap();
        fill_rect(&mut raster, 4, 4, 8, 8, RED);

        let report = clean_background(&mut raster, &BackgroundOptions::default());

        assert_eq!(report.outcome, BackgroundOutcome::Cleaned);
        assert_eq!(report.candidates, vec![Rgb8::WHITE]);
        assert_eq!(report.removed, 16 * 16 - 64);
        assert_eq!(raster.pixel(0, 0), TRANSPARENT);
        assert_eq!(raster.pixel(3, 8), TRANSPARENT);
        assert_eq!(raster.pixel(4, 4), RED);
        assert_eq!(raster.pixel(11, 11), RED);
    }

    #[test]
    fn test_enclosed_background_color_survives() {
        // A white "eye" inside the red block is not reachable from the border
        let mut raster = Raster::filled(12, 12, WHITE).unwrap();
        fill_rect(&mut raster, 3, 3, 6, 6, RED);
        raster.set_pixel(5, 5, WHITE);

        clean_background(&mut raster, &BackgroundOptions::default());

        assert_eq!(raster.pixel(5, 5), WHITE);
        assert_eq!(raster.pixel(0, 5), TRANSPARENT);
    }

    #[test]
    fn test_near_background_shades_are_removed() {
        let mut raster = Raster::filled(10, 10, WHITE).unwrap();
        // Distance from white: sqrt(3 * 20^2) ~ 34.6 < 40
        fill_rect(&mut raster, 0, 0, 10, 2, [235, 235, 235, 255]);
        fill_rect(&mut raster, 4, 4, 2, 2, RED);

        clean_background(&mut raster, &BackgroundOptions::default());

        assert_eq!(raster.pixel(5, 0), TRANSPARENT);
        assert_eq!(raster.pixel(5, 1), TRANSPARENT);
        assert_eq!(raster.pixel(4, 4), RED);
    }

    #[test]
    fn test_distance_equal_to_threshold_is_kept() {
        let mut raster = Raster::filled(10, 10, WHITE).unwrap();
        raster.set_pixel(0, 5, [255, 255, 215, 255]);

        let report = clean_background(&mut raster, &BackgroundOptions::default());

        assert_eq!(report.removed, 99);
        assert_eq!(raster.pixel(0, 5), [255, 255, 215, 255]);
    }

    #[test]
    fn test_skip_when_already_transparent() {
        let mut raster = Raster::filled(10, 10, WHITE).unwrap();
        fill_rect(&mut raster, 0, 0, 10, 1, [0, 0, 0, 0]);
        let before = raster.clone();

        let report = clean_background(&mut raster, &BackgroundOptions::default());

        assert_eq!(report.outcome, BackgroundOutcome::AlreadyTransparent);
        assert_eq!(report.transparency_ratio, 0.10);
        assert_eq!(raster, before);
    }

    #[test]
    fn test_just_below_skip_ratio_still_cleans() {
        let mut raster = Raster::filled(10, 10, WHITE).unwrap();
        fill_rect(&mut raster, 0, 0, 9, 1, [0, 0, 0, 0]);
        fill_rect(&mut raster, 4, 4, 2, 2, RED);

        let report = clean_background(&mut raster, &BackgroundOptions::default());

        assert_eq!(report.outcome, BackgroundOutcome::Cleaned);
        assert_eq!(raster.pixel(5, 8), TRANSPARENT);
    }

    #[test]
    fn test_single_pixel_is_left_alone() {
        let mut raster = Raster::filled(1, 1, WHITE).unwrap();
        let before = raster.clone();

        let report = clean_background(&mut raster, &BackgroundOptions::default());

        assert_eq!(report.outcome, BackgroundOutcome::SinglePixel);
        assert_eq!(raster, before);
    }

    #[test]
    fn test_thin_strip_is_cleaned() {
        let mut raster = Raster::filled(64, 2, WHITE).unwrap();
        raster.set_pixel(10, 0, RED);

        let report = clean_background(&mut raster, &BackgroundOptions::default());

        assert_eq!(report.outcome, BackgroundOutcome::Cleaned);
        assert_eq!(report.removed, 127);
        assert_eq!(raster.pixel(0, 0), TRANSPARENT);
        assert_eq!(raster.pixel(63, 1), TRANSPARENT);
        assert_eq!(raster.pixel(10, 0), RED);
    }

    #[test]
    fn test_single_row_is_cleaned() {
        let mut raster = Raster::filled(20, 1, WHITE).unwrap();
        raster.set_pixel(10, 0, RED);

        let report = clean_background(&mut raster, &BackgroundOptions::default());

        assert_eq!(report.candidates, vec![Rgb8::new(255, 255, 255)]);
        assert_eq!(report.removed, 19);
        assert_eq!(raster.pixel(10, 0), RED);
    }

    #[test]
    fn test_dominance_threshold_is_strict() {
        // 10x10 -> min count floor(20 * 0.3) = 6
        let mut raster = Raster::filled(10, 10, RED).unwrap();
        fill_rect(&mut raster, 2, 0, 6, 1, WHITE);
        assert_eq!(edge_histogram(&raster).get(&Rgb8::WHITE), Some(&6));

        let candidates = background_candidates(&raster, &BackgroundOptions::default());
        assert_eq!(candidates, vec![Rgb8::new(220, 20, 20)]);

        // One more sample pushes white over the threshold
        raster.set_pixel(1, 0, WHITE);
        let candidates = background_candidates(&raster, &BackgroundOptions::default());
        assert_eq!(candidates, vec![Rgb8::new(220, 20, 20), Rgb8::WHITE]);
    }

    #[test]
    fn test_corners_count_twice() {
        let mut raster = Raster::filled(4, 4, WHITE).unwrap();
        raster.set_pixel(0, 0, RED);
        let counts = edge_histogram(&raster);
        assert_eq!(counts.get(&Rgb8::new(220, 20, 20)), Some(&2));
        assert_eq!(counts.values().sum::<usize>(), 16);
    }

    #[test]
    fn test_fallback_uses_all_edge_colors() {
        // Every border pixel a different color: nothing dominates
        let mut raster = Raster::filled(8, 8, RED).unwrap();
        let mut n = 0u8;
        for idx in 0..64 {
            if raster.is_border(idx) {
                raster.set_pixel_at(idx, [n, n, 255 - n, 255]);
                n = n.wrapping_add(90);
            }
        }

        let with_fallback = background_candidates(&raster, &BackgroundOptions::default());
        assert!(!with_fallback.is_empty());

        let without = background_candidates(
            &raster,
            &BackgroundOptions::default().fallback_to_all_edge_colors(false),
        );
        assert!(without.is_empty());

        let mut copy = raster.clone();
        let report = clean_background(
            &mut copy,
            &BackgroundOptions::default().fallback_to_all_edge_colors(false),
        );
        assert_eq!(report.outcome, BackgroundOutcome::NoCandidates);
        assert_eq!(copy, raster);
    }

    #[test]
    fn test_rgb_input_gains_alpha() {
        let mut data = Vec::new();
        for idx in 0..25 {
            if idx == 12 {
                data.extend_from_slice(&[200, 0, 0]);
            } else {
                data.extend_from_slice(&[255, 255, 255]);
            }
        }
        let mut raster = Raster::new(5, 5, 3, data).unwrap();

        let report = clean_background(&mut raster, &BackgroundOptions::default());

        assert!(raster.has_alpha());
        assert_eq!(report.removed, 24);
        assert_eq!(raster.pixel(2, 2), [200, 0, 0, 255]);
    }

    #[test]
    fn test_large_background_does_not_overflow_stack() {
        let mut raster = Raster::filled(1024, 1024, WHITE).unwrap();
        raster.set_pixel(512, 512, RED);

        let report = clean_background(&mut raster, &BackgroundOptions::default());

        assert_eq!(report.removed, 1024 * 1024 - 1);
    }

    #[test]
    fn test_transparent_edge_pixels_not_sampled() {
        // Semi-transparent pixels stay below the skip ratio but alpha 0 edge
        // pixels are not counted as a color
        let mut raster = Raster::filled(20, 20, WHITE).unwrap();
        raster.set_pixel(0, 0, [9, 9, 9, 0]);
        let counts = edge_histogram(&raster);
        assert_eq!(counts.get(&Rgb8::new(9, 9, 9)), None);
    }
}
