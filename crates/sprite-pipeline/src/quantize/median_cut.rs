//! Median-cut color reduction.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::color::Rgb8;
use crate::raster::{Raster, TRANSPARENT};

/// Upper bound for `max_colors`; matches the size of a PNG palette.
pub const MAX_PALETTE_SIZE: usize = 256;

/// Summary of one [`quantize`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizeReport {
    /// Distinct visible colors before quantization
    pub input_colors: usize,
    /// Distinct visible colors after quantization
    pub output_colors: usize,
    /// The visible colors after quantization, ascending
    pub palette: Vec<Rgb8>,
}

/// A set of histogram entries that will collapse to one output color.
struct ColorBox {
    entries: Vec<(Rgb8, u64)>,
    population: u64,
}

impl ColorBox {
    fn new(entries: Vec<(Rgb8, u64)>) -> Self {
        let population = entries.iter().map(|&(_, count)| count).sum();
        Self {
            entries,
            population,
        }
    }

    /// Widest channel (0 = r, 1 = g, 2 = b) and its value range.
    fn widest_channel(&self) -> (usize, u8) {
        let mut lo = [u8::MAX; 3];
        let mut hi = [u8::MIN; 3];
        for (color, _) in &self.entries {
            for (c, v) in color.to_bytes().into_iter().enumerate() {
                lo[c] = lo[c].min(v);
                hi[c] = hi[c].max(v);
            }
        }
        // First channel wins ties
        (0..3)
            .map(|c| (c, hi[c] - lo[c]))
            .fold((0, 0), |best, cur| if cur.1 > best.1 { cur } else { best })
    }

    fn can_split(&self) -> bool {
        self.entries.len() > 1
    }

    /// Split at the population-weighted median of the widest channel.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (channel, _) = self.widest_channel();
        self.entries
            .sort_by_key(|&(color, _)| (color.to_bytes()[channel], color));

        let mut cumulative = 0u64;
        let mut cut = self.entries.len() - 1;
        for (i, &(_, count)) in self.entries.iter().enumerate() {
            cumulative += count;
            if cumulative * 2 >= self.population {
                cut = i + 1;
                break;
            }
        }
        let cut = cut.clamp(1, self.entries.len() - 1);

        let upper = self.entries.split_off(cut);
        (ColorBox::new(self.entries), ColorBox::new(upper))
    }

    /// Population-weighted mean, rounded half up.
    fn mean(&self) -> Rgb8 {
        let mut sums = [0u64; 3];
        for &(color, count) in &self.entries {
            for (sum, v) in sums.iter_mut().zip(color.to_bytes()) {
                *sum += v as u64 * count;
            }
        }
        let half = self.population / 2;
        let channel = |sum: u64| ((sum + half) / self.population) as u8;
        Rgb8::new(channel(sums[0]), channel(sums[1]), channel(sums[2]))
    }
}

/// Pick the next box to split: widest range, then larger population, then
/// lower index.
fn next_split(boxes: &[ColorBox]) -> Option<usize> {
    boxes
        .iter()
        .enumerate()
        .filter(|(_, b)| b.can_split())
        .map(|(i, b)| (i, b.widest_channel().1, b.population))
        .fold(None, |best: Option<(usize, u8, u64)>, cur| match best {
            Some(b) if (b.1, b.2) >= (cur.1, cur.2) => Some(b),
            _ => Some(cur),
        })
        .map(|(i, _, _)| i)
}

/// Reduce the visible colors of `raster` to at most `max_colors`.
///
/// - Pixels with alpha 0 become exactly `(0, 0, 0, 0)`.
/// - Visible pixels keep their alpha; only RGB changes.
/// - With no more than `max_colors` visible colors, RGB is left as is.
///
/// `max_colors` is clamped to `1..=256`. The result is deterministic:
/// identical input always produces identical output.
///
/// # Example
///
/// ```
/// use sprite_pipeline::{quantize, Raster};
///
/// let mut raster = Raster::filled(4, 1, [0, 0, 0, 255]).unwrap();
/// raster.set_pixel(1, 0, [10, 0, 0, 255]);
/// raster.set_pixel(2, 0, [250, 250, 250, 255]);
/// raster.set_pixel(3, 0, [240, 250, 250, 255]);
///
/// let report = quantize(&mut raster, 2);
///
/// assert_eq!(report.input_colors, 4);
/// assert_eq!(report.output_colors, 2);
/// assert_eq!(raster.pixel(0, 0), raster.pixel(1, 0));
/// ```
pub fn quantize(raster: &mut Raster, max_colors: usize) -> QuantizeReport {
    let max_colors = max_colors.clamp(1, MAX_PALETTE_SIZE);
    raster.ensure_alpha();

    let mut histogram: BTreeMap<Rgb8, u64> = BTreeMap::new();
    for idx in 0..raster.pixel_count() {
        if raster.alpha_at(idx) == 0 {
            raster.set_pixel_at(idx, TRANSPARENT);
        } else {
            *histogram.entry(raster.rgb_at(idx)).or_insert(0) += 1;
        }
    }

    let input_colors = histogram.len();
    if input_colors <= max_colors {
        return QuantizeReport {
            input_colors,
            output_colors: input_colors,
            palette: histogram.into_keys().collect(),
        };
    }

    let mut boxes = vec![ColorBox::new(histogram.into_iter().collect())];
    while boxes.len() < max_colors {
        let Some(i) = next_split(&boxes) else {
            break;
        };
        let (lower, upper) = boxes.swap_remove(i).split();
        boxes.push(lower);
        boxes.push(upper);
    }

    let mut mapping: HashMap<Rgb8, Rgb8> = HashMap::with_capacity(input_colors);
    for color_box in &boxes {
        let mean = color_box.mean();
        for &(color, _) in &color_box.entries {
            mapping.insert(color, mean);
        }
    }

    for idx in 0..raster.pixel_count() {
        let alpha = raster.alpha_at(idx);
        if alpha == 0 {
            continue;
        }
        if let Some(mean) = mapping.get(&raster.rgb_at(idx)) {
            let [r, g, b] = mean.to_bytes();
            raster.set_pixel_at(idx, [r, g, b, alpha]);
        }
    }

    let palette: BTreeSet<Rgb8> = mapping.into_values().collect();
    tracing::debug!(
        input_colors,
        output_colors = palette.len(),
        "Quantized colors"
    );

    QuantizeReport {
        input_colors,
        output_colors: palette.len(),
        palette: palette.into_iter().collect(),
    }
}
