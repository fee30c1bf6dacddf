//! Stray pixel removal.

use crate::raster::{Raster, SOLID_ALPHA, TRANSPARENT};

/// A solid pixel with this many solid 4-neighbors or fewer is an island.
const MAX_ISLAND_NEIGHBORS: usize = 1;

/// Erase solid pixels that have at most one solid 4-neighbor.
///
/// Background removal and downscaling leave single-pixel specks and one
/// pixel "whiskers" around the sprite. A pixel is solid when its alpha is
/// at least 128; out-of-bounds neighbors count as not solid.
///
/// Neighbor counts are taken from the raster as it was on entry, so
/// removing one pixel never turns its neighbor into an island during the
/// same pass. Returns the number of pixels set to `(0, 0, 0, 0)`.
///
/// # Example
///
/// ```
/// use sprite_pipeline::{remove_islands, Raster};
///
/// let mut raster = Raster::filled(3, 3, [0, 0, 0, 0]).unwrap();
/// raster.set_pixel(1, 1, [255, 0, 0, 255]);
///
/// assert_eq!(remove_islands(&mut raster), 1);
/// assert_eq!(raster.pixel(1, 1), [0, 0, 0, 0]);
/// ```
pub fn remove_islands(raster: &mut Raster) -> usize {
    let (width, height) = (raster.width(), raster.height());
    let solid: Vec<bool> = (0..raster.pixel_count())
        .map(|idx| raster.alpha_at(idx) >= SOLID_ALPHA)
        .collect();

    let islands: Vec<usize> = (0..solid.len())
        .filter(|&idx| solid[idx])
        .filter(|&idx| {
            let (x, y) = (idx % width, idx / width);
            let neighbors = [
                x > 0 && solid[idx - 1],
                x + 1 < width && solid[idx + 1],
                y > 0 && solid[idx - width],
                y + 1 < height && solid[idx + width],
            ];
            neighbors.iter().filter(|&&n| n).count() <= MAX_ISLAND_NEIGHBORS
        })
        .collect();

    if !islands.is_empty() {
        raster.ensure_alpha();
        for &idx in &islands {
            raster.set_pixel_at(idx, TRANSPARENT);
        }
        tracing::debug!(removed = islands.len(), "Removed isolated pixels");
    }

    islands.len()
}
