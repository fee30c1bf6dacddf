//! Transparency cleanup: background removal and stray pixel removal.
//!
//! Both stages only ever write `(0, 0, 0, 0)`; they never change the color of
//! a pixel that stays visible.
//!
//! - [`clean_background`] erases the flat backdrop that touches the image
//!   border, using the colors that dominate the edge as the backdrop model.
//! - [`remove_islands`] erases solid pixels with at most one solid
//!   4-neighbor, run after downscaling has turned backdrop noise into
//!   single-pixel specks.

mod background;
mod islands;

pub use background::{clean_background, BackgroundOptions, BackgroundOutcome, BackgroundReport};
pub use islands::remove_islands;
