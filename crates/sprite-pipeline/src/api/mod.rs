//! Public API for the sprite-pipeline crate.
//!
//! This module provides the high-level API: the [`SpritePipeline`] builder
//! and the [`PipelineError`] unified error type.

mod builder;
mod error;

pub use builder::{PipelineOutput, SpritePipeline, DEFAULT_MAX_COLORS, DEFAULT_SPRITE_SIZE};
pub use error::PipelineError;
