//! Spriteforge - pixel-art sprites from generated character images
//!
//! CLI, configuration, PNG codec and HTTP service around the
//! `sprite-pipeline` crate. This library exposes modules for integration
//! testing.

pub mod api;
pub mod codec;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
