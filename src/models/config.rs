use serde::Deserialize;
use sprite_pipeline::quantize::MAX_PALETTE_SIZE;
use sprite_pipeline::{BackgroundOptions, SpritePipeline};
use std::path::Path;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Sprite pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// HTTP server limits
    #[serde(default)]
    pub server: ServerSettings,
}

/// Configuration for the sprite pipeline stages
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    /// Output sprite width in pixels
    pub target_width: usize,

    /// Output sprite height in pixels
    pub target_height: usize,

    /// Maximum number of distinct visible colors
    pub max_colors: usize,

    /// Run stray pixel removal after background cleanup
    pub remove_islands: bool,

    /// Background removal tuning
    pub background: BackgroundSettings,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            target_width: 64,
            target_height: 64,
            max_colors: 12,
            remove_islands: true,
            background: BackgroundSettings::default(),
        }
    }
}

/// Configuration for edge-connected background removal
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BackgroundSettings {
    /// RGB distance below which a pixel matches a background candidate
    pub threshold: f64,

    /// Share of (width + height) an edge color must exceed
    pub edge_dominance: f64,

    /// Skip removal when at least this share of pixels is already transparent
    pub skip_transparency_ratio: f64,

    /// Use every edge color when none dominates
    pub fallback_to_all_edge_colors: bool,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            threshold: 40.0,
            edge_dominance: 0.30,
            skip_transparency_ratio: 0.10,
            fallback_to_all_edge_colors: true,
        }
    }
}

/// Configuration for request limits
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,

    /// Maximum width or height of a decoded source image
    pub max_source_dimension: u32,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            max_body_bytes: 10 * 1024 * 1024,
            max_source_dimension: 4096,
        }
    }
}

fn check_ratio(name: &str, value: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{name} must be between 0 and 1, got {value}"))
    }
}

impl BackgroundSettings {
    /// Reject thresholds and ratios the background stage cannot use.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(format!(
                "background.threshold must be a positive number, got {}",
                self.threshold
            ));
        }
        check_ratio("background.edge_dominance", self.edge_dominance)?;
        check_ratio(
            "background.skip_transparency_ratio",
            self.skip_transparency_ratio,
        )
    }
}

impl PipelineSettings {
    /// Reject settings that would make every conversion fail or misbehave.
    pub fn validate(&self) -> Result<(), String> {
        if self.target_width == 0 || self.target_height == 0 {
            return Err(format!(
                "target size must be positive, got {}x{}",
                self.target_width, self.target_height
            ));
        }
        if !(1..=MAX_PALETTE_SIZE).contains(&self.max_colors) {
            return Err(format!(
                "max_colors must be between 1 and {MAX_PALETTE_SIZE}, got {}",
                self.max_colors
            ));
        }
        self.background.validate()
    }

    /// Build the pipeline these settings describe.
    pub fn to_pipeline(&self) -> SpritePipeline {
        let background = BackgroundOptions::default()
            .color_threshold(self.background.threshold)
            .edge_dominance(self.background.edge_dominance)
            .skip_transparency_ratio(self.background.skip_transparency_ratio)
            .fallback_to_all_edge_colors(self.background.fallback_to_all_edge_colors);

        SpritePipeline::new()
            .target_size(self.target_width, self.target_height)
            .max_colors(self.max_colors)
            .remove_islands(self.remove_islands)
            .background(background)
    }
}

impl ServerSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_body_bytes == 0 {
            return Err("max_body_bytes must be positive".to_string());
        }
        if self.max_source_dimension == 0 {
            return Err("max_source_dimension must be positive".to_string());
        }
        Ok(())
    }
}

impl AppConfig {
    /// Replace every section that fails validation with its defaults.
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.pipeline.validate() {
            tracing::warn!(error = %e, "Invalid pipeline settings, using defaults");
            self.pipeline = PipelineSettings::default();
        }
        if let Err(e) = self.server.validate() {
            tracing::warn!(error = %e, "Invalid server settings, using defaults");
            self.server = ServerSettings::default();
        }
        self
    }

    /// Load configuration from a YAML file.
    ///
    /// A missing path, unreadable file or invalid YAML falls back to the
    /// defaults with a warning. So does each section holding out-of-range
    /// values.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    let config = config.sanitized();
                    tracing::info!(
                        path = %path.display(),
                        target_width = config.pipeline.target_width,
                        target_height = config.pipeline.target_height,
                        max_colors = config.pipeline.max_colors,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}
