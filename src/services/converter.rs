use sprite_pipeline::{PipelineReport, SpritePipeline};
use std::sync::Arc;

use crate::codec::{decode_image, encode_png};
use crate::error::ApiError;
use crate::models::AppConfig;

/// How the returned image was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMethod {
    /// The sprite pipeline ran
    Pipeline,
    /// Processing failed; the source image is returned unchanged
    Passthrough,
}

impl ConversionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversionMethod::Pipeline => "pipeline",
            ConversionMethod::Passthrough => "passthrough",
        }
    }
}

/// Result of converting one image
#[derive(Debug, Clone)]
pub struct Conversion {
    pub png: Vec<u8>,
    pub method: ConversionMethod,
    /// Present when the pipeline ran
    pub report: Option<PipelineReport>,
}

/// Turns generated PNG images into sprites
///
/// Cloning is cheap; clones share the pipeline.
#[derive(Clone)]
pub struct ConverterService {
    pipeline: Arc<SpritePipeline>,
    max_source_dimension: u32,
}

impl ConverterService {
    pub fn new(pipeline: SpritePipeline, max_source_dimension: u32) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            max_source_dimension,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.pipeline.to_pipeline(),
            config.server.max_source_dimension,
        )
    }

    pub fn pipeline(&self) -> &SpritePipeline {
        &self.pipeline
    }

    /// Decode a PNG, JPEG or WebP source, process it and encode the sprite
    /// as PNG.
    pub fn convert(&self, source: &[u8]) -> Result<(Vec<u8>, PipelineReport), ApiError> {
        let source = decode_image(source, self.max_source_dimension)?;
        let output = self.pipeline.run(&source)?;
        let png = encode_png(&output.raster)?;

        tracing::info!(
            source_width = output.report.source_width,
            source_height = output.report.source_height,
            colors = output.report.quantize.output_colors,
            background_removed = output.report.background.removed,
            islands_removed = output.report.islands_removed,
            verdict = output.report.final_check.verdict.as_str(),
            bytes = png.len(),
            "Converted sprite"
        );

        Ok((png, output.report))
    }

    /// Convert, returning the source unchanged if anything fails.
    pub fn convert_or_passthrough(&self, source_png: &[u8]) -> Conversion {
        match self.convert(source_png) {
            Ok((png, report)) => Conversion {
                png,
                method: ConversionMethod::Pipeline,
                report: Some(report),
            },
            Err(e) => {
                tracing::warn!(%e, "Post-processing failed, returning original image");
                Conversion {
                    png: source_png.to_vec(),
                    method: ConversionMethod::Passthrough,
                    report: None,
                }
            }
        }
    }

    /// Run [`convert_or_passthrough`](Self::convert_or_passthrough) off the
    /// async runtime.
    ///
    /// Uses spawn_blocking: decoding, the pipeline and oxipng are all
    /// CPU-bound.
    pub async fn convert_in_blocking_context(
        &self,
        source_png: Vec<u8>,
    ) -> Result<Conversion, ApiError> {
        let converter = self.clone();

        tokio::task::spawn_blocking(move || converter.convert_or_passthrough(&source_png))
            .await
            .map_err(|e| ApiError::Internal(format!("Conversion task failed: {e}")))
    }
}
