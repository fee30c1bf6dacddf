use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use sprite_pipeline::{PipelineReport, TransparencyCheck};
use utoipa::ToSchema;

use crate::codec::{parse_data_url, to_png_data_url};
use crate::error::ApiError;
use crate::models::{PaletteDto, PaletteSource};
use crate::services::{resolve_palette, ConversionMethod, ConverterService};

/// Request body for /api/convert
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    /// Generated image as a `data:image/png;base64,...` URL or bare base64
    #[schema(example = "data:image/png;base64,iVBORw0KGgo...")]
    pub image_url: String,
    /// Explicit palette; takes precedence over `visionReply`
    #[serde(default)]
    pub palette: Option<PaletteDto>,
    /// Free-text vision model reply containing a palette JSON object
    #[serde(default)]
    pub vision_reply: Option<String>,
}

/// Response from the /api/convert endpoint
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub success: bool,
    /// Sprite as a PNG data URL, or the submitted image on passthrough
    pub converted_image_url: String,
    /// "pipeline" or "passthrough"
    #[schema(example = "pipeline")]
    pub method: String,
    /// Normalized palette for the character
    pub palette: PaletteDto,
    pub palette_source: PaletteSource,
    /// Stage diagnostics, absent on passthrough
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ConvertMetrics>,
}

/// Diagnostics collected while converting
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertMetrics {
    pub source_width: usize,
    pub source_height: usize,
    pub width: usize,
    pub height: usize,
    /// Distinct visible colors before quantization
    pub input_colors: usize,
    /// Distinct visible colors in the sprite
    pub colors: usize,
    /// Background stage outcome, e.g. "cleaned" or "alreadyTransparent"
    pub background_outcome: String,
    pub background_removed: usize,
    pub islands_removed: usize,
    /// Transparency right after downscaling
    pub downscaled: TransparencyMetrics,
    /// Transparency of the finished sprite
    pub final_check: TransparencyMetrics,
}

/// Alpha-zero pixel count and its classification
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransparencyMetrics {
    pub alpha_zero: usize,
    pub total: usize,
    /// "transparent", "partial" or "opaque"
    pub verdict: String,
}

impl From<&TransparencyCheck> for TransparencyMetrics {
    fn from(check: &TransparencyCheck) -> Self {
        Self {
            alpha_zero: check.alpha_zero,
            total: check.total,
            verdict: check.verdict.as_str().to_string(),
        }
    }
}

impl ConvertMetrics {
    fn new(report: &PipelineReport, width: usize, height: usize) -> Self {
        Self {
            source_width: report.source_width,
            source_height: report.source_height,
            width,
            height,
            input_colors: report.quantize.input_colors,
            colors: report.quantize.output_colors,
            background_outcome: report.background.outcome.as_str().to_string(),
            background_removed: report.background.removed,
            islands_removed: report.islands_removed,
            downscaled: TransparencyMetrics::from(&report.downscaled),
            final_check: TransparencyMetrics::from(&report.final_check),
        }
    }
}

/// Convert a generated character image into a pixel-art sprite
///
/// The image is downscaled, its edge-connected background removed, stray
/// pixels dropped and its colors reduced. When the image cannot be decoded
/// or processed, it is returned unchanged with method "passthrough".
#[utoipa::path(
    post,
    path = "/api/convert",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Sprite produced (or source passed through)", body = ConvertResponse),
        (status = 400, description = "Missing image, malformed data URL or invalid palette"),
    ),
    tag = "Conversion"
)]
pub async fn handle_convert(
    State(converter): State<ConverterService>,
    Json(request): Json<ConvertRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let image_url = request.image_url.trim();
    if image_url.is_empty() {
        return Err(ApiError::BadRequest("imageUrl is required".to_string()));
    }

    let (palette, palette_source) =
        resolve_palette(request.palette.as_ref(), request.vision_reply.as_deref())?;

    let source_png =
        parse_data_url(image_url).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    tracing::info!(
        bytes = source_png.len(),
        palette_source = ?palette_source,
        "Convert request received"
    );

    let conversion = converter.convert_in_blocking_context(source_png).await?;

    let pipeline = converter.pipeline();
    let metrics = conversion
        .report
        .as_ref()
        .map(|report| ConvertMetrics::new(report, pipeline.target_width(), pipeline.target_height()));

    let converted_image_url = match conversion.method {
        ConversionMethod::Pipeline => to_png_data_url(&conversion.png),
        ConversionMethod::Passthrough => image_url.to_string(),
    };

    Ok(Json(ConvertResponse {
        success: true,
        converted_image_url,
        method: conversion.method.as_str().to_string(),
        palette: PaletteDto::from(&palette),
        palette_source,
        metrics,
    }))
}
