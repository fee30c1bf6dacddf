use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{PaletteDto, PaletteSource};
use crate::services::resolve_palette;

/// Request body for /api/palette
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaletteRequest {
    /// Explicit palette to normalize
    #[serde(default)]
    pub palette: Option<PaletteDto>,
    /// Free-text vision model reply containing a palette JSON object
    #[serde(default)]
    pub vision_reply: Option<String>,
}

/// Response from the /api/palette endpoint
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaletteResponse {
    pub palette: PaletteDto,
    pub palette_source: PaletteSource,
}

/// Resolve and normalize a character palette
///
/// Garment colors close to white or black snap to pure white or black, and
/// very dark footwear is lightened. Without a usable input the default
/// palette is returned.
#[utoipa::path(
    post,
    path = "/api/palette",
    request_body = PaletteRequest,
    responses(
        (status = 200, description = "Normalized palette", body = PaletteResponse),
        (status = 400, description = "Invalid explicit palette"),
    ),
    tag = "Palette"
)]
pub async fn handle_palette(
    Json(request): Json<PaletteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (palette, palette_source) =
        resolve_palette(request.palette.as_ref(), request.vision_reply.as_deref())?;

    tracing::debug!(source = ?palette_source, "Palette resolved");

    Ok(Json(PaletteResponse {
        palette: PaletteDto::from(&palette),
        palette_source,
    }))
}
