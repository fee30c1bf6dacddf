use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sprite_pipeline::{PaletteError, PipelineError, RasterError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),

    #[error("Invalid image: {0}")]
    Codec(#[from] CodecError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Unsupported data URL: {0}")]
    UnsupportedDataUrl(String),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Image too large: {width}x{height} (max {max} per side)")]
    ImageTooLarge { width: u32, height: u32, max: u32 },

    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Palette(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Codec(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ApiError::Pipeline(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprite_pipeline::PaletteRole;

    #[test]
    fn test_api_error_bad_request() {
        let error = ApiError::BadRequest("imageUrl is empty".to_string());
        assert_eq!(error.to_string(), "Bad request: imageUrl is empty");
    }

    #[test]
    fn test_api_error_internal() {
        let error = ApiError::Internal("task panicked".to_string());
        assert_eq!(error.to_string(), "Internal error: task panicked");
    }

    #[test]
    fn test_api_error_from_palette_error() {
        let api_error: ApiError = PaletteError::MissingRole(PaletteRole::Skin).into();
        assert_eq!(
            api_error.to_string(),
            "Invalid palette: palette is missing the skin role"
        );
    }

    #[test]
    fn test_codec_error_image_too_large() {
        let error = CodecError::ImageTooLarge {
            width: 5000,
            height: 20,
            max: 4096,
        };
        assert_eq!(
            error.to_string(),
            "Image too large: 5000x20 (max 4096 per side)"
        );
    }

    #[test]
    fn test_codec_error_unsupported_data_url() {
        let error = CodecError::UnsupportedDataUrl("text/plain".to_string());
        assert_eq!(error.to_string(), "Unsupported data URL: text/plain");
    }

    #[test]
    fn test_api_error_from_codec_error() {
        let api_error: ApiError = CodecError::PngDecode("bad signature".to_string()).into();
        match api_error {
            ApiError::Codec(_) => {}
            _ => panic!("Expected Codec variant"),
        }
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        use axum::response::IntoResponse;

        // BadRequest -> BAD_REQUEST
        let response = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Palette -> BAD_REQUEST
        let response =
            ApiError::Palette(PaletteError::MissingRole(PaletteRole::Hair)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Codec -> UNPROCESSABLE_ENTITY
        let response =
            ApiError::Codec(CodecError::PngDecode("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // Pipeline -> INTERNAL_SERVER_ERROR
        let response = ApiError::Pipeline(PipelineError::Raster(RasterError::ZeroDimension {
            width: 0,
            height: 0,
        }))
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // Internal -> INTERNAL_SERVER_ERROR
        let response = ApiError::Internal("error".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
