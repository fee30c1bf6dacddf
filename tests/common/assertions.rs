//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use sprite_pipeline::Raster;

use spriteforge::codec::{decode_png, parse_data_url, PNG_DATA_URL_PREFIX};

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert JSON error response has expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert a successful conversion used the pipeline and decode its sprite
pub fn assert_converted_sprite(response: &TestResponse) -> Raster {
    assert_ok(response);
    let json: serde_json::Value = response.json();

    assert_eq!(json["success"], true);
    assert_eq!(json["method"], "pipeline");

    let url = json["convertedImageUrl"]
        .as_str()
        .expect("Expected convertedImageUrl");
    assert!(
        url.starts_with(PNG_DATA_URL_PREFIX),
        "Expected PNG data URL, got {}",
        &url[..url.len().min(40)]
    );

    let png = parse_data_url(url).expect("Invalid data URL");
    decode_png(&png, 4096).expect("Invalid sprite PNG")
}
