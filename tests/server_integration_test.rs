//! Server integration tests that test the actual server behavior.
//!
//! These tests start a real TCP server and verify behavior that can only
//! be tested with actual network connections.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use spriteforge::models::AppConfig;
use spriteforge::server::{build_router, create_app_state};

/// Start a test server on an available port and return the port number.
async fn start_test_server() -> u16 {
    let state = create_app_state(AppConfig::default());
    let app = build_router(state);

    // Bind to port 0 to get an available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    port
}

/// Send a raw HTTP/1.1 request asking the server to close the connection,
/// and return the full response text.
async fn send_raw(port: u16, request: String) -> String {
    let mut stream = TcpStream::connect(format!("127.0.0.1:{}", port))
        .await
        .expect("Failed to connect");

    stream
        .write_all(request.as_bytes())
        .await
        .expect("Failed to write request");

    let mut response = Vec::new();
    tokio::time::timeout(
        tokio::time::Duration::from_secs(5),
        stream.read_to_end(&mut response),
    )
    .await
    .expect("Timeout waiting for response")
    .expect("Failed to read response");

    String::from_utf8_lossy(&response).to_string()
}

#[tokio::test]
async fn test_health_over_tcp() {
    let port = start_test_server().await;

    let response = send_raw(
        port,
        "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n".to_string(),
    )
    .await;

    assert!(
        response.starts_with("HTTP/1.1 200"),
        "Should get 200 OK response, got: {response}"
    );
    assert!(response.ends_with("OK"), "Body should be OK");
}

#[tokio::test]
async fn test_palette_over_tcp() {
    let port = start_test_server().await;
    let body = r##"{"palette":{"hair":"#000000","skin":"#E0A982","topGarment":"#FAFAFA","bottomGarment":"#101010","footwear":"#9B30FF"}}"##;

    let response = send_raw(
        port,
        format!(
            "POST /api/palette HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
    )
    .await;

    assert!(
        response.starts_with("HTTP/1.1 200"),
        "Should get 200 OK response, got: {response}"
    );
    assert!(response.contains(r##""topGarment":"#FFFFFF""##));
    assert!(response.contains(r##""bottomGarment":"#000000""##));
    assert!(response.contains(r#""paletteSource":"provided""#));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let port = start_test_server().await;

    let response = send_raw(
        port,
        "GET /api/unknown HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n".to_string(),
    )
    .await;

    assert!(
        response.starts_with("HTTP/1.1 404"),
        "Should get 404, got: {response}"
    );
}
