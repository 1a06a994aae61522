//! Shared helpers for integration tests

use advisor_chat::relay::{router, RelayState};
use std::path::PathBuf;
use tempfile::TempDir;

/// Path of the upstream completion endpoint mounted on mock servers
#[allow(dead_code)]
pub const UPSTREAM_PATH: &str = "/v1/chat/completions";

/// Serve the relay on an ephemeral local port and return its URL
#[allow(dead_code)]
pub async fn spawn_relay(upstream_url: String, api_key: Option<&str>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().expect("listener has no address");
    let app = router(RelayState::new(
        upstream_url,
        api_key.map(str::to_string),
        "OPENAI_API_KEY",
    ));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("relay server failed");
    });
    format!("http://{}/", addr)
}

/// Temporary directory plus the sled path inside it
#[allow(dead_code)]
pub fn temp_store_path() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let path = tmp.path().join("conversation.sled");
    (tmp, path)
}
