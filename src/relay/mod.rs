//! Stateless completion relay
//!
//! Accepts `{messages: [...]}` from the browser-side client, attaches the
//! API credential, forwards to the upstream chat-completion endpoint, and
//! hands the upstream status and body back untouched. Every response,
//! including preflight and error responses, carries permissive CORS headers.
//!
//! The relay does not inspect the upstream body. Any failure on its own
//! side becomes `500 {"error": "..."}`.

use crate::config::RelayConfig;
use crate::error::{AdvisorError, Result};
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Upstream model identifier
pub const MODEL: &str = "gpt-4o";

/// Upper bound on generated tokens per reply
pub const MAX_TOKENS: u32 = 300;

/// Sampling temperature
pub const TEMPERATURE: f64 = 0.4;

/// Caller payload; `messages` is forwarded as-is without validation
#[derive(Deserialize)]
struct RelayRequest {
    messages: serde_json::Value,
}

#[derive(Serialize)]
struct UpstreamRequest<'a> {
    model: &'a str,
    messages: &'a serde_json::Value,
    max_tokens: u32,
    temperature: f64,
}

/// Shared, read-only relay state
#[derive(Clone)]
pub struct RelayState {
    client: reqwest::Client,
    upstream_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl RelayState {
    /// Build relay state with an explicit credential
    pub fn new(
        upstream_url: impl Into<String>,
        api_key: Option<String>,
        api_key_env: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            upstream_url: upstream_url.into(),
            api_key,
            api_key_env: api_key_env.into(),
        }
    }

    /// Build relay state from config, reading the credential from the
    /// environment variable it names
    ///
    /// A missing credential is not fatal here; requests fail with 500
    /// until it is provided.
    pub fn from_config(config: &RelayConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!(
                "{} is not set; relay requests will fail",
                config.api_key_env
            );
        }
        Self::new(config.upstream_url.clone(), api_key, config.api_key_env.clone())
    }

    /// Upstream endpoint requests are forwarded to
    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    async fn forward(&self, body: &[u8]) -> Result<(u16, String)> {
        let request: RelayRequest = serde_json::from_slice(body)
            .map_err(|e| AdvisorError::Relay(format!("Invalid request body: {}", e)))?;

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AdvisorError::MissingCredential(self.api_key_env.clone()))?;

        tracing::debug!(
            messages = request.messages.as_array().map_or(0, Vec::len),
            "Forwarding to upstream"
        );

        let response = self
            .client
            .post(&self.upstream_url)
            .bearer_auth(api_key)
            .json(&UpstreamRequest {
                model: MODEL,
                messages: &request.messages,
                max_tokens: MAX_TOKENS,
                temperature: TEMPERATURE,
            })
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok((status, text))
    }
}

impl fmt::Debug for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayState")
            .field("upstream_url", &self.upstream_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .finish()
    }
}

/// Headers attached to every relay response
pub fn cors_headers() -> [(HeaderName, &'static str); 4] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        (header::CONTENT_TYPE, "application/json"),
    ]
}

/// Build the relay router serving `/`
///
/// No body size limit applies; oversized bodies fail like any other
/// unparsable body.
pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/", any(handle))
        .layer(DefaultBodyLimit::disable())
        .with_state(Arc::new(state))
}

async fn handle(State(state): State<Arc<RelayState>>, method: Method, body: Bytes) -> Response {
    if method == Method::OPTIONS {
        return (StatusCode::OK, cors_headers()).into_response();
    }

    tracing::info!(method = %method, bytes = body.len(), "Relay request");

    match state.forward(&body).await {
        Ok((status, text)) => {
            tracing::info!(status, "Upstream responded");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, cors_headers(), text).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Relay request failed");
            let body = serde_json::json!({ "error": e.to_string() }).to_string();
            (StatusCode::INTERNAL_SERVER_ERROR, cors_headers(), body).into_response()
        }
    }
}

/// Bind `config.bind` and serve the relay until the process exits
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn serve(config: &RelayConfig) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        upstream = %config.upstream_url,
        "Completion relay listening"
    );
    axum::serve(listener, router(RelayState::from_config(config))).await?;
    Ok(())
}
