//! Configuration management for Advisor Chat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//!
//! The upstream credential is never part of the file: the relay section
//! only names the environment variable that holds it.

use crate::cli::{Cli, Commands};
use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure for Advisor Chat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion relay (server side) settings
    #[serde(default)]
    pub relay: RelayConfig,
    /// Conversation client settings
    #[serde(default)]
    pub client: ClientConfig,
}

/// Completion relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Socket address the relay listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Upstream chat-completion endpoint
    ///
    /// Tests point this at a mock server.
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    /// Name of the environment variable holding the upstream API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_upstream_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            upstream_url: default_upstream_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Conversation client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Relay endpoint the client posts conversations to
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    /// Location of the sled database; platform data dir when unset
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

fn default_relay_url() -> String {
    "http://127.0.0.1:8787/".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            storage_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AdvisorError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| AdvisorError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(bind) = std::env::var("ADVISOR_RELAY_BIND") {
            tracing::debug!(bind = %bind, "Env override: ADVISOR_RELAY_BIND");
            self.relay.bind = bind;
        }

        if let Ok(upstream) = std::env::var("ADVISOR_UPSTREAM_URL") {
            tracing::debug!(upstream = %upstream, "Env override: ADVISOR_UPSTREAM_URL");
            self.relay.upstream_url = upstream;
        }

        if let Ok(relay_url) = std::env::var("ADVISOR_RELAY_URL") {
            tracing::debug!(relay_url = %relay_url, "Env override: ADVISOR_RELAY_URL");
            self.client.relay_url = relay_url;
        }

        if let Ok(storage) = std::env::var("ADVISOR_STORAGE_PATH") {
            if storage.trim().is_empty() {
                tracing::warn!("Ignoring empty ADVISOR_STORAGE_PATH");
            } else {
                tracing::debug!(storage = %storage, "Env override: ADVISOR_STORAGE_PATH");
                self.client.storage_path = Some(PathBuf::from(storage));
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        match &cli.command {
            Commands::Serve { bind, upstream } => {
                if let Some(bind) = bind {
                    self.relay.bind = bind.clone();
                }
                if let Some(upstream) = upstream {
                    self.relay.upstream_url = upstream.clone();
                }
            }
            Commands::Chat { relay_url, storage } => {
                if let Some(relay_url) = relay_url {
                    self.client.relay_url = relay_url.clone();
                }
                if let Some(storage) = storage {
                    self.client.storage_path = Some(storage.clone());
                }
            }
            Commands::History { storage } => {
                if let Some(storage) = storage {
                    self.client.storage_path = Some(storage.clone());
                }
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Config` describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        self.relay
            .bind
            .parse::<SocketAddr>()
            .map_err(|e| AdvisorError::Config(format!("Invalid relay.bind: {}", e)))?;

        validate_http_url("relay.upstream_url", &self.relay.upstream_url)?;
        validate_http_url("client.relay_url", &self.client.relay_url)?;

        if self.relay.api_key_env.trim().is_empty() {
            return Err(
                AdvisorError::Config("relay.api_key_env cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| AdvisorError::Config(format!("Invalid {}: {}", field, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AdvisorError::Config(format!(
            "Invalid {}: unsupported scheme '{}'",
            field, other
        ))
        .into()),
    }
}
