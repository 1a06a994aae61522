//! Command-line interface definition for Advisor Chat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands to run the relay, chat, and inspect history.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Advisor Chat - brand-scoped beauty advisor
///
/// Runs the stateless completion relay or an interactive chat
/// session that persists its conversation locally.
#[derive(Parser, Debug, Clone)]
#[command(name = "advisor-chat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Advisor Chat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the completion relay HTTP server
    Serve {
        /// Address to listen on (e.g. 127.0.0.1:8787)
        #[arg(short, long)]
        bind: Option<String>,

        /// Upstream chat-completion endpoint
        #[arg(long)]
        upstream: Option<String>,
    },

    /// Start an interactive chat session through the relay
    Chat {
        /// Relay endpoint URL
        #[arg(long)]
        relay_url: Option<String>,

        /// Path to the conversation database
        #[arg(short, long)]
        storage: Option<PathBuf>,
    },

    /// Print the persisted conversation and profile
    History {
        /// Path to the conversation database
        #[arg(short, long)]
        storage: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::History { storage: None },
        }
    }
}
