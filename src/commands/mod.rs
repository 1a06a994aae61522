//! Command handlers for the Advisor Chat CLI
//!
//! Each subcommand in [`crate::cli::Commands`] maps to one handler here.

use crate::config::{ClientConfig, Config};
use crate::error::Result;
use crate::storage::{default_store_path, SledStore};

pub mod history;

/// Open the sled store configured for the client
///
/// Falls back to the platform data directory when no path is configured.
pub fn open_store(config: &ClientConfig) -> Result<SledStore> {
    let path = match &config.storage_path {
        Some(path) => path.clone(),
        None => default_store_path()?,
    };
    SledStore::open(path)
}

// Relay server command handler
pub mod serve {
    //! Runs the completion relay.

    use super::*;

    /// Serve the relay with the loaded configuration
    pub async fn run_serve(config: Config) -> Result<()> {
        tracing::info!("Starting completion relay");
        crate::relay::serve(&config.relay).await
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Opens the persisted session, replays the visible history, and runs a
    //! readline loop that submits each line through the relay.

    use super::*;
    use crate::conversation::{
        latest_question_banner, Bubble, BubbleKind, ChatSession, HttpRelayClient, SubmitOutcome,
    };
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let store = open_store(&config.client)?;
        let relay = HttpRelayClient::new(&config.client.relay_url)?;
        let mut session = ChatSession::open(store);

        print_welcome_banner(relay.relay_url());
        for bubble in session.transcript().bubbles() {
            print_bubble(bubble);
        }

        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline(&format!("{} ", "you ›".cyan().bold())) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if matches!(trimmed, "exit" | "quit" | "/exit" | "/quit") {
                        break;
                    }
                    rl.add_history_entry(trimmed)?;

                    println!("{}", latest_question_banner(trimmed).bold());
                    println!("{}", "Thinking…".dimmed());
                    match session.submit(trimmed, &relay).await {
                        SubmitOutcome::Replied(_) | SubmitOutcome::Failed => {
                            if let Some(bubble) = session.transcript().last() {
                                print_bubble(bubble);
                            }
                        }
                        SubmitOutcome::Ignored => {}
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }

        println!("{}", "Goodbye!".green());
        Ok(())
    }

    fn print_welcome_banner(relay_url: &str) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              L’Oréal Beauty Advisor - Welcome!               ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Relay: {}", relay_url.dimmed());
        println!("Type 'exit' to quit\n");
    }

    fn print_bubble(bubble: &Bubble) {
        match bubble.kind {
            BubbleKind::User => println!("{} {}", "you ›".cyan().bold(), bubble.text),
            BubbleKind::Assistant => {
                println!("{} {}\n", "advisor ›".magenta().bold(), bubble.text)
            }
        }
    }
}
