use crate::config::Config;
use crate::conversation::{load_messages_or_seed, load_profile};
use crate::error::Result;
use crate::message::Role;
use colored::Colorize;

/// Print the persisted conversation and the remembered name
pub fn handle_history(config: Config) -> Result<()> {
    let store = super::open_store(&config.client)?;

    let profile = load_profile(&store);
    let messages = load_messages_or_seed(&store, &profile);

    match profile.name() {
        Some(name) => println!("Profile name: {}", name.cyan()),
        None => println!("Profile name: {}", "-".dimmed()),
    }

    let visible: Vec<_> = messages.iter().filter(|m| !m.is_system()).collect();
    if visible.is_empty() {
        println!("{}", "No conversation history found.".yellow());
        return Ok(());
    }

    println!("\nConversation History ({} messages):\n", visible.len());
    for message in visible {
        let tag = match message.role {
            Role::User => "you".cyan().bold(),
            Role::Assistant => "advisor".magenta().bold(),
            Role::System => continue,
        };
        println!("{:>8} › {}", tag, message.content);
    }
    println!();

    Ok(())
}
