pub mod backup;
pub mod chat;
pub mod conversations;
pub mod memories;
pub mod projects;
pub mod repl;
pub mod settings;

use chrono::{Local, TimeZone};
use colored::Colorize;
use parlor_core::ParlorError;
use parlor_core::message::{Message, MessageRole};

/// Formats epoch milliseconds as local time, or the raw number if out of range.
pub fn format_timestamp(ms: i64) -> String {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ms.to_string())
}

pub fn print_message(message: &Message) {
    let label = match message.role {
        MessageRole::User => message.role.label().bright_green().bold(),
        MessageRole::Assistant => message.role.label().bright_magenta().bold(),
    };
    println!("{} {}", label, format_timestamp(message.timestamp).bright_black());
    for line in message.content.lines() {
        match message.role {
            MessageRole::User => println!("  {}", line),
            MessageRole::Assistant => println!("  {}", line.bright_blue()),
        }
    }
}

/// Turns a chat failure into the message shown to the user.
pub fn chat_failure(error: ParlorError) -> anyhow::Error {
    if error.is_upstream() {
        anyhow::anyhow!("Failed to get response: {}", error)
    } else {
        error.into()
    }
}
