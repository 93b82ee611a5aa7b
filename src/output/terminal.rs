//! Terminal output utilities.
//!
//! Formatting helpers for everything the interactive session prints. Each
//! helper returns the text so callers decide where it goes.

use crate::models::{History, Subnet};
use colored::Colorize;
use std::error::Error;
use std::fmt::Display;
use std::net::Ipv4Addr;

pub const PROMPT: &str = "Enter a subnet (e.g., 104.17.112.0/20): ";

/// Greeting shown once when the session starts.
pub fn banner() -> String {
    format!(
        "{title}\nEnter '{exit}' to quit, '{history}' to view previous generations\n'{clear}' to clear history, '{help}' for all commands\n",
        title = "Random IP Address Generator".bold().green(),
        exit = "exit".cyan(),
        history = "history".cyan(),
        clear = "clear".cyan(),
        help = "help".cyan(),
    )
}

pub fn help() -> String {
    [
        format!("  {:<14} generate a random host address", "<a.b.c.d/n>".cyan()),
        format!("  {:<14} list previous generations", "history".cyan()),
        format!("  {:<14} list previous generations as JSON lines", "history json".cyan()),
        format!("  {:<14} forget previous generations", "clear".cyan()),
        format!("  {:<14} leave the program", "exit | quit".cyan()),
    ]
    .join("\n")
}

/// Line announcing a freshly generated address.
pub fn generated(input: &str, subnet: &Subnet, ip: Ipv4Addr) -> String {
    let hosts = subnet.usable_hosts();
    let unit = if hosts == 1 { "usable host" } else { "usable hosts" };
    format!(
        "Random IP from {input}: {ip}  ({subnet}, {hosts} {unit})",
        ip = ip.to_string().bold().green(),
        subnet = subnet.to_string().dimmed(),
    )
}

pub fn copied() -> String {
    "IP address copied to clipboard.".to_string()
}

pub fn clipboard_warning(e: &dyn Error) -> String {
    format!(
        "{}: Could not copy to clipboard. ({e})",
        "Warning".yellow().bold()
    )
}

pub fn error<E: Display + ?Sized>(e: &E) -> String {
    format!("{}: {e}", "Error".red().bold())
}

/// Human readable history listing, oldest first.
pub fn history(history: &History) -> String {
    if history.is_empty() {
        return "No generation history available.".to_string();
    }
    let mut lines = vec!["Generation History:".bold().to_string()];
    for (i, entry) in history.entries().iter().enumerate() {
        lines.push(format!(
            "{idx:>3} {time} {entry}",
            idx = format!("[{}]", i + 1).dimmed(),
            time = entry.generated_at.format("%H:%M:%S").to_string().dimmed(),
        ));
    }
    lines.join("\n")
}

/// History as one JSON object per line.
pub fn history_json(history: &History) -> Result<String, Box<dyn Error>> {
    let lines = history
        .entries()
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<String>, _>>()
        .map_err(|e| format!("Error serializing history: {e}"))?;
    Ok(lines.join("\n"))
}

pub fn cleared() -> String {
    "History cleared.".to_string()
}

pub fn goodbye() -> String {
    "Exiting program. Goodbye!".to_string()
}

pub fn interrupted() -> String {
    "Program interrupted. Exiting...".to_string()
}
