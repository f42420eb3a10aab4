use anyhow::Result;

use crate::config::Config;
use crate::knowledge;

/// `faq entries` — list the knowledge base in match order.
pub fn list_entries(config: &Config) -> Result<()> {
    let entries = knowledge::load_entries(config)?;

    if entries.is_empty() {
        println!("Knowledge base is empty.");
        return Ok(());
    }

    println!("{:<4} {:<16} QUESTION", "#", "CATEGORY");
    for (i, entry) in entries.iter().enumerate() {
        println!("{:<4} {:<16} {}", i + 1, entry.category, entry.question);
    }

    Ok(())
}
