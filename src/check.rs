use anyhow::Result;

use crate::config::Config;
use crate::knowledge;

/// `faq check` — validate the configuration and knowledge base without serving.
pub fn run_check(config: &Config) -> Result<()> {
    let index = knowledge::build_index(config)?;
    let source = match &config.knowledge.path {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };

    println!("knowledge base: {}", source);
    println!("entries:        {}", index.len());
    println!("threshold:      {}", index.options().threshold);
    println!("bind:           {}", config.server.bind);
    println!("ok");

    Ok(())
}
