use anyhow::Result;

use crate::config::Config;
use crate::knowledge;

/// `faq ask "<question>"` — print the chatbot reply for one question.
pub fn run_ask(config: &Config, question: &str, explain: bool) -> Result<()> {
    let index = knowledge::build_index(config)?;
    let result = index.best_match(question);

    println!("{}", result.reply(&index.options().fallback));

    if explain {
        println!();
        match result.best {
            Some(best) => {
                println!("best candidate: #{} ({})", best.position + 1, best.entry.question);
                println!("matched field:  {}", best.field.as_str());
                println!(
                    "score:          {:.4} (threshold {:.2}, {})",
                    best.score,
                    index.options().threshold,
                    if result.is_match() { "accepted" } else { "rejected" }
                );
            }
            None => println!("no candidates"),
        }
    }

    Ok(())
}
