//! Delete command - remove a review from the history

use std::io::{self, BufRead, Write};

use anyhow::bail;
use clap::Args;
use critic_db::parse_review_id;

use super::CriticClient;

/// Delete a past review
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Review identifier, as shown by `critic history`
    id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, client: &CriticClient) -> anyhow::Result<()> {
        if parse_review_id(&self.id).is_none() {
            bail!("Invalid review id: {}", self.id);
        }

        if !self.yes && !confirm(&format!("Delete review {}?", self.id))? {
            println!("Cancelled.");
            return Ok(());
        }

        client.delete(&self.id).await?;
        println!("Deleted review {}.", self.id);
        Ok(())
    }
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
