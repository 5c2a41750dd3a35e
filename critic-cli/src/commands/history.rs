//! History command - list past reviews

use chrono::Local;
use clap::Args;
use critic_core::view::{self, review_summary};
use critic_core::SortOrder;
use critic_db::ReviewRecord;

use super::CriticClient;

/// List past reviews
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Only show reviews whose code or feedback contains this text
    #[arg(short, long)]
    search: Option<String>,

    /// Show oldest reviews first
    #[arg(long)]
    oldest_first: bool,

    /// Print full code and feedback instead of one line per review
    #[arg(short, long)]
    full: bool,
}

impl HistoryArgs {
    /// Execute the history command
    pub async fn execute(&self, client: &CriticClient) -> anyhow::Result<()> {
        let records = client.history().await?;

        let order = if self.oldest_first {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        };
        let shown = view::filter_and_sort(&records, self.search.as_deref().unwrap_or(""), order);

        if shown.is_empty() {
            println!("No reviews found.");
            return Ok(());
        }

        println!("{} of {} reviews ({})", shown.len(), records.len(), order.label());
        println!();
        for record in shown {
            println!("{}", format_entry(record, self.full));
        }

        Ok(())
    }
}

fn format_entry(record: &ReviewRecord, full: bool) -> String {
    let when = record
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M");

    if !full {
        return format!("{:>6}  {}  {}", record.id, when, review_summary(&record.code));
    }

    format!(
        "#{} - {}\n--- code ---\n{}\n--- review ---\n{}\n",
        record.id,
        when,
        record.code.trim_end(),
        record.response.trim_end()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record() -> ReviewRecord {
        ReviewRecord {
            id: 42,
            code: "\nfn main() {\n    println!(\"hi\");\n}\n".to_string(),
            response: "Looks fine.\n".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_entry_summary_line() {
        let line = format_entry(&record(), false);
        assert!(line.starts_with("    42  "));
        assert!(line.ends_with("fn main() {"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_format_entry_full() {
        let entry = format_entry(&record(), true);
        assert!(entry.starts_with("#42 - "));
        assert!(entry.contains("--- code ---\n\nfn main() {"));
        assert!(entry.contains("--- review ---\nLooks fine.\n"));
    }
}
