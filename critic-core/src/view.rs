//! Derived presentation state for review history
//!
//! Everything here is a pure function of the records plus the user's
//! current query and sort order. Nothing is cached; callers recompute the
//! view whenever an input changes.

use std::fmt;
use std::str::FromStr;

use critic_db::ReviewRecord;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Number of reviews shown in the "recent reviews" strip
pub const RECENT_REVIEWS: usize = 8;

/// Maximum characters in a review summary before truncation
pub const SUMMARY_WIDTH: usize = 80;

/// Sort order for the history view, by creation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first
    #[default]
    Desc,
    /// Oldest first
    Asc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Desc => "desc",
            SortOrder::Asc => "asc",
        }
    }

    /// The other order
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Desc => SortOrder::Asc,
            SortOrder::Asc => SortOrder::Desc,
        }
    }

    /// Human label used by the history UI
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Desc => "Newest First",
            SortOrder::Asc => "Oldest First",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desc" | "newest" => Ok(SortOrder::Desc),
            "asc" | "oldest" => Ok(SortOrder::Asc),
            other => Err(Error::Other(format!("unknown sort order: {}", other))),
        }
    }
}

/// Whether `record` matches a search query
///
/// Case-insensitive substring match over both the code and the response.
/// An empty query matches everything.
pub fn matches(record: &ReviewRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record.code.to_lowercase().contains(&needle) || record.response.to_lowercase().contains(&needle)
}

/// Filter `records` by `query` and sort them by creation time
///
/// The sort is stable, so records with equal timestamps keep their input order.
pub fn filter_and_sort<'a>(
    records: &'a [ReviewRecord],
    query: &str,
    order: SortOrder,
) -> Vec<&'a ReviewRecord> {
    let mut view: Vec<&ReviewRecord> = records.iter().filter(|r| matches(r, query)).collect();

    match order {
        SortOrder::Desc => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Asc => view.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }

    view
}

/// The first `n` records of an already newest-first listing
pub fn recent(records: &[ReviewRecord], n: usize) -> &[ReviewRecord] {
    &records[..records.len().min(n)]
}

/// One-line caption for a review
///
/// Uses the first non-blank line of the code, cut to [`SUMMARY_WIDTH`]
/// characters. An ellipsis is appended whenever the whole submission is
/// longer than that width.
pub fn review_summary(code: &str) -> String {
    let line = code
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or(code);

    let mut summary: String = line.chars().take(SUMMARY_WIDTH).collect();
    if code.chars().count() > SUMMARY_WIDTH {
        summary.push_str("...");
    }
    summary
}
