//! Review submission and review history
//!
//! The history page loads every review the user wrote in one request and
//! sorts/paginates locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{ReviewHistoryEntry, ReviewSubmission};
use crate::rating::{to_number, StarRating};

/// Entries per history page
pub const HISTORY_PAGE_SIZE: usize = 10;

/// Ordering of the review history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSort {
    #[default]
    Newest,
    Oldest,
    /// Highest rating first
    Rating,
}

impl std::str::FromStr for ReviewSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(ReviewSort::Newest),
            "oldest" => Ok(ReviewSort::Oldest),
            "rating" => Ok(ReviewSort::Rating),
            _ => Err(format!("Unknown review sort: {}", s)),
        }
    }
}

impl std::fmt::Display for ReviewSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewSort::Newest => write!(f, "newest"),
            ReviewSort::Oldest => write!(f, "oldest"),
            ReviewSort::Rating => write!(f, "rating"),
        }
    }
}

/// One page of the locally paginated history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPage {
    pub entries: Vec<ReviewHistoryEntry>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

impl HistoryPage {
    /// 1-based `(first, last)` positions shown, `(0, 0)` when empty
    pub fn range(&self) -> (usize, usize) {
        if self.entries.is_empty() {
            return (0, 0);
        }
        let first = (self.page - 1) * HISTORY_PAGE_SIZE + 1;
        (first, first + self.entries.len() - 1)
    }
}

fn created_at(entry: &ReviewHistoryEntry) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&entry.created_at)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Sort `entries` in place. Unparseable timestamps sort as the oldest.
pub fn sort_history(entries: &mut [ReviewHistoryEntry], sort: ReviewSort) {
    match sort {
        ReviewSort::Newest => entries.sort_by_key(|e| std::cmp::Reverse(created_at(e))),
        ReviewSort::Oldest => entries.sort_by_key(created_at),
        ReviewSort::Rating => entries.sort_by(|a, b| {
            to_number(&b.rating)
                .partial_cmp(&to_number(&a.rating))
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    }
}

/// Sort the whole history and cut out page `page` (1-based, clamped)
pub fn paginate_history(
    mut entries: Vec<ReviewHistoryEntry>,
    sort: ReviewSort,
    page: usize,
) -> HistoryPage {
    let total = entries.len();
    let total_pages = total.div_ceil(HISTORY_PAGE_SIZE);
    let page = page.clamp(1, total_pages.max(1));

    sort_history(&mut entries, sort);
    let entries = entries
        .into_iter()
        .skip((page - 1) * HISTORY_PAGE_SIZE)
        .take(HISTORY_PAGE_SIZE)
        .collect();

    HistoryPage {
        entries,
        page,
        total_pages,
        total,
    }
}

/// Review being written for a movie
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDraft {
    pub text: String,
    pub rating: StarRating,
}

impl ReviewDraft {
    pub fn new(text: impl Into<String>, rating: StarRating) -> Self {
        Self {
            text: text.into(),
            rating,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Request body with trimmed text; blank text is rejected
    pub fn submission(&self) -> Result<ReviewSubmission> {
        validate_review(&self.text)?;
        Ok(ReviewSubmission {
            review_text: self.text.trim().to_string(),
            rating: self.rating,
        })
    }
}

pub fn validate_review(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::validation("Review text must not be empty"));
    }
    Ok(())
}
