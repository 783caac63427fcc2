//! Review commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use marquee_core::reviews::{paginate_history, ReviewDraft, ReviewSort};
use marquee_core::routes::Page;
use marquee_core::{Review, ReviewHistoryEntry, StarRating};

use super::Context;
use crate::output::{print_info, print_json, print_output, print_success, stars, truncate, OutputFormat};

#[derive(Subcommand)]
pub enum ReviewsAction {
    /// List reviews of a movie
    List {
        /// Movie ID
        movie_id: String,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Review a movie
    Add {
        /// Movie ID
        movie_id: String,

        /// Stars, 0-5 or zero..five
        #[arg(short, long)]
        rating: StarRating,

        /// Review text
        #[arg(short, long)]
        text: String,
    },

    /// Your own reviews
    History {
        /// Sort order: newest, oldest or rating
        #[arg(short, long, default_value = "newest")]
        sort: ReviewSort,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
}

/// Review row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct ReviewRow {
    #[tabled(rename = "Author")]
    pub author: String,
    #[tabled(rename = "Rating")]
    pub rating: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Review")]
    pub text: String,
}

impl From<&Review> for ReviewRow {
    fn from(review: &Review) -> Self {
        Self {
            author: review
                .user
                .as_ref()
                .map(|u| u.name.clone())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Anonymous".to_string()),
            rating: stars(&review.rating),
            date: format_date(&review.created_at),
            text: truncate(&review.review_text, 60),
        }
    }
}

/// History row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct HistoryRow {
    #[tabled(rename = "Movie")]
    pub movie: String,
    #[tabled(rename = "Movie ID")]
    pub movie_id: String,
    #[tabled(rename = "Rating")]
    pub rating: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Review")]
    pub text: String,
}

impl From<&ReviewHistoryEntry> for HistoryRow {
    fn from(entry: &ReviewHistoryEntry) -> Self {
        Self {
            movie: entry.movie.title.clone(),
            movie_id: entry.movie.id.clone(),
            rating: entry.rating.format(),
            date: format_date(&entry.created_at),
            text: truncate(&entry.review_text, 50),
        }
    }
}

/// `2024-03-01T10:00:00Z` as `2024-03-01`; unparseable input is kept
fn format_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub async fn execute(ctx: &Context, action: ReviewsAction) -> Result<()> {
    match action {
        ReviewsAction::List { movie_id, page } => list_reviews(ctx, &movie_id, page).await,
        ReviewsAction::Add {
            movie_id,
            rating,
            text,
        } => add_review(ctx, &movie_id, ReviewDraft::new(text, rating)).await,
        ReviewsAction::History { sort, page } => history(ctx, sort, page).await,
    }
}

async fn list_reviews(ctx: &Context, movie_id: &str, page: u32) -> Result<()> {
    ctx.require(&[Page::MovieDetails]).await?;

    let result = ctx.api.list_reviews(movie_id, page).await?;
    if ctx.format == OutputFormat::Json {
        return print_json(&result);
    }

    let rows: Vec<ReviewRow> = result.reviews.iter().map(ReviewRow::from).collect();
    print_output(&rows, ctx.format)?;
    print_info(
        &format!(
            "Page {} of {} ({} reviews)",
            result.page, result.total_pages, result.total_reviews
        ),
        ctx.quiet,
    );
    Ok(())
}

async fn add_review(ctx: &Context, movie_id: &str, draft: ReviewDraft) -> Result<()> {
    let submission = draft.submission()?;
    ctx.require(&[Page::MovieDetails]).await?;

    ctx.api.submit_review(movie_id, &submission).await?;
    print_success(
        &format!("Review posted ({} stars)", submission.rating.stars()),
        ctx.quiet,
    );
    Ok(())
}

async fn history(ctx: &Context, sort: ReviewSort, page: usize) -> Result<()> {
    ctx.require(&[Page::Reviews]).await?;

    let entries = ctx.api.user_reviews().await?;
    let page = paginate_history(entries, sort, page);

    if ctx.format == OutputFormat::Json {
        return print_json(&page);
    }

    let rows: Vec<HistoryRow> = page.entries.iter().map(HistoryRow::from).collect();
    print_output(&rows, ctx.format)?;

    let (first, last) = page.range();
    if page.total > 0 {
        print_info(
            &format!(
                "Showing {}-{} of {} reviews (page {} of {}, sorted by {})",
                first, last, page.total, page.page, page.total_pages, sort
            ),
            ctx.quiet,
        );
    }
    Ok(())
}
