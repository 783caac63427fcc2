//! Watchlist commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use marquee_core::routes::Page;
use marquee_core::{Rating, WatchlistMovie};

use super::Context;
use crate::output::{print_info, print_json, print_output, print_success, OutputFormat};

#[derive(Subcommand)]
pub enum WatchlistAction {
    /// Show the movies on your watchlist
    List {
        /// Only movies in this genre (case-insensitive)
        #[arg(short, long)]
        genre: Option<String>,
    },

    /// Show only the IDs on your watchlist
    Ids,

    /// Add a movie, or remove it if it is already listed
    Toggle {
        /// Movie ID
        movie_id: String,
    },

    /// Genres present on your watchlist
    Genres,
}

/// Watchlist row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct WatchlistRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Year")]
    pub year: String,
    #[tabled(rename = "Genres")]
    pub genres: String,
    #[tabled(rename = "Rating")]
    pub rating: String,
}

impl From<&WatchlistMovie> for WatchlistRow {
    fn from(movie: &WatchlistMovie) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.release_year.clone().unwrap_or_else(|| "-".to_string()),
            genres: movie.genres.join(", "),
            rating: movie
                .average_rating
                .map(|r| Rating::from(r).format())
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct IdRow {
    #[tabled(rename = "Movie ID")]
    pub id: String,
}

pub async fn execute(ctx: &Context, action: WatchlistAction) -> Result<()> {
    match action {
        WatchlistAction::List { genre } => list(ctx, genre.as_deref()).await,
        WatchlistAction::Ids => ids(ctx).await,
        WatchlistAction::Toggle { movie_id } => toggle(ctx, &movie_id).await,
        WatchlistAction::Genres => genres(ctx).await,
    }
}

async fn list(ctx: &Context, genre: Option<&str>) -> Result<()> {
    ctx.require(&[Page::Watchlist]).await?;
    ctx.watchlist.fetch_watchlist().await?;

    let movies = ctx.watchlist.movies_in_genre(genre.unwrap_or(""));
    if ctx.format == OutputFormat::Json {
        return print_json(&movies);
    }

    let rows: Vec<WatchlistRow> = movies.iter().map(WatchlistRow::from).collect();
    print_output(&rows, ctx.format)?;

    let total = ctx.watchlist.movies().len();
    match genre {
        Some(genre) if !genre.trim().is_empty() => print_info(
            &format!("{} of {} movies in {}", rows.len(), total, genre),
            ctx.quiet,
        ),
        _ => print_info(&format!("{} movies", total), ctx.quiet),
    }
    Ok(())
}

async fn ids(ctx: &Context) -> Result<()> {
    ctx.require(&[Page::Watchlist]).await?;
    let ids = ctx.watchlist.fetch_watchlisted_ids().await?;

    let rows: Vec<IdRow> = ids.into_iter().map(|id| IdRow { id }).collect();
    print_output(&rows, ctx.format)
}

async fn toggle(ctx: &Context, movie_id: &str) -> Result<()> {
    ctx.require(&[Page::Watchlist]).await?;

    let removed = ctx.watchlist.toggle_watchlist(movie_id).await?;
    if removed {
        print_success(&format!("Removed {} from your watchlist", movie_id), ctx.quiet);
    } else {
        print_success(&format!("Added {} to your watchlist", movie_id), ctx.quiet);
    }
    Ok(())
}

async fn genres(ctx: &Context) -> Result<()> {
    ctx.require(&[Page::Watchlist]).await?;
    ctx.watchlist.fetch_watchlist().await?;

    let genres = ctx.watchlist.genres();
    match ctx.format {
        OutputFormat::Json => print_json(&genres),
        OutputFormat::Table => {
            if genres.is_empty() {
                println!("No items found.");
            }
            for genre in genres {
                println!("{}", genre);
            }
            Ok(())
        }
    }
}
