//! Catalog commands
//!
//! List movies with the same filters as the web catalog page, and show a
//! single movie.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use marquee_core::catalog::{page_window, recent_years, MovieQuery, MovieType, SortOrder, GENRES};
use marquee_core::routes::Page;
use marquee_core::Movie;

use super::Context;
use crate::output::{
    colored_rating, print_field, print_info, print_json, print_output, stars, OutputFormat,
};

#[derive(Subcommand)]
pub enum MoviesAction {
    /// List movies
    List {
        /// Page number [default: 1]
        #[arg(short, long)]
        page: Option<u32>,

        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Genre, e.g. "Science Fiction"
        #[arg(short, long)]
        genre: Option<String>,

        /// Release year
        #[arg(short, long)]
        year: Option<String>,

        /// Sort order: latest, oldest or rating [default: latest]
        #[arg(long)]
        sort: Option<SortOrder>,

        /// Subset: all, featured (4+ stars) or best (3+ stars) [default: all]
        #[arg(long = "type")]
        kind: Option<MovieType>,

        /// Start from a saved link query, e.g. "genre=Drama&sort=rating"
        #[arg(long, conflicts_with_all = ["search", "genre", "year"])]
        link: Option<String>,
    },

    /// Show one movie
    Show {
        /// Movie ID
        id: String,
    },

    /// List the values accepted by the list filters
    Filters,
}

/// Movie row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct MovieRow {
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

impl From<&Movie> for MovieRow {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.release_year.clone().unwrap_or_else(|| "-".to_string()),
            genres: movie.genres.join(", "),
            rating: movie.average_rating.format(),
        }
    }
}

/// Filter option row
#[derive(Debug, Serialize, Tabled)]
pub struct OptionRow {
    #[tabled(rename = "Filter")]
    pub filter: String,
    #[tabled(rename = "Values")]
    pub values: String,
}

pub async fn execute(ctx: &Context, action: MoviesAction) -> Result<()> {
    match action {
        MoviesAction::List {
            page,
            search,
            genre,
            year,
            sort,
            kind,
            link,
        } => {
            let query = build_query(link.as_deref(), search, genre, year, sort, kind, page);
            list_movies(ctx, query).await
        }
        MoviesAction::Show { id } => show_movie(ctx, &id).await,
        MoviesAction::Filters => list_filters(ctx),
    }
}

/// Start from the saved link, then apply every flag that was given.
/// Explicit flags win over the link even when they name the default.
fn build_query(
    link: Option<&str>,
    search: Option<String>,
    genre: Option<String>,
    year: Option<String>,
    sort: Option<SortOrder>,
    kind: Option<MovieType>,
    page: Option<u32>,
) -> MovieQuery {
    let mut query = link.map(parse_link).unwrap_or_default();
    if let Some(search) = search {
        query.set_search(search);
    }
    if let Some(genre) = genre {
        let canonical = marquee_core::catalog::find_genre(&genre)
            .map(str::to_string)
            .unwrap_or(genre);
        query.set_genre(canonical);
    }
    if let Some(year) = year {
        query.set_year(year);
    }
    if let Some(sort) = sort {
        query.set_sort(sort);
    }
    if let Some(kind) = kind {
        query.set_kind(kind);
    }
    // Filter setters reset the page, so the page goes last
    if let Some(page) = page {
        query.set_page(page);
    }
    query
}

fn parse_link(link: &str) -> MovieQuery {
    let link = link.trim_start_matches('?');
    let pairs: Vec<(String, String)> = link
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((key.to_string(), value.replace('+', " ")))
        })
        .collect();
    MovieQuery::from_url_params(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

async fn list_movies(ctx: &Context, query: MovieQuery) -> Result<()> {
    ctx.require(&[Page::Movies, Page::AdminMovies]).await?;

    let result = ctx.api.list_movies(&query).await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&result);
    }

    let active = query.active_filters();
    if !active.is_empty() {
        let labels: Vec<String> = active.iter().map(ToString::to_string).collect();
        print_info(&format!("Active filters: {}", labels.join(", ")), ctx.quiet);
    }

    let rows: Vec<MovieRow> = result.movies.iter().map(MovieRow::from).collect();
    print_output(&rows, ctx.format)?;

    let window: Vec<String> = page_window(result.page, result.total_pages)
        .into_iter()
        .map(|p| {
            if p == result.page {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect();
    print_info(
        &format!(
            "Page {} of {} ({} total movies)  {}",
            result.page,
            result.total_pages,
            result.total_movies,
            window.join(" ")
        ),
        ctx.quiet,
    );

    let mut shown = query.clone();
    shown.set_page(result.page);
    let link = shown.to_query_string();
    if !link.is_empty() {
        print_info(&format!("Link: /movies?{}", link), ctx.quiet);
    }
    Ok(())
}

async fn show_movie(ctx: &Context, id: &str) -> Result<()> {
    ctx.require(&[Page::MovieDetails]).await?;

    let movie = ctx.api.get_movie(id).await?;
    let watchlisted = match ctx.watchlist.fetch_watchlisted_ids().await {
        Ok(_) => Some(ctx.watchlist.is_watchlisted(&movie.id)),
        Err(e) => {
            log::warn!("[cli] Could not load watchlist ids: {}", e);
            None
        }
    };

    if ctx.format == OutputFormat::Json {
        return print_json(&movie);
    }

    println!();
    print_field("Title", &movie.title);
    print_field("ID", &movie.id);
    print_field(
        "Rating",
        format!(
            "{} {} ({})",
            stars(&movie.average_rating),
            colored_rating(&movie.average_rating),
            movie.average_rating.color_band()
        ),
    );
    print_field("Year", movie.release_year.as_deref().unwrap_or(""));
    print_field("Runtime", movie.formatted_runtime());
    print_field("Genres", movie.genres.join(", "));
    print_field("Director", movie.director.as_deref().unwrap_or(""));
    print_field("Cast", movie.cast.join(", "));
    print_field("Language", movie.language.as_deref().unwrap_or(""));
    print_field("Country", movie.country.as_deref().unwrap_or(""));
    print_field("Trailer", movie.trailer_url.as_deref().unwrap_or(""));
    if let Some(watchlisted) = watchlisted {
        print_field("Watchlist", if watchlisted { "yes" } else { "no" });
    }
    if let Some(synopsis) = &movie.synopsis {
        println!();
        println!("{}", synopsis);
    }
    Ok(())
}

fn list_filters(ctx: &Context) -> Result<()> {
    let years = recent_years();
    let rows = vec![
        OptionRow {
            filter: "genre".to_string(),
            values: GENRES.join(", "),
        },
        OptionRow {
            filter: "sort".to_string(),
            values: SortOrder::ALL
                .iter()
                .map(|s| format!("{} ({})", s, s.label()))
                .collect::<Vec<_>>()
                .join(", "),
        },
        OptionRow {
            filter: "type".to_string(),
            values: MovieType::ALL
                .iter()
                .map(|t| format!("{} ({})", t, t.label()))
                .collect::<Vec<_>>()
                .join(", "),
        },
        OptionRow {
            filter: "year".to_string(),
            values: match (years.first(), years.last()) {
                (Some(newest), Some(oldest)) => format!("{} down to {}", newest, oldest),
                _ => String::new(),
            },
        },
    ];
    print_output(&rows, ctx.format)
}
