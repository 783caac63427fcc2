//! Admin commands
//!
//! Only reachable with the admin route table.

use anyhow::Result;
use clap::{Args, Subcommand};

use marquee_core::account::NewMovieForm;
use marquee_core::catalog::find_genre;
use marquee_core::routes::Page;

use super::Context;
use crate::output::{print_json, print_success, OutputFormat};

#[derive(Subcommand)]
pub enum AdminAction {
    /// Add a movie to the catalog
    AddMovie(AddMovieArgs),
}

#[derive(Args)]
pub struct AddMovieArgs {
    /// Title
    #[arg(short, long)]
    title: String,

    /// Synopsis
    #[arg(short, long)]
    synopsis: String,

    /// Genre; repeat for several
    #[arg(short, long = "genre")]
    genres: Vec<String>,

    /// Cast member; repeat for several
    #[arg(short, long = "cast")]
    cast: Vec<String>,

    /// Release year
    #[arg(short, long)]
    year: Option<String>,

    /// Runtime in minutes
    #[arg(short, long)]
    runtime: Option<String>,

    #[arg(long)]
    language: Option<String>,

    #[arg(long)]
    country: Option<String>,

    #[arg(short, long)]
    director: Option<String>,

    #[arg(long)]
    poster_url: Option<String>,

    #[arg(long)]
    backdrop_url: Option<String>,

    #[arg(long)]
    trailer_url: Option<String>,

    /// Print the request body instead of sending it
    #[arg(long)]
    dry_run: bool,
}

impl AddMovieArgs {
    fn into_form(self) -> NewMovieForm {
        let mut form = NewMovieForm {
            title: self.title,
            synopsis: self.synopsis,
            release_year: self.year.unwrap_or_default(),
            runtime: self.runtime.unwrap_or_default(),
            language: self.language.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            director: self.director.unwrap_or_default(),
            poster_url: self.poster_url.unwrap_or_default(),
            backdrop_url: self.backdrop_url.unwrap_or_default(),
            trailer_url: self.trailer_url.unwrap_or_default(),
            ..NewMovieForm::default()
        };
        for genre in &self.genres {
            let name = find_genre(genre).unwrap_or(genre.as_str());
            form.add_genre(name);
        }
        for member in &self.cast {
            form.add_cast_member(member);
        }
        form
    }
}

pub async fn execute(ctx: &Context, action: AdminAction) -> Result<()> {
    match action {
        AdminAction::AddMovie(args) => add_movie(ctx, args).await,
    }
}

async fn add_movie(ctx: &Context, args: AddMovieArgs) -> Result<()> {
    let dry_run = args.dry_run;
    let movie = args.into_form().to_payload()?;

    if dry_run {
        return print_json(&serde_json::json!({ "movieData": movie }));
    }

    ctx.require(&[Page::AdminMovies]).await?;
    ctx.api.create_movie(&movie).await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&movie);
    }
    print_success(&format!("Added \"{}\" to the catalog", movie.title), ctx.quiet);
    Ok(())
}
