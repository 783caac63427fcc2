//! Marquee CLI - browse movies, write reviews, keep a watchlist
//!
//! A command-line front end for the Marquee movie backend. Every
//! subcommand maps to one screen of the web client and is gated by the
//! route table of the signed-in role.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "Movie catalog, reviews and watchlist CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Backend base URL, overrides MARQUEE_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Credential file, overrides MARQUEE_TOKEN_PATH
    #[arg(long, global = true)]
    token_path: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, sign up, sign out and inspect the session
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },

    /// Browse the movie catalog
    Movies {
        #[command(subcommand)]
        action: commands::movies::MoviesAction,
    },

    /// Read and write reviews
    Reviews {
        #[command(subcommand)]
        action: commands::reviews::ReviewsAction,
    },

    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        action: commands::watchlist::WatchlistAction,
    },

    /// View and edit your profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },

    /// Catalog administration
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        output::print_error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = marquee_core::ClientConfig::resolve(cli.api_url, cli.token_path)?;
    log::debug!("[cli] api_url={} token_path={}", config.api_url, config.token_path.display());

    // Create context for commands
    let ctx = commands::Context::new(config, cli.format, cli.quiet)?;

    match cli.command {
        Commands::Auth { action } => commands::auth::execute(&ctx, action).await,
        Commands::Movies { action } => commands::movies::execute(&ctx, action).await,
        Commands::Reviews { action } => commands::reviews::execute(&ctx, action).await,
        Commands::Watchlist { action } => commands::watchlist::execute(&ctx, action).await,
        Commands::Profile { action } => commands::profile::execute(&ctx, action).await,
        Commands::Admin { action } => commands::admin::execute(&ctx, action).await,
        Commands::Config { action } => commands::config::execute(&ctx, action).await,
    }
}
