//! Session commands
//!
//! Sign in with a token, create an account, sign out, and show who is
//! signed in together with the routes that role can reach.

use anyhow::{bail, Result};
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use marquee_core::account::{password_strength, SignUpForm};
use marquee_core::routes::{RouteTable, Target};

use super::Context;
use crate::output::{print_field, print_json, print_output, print_success, OutputFormat};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store a bearer token and verify it against the backend
    Login {
        /// Token issued by the backend
        #[arg(long, env = "MARQUEE_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Create an account and sign in
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (6-30 characters)
        #[arg(short, long, env = "MARQUEE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Repeat the password; defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Show the signed-in user
    Whoami,

    /// Forget the stored token and local watchlist state
    Logout,

    /// List the routes available to the current role
    Routes,
}

/// Route row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct RouteRow {
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Page")]
    pub page: String,
}

pub async fn execute(ctx: &Context, action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Login { token } => login(ctx, &token).await,
        AuthAction::Signup {
            name,
            email,
            password,
            confirm_password,
        } => {
            let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            let form = SignUpForm {
                name,
                email,
                password,
                confirm_password,
            };
            signup(ctx, form).await
        }
        AuthAction::Whoami => whoami(ctx).await,
        AuthAction::Logout => logout(ctx),
        AuthAction::Routes => routes(ctx).await,
    }
}

async fn login(ctx: &Context, token: &str) -> Result<()> {
    let user = ctx.auth.login_with_token(token).await?;
    print_success(
        &format!("Signed in as {} ({})", user.id, user.role),
        ctx.quiet,
    );
    Ok(())
}

async fn signup(ctx: &Context, form: SignUpForm) -> Result<()> {
    if ctx.auth.has_token() && ctx.auth.fetch_auth().await.is_ok() {
        let table = ctx.auth.route_table();
        if !table.allows(marquee_core::Page::SignUp) {
            bail!("Already signed in. Run `marquee auth logout` first");
        }
    }

    let data = form.validate().map_err(marquee_core::Error::from)?;
    log::debug!(
        "[cli] Password strength: {:?}",
        password_strength(&data.password)
    );

    let user = ctx.auth.sign_up(&data).await?;
    print_success(
        &format!("Account created. Signed in as {} ({})", user.id, user.role),
        ctx.quiet,
    );
    Ok(())
}

async fn whoami(ctx: &Context) -> Result<()> {
    if !ctx.auth.has_token() {
        bail!("Not signed in");
    }
    let user = ctx.auth.fetch_auth().await?;

    match ctx.format {
        OutputFormat::Json => print_json(&ctx.auth.state())?,
        OutputFormat::Table => {
            print_field("User", &user.id);
            print_field("Role", user.role);
            print_field("Admin", if user.is_admin { "yes" } else { "no" });
            print_field("Routes", ctx.auth.route_table());
        }
    }
    Ok(())
}

fn logout(ctx: &Context) -> Result<()> {
    ctx.auth.logout();
    ctx.watchlist.clear_watchlist();
    print_success("Signed out", ctx.quiet);
    Ok(())
}

async fn routes(ctx: &Context) -> Result<()> {
    if ctx.auth.has_token() {
        if let Err(e) = ctx.auth.fetch_auth().await {
            log::warn!("[cli] Session check failed, showing guest routes: {}", e);
        }
    }
    let table: RouteTable = ctx.auth.route_table();

    let rows: Vec<RouteRow> = table
        .routes()
        .iter()
        .map(|route| RouteRow {
            path: route.path.to_string(),
            page: match route.target {
                Target::Page(page) => page.to_string(),
                Target::Redirect(to) => format!("-> {}", to),
            },
        })
        .collect();

    print_output(&rows, ctx.format)
}
