//! Profile commands

use anyhow::Result;
use clap::Subcommand;

use marquee_core::account::{validate_email, validate_name};
use marquee_core::routes::Page;
use marquee_core::UserProfile;

use super::Context;
use crate::output::{print_field, print_json, print_success, OutputFormat};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show your account details
    Show,

    /// Change your display name
    SetName {
        /// New name (at least 2 characters)
        name: String,
    },

    /// Change your email address
    SetEmail {
        /// New email address
        email: String,
    },
}

pub async fn execute(ctx: &Context, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Show => show(ctx).await,
        ProfileAction::SetName { name } => set_name(ctx, &name).await,
        ProfileAction::SetEmail { email } => set_email(ctx, &email).await,
    }
}

fn print_profile(ctx: &Context, profile: &UserProfile) -> Result<()> {
    if ctx.format == OutputFormat::Json {
        return print_json(profile);
    }
    print_field("Name", &profile.name);
    print_field("Email", &profile.email);
    print_field("ID", &profile.id);
    print_field("Avatar", profile.profile_url.as_deref().unwrap_or(""));
    if let Some(created) = &profile.created_at {
        let since = chrono::DateTime::parse_from_rfc3339(created)
            .map(|dt| dt.format("%B %Y").to_string())
            .unwrap_or_else(|_| created.clone());
        print_field("Member since", since);
    }
    Ok(())
}

async fn show(ctx: &Context) -> Result<()> {
    ctx.require(&[Page::Profile]).await?;
    let profile = ctx.api.profile().await?;
    print_profile(ctx, &profile)
}

async fn set_name(ctx: &Context, name: &str) -> Result<()> {
    let name = validate_name(name)?;
    ctx.require(&[Page::Profile]).await?;

    let profile = ctx.api.update_name(&name).await?;
    print_success("Name updated", ctx.quiet);
    print_profile(ctx, &profile)
}

async fn set_email(ctx: &Context, email: &str) -> Result<()> {
    let email = validate_email(email)?;
    ctx.require(&[Page::Profile]).await?;

    let profile = ctx.api.update_email(&email).await?;
    print_success("Email updated", ctx.quiet);
    print_profile(ctx, &profile)
}
