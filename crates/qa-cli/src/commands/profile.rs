//! Profile command
//!
//! Seed and inspect the author profiles used to label comments.

use super::AppContext;
use anyhow::Result;
use clap::Subcommand;
use qa_core::profile::Profile;

/// Profile subcommands
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Create or replace a profile
    Set {
        /// Profile slug
        slug: String,

        /// Display name
        #[arg(long, short)]
        name: Option<String>,

        /// Avatar image URL
        #[arg(long, short)]
        image: Option<String>,
    },

    /// List all profiles
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute the profile command
pub fn execute(ctx: &AppContext, cmd: ProfileCommand) -> Result<()> {
    match cmd {
        ProfileCommand::Set { slug, name, image } => set_profile(ctx, slug, name, image),
        ProfileCommand::List { json } => list_profiles(ctx, json),
    }
}

fn set_profile(
    ctx: &AppContext,
    slug: String,
    name: Option<String>,
    image: Option<String>,
) -> Result<()> {
    use colored::Colorize;

    let slug = slug.trim().to_string();
    if slug.is_empty() {
        anyhow::bail!("Profile slug cannot be empty");
    }

    ctx.profiles()?.upsert(Profile {
        slug: slug.clone(),
        profile: name,
        profile_image: image,
    })?;
    println!("{} Profile '{}' saved.", "✓".green(), slug);
    Ok(())
}

fn list_profiles(ctx: &AppContext, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let profiles = ctx.profiles()?.list()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    if profiles.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }

    println!("{}", "Profiles:".bold().underline());
    println!();
    for profile in &profiles {
        println!(
            "  {} {} {}",
            profile.slug.green(),
            profile.profile.as_deref().unwrap_or("-"),
            profile.profile_image.as_deref().unwrap_or("").dimmed()
        );
    }

    Ok(())
}
