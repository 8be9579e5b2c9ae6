//! Config command
//!
//! Inspect the resolved qa-threads configuration.

use super::AppContext;
use anyhow::Result;
use clap::Subcommand;
use qa_core::comment::CommentValidator;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(ctx: &AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(ctx, json),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &AppContext, as_json: bool) -> Result<()> {
    use colored::Colorize;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    match &ctx.config_path {
        Some(path) => println!("{}", path.display().to_string().dimmed()),
        None => println!("{}", "(defaults, no config file)".dimmed()),
    }
    println!("{} {}", "data dir:".dimmed(), ctx.data_dir.display());
    println!();
    println!("{}", ctx.config.to_toml_string()?);

    Ok(())
}

fn validate_config(ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    // Loading already rejected malformed TOML
    let max = ctx.config.comments.max_text_length;
    if max == 0 {
        anyhow::bail!("comments.max_text_length must be at least 1");
    }
    if max > qa_core::comment::MAX_COMMENT_LENGTH {
        println!(
            "{} comments.max_text_length ({}) is above the default of {}",
            "⚠".yellow(),
            max,
            qa_core::comment::MAX_COMMENT_LENGTH
        );
    }

    // A validator built from the config must accept a one-character comment
    CommentValidator::with_max_length(max).validate_text("x")?;
    println!("{} Configuration is valid", "✓".green());

    Ok(())
}
