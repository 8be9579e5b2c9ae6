//! List command
//!
//! Show the threads attached to an expert.

use super::{print_response, AppContext};
use anyhow::Result;
use clap::Args;
use qa_core::comment::VoteSet;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Expert slug
    pub expert: String,

    /// Output the API envelope as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the list command
pub fn execute(ctx: &AppContext, args: ListArgs) -> Result<()> {
    use colored::Colorize;

    let response = ctx.api()?.get_comments(&args.expert);
    if args.json || !response.success {
        return print_response(&response);
    }

    let threads = response.data.unwrap_or_default();
    if threads.is_empty() {
        println!("No comments for {}.", args.expert);
        return Ok(());
    }

    println!("{}", format!("Comments on {}:", args.expert).bold().underline());
    println!();

    for thread in &threads {
        println!(
            "  {} {} {}",
            display_author(&thread.author_id, thread.author_name.as_deref()).green(),
            likes(&thread.voters).yellow(),
            thread.id.to_string().dimmed()
        );
        println!("    {}", thread.text);

        for answer in &thread.answers {
            println!(
                "      {} {} {} {}",
                "↳".cyan(),
                display_author(&answer.author_id, answer.author_name.as_deref()).green(),
                likes(&answer.voters).yellow(),
                answer.id.to_string().dimmed()
            );
            println!("        {}", answer.text);
        }
        println!();
    }

    let answers: usize = threads.iter().map(|t| t.answers.len()).sum();
    println!(
        "  {} comments, {} answers",
        threads.len().to_string().cyan(),
        answers.to_string().cyan()
    );

    Ok(())
}

fn display_author(slug: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{} (@{})", name, slug),
        None => format!("@{}", slug),
    }
}

fn likes(voters: &VoteSet) -> String {
    match voters.len() {
        1 => "1 like".to_string(),
        n => format!("{} likes", n),
    }
}
