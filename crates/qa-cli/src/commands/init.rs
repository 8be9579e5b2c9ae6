//! Init command
//!
//! Initialize a project-local qa-threads data directory and configuration.

use super::LOCAL_DIR;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(long)]
    pub force: bool,

    /// Directory to initialize (default: current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Execute the init command
pub fn execute(args: InitArgs) -> Result<()> {
    use colored::Colorize;

    let project_dir = match args.path {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("Initializing qa-threads in {}...", project_dir.display());

    let local_dir = project_dir.join(LOCAL_DIR);
    if local_dir.join("config.toml").exists() && !args.force {
        eprintln!(
            "{} qa-threads already initialized. Use --force to reinitialize.",
            "⚠".yellow()
        );
        return Ok(());
    }

    create_directory_structure(&local_dir)?;
    println!("{} Created {}/ directory", "✓".green(), LOCAL_DIR);

    let config_path = local_dir.join("config.toml");
    fs::write(&config_path, generate_config()).context("Failed to write config.toml")?;
    println!("{} Generated config.toml", "✓".green());

    if project_dir.join(".git").exists() {
        update_gitignore(&project_dir)?;
        println!("{} Updated .gitignore", "✓".green());
    }

    println!("\n{}", "Next steps:".bold());
    println!("  1. Add a profile:");
    println!("     {}", "qa-threads profile set ada --name Ada".cyan());
    println!("  2. Ask a question:");
    println!(
        "     {}",
        "qa-threads add --expert jane --author ada --text \"Hello?\"".cyan()
    );
    println!("  3. Read the threads:");
    println!("     {}", "qa-threads list jane".cyan());

    Ok(())
}

fn create_directory_structure(local_dir: &Path) -> Result<()> {
    fs::create_dir_all(local_dir.join("data"))?;
    Ok(())
}

fn generate_config() -> String {
    format!(
        r#"# qa-threads configuration

[storage]
# Relative paths resolve against the working directory
data_dir = "{}/data"

[comments]
max_text_length = {}
"#,
        LOCAL_DIR,
        qa_core::comment::MAX_COMMENT_LENGTH
    )
}

fn update_gitignore(project_dir: &Path) -> Result<()> {
    let gitignore_path = project_dir.join(".gitignore");
    let entry = format!("{}/data/", LOCAL_DIR);

    if gitignore_path.exists() {
        let content = fs::read_to_string(&gitignore_path)?;
        if !content.contains(&entry) {
            let mut file = fs::OpenOptions::new().append(true).open(&gitignore_path)?;
            use std::io::Write;
            write!(file, "\n# qa-threads\n{}\n", entry)?;
        }
    } else {
        fs::write(&gitignore_path, format!("# qa-threads\n{}\n", entry))?;
    }

    Ok(())
}
