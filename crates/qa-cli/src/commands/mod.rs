//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod comment;
pub mod config;
pub mod init;
pub mod list;
pub mod profile;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qa_core::api::ApiResponse;
use qa_core::config::Config;
use qa_core::{CommentApi, CommentService};
use qa_storage::{default_data_dir, FileSystemProfiles, FileSystemStore};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Project-local directory created by `init`
pub const LOCAL_DIR: &str = ".qa-threads";

/// qa-threads - comment threads for expert Q&A
#[derive(Debug, Parser)]
#[command(name = "qa-threads")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides configuration)
    #[arg(long, global = true, env = "QA_THREADS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize qa-threads in current directory
    Init(init::InitArgs),

    /// Add a comment or an answer
    Add(comment::AddArgs),

    /// Edit a comment's text
    Update(comment::UpdateArgs),

    /// Toggle a like on a comment
    Like(comment::VoteArgs),

    /// Remove a like from a comment
    Dislike(comment::VoteArgs),

    /// Delete a comment and its answers
    Delete(comment::DeleteArgs),

    /// Show the threads attached to an expert
    List(list::ListArgs),

    /// Manage author profiles
    #[command(subcommand)]
    Profile(profile::ProfileCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Resolved configuration and data location shared by commands
pub struct AppContext {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub data_dir: PathBuf,
}

impl AppContext {
    /// Resolve configuration and data directory from the global flags
    pub fn resolve(config_flag: Option<PathBuf>, data_dir_flag: Option<PathBuf>) -> Result<Self> {
        let config_path = config_flag.or_else(|| {
            let local = Path::new(LOCAL_DIR).join("config.toml");
            local.exists().then_some(local)
        });

        let config = match &config_path {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => Config::default(),
        };

        let data_dir = data_dir_flag
            .or_else(|| config.storage.data_dir.clone())
            .unwrap_or_else(default_data_dir);
        tracing::debug!("Using data directory {:?}", data_dir);

        Ok(Self {
            config,
            config_path,
            data_dir,
        })
    }

    /// Open the comment API over the file backends
    pub fn api(&self) -> Result<CommentApi> {
        let store = FileSystemStore::new(&self.data_dir).context("Failed to open comment store")?;
        let service =
            CommentService::new(store, self.profiles()?).with_config(&self.config.comments);
        Ok(CommentApi::new(service))
    }

    /// Open the profile file
    pub fn profiles(&self) -> Result<FileSystemProfiles> {
        FileSystemProfiles::new(&self.data_dir).context("Failed to open profile store")
    }
}

/// Print an envelope as JSON and turn a failure into an error exit
pub fn print_response<T: Serialize>(response: &ApiResponse<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    match &response.error {
        Some(err) if !response.success => anyhow::bail!("{} ({})", err.message, err.kind),
        _ => Ok(()),
    }
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        // Init does not need an existing configuration
        Commands::Init(args) => init::execute(args),
        command => {
            let ctx = AppContext::resolve(cli.config, cli.data_dir)?;
            dispatch(&ctx, command)
        }
    }
}

/// Dispatch to command handler
fn dispatch(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Init(args) => init::execute(args),
        Commands::Add(args) => comment::add(ctx, args),
        Commands::Update(args) => comment::update(ctx, args),
        Commands::Like(args) => comment::like(ctx, args),
        Commands::Dislike(args) => comment::dislike(ctx, args),
        Commands::Delete(args) => comment::delete(ctx, args),
        Commands::List(args) => list::execute(ctx, args),
        Commands::Profile(cmd) => profile::execute(ctx, cmd),
        Commands::Config(cmd) => config::execute(ctx, cmd),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
