use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bm-migrate")]
#[command(about = "A CLI tool for migrating browser bookmark exports into categorized markdown documents")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository root the markdown documents are written under
    #[arg(short, long, global = true, default_value = ".")]
    pub repo_root: PathBuf,

    /// JSON file with the folder mapping (defaults to the built-in table)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append every folder's links to its markdown document
    Migrate(MigrateArgs),

    /// Show where each folder would go without writing anything
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
pub struct MigrateArgs {
    /// Bookmark export (HTML)
    #[arg(value_name = "INPUT", default_value = "bookmarks.html")]
    pub input: PathBuf,

    /// Classify and extract, but do not touch the repository
    #[arg(long)]
    pub dry_run: bool,

    /// Write the migration report to a JSON file
    #[arg(long, value_name = "FILE")]
    pub json_report: Option<PathBuf>,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Bookmark export (HTML)
    #[arg(value_name = "INPUT", default_value = "bookmarks.html")]
    pub input: PathBuf,

    /// Output the plan to a JSON file
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,

    /// List the rendered rows of every folder
    #[arg(long)]
    pub detailed: bool,
}
