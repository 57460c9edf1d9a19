use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "apicat",
    about = "Browse and diff API catalogs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show API differences between two frameworks, or a package's additions
    Diff(DiffArgs),
    /// Show the platforms an API supports in a framework
    Platforms(PlatformsArgs),
    /// Show an API's declaration in a framework
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Catalog file (JSON)
    #[arg(long)]
    pub catalog: PathBuf,
    /// Framework on the new side
    #[arg(long)]
    pub new: String,
    /// Framework on the old side; omit to treat every API as added
    #[arg(long)]
    pub old: Option<String>,
    /// Diff only what this package adds to the new framework
    #[arg(long)]
    pub package: Option<String>,
    /// Diff options file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub no_added: bool,
    #[arg(long)]
    pub no_removed: bool,
    #[arg(long)]
    pub no_changed: bool,
}

#[derive(Debug, Args)]
pub struct PlatformsArgs {
    #[arg(long)]
    pub catalog: PathBuf,
    #[arg(long)]
    pub framework: String,
    /// Dotted API name, e.g. System.Console.Beep
    pub api: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(long)]
    pub catalog: PathBuf,
    #[arg(long)]
    pub framework: String,
    /// Dotted API name, e.g. System.String
    pub api: String,
}
