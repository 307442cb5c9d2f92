use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "docdiff",
    about = "Document comparison — line- and word-level text diffing",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two documents and render their differences
    Compare(CompareArgs),
    /// Show only the change summary for two documents
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// The original document
    pub original: PathBuf,
    /// The new document
    pub new: PathBuf,

    /// Diff layout: one merged column, or the two documents side by side
    #[arg(long, default_value = "inline")]
    pub view: ViewMode,

    /// Similarity above which a changed line pair renders as one modified
    /// line instead of a removal plus an addition
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Never collapse changed line pairs into modified lines
    #[arg(long)]
    pub no_modify: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ViewMode {
    Inline,
    Split,
}

#[derive(Args)]
pub struct StatsArgs {
    /// The original document
    pub original: PathBuf,
    /// The new document
    pub new: PathBuf,

    /// Similarity above which a changed line pair counts as modified
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Never collapse changed line pairs into modified lines
    #[arg(long)]
    pub no_modify: bool,
}
