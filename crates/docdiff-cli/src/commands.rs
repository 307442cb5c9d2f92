use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use docdiff_core::{diff_lines, DiffConfig};

use crate::cli::{Cli, Command, CompareArgs, OutputFormat, StatsArgs, ViewMode};
use crate::render;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Compare(args) => cmd_compare(args, &cli.format),
        Command::Stats(args) => cmd_stats(args, &cli.format),
    }
}

fn cmd_compare(args: CompareArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let original = read_document(&args.original)?;
    let new = read_document(&args.new)?;
    let config = build_config(args.threshold, args.no_modify);
    let diff = diff_lines(&original, &new, &config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text => {
            match args.view {
                ViewMode::Inline => render::inline(&diff),
                ViewMode::Split => render::split(&diff),
            }
            println!();
            print_summary_line(&diff.stats());
        }
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let original = read_document(&args.original)?;
    let new = read_document(&args.new)?;
    let config = build_config(args.threshold, args.no_modify);
    let diff = diff_lines(&original, &new, &config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff.stats())?),
        OutputFormat::Text => print_summary_line(&diff.stats()),
    }
    Ok(())
}

fn read_document(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn build_config(threshold: Option<f64>, no_modify: bool) -> DiffConfig {
    let mut config = DiffConfig::default();
    if let Some(threshold) = threshold {
        config.modify_threshold = threshold;
    }
    if no_modify {
        config.collapse_modified = false;
    }
    config
}

fn print_summary_line(stats: &docdiff_core::DiffStats) {
    println!(
        "{} added, {} deleted, {} modified",
        stats.added.to_string().green().bold(),
        stats.deleted.to_string().red().bold(),
        stats.modified.to_string().yellow().bold(),
    );
}
