//! reext - Recursively change file extensions under a directory.
//!
//! Usage:
//!   reext <ROOT> <OLD_EXT> <NEW_EXT>             Rename matching files
//!   reext <ROOT> <OLD_EXT> <NEW_EXT> --dry-run   Show what would change
//!   reext --help                                 Show help

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::Section;
use color_eyre::eyre::{Result, eyre};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use reext_ops::{
    RenameConfig, RenameError, RenameOutcome, RenameTreeResult, start_rename_tree,
};

#[derive(Parser)]
#[command(
    name = "reext",
    version,
    about = "Recursively change file extensions under a directory",
    long_about = "reext renames every file under ROOT whose name ends in OLD_EXT so that \
                  it ends in NEW_EXT instead.\n\n\
                  Extensions are matched case-insensitively and written in lowercase. \
                  Files whose new name is already taken are skipped and reported. \
                  Renames are not rolled back if a later one fails."
)]
struct Cli {
    /// Directory to process
    root: PathBuf,

    /// Extension to replace (e.g. "jpeg" or ".JPEG")
    old_ext: String,

    /// Replacement extension (e.g. "jpg")
    new_ext: String,

    /// Show what would be renamed without changing anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    no_hidden: bool,

    /// Maximum directory depth below ROOT to descend (0 = ROOT only)
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = RenameConfig::builder()
        .root(cli.root.clone())
        .old_extension(cli.old_ext.clone())
        .new_extension(cli.new_ext.clone())
        .include_hidden(!cli.no_hidden)
        .max_depth(cli.max_depth)
        .dry_run(cli.dry_run)
        .build()
        .map_err(RenameError::from)?;

    let outcome = run_rename(config.clone()).await?;

    match cli.format {
        OutputFormat::Text => print_text(&config, &outcome),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    Ok(())
}

/// Install the log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the walk in the background and wait for its result.
async fn run_rename(config: RenameConfig) -> Result<RenameOutcome> {
    let mut rx = start_rename_tree(config);
    let mut result = None;

    while let Some(msg) = rx.recv().await {
        match msg {
            RenameTreeResult::Progress(progress) => {
                debug!(
                    "{}/{} ({:.0}%)",
                    progress.files_processed,
                    progress.files_total,
                    progress.percentage()
                );
            }
            RenameTreeResult::Complete(r) => result = Some(r),
        }
    }

    let result = result.ok_or_else(|| eyre!("Rename task ended without a result"))?;
    result.map_err(|e| {
        let orphan = e.is_orphan();
        let report = eyre!(e).note("Files renamed before the failure keep their new names");
        if orphan {
            report.suggestion("Rename the file at the temporary path back by hand")
        } else {
            report
        }
    })
}

fn print_text(config: &RenameConfig, outcome: &RenameOutcome) {
    let old = config.old_spec();
    let new = config.new_spec();

    if outcome.dry_run {
        for task in &outcome.renamed {
            println!(
                "{} -> {}",
                task.source.display(),
                task.destination.display()
            );
        }
        println!();
        println!("{} (dry run)", outcome.summary());
        return;
    }

    println!("Renamed *{} to *{} in:", old, new);
    println!("{}", config.root.display());

    if !outcome.skipped.is_empty() || !outcome.warnings.is_empty() {
        println!();
        println!("{}", outcome.summary());
    }
}
