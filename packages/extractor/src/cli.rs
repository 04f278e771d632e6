//! Command-line interface for the extractor.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::{validate_source_dir, DEFAULT_OUTPUT_FILE};
use crate::error::Result;
use crate::pipeline::process_corpus;

/// Textarchiv Extractor - Flatten a TEI corpus into a CSV dataset.
#[derive(Parser)]
#[command(name = "textarchiv-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process a corpus directory into a dataset file.
    Extract {
        /// Directory containing TEI XML files
        source_dir: PathBuf,

        /// Output CSV path (default: dataset.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { source_dir, output } => {
            extract_command(&source_dir, output.as_deref())
        }
    }
}

/// Execute the extract command.
fn extract_command(source_dir: &Path, output: Option<&Path>) -> Result<()> {
    // Validate the source before opening the output
    validate_source_dir(source_dir)?;

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));

    println!(
        "{} {} into {}",
        style("Extracting").bold(),
        style(source_dir.display()).cyan(),
        style(output_path.display()).green()
    );
    println!();

    let summary = process_corpus(source_dir, &output_path)?;

    println!("  Files: {}", summary.discovered);
    println!("  Rows written: {}", style(summary.written).green());
    if summary.skipped > 0 {
        println!("  Skipped: {}", style(summary.skipped).yellow().bold());
    }
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}
