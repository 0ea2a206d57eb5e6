//! vizmetric - Tableau workbook complexity CLI
//!
//! Scores a single `.twb`/`.twbx` workbook or every workbook in a directory and prints JSON, or
//! writes JSON/CSV/TSV reports when `--out` is given.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use vizmetric::core::io::workbook_identifier;
use vizmetric::output::{OutputFormat, sidecar_path};
use vizmetric::{
    AnalysisConfig, WorkbookOutcome, aggregate_corpus, analyze_directory, analyze_file, write_corpus_output,
    write_directory_output, write_workbook_output,
};

#[derive(Parser)]
#[command(name = "vizmetric", version)]
#[command(about = "Analyze Tableau workbook complexity", long_about = None)]
struct Cli {
    /// Path to a .twb/.twbx workbook or a directory containing them
    input: PathBuf,

    /// Output file (.json, .csv, or .tsv). If omitted, prints JSON to stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// When INPUT is a directory, recurse into subfolders
    #[arg(short, long)]
    recursive: bool,

    /// Configuration file (TOML, YAML or JSON). Defaults to a discovered vizmetric.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also emit corpus-level statistics
    #[arg(long)]
    corpus: bool,

    /// Maximum concurrent workbook analyses
    #[arg(short = 'j', long)]
    max_concurrent: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AnalysisConfig::discover()?.unwrap_or_default(),
    };

    if cli.recursive {
        config.recursive = true;
    }
    if let Some(limit) = cli.max_concurrent {
        config.max_concurrent_analyses = Some(limit);
    }
    Ok(config)
}

fn emit_corpus(outcomes: &[WorkbookOutcome], out: Option<&Path>) -> Result<()> {
    let corpus = aggregate_corpus(outcomes);
    match out {
        Some(out_path) => {
            let path = write_corpus_output(&corpus, out_path)?;
            println!("Corpus summary saved to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&corpus)?),
    }
    Ok(())
}

async fn run_directory(cli: &Cli, config: &AnalysisConfig) -> Result<()> {
    let outcomes = analyze_directory(&cli.input, config)
        .await
        .with_context(|| format!("Failed to analyze directory {}", cli.input.display()))?;

    match &cli.out {
        Some(out_path) => {
            let written = write_directory_output(&outcomes, out_path)?;
            if OutputFormat::from_path(out_path)?.is_tabular() {
                println!(
                    "Wrote worksheets to {} and summaries to {}",
                    out_path.display(),
                    written.last().unwrap_or(out_path).display()
                );
            } else {
                println!("Wrote {} workbook results to {}", outcomes.len(), out_path.display());
            }
        }
        None if cli.corpus => {}
        None => println!("{}", serde_json::to_string_pretty(&outcomes)?),
    }

    if cli.corpus {
        emit_corpus(&outcomes, cli.out.as_deref())?;
    }
    Ok(())
}

fn run_file(cli: &Cli, config: &AnalysisConfig) -> Result<()> {
    let analysis =
        analyze_file(&cli.input, config).with_context(|| format!("Failed to analyze {}", cli.input.display()))?;

    match &cli.out {
        Some(out_path) => {
            write_workbook_output(&analysis, out_path)?;
            println!(
                "Wrote {} worksheet rows + summary to {}",
                analysis.worksheets.len(),
                out_path.display()
            );
            if OutputFormat::from_path(out_path)?.is_tabular() {
                let extension = out_path.extension().and_then(|e| e.to_str()).unwrap_or_default();
                println!(
                    "Summary also saved to {} and {}",
                    sidecar_path(out_path, "_summary", "json").display(),
                    sidecar_path(out_path, "_summary", extension).display()
                );
            }
        }
        None if cli.corpus => {}
        None => println!("{}", serde_json::to_string_pretty(&analysis)?),
    }

    if cli.corpus {
        let outcome = WorkbookOutcome::success(workbook_identifier(&cli.input), analysis);
        emit_corpus(std::slice::from_ref(&outcome), cli.out.as_deref())?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    tracing::debug!("Effective configuration: {:?}", config);

    if cli.input.is_dir() {
        run_directory(&cli, &config).await
    } else {
        run_file(&cli, &config)
    }
}
