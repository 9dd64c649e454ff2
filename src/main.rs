mod export;
mod parser;
mod table;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use table::{ResultTable, StudentRecord};

#[derive(Parser)]
#[command(name = "marksheet_extract", about = "Extract student result tables from PDF page text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse page-text files and write the reconciled table
    Extract {
        /// Page text files (pdftotext output), in page order; form feeds
        /// inside a file split it into further pages
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
        /// Output container
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },
    /// Parse page-text files and print extraction statistics
    Stats {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Print the summary as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract { inputs, output, format } => {
            let table = run_pipeline(&inputs)?;
            if table.rows.is_empty() {
                println!("No data extracted.");
                return Ok(());
            }
            match format {
                Format::Csv => export::write_csv(&table, &output)?,
                Format::Json => export::write_json(&table, &output)?,
            }
            println!(
                "Saved {} students, {} columns to {}",
                table.rows.len(),
                table.columns.len(),
                output.display()
            );
            Ok(())
        }
        Commands::Stats { inputs, json } => {
            let table = run_pipeline(&inputs)?;
            let summary = table.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Students:      {}", summary.students);
                println!("Subjects:      {}", summary.subjects);
                println!("SGPA reported: {}", summary.sgpa_reported);
                match summary.sgpa_mean {
                    Some(mean) => println!("SGPA mean:     {mean:.2}"),
                    None => println!("SGPA mean:     -"),
                }
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

/// Read every input file, split it into pages, extract records page by page,
/// then reconcile across all pages. Pages are parsed in parallel but collected
/// in page order, so deduplication's first-occurrence rule stays deterministic.
fn run_pipeline(inputs: &[PathBuf]) -> Result<ResultTable> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let mut pages: Vec<String> = Vec::new();
    for path in inputs {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        pages.extend(parser::split_pages(&text).into_iter().map(str::to_string));
    }
    info!(files = inputs.len(), pages = pages.len(), "loaded input");

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut records: Vec<StudentRecord> = Vec::new();
    for chunk in pages.chunks(64) {
        let results: Vec<Vec<StudentRecord>> =
            chunk.par_iter().map(|p| parser::process_page(p)).collect();
        for page_records in results {
            records.extend(page_records);
        }
        pb.inc(chunk.len() as u64);
    }
    pb.finish_and_clear();

    info!(students = records.len(), "extraction complete");
    Ok(table::reconcile(records))
}
