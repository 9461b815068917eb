//! Batch command - extract every statement in a folder into one CSV report.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use demfin_core::models::statement::{DocumentOutcome, SkippedDocument};
use demfin_core::pipeline::list_documents;
use demfin_core::processor::file_name;
use demfin_core::{
    BatchOutcome, BatchPipeline, CsvReportWriter, DocumentProcessor, ExportOutcome,
    PdfPageProvider, ProcessorOptions, export,
};

use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Folder containing the PDF statements (prompted for when omitted)
    folder: Option<PathBuf>,

    /// Output CSV file (default: <folder>/resultado_conferencia.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "1")]
    jobs: usize,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let folder = match args.folder {
        Some(folder) => folder,
        None => match select_folder()? {
            Some(folder) => folder,
            None => {
                println!("{} No folder selected. Operation cancelled.", style("ℹ").blue());
                return Ok(());
            }
        },
    };

    let documents = list_documents(&folder)?;
    println!(
        "{} Found {} PDF files in {}",
        style("ℹ").blue(),
        documents.len(),
        folder.display()
    );

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let processor = DocumentProcessor::new(PdfPageProvider::new())
        .with_options(ProcessorOptions::from(&config));

    let batch = if args.jobs > 1 {
        debug!("Processing with {} workers", args.jobs);
        run_concurrent(processor, documents, args.jobs, &pb).await
    } else {
        BatchPipeline::new(processor).run_documents_with(&documents, |path| {
            pb.set_message(file_name(path));
            pb.inc(1);
        })
    };

    pb.finish_and_clear();

    let report_path = args.output.unwrap_or_else(|| config.report_path(&folder));
    let mut writer = CsvReportWriter::new(&report_path);

    match export(&batch.results, &mut writer)? {
        ExportOutcome::Empty => {
            println!("{} No valid results to save.", style("!").yellow());
        }
        ExportOutcome::Written(rows) => {
            println!(
                "{} CSV file written: {}",
                style("✓").green(),
                writer.path().display()
            );
            println!("   Total files processed: {}", style(rows).green());
        }
    }

    print_skipped(&batch.skipped);
    debug!("Batch took {:?}", start.elapsed());

    Ok(())
}

/// Ask for the input folder on the terminal; an empty answer cancels.
fn select_folder() -> anyhow::Result<Option<PathBuf>> {
    print!("Select the folder containing the financial statement PDFs: ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;

    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| PathBuf::from(answer)))
}

/// Process documents on the blocking pool, keeping enumeration order.
async fn run_concurrent(
    processor: DocumentProcessor<PdfPageProvider>,
    documents: Vec<PathBuf>,
    jobs: usize,
    pb: &ProgressBar,
) -> BatchOutcome {
    let processor = Arc::new(processor);

    let outcomes: Vec<DocumentOutcome> = stream::iter(documents)
        .map(|path| {
            let processor = Arc::clone(&processor);
            let pb = pb.clone();
            async move {
                let file = file_name(&path);
                let outcome = tokio::task::spawn_blocking(move || processor.outcome(&path))
                    .await
                    .unwrap_or_else(|e| {
                        error!("Worker for {} failed: {}", file, e);
                        Err(SkippedDocument {
                            file: file.clone(),
                            reason: e.to_string(),
                        })
                    });
                pb.inc(1);
                outcome
            }
        })
        .buffered(jobs)
        .collect()
        .await;

    BatchOutcome::from_outcomes(outcomes)
}

fn print_skipped(skipped: &[SkippedDocument]) {
    if skipped.is_empty() {
        return;
    }

    println!();
    println!("{}", style("Skipped files:").red());
    for doc in skipped {
        println!("  - {}: {}", doc.file, doc.reason);
    }
}
