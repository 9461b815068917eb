//! Process command - extract fields from a single statement file.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use demfin_core::models::statement::ExtractionResult;
use demfin_core::{DocumentProcessor, PdfPageProvider, ProcessorOptions};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let processor = DocumentProcessor::new(PdfPageProvider::new())
        .with_options(ProcessorOptions::from(&config));
    let result = processor.try_process(&args.input)?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result)?,
        OutputFormat::Text => format_result_text(&result),
    };
    println!("{}", output);

    Ok(())
}

fn format_result_text(result: &ExtractionResult) -> String {
    let fields = [
        ("Fund", &result.fund_name),
        ("Administrator", &result.administrator),
        ("CNPJ", &result.tax_id),
        ("Period", &result.period),
        ("Accountant", &result.accountant),
        ("Director", &result.director),
    ];

    let mut output = format!("File: {}\n", result.file);
    for (label, value) in fields {
        output.push_str(&format!(
            "{:<14} {}\n",
            format!("{}:", label),
            value.as_deref().unwrap_or("-")
        ));
    }
    output
}
