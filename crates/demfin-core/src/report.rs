//! Tabular report output.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ReportError;
use crate::models::statement::{ExtractionResult, REPORT_COLUMNS};

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Sink for the batch result set.
pub trait TabularWriter {
    /// Write a header row and one row per result; returns the rows written.
    fn write(&mut self, results: &[ExtractionResult]) -> Result<usize>;
}

/// What [`export`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing to write; the writer was not invoked.
    Empty,
    /// Number of data rows written.
    Written(usize),
}

/// Hand the result set to a writer unless it is empty.
pub fn export<W: TabularWriter + ?Sized>(
    results: &[ExtractionResult],
    writer: &mut W,
) -> Result<ExportOutcome> {
    if results.is_empty() {
        info!("No valid results to save");
        return Ok(ExportOutcome::Empty);
    }

    let written = writer.write(results)?;
    Ok(ExportOutcome::Written(written))
}

/// CSV writer that creates its file only when written to.
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    path: PathBuf,
}

impl CsvReportWriter {
    /// Create a writer targeting `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TabularWriter for CsvReportWriter {
    fn write(&mut self, results: &[ExtractionResult]) -> Result<usize> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;

        wtr.write_record(REPORT_COLUMNS)?;
        for result in results {
            wtr.serialize(result)?;
        }
        wtr.flush()?;

        debug!("Wrote {} rows to {}", results.len(), self.path.display());
        Ok(results.len())
    }
}
