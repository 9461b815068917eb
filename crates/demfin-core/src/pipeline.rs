//! Folder batch pipeline.

use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::statement::{DocumentOutcome, ResultSet};
use crate::pdf::PageTextProvider;
use crate::processor::DocumentProcessor;

pub use crate::models::statement::SkippedDocument;

/// Results of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Successful rows in enumeration order.
    pub results: ResultSet,
    /// Documents that produced no row, in enumeration order.
    pub skipped: Vec<SkippedDocument>,
}

impl BatchOutcome {
    /// Split per-document outcomes, keeping their order.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = DocumentOutcome>) -> Self {
        let mut batch = Self::default();
        for outcome in outcomes {
            match outcome {
                Ok(result) => batch.results.push(result),
                Err(skipped) => batch.skipped.push(skipped),
            }
        }
        batch
    }

    /// Number of documents attempted.
    pub fn attempted(&self) -> usize {
        self.results.len() + self.skipped.len()
    }
}

/// Runs the document processor over every PDF in a folder.
pub struct BatchPipeline<P> {
    processor: DocumentProcessor<P>,
}

impl<P: PageTextProvider> BatchPipeline<P> {
    /// Create a pipeline around a processor.
    pub fn new(processor: DocumentProcessor<P>) -> Self {
        Self { processor }
    }

    /// Process every PDF in `folder`, sequentially, in enumeration order.
    ///
    /// Only failure to enumerate the folder is an error; document failures
    /// are recorded in [`BatchOutcome::skipped`].
    pub fn run(&self, folder: &Path) -> Result<BatchOutcome> {
        let documents = list_documents(folder)?;
        Ok(self.run_documents(&documents))
    }

    /// Process the given documents in order.
    pub fn run_documents(&self, documents: &[PathBuf]) -> BatchOutcome {
        self.run_documents_with(documents, |_| {})
    }

    /// Process the given documents in order, calling `on_done` after each one.
    pub fn run_documents_with<F>(&self, documents: &[PathBuf], mut on_done: F) -> BatchOutcome
    where
        F: FnMut(&Path),
    {
        let outcome = BatchOutcome::from_outcomes(documents.iter().map(|path| {
            let outcome = self.processor.outcome(path);
            on_done(path);
            outcome
        }));

        info!(
            "Batch finished: {} extracted, {} skipped",
            outcome.results.len(),
            outcome.skipped.len()
        );
        outcome
    }
}

/// PDF files directly inside `folder`, in sorted order.
///
/// Matches the ".pdf" extension case-insensitively.
pub fn list_documents(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("not a directory: {}", folder.display()),
        )
        .into());
    }

    let pattern = format!("{}/*", glob::Pattern::escape(&folder.to_string_lossy()));

    let documents: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && is_pdf(p))
        .collect();

    debug!("Found {} PDF files in {}", documents.len(), folder.display());
    Ok(documents)
}

fn is_pdf(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase().ends_with(".pdf"))
        .unwrap_or(false)
}
