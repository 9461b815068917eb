//! Error types for the demfin-core library.

use thiserror::Error;

/// Main error type for the demfin library.
#[derive(Error, Debug)]
pub enum DemfinError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Report output error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// Folder enumeration error.
    #[error("invalid folder pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF page text access.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be opened with an empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// Invalid page index requested.
    #[error("invalid page index {index} (document has {count} pages)")]
    InvalidPage { index: usize, count: usize },
}

/// Errors related to tabular report output.
#[derive(Error, Debug)]
pub enum ReportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to create or flush the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the demfin library.
pub type Result<T> = std::result::Result<T, DemfinError>;
