//! Core library for financial statement field extraction.
//!
//! This crate provides:
//! - PDF page text access (`PageTextProvider`, lopdf-backed)
//! - Identity field extraction (fund name, administrator, CNPJ, period)
//! - Responsibility field extraction (accountant, director)
//! - Per-document processing with failure isolation
//! - Folder batch pipeline and CSV report output

pub mod error;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod processor;
pub mod report;
pub mod statement;

pub use error::{DemfinError, Result};
pub use models::statement::{ExtractionResult, IdentityFields, ResponsibilityFields, ResultSet};
pub use pdf::{PageTextProvider, PdfPageProvider};
pub use pipeline::{BatchOutcome, BatchPipeline, SkippedDocument};
pub use processor::{DocumentProcessor, ProcessorOptions, SECOND_PAGE_SIZE_THRESHOLD};
pub use report::{CsvReportWriter, ExportOutcome, TabularWriter, export};
pub use statement::{extract_identity, extract_responsibility};
