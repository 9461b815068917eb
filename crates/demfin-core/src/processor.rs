//! Per-document processing: page selection, extraction and merge.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::config::DemfinConfig;
use crate::models::statement::{DocumentOutcome, ExtractionResult, SkippedDocument};
use crate::pdf::PageTextProvider;
use crate::statement::{IdentityExtractor, extract_responsibility, tail_text};

/// File size in bytes above which a document is assumed to have a second page.
///
/// This is a size heuristic, not a page count: a larger single-page document
/// fails the page-1 request and is skipped.
pub const SECOND_PAGE_SIZE_THRESHOLD: u64 = 10_000;

/// Options for the document processor.
#[derive(Debug, Clone)]
pub struct ProcessorOptions {
    /// Request page 1 only when the file is larger than this.
    pub second_page_min_bytes: u64,
    /// Request page 2 as well and search it for the period.
    pub scan_third_page: bool,
    /// Look for the administering entity.
    pub want_administrator: bool,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            second_page_min_bytes: SECOND_PAGE_SIZE_THRESHOLD,
            scan_third_page: false,
            want_administrator: true,
        }
    }
}

impl From<&DemfinConfig> for ProcessorOptions {
    fn from(config: &DemfinConfig) -> Self {
        Self {
            second_page_min_bytes: config.pdf.second_page_min_bytes,
            scan_third_page: config.pdf.scan_third_page,
            want_administrator: config.extraction.want_administrator,
        }
    }
}

/// Turns one document into one report row.
pub struct DocumentProcessor<P> {
    provider: P,
    options: ProcessorOptions,
}

impl<P: PageTextProvider> DocumentProcessor<P> {
    /// Create a processor with default options.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            options: ProcessorOptions::default(),
        }
    }

    /// Set processor options.
    pub fn with_options(mut self, options: ProcessorOptions) -> Self {
        self.options = options;
        self
    }

    /// Process a document, returning `None` on any failure.
    ///
    /// Failures are logged with the file name and never propagate.
    pub fn process(&self, path: &Path) -> Option<ExtractionResult> {
        self.outcome(path).ok()
    }

    /// Process a document, turning any failure into a logged skip record.
    pub fn outcome(&self, path: &Path) -> DocumentOutcome {
        self.try_process(path).map_err(|e| {
            let file = file_name(path);
            warn!("Error processing {}: {}", file, e);
            SkippedDocument {
                file,
                reason: e.to_string(),
            }
        })
    }

    /// Process a document, propagating provider and filesystem errors.
    pub fn try_process(&self, path: &Path) -> Result<ExtractionResult> {
        let file = file_name(path);
        info!("Processing: {}", file);

        let first = self.provider.get_page(path, 0)?;

        let size = std::fs::metadata(path)?.len();
        let (second, third) = if size > self.options.second_page_min_bytes {
            let second = self.provider.get_page(path, 1)?;
            let third = if self.options.scan_third_page {
                self.provider
                    .get_page(path, 2)
                    .map_err(|e| debug!("No third page for {}: {}", file, e))
                    .ok()
            } else {
                None
            };
            (second, third)
        } else {
            debug!("{} is {} bytes, skipping second page", file, size);
            (String::new(), None)
        };

        let identity = IdentityExtractor::new()
            .with_administrator(self.options.want_administrator)
            .extract(&first, &second, third.as_deref());

        let pages = self.provider.get_all_pages(path)?;
        debug!("{} has {} pages", file, pages.len());
        let responsibility = extract_responsibility(&tail_text(&pages));

        let result = ExtractionResult::new(file, identity, responsibility);
        debug!("Extracted {} of 6 fields", result.filled_fields());
        Ok(result)
    }
}

/// Basename of a document path.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::pdf;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// In-memory provider that records requested page indices.
    pub(crate) struct StubProvider {
        pub pages: Vec<String>,
        pub forbid_second_page: bool,
        pub fail: bool,
        pub requests: Mutex<Vec<usize>>,
    }

    impl StubProvider {
        pub fn new(pages: &[&str]) -> Self {
            Self {
                pages: pages.iter().map(|p| p.to_string()).collect(),
                forbid_second_page: false,
                fail: false,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl PageTextProvider for StubProvider {
        fn get_page(&self, _path: &Path, index: usize) -> pdf::Result<String> {
            assert!(
                !(self.forbid_second_page && index == 1),
                "second page must not be requested"
            );
            self.requests.lock().unwrap().push(index);
            if self.fail {
                return Err(PdfError::Parse("stub failure".to_string()));
            }
            if self.pages.is_empty() && index == 0 {
                return Ok(String::new());
            }
            self.pages.get(index).cloned().ok_or(PdfError::InvalidPage {
                index,
                count: self.pages.len(),
            })
        }

        fn get_all_pages(&self, _path: &Path) -> pdf::Result<Vec<String>> {
            if self.fail {
                return Err(PdfError::Parse("stub failure".to_string()));
            }
            Ok(self.pages.clone())
        }
    }

    pub(crate) fn sized_file(dir: &Path, name: &str, size: usize) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, vec![b'%'; size]).unwrap();
        path
    }

    const FIRST: &str = "FUNDO DE INVESTIMENTO ALFA\nCNPJ: 12.345.678/0001-90 \nAdministrado pela Banco Um S.A.\n";
    const SECOND: &str = "Demonstração Financeira\nFundo de Investimento Alfa\nMultimercado\nReferentes ao Exercício Findo em 31 de dezembro de 2023\n";
    const LAST: &str = "Diretor Responsável: Carlos Lima\nContador Responsável: Ana Souza\n";

    #[test]
    fn test_process_full_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = sized_file(dir.path(), "alfa.pdf", 20_000);
        let provider = StubProvider::new(&[FIRST, SECOND, "Notas", LAST]);

        let result = DocumentProcessor::new(&provider).process(&path).unwrap();

        assert_eq!(
            result,
            ExtractionResult {
                file: "alfa.pdf".to_string(),
                fund_name: Some("Fundo de Investimento Alfa Multimercado".to_string()),
                administrator: Some("Banco Um S.A.".to_string()),
                accountant: Some("Ana Souza".to_string()),
                director: Some("Carlos Lima".to_string()),
                tax_id: Some(": 12.345.678/0001-90".to_string()),
                period: Some("31 de dezembro de 2023".to_string()),
            }
        );
        assert_eq!(*provider.requests.lock().unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_small_file_never_requests_second_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = sized_file(dir.path(), "small.pdf", 10_000);
        let mut provider = StubProvider::new(&[FIRST, SECOND]);
        provider.forbid_second_page = true;

        let result = DocumentProcessor::new(&provider).process(&path).unwrap();

        assert_eq!(result.fund_name, None);
        assert_eq!(result.period, None);
        assert_eq!(result.tax_id, Some(": 12.345.678/0001-90".to_string()));
        assert_eq!(result.administrator, Some("Banco Um S.A.".to_string()));
        assert_eq!(*provider.requests.lock().unwrap(), vec![0]);
    }

    #[test]
    fn test_large_single_page_document_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = sized_file(dir.path(), "one.pdf", 10_001);
        let provider = StubProvider::new(&[FIRST]);

        assert!(DocumentProcessor::new(&provider).process(&path).is_none());
    }

    #[test]
    fn test_zero_page_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = sized_file(dir.path(), "empty.pdf", 100);
        let provider = StubProvider::new(&[]);

        let result = DocumentProcessor::new(&provider).try_process(&path).unwrap();

        assert_eq!(result.accountant, None);
        assert_eq!(result.director, None);
        assert_eq!(result.filled_fields(), 0);
    }

    #[test]
    fn test_single_page_tail() {
        let dir = tempfile::tempdir().unwrap();
        let path = sized_file(dir.path(), "single.pdf", 500);
        let provider = StubProvider::new(&[LAST]);

        let result = DocumentProcessor::new(&provider).process(&path).unwrap();
        assert_eq!(result.director, Some("Carlos Lima".to_string()));
        assert_eq!(result.accountant, Some("Ana Souza".to_string()));
    }

    #[test]
    fn test_provider_failure_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = sized_file(dir.path(), "bad.pdf", 500);
        let mut provider = StubProvider::new(&[FIRST]);
        provider.fail = true;

        let processor = DocumentProcessor::new(&provider);
        assert!(processor.process(&path).is_none());
        assert!(processor.try_process(&path).is_err());

        let skipped = processor.outcome(&path).unwrap_err();
        assert_eq!(skipped.file, "bad.pdf");
        assert!(skipped.reason.contains("stub failure"));
    }

    #[test]
    fn test_missing_file_returns_none() {
        let provider = StubProvider::new(&[FIRST]);
        let processor = DocumentProcessor::new(&provider);
        assert!(processor.process(Path::new("/nonexistent/x.pdf")).is_none());
    }

    #[test]
    fn test_third_page_period() {
        let dir = tempfile::tempdir().unwrap();
        let path = sized_file(dir.path(), "three.pdf", 20_000);
        let third = "Referentes ao Exercício Findo em 30 de junho de 2024";
        let provider = StubProvider::new(&[FIRST, "Fundo de Investimento Beta", third, LAST]);

        let without = DocumentProcessor::new(&provider).process(&path).unwrap();
        assert_eq!(without.period, None);

        let options = ProcessorOptions {
            scan_third_page: true,
            ..ProcessorOptions::default()
        };
        let with = DocumentProcessor::new(&provider)
            .with_options(options)
            .process(&path)
            .unwrap();
        assert_eq!(with.period, Some("30 de junho de 2024".to_string()));
    }

    #[test]
    fn test_missing_third_page_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = sized_file(dir.path(), "two.pdf", 20_000);
        let provider = StubProvider::new(&[FIRST, SECOND]);
        let options = ProcessorOptions {
            scan_third_page: true,
            ..ProcessorOptions::default()
        };

        let result = DocumentProcessor::new(&provider)
            .with_options(options)
            .process(&path)
            .unwrap();
        assert_eq!(result.period, Some("31 de dezembro de 2023".to_string()));
    }

    #[test]
    fn test_administrator_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = sized_file(dir.path(), "alfa.pdf", 500);
        let provider = StubProvider::new(&[FIRST]);
        let options = ProcessorOptions {
            want_administrator: false,
            ..ProcessorOptions::default()
        };

        let result = DocumentProcessor::new(&provider)
            .with_options(options)
            .process(&path)
            .unwrap();
        assert_eq!(result.administrator, None);
    }

    #[test]
    fn test_options_from_config() {
        let mut config = DemfinConfig::default();
        config.pdf.second_page_min_bytes = 5;
        config.extraction.want_administrator = false;

        let options = ProcessorOptions::from(&config);
        assert_eq!(options.second_page_min_bytes, 5);
        assert!(!options.want_administrator);
        assert!(!options.scan_third_page);
    }
}
