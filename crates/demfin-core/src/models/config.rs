//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::processor::SECOND_PAGE_SIZE_THRESHOLD;

/// Default report file name.
pub const DEFAULT_REPORT_FILE: &str = "resultado_conferencia.csv";

/// Main configuration for demfin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemfinConfig {
    /// PDF page access configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report output configuration.
    pub output: OutputConfig,
}

/// PDF page access configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// File size in bytes above which the second page is requested.
    pub second_page_min_bytes: u64,

    /// Also search the third page for the reporting period.
    pub scan_third_page: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            second_page_min_bytes: SECOND_PAGE_SIZE_THRESHOLD,
            scan_third_page: false,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Look for the administering entity on the first two pages.
    pub want_administrator: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            want_administrator: true,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report file name.
    pub file_name: String,

    /// Directory for the report (defaults to the input folder).
    pub directory: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_REPORT_FILE.to_string(),
            directory: None,
        }
    }
}

impl DemfinConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Full path of the report for a given input folder.
    pub fn report_path(&self, input_folder: &Path) -> PathBuf {
        self.output
            .directory
            .as_deref()
            .unwrap_or(input_folder)
            .join(&self.output.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DemfinConfig::default();
        assert_eq!(config.pdf.second_page_min_bytes, 10_000);
        assert!(!config.pdf.scan_third_page);
        assert!(config.extraction.want_administrator);
        assert_eq!(config.output.file_name, "resultado_conferencia.csv");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: DemfinConfig =
            serde_json::from_str(r#"{"pdf": {"scan_third_page": true}}"#).unwrap();
        assert!(config.pdf.scan_third_page);
        assert_eq!(config.pdf.second_page_min_bytes, 10_000);
        assert!(config.extraction.want_administrator);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DemfinConfig::default();
        config.output.file_name = "funds.csv".to_string();
        config.save(&path).unwrap();

        let loaded = DemfinConfig::from_file(&path).unwrap();
        assert_eq!(loaded.output.file_name, "funds.csv");
    }

    #[test]
    fn test_report_path() {
        let mut config = DemfinConfig::default();
        assert_eq!(
            config.report_path(Path::new("/data/pdfs")),
            PathBuf::from("/data/pdfs/resultado_conferencia.csv")
        );

        config.output.directory = Some(PathBuf::from("/reports"));
        assert_eq!(
            config.report_path(Path::new("/data/pdfs")),
            PathBuf::from("/reports/resultado_conferencia.csv")
        );
    }
}
