//! Page text extraction using lopdf.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PageTextProvider, Result};
use crate::error::PdfError;

/// Page text provider backed by lopdf.
///
/// Each call opens the document from disk; nothing is cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfPageProvider;

impl PdfPageProvider {
    /// Create a new provider.
    pub fn new() -> Self {
        Self
    }

    fn open(&self, path: &Path) -> Result<Document> {
        let mut doc = Document::load(path).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted {} with empty password", path.display());
        }

        Ok(doc)
    }

    fn page_text(&self, doc: &Document, page_number: u32) -> String {
        match doc.extract_text(&[page_number]) {
            Ok(text) => text,
            Err(e) => {
                warn!("No text extracted from page {}: {}", page_number, e);
                String::new()
            }
        }
    }
}

impl PageTextProvider for PdfPageProvider {
    fn get_page(&self, path: &Path, index: usize) -> Result<String> {
        let doc = self.open(path)?;
        let pages = doc.get_pages();

        let page_number = *pages.keys().nth(index).ok_or(PdfError::InvalidPage {
            index,
            count: pages.len(),
        })?;

        let text = self.page_text(&doc, page_number);
        trace!("Page {} of {}: {} chars", index, path.display(), text.len());
        Ok(text)
    }

    fn get_all_pages(&self, path: &Path) -> Result<Vec<String>> {
        let doc = self.open(path)?;
        let pages = doc.get_pages();

        let texts: Vec<String> = pages
            .keys()
            .map(|&page_number| self.page_text(&doc, page_number))
            .collect();

        debug!("Extracted {} pages from {}", texts.len(), path.display());
        Ok(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    /// Build a PDF with one line of Courier text per page.
    fn write_pdf(path: &Path, pages: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let operations = if text.is_empty() {
                Vec::new()
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![50.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_pages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.pdf");
        write_pdf(&path, &["CNPJ: 12.345.678/0001-90 - Fundo", "", "Diretor: Carlos Lima"]);

        let provider = PdfPageProvider::new();
        let pages = provider.get_all_pages(&path).unwrap();

        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("CNPJ"));
        assert!(pages[1].trim().is_empty());
        assert!(pages[2].contains("Carlos Lima"));
        assert!(provider.get_page(&path, 2).unwrap().contains("Diretor"));
    }

    #[test]
    fn test_out_of_range_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.pdf");
        write_pdf(&path, &["Demonstracao Financeira"]);

        let err = PdfPageProvider::new().get_page(&path, 1).unwrap_err();
        assert!(matches!(err, PdfError::InvalidPage { index: 1, count: 1 }));
    }

    #[test]
    fn test_missing_file_is_error() {
        let provider = PdfPageProvider::new();
        let err = provider
            .get_page(Path::new("/nonexistent/statement.pdf"), 0)
            .unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_garbage_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let provider = PdfPageProvider::new();
        assert!(provider.get_all_pages(&path).is_err());
        assert!(provider.get_page(&path, 0).is_err());
    }
}
