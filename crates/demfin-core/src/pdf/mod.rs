//! PDF page text access.

mod extractor;

pub use extractor::PdfPageProvider;

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Source of per-page plain text for a document.
///
/// A page with no extractable text yields an empty string. Documents that
/// cannot be opened and out-of-range indices are errors.
pub trait PageTextProvider {
    /// Text of the page at `index` (0-based).
    fn get_page(&self, path: &Path, index: usize) -> Result<String>;

    /// Text of every page, in page order.
    fn get_all_pages(&self, path: &Path) -> Result<Vec<String>>;
}

impl<P: PageTextProvider + ?Sized> PageTextProvider for &P {
    fn get_page(&self, path: &Path, index: usize) -> Result<String> {
        (**self).get_page(path, index)
    }

    fn get_all_pages(&self, path: &Path) -> Result<Vec<String>> {
        (**self).get_all_pages(path)
    }
}
