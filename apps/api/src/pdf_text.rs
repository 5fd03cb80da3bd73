//! PDF text extraction on top of `pdf-extract`.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfTextError {
    #[error("Could not read PDF: {0}")]
    Extraction(String),
}

/// Extracts text from an in-memory PDF.
pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<String, PdfTextError> {
    let pages = guarded(|| pdf_extract::extract_text_from_mem_by_pages(bytes))?;
    Ok(join_pages(pages))
}

/// Extracts text from a PDF on disk.
pub fn extract_text_from_path(path: &Path) -> Result<String, PdfTextError> {
    let bytes = std::fs::read(path)
        .map_err(|e| PdfTextError::Extraction(format!("{}: {e}", path.display())))?;
    extract_text_from_bytes(&bytes)
}

// pdf-extract panics on some malformed inputs instead of returning an error.
fn guarded<F>(extract: F) -> Result<Vec<String>, PdfTextError>
where
    F: FnOnce() -> Result<Vec<String>, pdf_extract::OutputError>,
{
    match panic::catch_unwind(AssertUnwindSafe(extract)) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(PdfTextError::Extraction(e.to_string())),
        Err(_) => Err(PdfTextError::Extraction(
            "PDF parser aborted on malformed input".to_string(),
        )),
    }
}

/// Joins pages with `\n` in order. Pages without text are skipped entirely.
fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_pdf;

    fn text_lines(text: &str) -> Vec<&str> {
        text.lines().filter(|l| !l.trim().is_empty()).collect()
    }

    #[test]
    fn test_single_page_returns_its_text() {
        let text = extract_text_from_bytes(&build_pdf(&[Some("Ada Lovelace")])).unwrap();
        assert_eq!(text.trim(), "Ada Lovelace");
    }

    #[test]
    fn test_page_without_text_returns_empty_string() {
        let text = extract_text_from_bytes(&build_pdf(&[None])).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_blank_middle_page_contributes_nothing() {
        let pdf = build_pdf(&[Some("Page one"), None, Some("Page three")]);
        let text = extract_text_from_bytes(&pdf).unwrap();
        assert_eq!(text_lines(&text), vec!["Page one", "Page three"]);
        assert!(!text.contains("\n\n\n\n"));
    }

    #[test]
    fn test_path_and_bytes_agree() {
        let pdf = build_pdf(&[Some("Analytical Engine")]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.pdf");
        std::fs::write(&path, &pdf).unwrap();

        assert_eq!(
            extract_text_from_path(&path).unwrap(),
            extract_text_from_bytes(&pdf).unwrap()
        );
    }

    #[test]
    fn test_join_pages_skips_blank_pages() {
        let pages = vec![
            "Ada Lovelace".to_string(),
            "   \n".to_string(),
            String::new(),
            "Analytical Engine".to_string(),
        ];
        assert_eq!(join_pages(pages), "Ada Lovelace\nAnalytical Engine");
    }

    #[test]
    fn test_join_pages_all_blank_is_empty() {
        assert_eq!(join_pages(vec!["\n\n".into(), " ".into()]), "");
    }

    #[test]
    fn test_non_pdf_bytes_are_an_extraction_error() {
        let err = extract_text_from_bytes(b"PK\x03\x04 this is a zip, not a pdf").unwrap_err();
        assert!(matches!(err, PdfTextError::Extraction(_)));
    }

    #[test]
    fn test_non_pdf_file_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"plain text pretending to be a pdf").unwrap();

        assert!(extract_text_from_path(&path).is_err());
    }
}
