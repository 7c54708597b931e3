//! Text extraction with OCR fallback

use crate::error::ExtractorError;
use crate::types::{ExtractedText, ExtractionMode};
use eobscan_domain::traits::{OcrEngine, PageResults, TextLayer};
use eobscan_domain::TextMode;
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, info, warn};

/// Produces one newline-joined text blob from a PDF
pub struct TextExtractor<T, O> {
    text_layer: T,
    ocr: O,
    fallback_threshold: usize,
}

impl<T, O> TextExtractor<T, O>
where
    T: TextLayer,
    O: OcrEngine,
    T::Error: Display,
    O::Error: Display,
{
    /// Create a new text extractor
    ///
    /// In auto mode, native text whose trimmed length is below
    /// `fallback_threshold` characters is replaced by OCR output.
    pub fn new(text_layer: T, ocr: O, fallback_threshold: usize) -> Self {
        Self {
            text_layer,
            ocr,
            fallback_threshold,
        }
    }

    /// Extract text from the PDF at `path`
    pub fn extract(&self, path: &Path, mode: ExtractionMode) -> Result<ExtractedText, ExtractorError> {
        match mode {
            ExtractionMode::Fast => self.fast(path),
            ExtractionMode::Ocr => self.ocr(path),
            ExtractionMode::Auto => self.auto(path),
        }
    }

    fn auto(&self, path: &Path) -> Result<ExtractedText, ExtractorError> {
        let fast = self.fast(path);
        let needs_ocr = match &fast {
            Ok(extracted) => {
                let chars = extracted.text.trim().chars().count();
                if chars < self.fallback_threshold {
                    info!(
                        "Native text of {} is {} chars (threshold {}), falling back to OCR",
                        path.display(),
                        chars,
                        self.fallback_threshold
                    );
                }
                chars < self.fallback_threshold
            }
            Err(e) => {
                warn!("Native extraction of {} failed: {}; falling back to OCR", path.display(), e);
                true
            }
        };
        if !needs_ocr {
            return fast;
        }

        match (self.ocr(path), fast) {
            (Ok(ocr), _) => Ok(ocr),
            (Err(e), Ok(fast)) => {
                warn!("OCR of {} failed: {}; keeping native text", path.display(), e);
                Ok(fast)
            }
            (Err(e), Err(_)) => Err(e),
        }
    }

    fn fast(&self, path: &Path) -> Result<ExtractedText, ExtractorError> {
        collect_pages(path, TextMode::Fast, self.text_layer.extract_pages(path))
    }

    fn ocr(&self, path: &Path) -> Result<ExtractedText, ExtractorError> {
        collect_pages(path, TextMode::Ocr, self.ocr.recognize_pages(path))
    }
}

fn collect_pages<E: Display>(
    path: &Path,
    mode: TextMode,
    pages: PageResults<E>,
) -> Result<ExtractedText, ExtractorError> {
    let pages = pages.map_err(|e| {
        ExtractorError::Extraction(format!("{} ({} mode): {}", path.display(), mode, e))
    })?;

    let total = pages.len();
    let mut texts = Vec::with_capacity(total);
    let mut skipped = 0;

    for (idx, page) in pages.into_iter().enumerate() {
        match page {
            Ok(text) => texts.push(text),
            Err(e) => {
                warn!("Skipping page {} of {} ({} mode): {}", idx + 1, path.display(), mode, e);
                skipped += 1;
            }
        }
    }

    if texts.is_empty() {
        return Err(ExtractorError::Extraction(format!(
            "{} ({} mode): no page could be read ({} pages)",
            path.display(),
            mode,
            total
        )));
    }

    let text = texts.join("\n");
    if text.trim().is_empty() {
        return Err(ExtractorError::Extraction(format!(
            "{} ({} mode): pages contain no text ({} pages)",
            path.display(),
            mode,
            total
        )));
    }

    debug!("Read {}/{} pages of {} in {} mode", texts.len(), total, path.display(), mode);

    Ok(ExtractedText {
        text,
        mode,
        pages_read: texts.len(),
        pages_skipped: skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eobscan_pdf::MockPages;

    const LONG_PAGE: &str = "CHOICE SMITH, JOHN 01/15/24 V2781 120.00 Totals 120.00 plus padding";

    fn extractor(native: MockPages, ocr: MockPages) -> TextExtractor<MockPages, MockPages> {
        TextExtractor::new(native, ocr, 50)
    }

    #[test]
    fn test_fast_joins_pages_with_newline() {
        let ex = extractor(MockPages::new(["page one", "page two"]), MockPages::new(["ocr"]));
        let out = ex.extract(Path::new("eob.pdf"), ExtractionMode::Fast).unwrap();
        assert_eq!(out.text, "page one\npage two");
        assert_eq!(out.mode, TextMode::Fast);
        assert_eq!(out.pages_read, 2);
    }

    #[test]
    fn test_failed_pages_are_skipped() {
        let native = MockPages::new(["page one"]).with_failed_page();
        let ex = extractor(native, MockPages::new(["ocr"]));
        let out = ex.extract(Path::new("eob.pdf"), ExtractionMode::Fast).unwrap();
        assert_eq!(out.pages_read, 1);
        assert_eq!(out.pages_skipped, 1);
    }

    #[test]
    fn test_no_readable_page_is_error() {
        let native = MockPages::new(Vec::<String>::new()).with_failed_page();
        let ex = extractor(native, MockPages::new(["ocr"]));
        let result = ex.extract(Path::new("eob.pdf"), ExtractionMode::Fast);
        assert!(matches!(result, Err(ExtractorError::Extraction(_))));
    }

    #[test]
    fn test_auto_keeps_long_native_text() {
        let ocr = MockPages::new(["ocr text"]);
        let ex = extractor(MockPages::new([LONG_PAGE]), ocr.clone());
        let out = ex.extract(Path::new("eob.pdf"), ExtractionMode::Auto).unwrap();
        assert_eq!(out.mode, TextMode::Fast);
        assert_eq!(ocr.call_count(), 0);
    }

    #[test]
    fn test_auto_falls_back_on_short_text() {
        let ex = extractor(MockPages::new(["   tiny   "]), MockPages::new([LONG_PAGE]));
        let out = ex.extract(Path::new("eob.pdf"), ExtractionMode::Auto).unwrap();
        assert_eq!(out.mode, TextMode::Ocr);
        assert_eq!(out.text, LONG_PAGE);
    }

    #[test]
    fn test_auto_falls_back_on_native_failure() {
        let ex = extractor(MockPages::unreadable(), MockPages::new([LONG_PAGE]));
        let out = ex.extract(Path::new("eob.pdf"), ExtractionMode::Auto).unwrap();
        assert_eq!(out.mode, TextMode::Ocr);
    }

    #[test]
    fn test_auto_keeps_short_native_text_when_ocr_fails() {
        let ex = extractor(MockPages::new(["tiny"]), MockPages::unreadable());
        let out = ex.extract(Path::new("eob.pdf"), ExtractionMode::Auto).unwrap();
        assert_eq!(out.mode, TextMode::Fast);
        assert_eq!(out.text, "tiny");
    }

    #[test]
    fn test_blank_pages_are_error() {
        let ex = extractor(MockPages::new(["", "   "]), MockPages::new(["ocr"]));
        let result = ex.extract(Path::new("eob.pdf"), ExtractionMode::Fast);
        assert!(matches!(result, Err(ExtractorError::Extraction(_))));
    }

    #[test]
    fn test_auto_blank_native_and_failed_ocr_is_error() {
        let ex = extractor(MockPages::new(["", "   "]), MockPages::unreadable());
        let result = ex.extract(Path::new("eob.pdf"), ExtractionMode::Auto);
        assert!(matches!(result, Err(ExtractorError::Extraction(_))));
    }

    #[test]
    fn test_auto_blank_native_uses_ocr() {
        let ex = extractor(MockPages::new(["  "]), MockPages::new([LONG_PAGE]));
        let out = ex.extract(Path::new("eob.pdf"), ExtractionMode::Auto).unwrap();
        assert_eq!(out.mode, TextMode::Ocr);
    }

    #[test]
    fn test_auto_fails_when_both_fail() {
        let ex = extractor(MockPages::unreadable(), MockPages::unreadable());
        let result = ex.extract(Path::new("eob.pdf"), ExtractionMode::Auto);
        assert!(matches!(result, Err(ExtractorError::Extraction(_))));
    }

    #[test]
    fn test_ocr_mode_skips_native() {
        let native = MockPages::new([LONG_PAGE]);
        let ex = extractor(native.clone(), MockPages::new(["ocr text"]));
        let out = ex.extract(Path::new("eob.pdf"), ExtractionMode::Ocr).unwrap();
        assert_eq!(out.mode, TextMode::Ocr);
        assert_eq!(native.call_count(), 0);
    }
}
