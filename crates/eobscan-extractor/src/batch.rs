//! Concurrent extraction of several PDFs
//!
//! Each document is still processed on a single thread; only different
//! documents run side by side, on tokio's blocking pool.

use crate::error::ExtractorError;
use crate::extractor::EobExtractor;
use crate::types::{EngineOutput, ExtractionMode};
use eobscan_domain::traits::{OcrEngine, TextLayer};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Result for one document of a batch
#[derive(Debug)]
pub struct BatchItem {
    /// Document path
    pub path: PathBuf,

    /// Extraction result for the document
    pub result: Result<EngineOutput, ExtractorError>,
}

/// Extract every PDF in `paths` concurrently
///
/// Results come back in the order of `paths`, whatever order the documents
/// finish in.
pub async fn extract_batch<T, O>(
    extractor: Arc<EobExtractor<T, O>>,
    paths: Vec<PathBuf>,
    mode: ExtractionMode,
) -> Vec<BatchItem>
where
    T: TextLayer + Send + Sync + 'static,
    O: OcrEngine + Send + Sync + 'static,
    T::Error: Display,
    O::Error: Display,
{
    info!("Starting batch of {} documents", paths.len());

    let handles: Vec<_> = paths
        .into_iter()
        .map(|path| {
            let extractor = Arc::clone(&extractor);
            let task_path = path.clone();
            let handle =
                tokio::task::spawn_blocking(move || extractor.extract_file(&task_path, mode));
            (path, handle)
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (path, handle) in handles {
        let result = handle
            .await
            .map_err(|e| ExtractorError::Internal(format!("Task join error: {}", e)))
            .and_then(|r| r);
        results.push(BatchItem { path, result });
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;
    use eobscan_pdf::MockPages;

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let pages = MockPages::new(["CHOICE\nSMITH, JOHN\n01/15/24\nV2781 10.00\nTotals 10.00\n"]);
        let extractor = Arc::new(
            EobExtractor::new(pages.clone(), MockPages::unreadable(), ExtractorConfig::default()).unwrap(),
        );
        let paths: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("eob-{}.pdf", i))).collect();

        let results = extract_batch(extractor, paths.clone(), ExtractionMode::Fast).await;

        assert_eq!(results.len(), 5);
        for (item, expected) in results.iter().zip(&paths) {
            assert_eq!(&item.path, expected);
            let output = item.result.as_ref().unwrap();
            assert_eq!(output.report.source, expected.display().to_string());
            assert_eq!(output.report.claims.len(), 1);
        }
        assert_eq!(pages.call_count(), 5);
    }

    #[tokio::test]
    async fn test_batch_reports_failures_per_document() {
        let extractor = Arc::new(
            EobExtractor::new(MockPages::unreadable(), MockPages::unreadable(), ExtractorConfig::default())
                .unwrap(),
        );
        let results = extract_batch(extractor, vec![PathBuf::from("bad.pdf")], ExtractionMode::Auto).await;
        assert!(matches!(results[0].result, Err(ExtractorError::Extraction(_))));
    }
}
