//! OCR fallback: rasterize pages with `pdftoppm`, recognize with `tesseract`
//!
//! Both tools are external binaries found on `PATH` unless configured
//! otherwise. A page that fails to render or recognize is reported on its own
//! so the remaining pages still come back.

use crate::lopdf_layer::LopdfTextLayer;
use crate::PdfError;
use eobscan_domain::traits::{OcrEngine, PageResults};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Settings for the OCR fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Path to the `pdftoppm` binary
    pub pdftoppm_path: String,

    /// Path to the `tesseract` binary
    pub tesseract_path: String,

    /// Tesseract language code
    pub language: String,

    /// Rasterization resolution in dots per inch
    pub dpi: u32,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            pdftoppm_path: "pdftoppm".to_string(),
            tesseract_path: "tesseract".to_string(),
            language: "eng".to_string(),
            dpi: 300,
        }
    }
}

/// OCR engine driving the `pdftoppm` and `tesseract` command-line tools
#[derive(Debug, Clone, Default)]
pub struct TesseractOcr {
    settings: OcrSettings,
}

impl TesseractOcr {
    /// Create an OCR engine with the given settings
    pub fn new(settings: OcrSettings) -> Self {
        Self { settings }
    }

    /// Current settings
    pub fn settings(&self) -> &OcrSettings {
        &self.settings
    }

    /// Whether the tesseract binary can be started
    pub fn is_available(&self) -> bool {
        Command::new(&self.settings.tesseract_path)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn rasterize(&self, pdf: &Path, page: u32, dir: &Path) -> Result<PathBuf, PdfError> {
        let prefix = dir.join(format!("page-{}", page));
        let output = Command::new(&self.settings.pdftoppm_path)
            .arg("-f")
            .arg(page.to_string())
            .arg("-l")
            .arg(page.to_string())
            .arg("-r")
            .arg(self.settings.dpi.to_string())
            .arg("-png")
            .arg("-singlefile")
            .arg(pdf.as_os_str())
            .arg(prefix.as_os_str())
            .output()
            .map_err(|e| {
                PdfError::Rasterize(format!(
                    "failed to run pdftoppm (path='{}'): {}",
                    self.settings.pdftoppm_path, e
                ))
            })?;

        if !output.status.success() {
            return Err(PdfError::Rasterize(format!(
                "pdftoppm exited with code {} on page {}: {}",
                output.status.code().unwrap_or(-1),
                page,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(prefix.with_extension("png"))
    }

    fn recognize(&self, image: &Path) -> Result<String, PdfError> {
        let output = Command::new(&self.settings.tesseract_path)
            .arg(image.as_os_str())
            .arg("stdout")
            .arg("-l")
            .arg(&self.settings.language)
            .output()
            .map_err(|e| {
                PdfError::Ocr(format!(
                    "failed to run tesseract (path='{}'): {}",
                    self.settings.tesseract_path, e
                ))
            })?;

        if !output.status.success() {
            return Err(PdfError::Ocr(format!(
                "tesseract exited with code {}: {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn recognize_page(&self, pdf: &Path, page: u32, dir: &Path) -> Result<String, PdfError> {
        let image = self.rasterize(pdf, page, dir)?;
        let text = self.recognize(&image)?;
        debug!("OCR page {}: {} chars", page, text.len());
        Ok(text)
    }
}

impl OcrEngine for TesseractOcr {
    type Error = PdfError;

    fn recognize_pages(&self, path: &Path) -> PageResults<Self::Error> {
        let pages = LopdfTextLayer::page_numbers(path)?;
        let scratch = tempfile::tempdir()?;

        Ok(pages
            .into_iter()
            .map(|page| {
                self.recognize_page(path, page, scratch.path())
                    .map_err(|e| PdfError::Page {
                        page,
                        message: e.to_string(),
                    })
            })
            .collect())
    }
}
