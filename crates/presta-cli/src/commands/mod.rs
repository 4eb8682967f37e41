//! Subcommand implementations.

pub mod config;
pub mod generate;
pub mod process;
pub mod rename;
pub mod report;

use std::path::Path;

use presta_core::error::{ExtractionError, OcrError, PrestaError};
use presta_core::models::config::PrestaConfig;
use presta_core::ocr::{TesseractCli, Transcriber};
use presta_core::pdf::{DocumentText, PdfDocument};
use tracing::{debug, warn};

/// Load the pipeline configuration, or defaults when no file is given.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PrestaConfig> {
    match config_path {
        Some(path) => Ok(PrestaConfig::from_file(Path::new(path))?),
        None => Ok(PrestaConfig::default()),
    }
}

/// Build the OCR transcriber when enabled and actually runnable.
pub fn build_ocr(config: &PrestaConfig) -> Option<TesseractCli> {
    if !config.ocr.enabled {
        return None;
    }
    let ocr = TesseractCli::new(&config.ocr);
    if ocr.available() {
        Some(ocr)
    } else {
        warn!(
            command = %config.ocr.command,
            "OCR binary not available, scanned pages will rely on the text layer"
        );
        None
    }
}

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// Acquire page text from a PDF or a standalone image file.
///
/// Anything else is an unsupported-content extraction failure, recoverable
/// at the per-document level.
pub fn acquire_input(
    path: &Path,
    config: &PrestaConfig,
    ocr: Option<&TesseractCli>,
) -> Result<DocumentText, PrestaError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let document = PdfDocument::open(path)?;
            debug!(
                pages = document.page_count(),
                pdf_type = ?document.analyze(config.pdf.min_page_text),
                "input analyzed"
            );
            Ok(document.acquire(ocr.map(|o| o as &dyn Transcriber), &config.pdf))
        }
        ext if IMAGE_EXTENSIONS.contains(&ext) => {
            // Standalone images have no text layer; OCR is the only source.
            let ocr = ocr.ok_or(OcrError::Disabled)?;
            let text = ocr.transcribe_path(path)?;
            Ok(DocumentText::from_ocr(text))
        }
        other => Err(ExtractionError::Unsupported(format!(
            "{} ({})",
            path.display(),
            if other.is_empty() { "no extension" } else { other }
        ))
        .into()),
    }
}

/// List the processable files in a directory, sorted by name.
pub fn list_documents(dir: &Path) -> anyhow::Result<Vec<std::path::PathBuf>> {
    let mut files: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            ext == "pdf" || IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .collect();
    files.sort();
    Ok(files)
}
