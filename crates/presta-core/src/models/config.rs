//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::reconcile::ReconcileMode;

/// Main configuration for the presta pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrestaConfig {
    /// PDF text acquisition configuration.
    pub pdf: PdfConfig,

    /// OCR transcription configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output record formatting configuration.
    pub output: OutputConfig,
}

/// PDF text acquisition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum embedded-text length per page before OCR is attempted.
    pub min_page_text: usize,

    /// Number of leading pages considered relevant (invoices fit in two).
    pub relevant_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_page_text: 200,
            relevant_pages: 2,
        }
    }
}

/// OCR transcription configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Whether OCR fallback is attempted at all.
    pub enabled: bool,

    /// Tesseract binary to invoke (name on PATH or absolute path).
    pub command: String,

    /// Tesseract language pack.
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "tesseract".to_string(),
            language: "spa".to_string(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Cross-page reconciliation mode. One mode for every tool in the run.
    pub reconcile: ReconcileMode,
}

/// Output record formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Zero-padded width of the sales point in submission records.
    pub sales_point_width: usize,

    /// Zero-padded width of the document number in submission records.
    pub doc_number_width: usize,

    /// Zero-padded width of the amount in submission records.
    pub amount_width: usize,

    /// Exact width of the certificate code (right-padded or truncated).
    pub certificate_width: usize,

    /// Use padded numeric components in renamed filenames instead of the
    /// historical leading-zero-stripped form.
    pub padded_rename: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sales_point_width: 5,
            doc_number_width: 8,
            amount_width: 14,
            certificate_width: 38,
            padded_rename: false,
        }
    }
}

impl PrestaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PrestaConfig::default();
        assert_eq!(config.pdf.min_page_text, 200);
        assert_eq!(config.pdf.relevant_pages, 2);
        assert_eq!(config.ocr.command, "tesseract");
        assert_eq!(config.extraction.reconcile, ReconcileMode::SinglePass);
        assert_eq!(config.output.sales_point_width, 5);
        assert_eq!(config.output.amount_width, 14);
        assert!(!config.output.padded_rename);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: PrestaConfig =
            serde_json::from_str(r#"{"extraction":{"reconcile":"cross-check"}}"#).unwrap();
        assert_eq!(config.extraction.reconcile, ReconcileMode::CrossCheck);
        assert_eq!(config.pdf.min_page_text, 200);
    }
}
