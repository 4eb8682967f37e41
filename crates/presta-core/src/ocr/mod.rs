//! OCR transcription via an external Tesseract binary.
//!
//! The engine never links an OCR library; it shells out to whatever binary
//! the configuration names. Everything above this module works with plain
//! strings and is indifferent to how they were produced.

use std::path::Path;
use std::process::Command;

use image::DynamicImage;
use tracing::debug;

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// Something that can turn a page image into text.
pub trait Transcriber {
    /// Transcribe an in-memory image.
    fn transcribe(&self, image: &DynamicImage) -> Result<String>;

    /// Transcribe an image file on disk.
    fn transcribe_path(&self, path: &Path) -> Result<String>;
}

/// Transcriber backed by the Tesseract CLI.
///
/// Invocation shape: `tesseract <input> stdout -l <lang>`.
pub struct TesseractCli {
    command: String,
    language: String,
}

impl TesseractCli {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            language: config.language.clone(),
        }
    }

    /// Whether the configured binary can be executed at all.
    pub fn available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }
}

impl Transcriber for TesseractCli {
    fn transcribe(&self, image: &DynamicImage) -> Result<String> {
        let file = tempfile::Builder::new()
            .prefix("presta-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Input(e.to_string()))?;

        image
            .save(file.path())
            .map_err(|e| OcrError::Input(e.to_string()))?;

        self.transcribe_path(file.path())
    }

    fn transcribe_path(&self, path: &Path) -> Result<String> {
        debug!(command = %self.command, input = %path.display(), "running OCR");

        let output = Command::new(&self.command)
            .arg(path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output()
            .map_err(|e| OcrError::Spawn {
                command: self.command.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_unavailable() {
        let ocr = TesseractCli::new(&OcrConfig {
            enabled: true,
            command: "presta-no-such-binary".to_string(),
            language: "spa".to_string(),
        });
        assert!(!ocr.available());
    }

    #[test]
    fn test_missing_binary_spawn_error() {
        let ocr = TesseractCli::new(&OcrConfig {
            enabled: true,
            command: "presta-no-such-binary".to_string(),
            language: "spa".to_string(),
        });
        let result = ocr.transcribe_path(Path::new("input.png"));
        assert!(matches!(result, Err(OcrError::Spawn { .. })));
    }
}
