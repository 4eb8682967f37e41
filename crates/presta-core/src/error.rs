//! Error types for the presta-core library.

use thiserror::Error;

/// Main error type for the presta library.
#[derive(Error, Debug)]
pub enum PrestaError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR transcription error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Document extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Beneficiary roster error.
    #[error("padron error: {0}")]
    Padron(#[from] PadronError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to extract a page image.
    #[error("failed to extract page image: {0}")]
    ImageExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// I/O error while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to OCR transcription.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR binary could not be started.
    #[error("failed to run OCR command `{command}`: {reason}")]
    Spawn { command: String, reason: String },

    /// The OCR binary ran but exited with an error.
    #[error("OCR command exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },

    /// Failed to prepare the OCR input image.
    #[error("failed to prepare OCR input: {0}")]
    Input(String),

    /// OCR is disabled in the configuration.
    #[error("OCR is disabled in configuration")]
    Disabled,
}

/// Errors related to document field extraction.
///
/// Every variant renders to a status string suitable for per-document
/// reporting; extraction failures never abort a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No issuer CUIT could be found anywhere in the document.
    #[error("no issuer CUIT found")]
    MissingIssuer,

    /// One or more required identity fields are missing.
    #[error("incomplete extraction, missing: {}", .missing.join(", "))]
    Incomplete { missing: Vec<String> },

    /// Cross-page reconciliation found disagreeing identities.
    #[error("page identities disagree: {first} vs {second}")]
    PageMismatch { first: String, second: String },

    /// Neither page yielded any identifying data.
    #[error("no identifying data on any page")]
    NoIdentity,

    /// The input is neither a PDF nor a supported image.
    #[error("unsupported content: {0}")]
    Unsupported(String),
}

/// Errors related to loading the beneficiary roster spreadsheet.
#[derive(Error, Debug)]
pub enum PadronError {
    /// The workbook could not be opened or read.
    #[error("failed to open spreadsheet: {0}")]
    Open(String),

    /// The workbook has no usable worksheet.
    #[error("spreadsheet has no worksheets")]
    Empty,

    /// Required columns are absent from the header row.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Result type for the presta library.
pub type Result<T> = std::result::Result<T, PrestaError>;
