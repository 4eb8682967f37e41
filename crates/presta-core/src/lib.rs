//! Core library for Argentine health-billing document processing.
//!
//! This crate provides:
//! - PDF text acquisition (embedded text layer with OCR fallback)
//! - Rule-based field extraction (CUIT, document kind/letter, numbering,
//!   dates, CAE/CAI, amounts, billed period)
//! - Activity classification and dependency flagging
//! - Cross-page identity reconciliation
//! - DS submission-record and renamed-filename assembly

pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod ocr;
pub mod padron;
pub mod pdf;
pub mod reconcile;
pub mod record;

pub use error::{ExtractionError, OcrError, PadronError, PdfError, PrestaError, Result};
pub use extract::ComprobanteParser;
pub use models::comprobante::{Comprobante, Dependency, DocKind, Emission, Letter};
pub use models::config::PrestaConfig;
pub use ocr::{TesseractCli, Transcriber};
pub use padron::{Afiliado, Padron};
pub use pdf::{DocumentText, PageText, PdfDocument, PdfType, TextOrigin};
pub use reconcile::{Identity, ReconcileMode};
