//! Document field extraction module.

pub mod activity;
mod parser;
pub mod rules;

pub use parser::ComprobanteParser;

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
