//! Cross-page identity reconciliation.
//!
//! The historical tooling disagreed on whether to extract once from the
//! concatenated pages or to extract per page and cross-check. Both behaviors
//! live behind [`ReconcileMode`]; a run uses exactly one mode for every
//! document it touches.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// How page texts are combined during extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcileMode {
    /// Concatenate both pages and extract once; no consistency check.
    #[default]
    SinglePass,
    /// Extract the identity key from each page independently and require
    /// agreement when both pages yield one.
    CrossCheck,
}

/// The identity key that must agree across pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Issuer CUIT, bare 11-digit form.
    pub issuer_cuit: String,
    /// Two-digit document code.
    pub doc_code: String,
    /// Sales point, leading zeros stripped.
    pub sales_point: String,
    /// Document number, leading zeros stripped.
    pub doc_number: String,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cbte {} {}-{}",
            self.issuer_cuit, self.doc_code, self.sales_point, self.doc_number
        )
    }
}

/// Combine the identities extracted from two pages.
///
/// Both present and equal: accepted. Both present and unequal: neither is
/// trusted. Exactly one present: accepted. Neither: no identifying data.
pub fn reconcile(
    first: Option<Identity>,
    second: Option<Identity>,
) -> Result<Identity, ExtractionError> {
    match (first, second) {
        (Some(a), Some(b)) if a == b => Ok(a),
        (Some(a), Some(b)) => Err(ExtractionError::PageMismatch {
            first: a.to_string(),
            second: b.to_string(),
        }),
        (Some(a), None) => Ok(a),
        (None, Some(b)) => Ok(b),
        (None, None) => Err(ExtractionError::NoIdentity),
    }
}
