//! Extracted billing-document model.

use serde::{Deserialize, Serialize};

use crate::reconcile::Identity;

/// Kind of billing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocKind {
    /// Factura (invoice).
    Factura,
    /// Recibo (receipt).
    Recibo,
}

impl DocKind {
    /// The literal keyword as it appears on the document.
    pub fn keyword(&self) -> &'static str {
        match self {
            DocKind::Factura => "FACTURA",
            DocKind::Recibo => "RECIBO",
        }
    }
}

/// Fiscal letter of the document. Only B and C occur for these providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Letter {
    B,
    C,
}

impl Letter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Letter::B => "B",
            Letter::C => "C",
        }
    }

    /// Parse a single captured letter, case-insensitively.
    pub fn from_capture(s: &str) -> Option<Self> {
        match s {
            "B" | "b" => Some(Letter::B),
            "C" | "c" => Some(Letter::C),
            _ => None,
        }
    }
}

/// How the document was authorized: electronically (CAE) or via a printed
/// authorization code (CAI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emission {
    /// CAE, authorized electronically. Serialized as "E".
    #[serde(rename = "E")]
    Electronic,
    /// CAI, printed authorization. Serialized as "I".
    #[serde(rename = "I")]
    Printed,
}

impl Emission {
    pub fn code(&self) -> &'static str {
        match self {
            Emission::Electronic => "E",
            Emission::Printed => "I",
        }
    }
}

/// Dependency-care flag for the beneficiary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dependency {
    /// Serialized as "S".
    #[serde(rename = "S")]
    Yes,
    /// Serialized as "N".
    #[serde(rename = "N")]
    No,
}

impl Dependency {
    pub fn code(&self) -> &'static str {
        match self {
            Dependency::Yes => "S",
            Dependency::No => "N",
        }
    }
}

/// AFIP document-type code table.
///
/// The two-digit code is only ever derived from the kind/letter pair; it is
/// never extracted independently.
pub fn doc_code(kind: DocKind, letter: Letter) -> &'static str {
    match (kind, letter) {
        (DocKind::Factura, Letter::B) => "03",
        (DocKind::Recibo, Letter::B) => "04",
        (DocKind::Factura, Letter::C) => "05",
        (DocKind::Recibo, Letter::C) => "06",
    }
}

/// All fields recovered from one billing document.
///
/// Fields that have a deterministic fallback (issue date, period, activity,
/// dependency, quantity) are always present after a successful parse; the
/// rest are `None` when no cascade rule matched, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comprobante {
    /// Issuer CUIT, 11 digits without separators.
    pub issuer_cuit: String,

    /// Document kind (FACTURA/RECIBO).
    pub kind: Option<DocKind>,

    /// Fiscal letter (B/C).
    pub letter: Option<Letter>,

    /// Two-digit document code derived from kind and letter.
    pub doc_code: Option<String>,

    /// Sales point, leading zeros stripped.
    pub sales_point: Option<String>,

    /// Document number, leading zeros stripped.
    pub doc_number: Option<String>,

    /// Issue date in dd/mm/yyyy form.
    pub issue_date: String,

    /// 14-digit CAE/CAI authorization code.
    pub cae: Option<String>,

    /// Emission kind (E/I).
    pub emission: Option<Emission>,

    /// Total amount as a plain digit string, separators stripped.
    pub amount: Option<String>,

    /// Billed period in MMYYYY form.
    pub period: String,

    /// Three-digit service-activity code.
    pub activity: String,

    /// Dependency-care flag.
    pub dependency: Dependency,

    /// Six-digit default quantity for the activity.
    pub quantity: String,
}

/// Field labels used in completeness reports, matching the diagnostic CSV
/// column names.
pub const REQUIRED_FIELDS: [&str; 5] = ["cuit_pre", "codigo_cbte", "pv", "nro", "fecha_cbte"];

impl Comprobante {
    /// Labels of required identity fields that are absent.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.issuer_cuit.is_empty() {
            missing.push(REQUIRED_FIELDS[0]);
        }
        if self.doc_code.is_none() {
            missing.push(REQUIRED_FIELDS[1]);
        }
        if self.sales_point.is_none() {
            missing.push(REQUIRED_FIELDS[2]);
        }
        if self.doc_number.is_none() {
            missing.push(REQUIRED_FIELDS[3]);
        }
        if self.issue_date.is_empty() {
            missing.push(REQUIRED_FIELDS[4]);
        }
        missing
    }

    /// Whether all required identity fields are present.
    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// The cross-page identity key, if every component was extracted.
    pub fn identity(&self) -> Option<Identity> {
        Some(Identity {
            issuer_cuit: self.issuer_cuit.clone(),
            doc_code: self.doc_code.clone()?,
            sales_point: self.sales_point.clone()?,
            doc_number: self.doc_number.clone()?,
        })
    }

    /// Overwrite the identity fields with a reconciled identity.
    pub fn apply_identity(&mut self, identity: Identity) {
        self.issuer_cuit = identity.issuer_cuit;
        self.doc_code = Some(identity.doc_code);
        self.sales_point = Some(identity.sales_point);
        self.doc_number = Some(identity.doc_number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_code_table() {
        assert_eq!(doc_code(DocKind::Factura, Letter::B), "03");
        assert_eq!(doc_code(DocKind::Recibo, Letter::B), "04");
        assert_eq!(doc_code(DocKind::Factura, Letter::C), "05");
        assert_eq!(doc_code(DocKind::Recibo, Letter::C), "06");
    }

    #[test]
    fn test_letter_from_capture() {
        assert_eq!(Letter::from_capture("b"), Some(Letter::B));
        assert_eq!(Letter::from_capture("C"), Some(Letter::C));
        assert_eq!(Letter::from_capture("A"), None);
    }

    fn sample() -> Comprobante {
        Comprobante {
            issuer_cuit: "30123456789".to_string(),
            kind: Some(DocKind::Factura),
            letter: Some(Letter::C),
            doc_code: Some("05".to_string()),
            sales_point: Some("4".to_string()),
            doc_number: Some("1234".to_string()),
            issue_date: "05/03/2025".to_string(),
            cae: Some("75123456789012".to_string()),
            emission: Some(Emission::Electronic),
            amount: Some("150075".to_string()),
            period: "022025".to_string(),
            activity: "090".to_string(),
            dependency: Dependency::No,
            quantity: "000004".to_string(),
        }
    }

    #[test]
    fn test_missing_required() {
        let complete = sample();
        assert!(complete.is_complete());

        let mut partial = sample();
        partial.doc_code = None;
        partial.doc_number = None;
        assert_eq!(partial.missing_required(), vec!["codigo_cbte", "nro"]);
        assert!(!partial.is_complete());
    }

    #[test]
    fn test_identity_requires_all_components() {
        let complete = sample();
        assert!(complete.identity().is_some());

        let mut partial = sample();
        partial.sales_point = None;
        assert!(partial.identity().is_none());
    }
}
