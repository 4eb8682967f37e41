//! Beneficiary roster loaded from the operator-maintained spreadsheet.
//!
//! The workbook layout is whatever the obra social ships: the loader only
//! requires that the header row, after normalization, carries the four
//! mandatory columns. Everything else is ignored.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, DataType, Reader};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PadronError;

/// Columns the roster must provide, post-normalization.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "cuil",
    "codigo_certificado",
    "vencimiento_certificado",
    "provincia",
];

/// One beneficiary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Afiliado {
    /// Beneficiary CUIL, as recorded in the roster.
    pub cuil: String,
    /// Disability certificate code.
    pub certificate_code: String,
    /// Certificate expiry date.
    pub certificate_expiry: String,
    /// Two-digit province code.
    pub province_code: String,
}

/// The loaded beneficiary roster.
#[derive(Debug, Clone, Default)]
pub struct Padron {
    rows: Vec<Afiliado>,
}

impl Padron {
    /// Load the roster from the first worksheet of a spreadsheet file.
    pub fn load(path: &Path) -> Result<Self, PadronError> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| PadronError::Open(e.to_string()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(PadronError::Empty)?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| PadronError::Open(e.to_string()))?;

        let mut rows = range.rows().map(|row| {
            row.iter()
                .map(|cell| cell.as_string().unwrap_or_default().trim().to_string())
                .collect::<Vec<String>>()
        });

        let header = rows.next().ok_or(PadronError::Empty)?;
        let padron = Self::from_rows(&header, rows)?;
        debug!(rows = padron.len(), sheet = %sheet_name, "loaded beneficiary roster");
        Ok(padron)
    }

    /// Build the roster from a normalized header and data rows. Split out
    /// from [`Padron::load`] so the column mapping is testable without a
    /// workbook on disk.
    pub fn from_rows<I>(header: &[String], data: I) -> Result<Self, PadronError>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let columns: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (normalize_header(name), i))
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !columns.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PadronError::MissingColumns(missing));
        }

        let cell = |row: &[String], name: &str| -> String {
            columns
                .get(name)
                .and_then(|i| row.get(*i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let rows = data
            .into_iter()
            .map(|row| Afiliado {
                cuil: cell(&row, "cuil"),
                certificate_code: cell(&row, "codigo_certificado"),
                certificate_expiry: cell(&row, "vencimiento_certificado"),
                province_code: cell(&row, "provincia"),
            })
            .filter(|a| !a.cuil.is_empty())
            .collect();

        Ok(Self { rows })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Afiliado> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Normalize a header cell: trim, lowercase, spaces to underscores.
fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}
