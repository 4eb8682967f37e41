//! Output record assembly: DS submission lines, renamed filenames, and
//! diagnostic report rows.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ExtractionError;
use crate::models::comprobante::{Comprobante, Emission};
use crate::models::config::OutputConfig;
use crate::normalize::{fit_certificate, pad_left, strip_leading_zeros};
use crate::padron::Afiliado;

/// Constant marker opening every submission record.
pub const RECORD_MARKER: &str = "DS";

/// Column order of the diagnostic CSV report.
pub const REPORT_HEADERS: [&str; 14] = [
    "nombre_archivo",
    "cuit_pre",
    "codigo_cbte",
    "pv",
    "nro",
    "fecha_cbte",
    "tipo_emision",
    "nro_cae",
    "importe",
    "periodo",
    "actividad",
    "cantidad",
    "dep",
    "estado",
];

lazy_static! {
    /// Shape of a filename the rename tool has already produced.
    static ref RENAMED_SHAPE: Regex =
        Regex::new(r"^\d{11}_[1-9]\d*_[1-9]\d*_[1-9]\d*\.pdf$").unwrap();
}

/// Whether a filename is already in renamed form and should be skipped.
pub fn is_renamed_filename(name: &str) -> bool {
    RENAMED_SHAPE.is_match(name)
}

/// Normalize an insurer RNOS: digits only, exactly six of them.
pub fn normalize_rnos(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let mut rnos = pad_left(&digits, 6);
    rnos.truncate(6);
    rnos
}

/// Build one pipe-delimited submission line from an extracted document and
/// its matched beneficiary row.
///
/// Fails when any required identity field is absent. The soft fields fall
/// back instead of failing: emission defaults to electronic, the
/// authorization code to empty, the amount to zero.
pub fn submission_line(
    rnos: &str,
    member: &Afiliado,
    fields: &Comprobante,
    config: &OutputConfig,
) -> Result<String, ExtractionError> {
    let missing = fields.missing_required();
    if !missing.is_empty() {
        return Err(ExtractionError::Incomplete {
            missing: missing.iter().map(|m| m.to_string()).collect(),
        });
    }

    let sales_point = pad_left(
        fields.sales_point.as_deref().unwrap_or_default(),
        config.sales_point_width,
    );
    let doc_number = pad_left(
        fields.doc_number.as_deref().unwrap_or_default(),
        config.doc_number_width,
    );
    let amount = pad_left(fields.amount.as_deref().unwrap_or("0"), config.amount_width);
    let certificate = fit_certificate(&member.certificate_code, config.certificate_width);
    let emission = fields.emission.unwrap_or(Emission::Electronic).code();
    let cae = fields.cae.as_deref().unwrap_or_default();

    let line = [
        RECORD_MARKER,
        rnos,
        member.cuil.as_str(),
        certificate.as_str(),
        member.certificate_expiry.as_str(),
        fields.period.as_str(),
        fields.issuer_cuit.as_str(),
        fields.doc_code.as_deref().unwrap_or_default(),
        emission,
        fields.issue_date.as_str(),
        cae,
        sales_point.as_str(),
        doc_number.as_str(),
        amount.as_str(),
        amount.as_str(),
        fields.activity.as_str(),
        fields.quantity.as_str(),
        member.province_code.as_str(),
        fields.dependency.code(),
    ]
    .join("|");

    Ok(line)
}

/// Build the renamed filename for an extracted document.
///
/// The historical form strips leading zeros from every numeric component,
/// including the document code; `output.padded_rename` switches to the
/// submission-record widths instead.
pub fn renamed_filename(
    fields: &Comprobante,
    config: &OutputConfig,
) -> Result<String, ExtractionError> {
    let missing: Vec<String> = fields
        .missing_required()
        .into_iter()
        .filter(|m| *m != "fecha_cbte")
        .map(|m| m.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ExtractionError::Incomplete { missing });
    }

    let code = fields.doc_code.as_deref().unwrap_or_default();
    let sales_point = fields.sales_point.as_deref().unwrap_or_default();
    let doc_number = fields.doc_number.as_deref().unwrap_or_default();

    let name = if config.padded_rename {
        format!(
            "{}_{}_{}_{}.pdf",
            fields.issuer_cuit,
            code,
            pad_left(sales_point, config.sales_point_width),
            pad_left(doc_number, config.doc_number_width),
        )
    } else {
        format!(
            "{}_{}_{}_{}.pdf",
            fields.issuer_cuit,
            strip_leading_zeros(code),
            sales_point,
            doc_number,
        )
    };

    Ok(name)
}

/// Human-readable completeness status for the diagnostic report.
pub fn completion_status(fields: &Comprobante) -> String {
    let missing = fields.missing_required();
    if missing.is_empty() {
        "OK".to_string()
    } else {
        format!("Incompleto (faltan: {})", missing.join(", "))
    }
}

/// One diagnostic report row in [`REPORT_HEADERS`] order. `fields` is
/// `None` when extraction failed outright; `status` carries the outcome
/// either way.
pub fn report_row(filename: &str, fields: Option<&Comprobante>, status: &str) -> Vec<String> {
    match fields {
        Some(f) => vec![
            filename.to_string(),
            f.issuer_cuit.clone(),
            f.doc_code.clone().unwrap_or_default(),
            f.sales_point.clone().unwrap_or_default(),
            f.doc_number.clone().unwrap_or_default(),
            f.issue_date.clone(),
            f.emission.map(|e| e.code().to_string()).unwrap_or_default(),
            f.cae.clone().unwrap_or_default(),
            f.amount.clone().unwrap_or_default(),
            f.period.clone(),
            f.activity.clone(),
            f.quantity.clone(),
            f.dependency.code().to_string(),
            status.to_string(),
        ],
        None => {
            let mut row = vec![filename.to_string()];
            row.extend(std::iter::repeat(String::new()).take(REPORT_HEADERS.len() - 2));
            row.push(status.to_string());
            row
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::comprobante::{Dependency, DocKind, Letter};
    use pretty_assertions::assert_eq;

    fn member() -> Afiliado {
        Afiliado {
            cuil: "20345678901".to_string(),
            certificate_code: "ARG02123456789".to_string(),
            certificate_expiry: "31/12/2025".to_string(),
            province_code: "02".to_string(),
        }
    }

    fn fields() -> Comprobante {
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
    fn test_submission_line_layout() {
        let line = submission_line("112209", &member(), &fields(), &OutputConfig::default()).unwrap();
        let parts: Vec<&str> = line.split('|').collect();

        assert_eq!(parts.len(), 19);
        assert_eq!(parts[0], "DS");
        assert_eq!(parts[1], "112209");
        assert_eq!(parts[2], "20345678901");
        assert_eq!(parts[3].len(), 38);
        assert!(parts[3].starts_with("ARG02123456789"));
        assert_eq!(parts[4], "31/12/2025");
        assert_eq!(parts[5], "022025");
        assert_eq!(parts[6], "30123456789");
        assert_eq!(parts[7], "05");
        assert_eq!(parts[8], "E");
        assert_eq!(parts[9], "05/03/2025");
        assert_eq!(parts[10], "75123456789012");
        assert_eq!(parts[11], "00004");
        assert_eq!(parts[12], "00001234");
        assert_eq!(parts[13], "00000000150075");
        assert_eq!(parts[14], parts[13]);
        assert_eq!(parts[15], "090");
        assert_eq!(parts[16], "000004");
        assert_eq!(parts[17], "02");
        assert_eq!(parts[18], "N");
    }

    #[test]
    fn test_submission_soft_fallbacks() {
        let mut f = fields();
        f.cae = None;
        f.emission = None;
        f.amount = None;

        let line = submission_line("112209", &member(), &f, &OutputConfig::default()).unwrap();
        let parts: Vec<&str> = line.split('|').collect();
        assert_eq!(parts[8], "E");
        assert_eq!(parts[10], "");
        assert_eq!(parts[13], "00000000000000");
    }

    #[test]
    fn test_submission_requires_identity() {
        let mut f = fields();
        f.doc_number = None;
        let result = submission_line("112209", &member(), &f, &OutputConfig::default());
        assert_eq!(
            result,
            Err(ExtractionError::Incomplete {
                missing: vec!["nro".to_string()]
            })
        );
    }

    #[test]
    fn test_renamed_filename_stripped() {
        let name = renamed_filename(&fields(), &OutputConfig::default()).unwrap();
        assert_eq!(name, "30123456789_5_4_1234.pdf");
        assert!(is_renamed_filename(&name));
    }

    #[test]
    fn test_renamed_filename_padded() {
        let config = OutputConfig {
            padded_rename: true,
            ..OutputConfig::default()
        };
        let name = renamed_filename(&fields(), &config).unwrap();
        assert_eq!(name, "30123456789_05_00004_00001234.pdf");
    }

    #[test]
    fn test_renamed_filename_ignores_missing_date() {
        let mut f = fields();
        f.issue_date = String::new();
        assert!(renamed_filename(&f, &OutputConfig::default()).is_ok());
    }

    #[test]
    fn test_is_renamed_filename() {
        assert!(is_renamed_filename("30123456789_5_4_1234.pdf"));
        assert!(!is_renamed_filename("factura marzo.pdf"));
        assert!(!is_renamed_filename("30123456789_05_00004_00001234.pdf"));
    }

    #[test]
    fn test_normalize_rnos() {
        assert_eq!(normalize_rnos("112209"), "112209");
        assert_eq!(normalize_rnos("1234"), "001234");
        assert_eq!(normalize_rnos("  11-22-09 "), "112209");
        assert_eq!(normalize_rnos("12345678"), "123456");
    }

    #[test]
    fn test_completion_status() {
        assert_eq!(completion_status(&fields()), "OK");

        let mut f = fields();
        f.sales_point = None;
        f.doc_number = None;
        assert_eq!(completion_status(&f), "Incompleto (faltan: pv, nro)");
    }

    #[test]
    fn test_report_row_widths() {
        let row = report_row("factura.pdf", Some(&fields()), "OK");
        assert_eq!(row.len(), REPORT_HEADERS.len());
        assert_eq!(row[1], "30123456789");
        assert_eq!(row[13], "OK");

        let row = report_row("roto.pdf", None, "Error: no issuer CUIT found");
        assert_eq!(row.len(), REPORT_HEADERS.len());
        assert_eq!(row[1], "");
        assert_eq!(row[13], "Error: no issuer CUIT found");
    }
}
