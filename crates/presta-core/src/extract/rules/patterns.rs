//! Common regex patterns for Argentine billing documents.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CUIT patterns, labelled forms first
    pub static ref CUIT_LABELED_DASHED: Regex = Regex::new(
        r"(?i)\bCUIT:?\s*(\d{2}-\d{8}-\d)\b"
    ).unwrap();

    pub static ref CUIT_LABELED_PLAIN: Regex = Regex::new(
        r"(?i)\bCUIT:?\s*(\d{11})\b"
    ).unwrap();

    pub static ref CUIT_DASHED: Regex = Regex::new(
        r"\b(\d{2}-\d{8}-\d)\b"
    ).unwrap();

    pub static ref CUIT_PLAIN: Regex = Regex::new(
        r"\b(\d{11})\b"
    ).unwrap();

    // Document kind
    pub static ref KIND_FACTURA: Regex = Regex::new(
        r"(?i)\bFACTURA\b"
    ).unwrap();

    pub static ref KIND_RECIBO: Regex = Regex::new(
        r"(?i)\bRECIBO\b"
    ).unwrap();

    // Fiscal letter
    pub static ref LETTER_BEFORE_KIND: Regex = Regex::new(
        r"(?i)\b([BC])\s+FACTURA\b"
    ).unwrap();

    pub static ref LETTER_AFTER_KIND: Regex = Regex::new(
        r"(?i)\bFACTURA\s+([BC])\b"
    ).unwrap();

    pub static ref LETTER_BEFORE_COD: Regex = Regex::new(
        r"(?i)\b([BC])\s+COD\b"
    ).unwrap();

    pub static ref COD_NUMBER: Regex = Regex::new(
        r"(?i)\bCOD\.?\s*(\d+)"
    ).unwrap();

    pub static ref LETTER_ALONE: Regex = Regex::new(
        r"(?im)^[ \t]*([BC])[ \t]*$"
    ).unwrap();

    pub static ref LETTER_COMPACT: Regex = Regex::new(
        r"(?i)\b([BC])\d{2,4}\b"
    ).unwrap();

    // Sales point / document number, labelled forms first
    pub static ref PV_NRO_LABELED: Regex = Regex::new(
        r"(?i)Punto\s*de\s*Venta:?\s*0*(\d+)\s+Comp\.?\s*Nro:?\s*0*(\d+)"
    ).unwrap();

    pub static ref PV_NRO_LABELED_SPAN: Regex = Regex::new(
        r"(?is)Punto\s*de\s*Venta:?\s*0*(\d+).*?Comp\.?\s*Nro:?\s*0*(\d+)"
    ).unwrap();

    pub static ref PV_NRO_BARE: Regex = Regex::new(
        r"\b0*(\d+)\s*[-–]\s*0*(\d{1,9})\b"
    ).unwrap();

    pub static ref PV_NRO_NRO: Regex = Regex::new(
        r"(?i)Nro\s+0*(\d+)\s*-\s*0*(\d+)"
    ).unwrap();

    pub static ref PV_NRO_COMPACT_SPACED: Regex = Regex::new(
        r"(?i)(FAC-)?([BC])\s*-\s*0*(\d+)\s*-\s*0*(\d+)"
    ).unwrap();

    pub static ref PV_NRO_COMPACT: Regex = Regex::new(
        r"(?i)(FAC-)?([BC])-0*(\d+)-0*(\d+)"
    ).unwrap();

    // Dates
    pub static ref ISSUE_DATE_LABELED: Regex = Regex::new(
        r"(?i)Fecha\s+de\s+Emisi[oó]n:?\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref DATE_SLASH: Regex = Regex::new(
        r"\d{2}/\d{2}/\d{4}"
    ).unwrap();

    pub static ref DATE_DASH: Regex = Regex::new(
        r"\d{2}-\d{2}-\d{4}"
    ).unwrap();

    // CAE / CAI authorization codes
    pub static ref CAE_LABELED: Regex = Regex::new(
        r"(?i)CAE\s*N[°º]?:?\s*(\d{14})"
    ).unwrap();

    pub static ref CAE_PAGE_FOOT: Regex = Regex::new(
        r"P[aá]g\.\s*1/1\s+(\d{14})"
    ).unwrap();

    pub static ref CAE_NEARBY: Regex = Regex::new(
        r"(?is)\bCAE\b.*?(\d{14})"
    ).unwrap();

    pub static ref CAI_LABELED: Regex = Regex::new(
        r"(?i)CAI\s*N[°º]?:?\s*(\d{14})"
    ).unwrap();

    pub static ref ANY_14_DIGITS: Regex = Regex::new(
        r"\b(\d{14})\b"
    ).unwrap();

    // Total amount. The labelled forms are case-insensitive, so the four
    // historical label spellings collapse to these two patterns.
    pub static ref AMOUNT_TOTAL_LABELED: Regex = Regex::new(
        r"(?i)IMPORTE\s+TOTAL:?\s*\$?\s*([\d.,]+)"
    ).unwrap();

    pub static ref AMOUNT_TOTAL_PLAIN: Regex = Regex::new(
        r"(?i)\bTOTAL:?\s*\$?\s*([\d.,]+)"
    ).unwrap();

    pub static ref AMOUNT_SHAPED: Regex = Regex::new(
        r"\d{3,6}(?:\.\d{3})*,\d{2}"
    ).unwrap();

    // Billed period
    pub static ref PERIOD_FROM: Regex = Regex::new(
        r"(?i)Per[ií]odo\s*Facturado\s*Desde:?\s*\d{2}/(\d{2})/(\d{4})"
    ).unwrap();

    pub static ref PERIOD_MONTH_NAME: Regex = Regex::new(
        r"(?i)mes\s+de\s+(\p{L}+)\s+de\s+(\d{4})"
    ).unwrap();

    // Activity keywords
    pub static ref KM_WORD: Regex = Regex::new(
        r"\bkm\b"
    ).unwrap();
}
