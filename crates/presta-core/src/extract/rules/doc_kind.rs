//! Document kind (FACTURA/RECIBO) and fiscal letter (B/C) extraction.

use crate::models::comprobante::{DocKind, Letter};

use super::patterns::{
    COD_NUMBER, KIND_FACTURA, KIND_RECIBO, LETTER_AFTER_KIND, LETTER_ALONE, LETTER_BEFORE_COD,
    LETTER_BEFORE_KIND, LETTER_COMPACT,
};

/// Extract the document kind. FACTURA is checked before RECIBO.
pub fn extract_kind(text: &str) -> Option<DocKind> {
    if KIND_FACTURA.is_match(text) {
        Some(DocKind::Factura)
    } else if KIND_RECIBO.is_match(text) {
        Some(DocKind::Recibo)
    } else {
        None
    }
}

/// Three-digit AFIP header codes that pin down the letter on layouts where
/// it is printed as "COD. NNN".
fn letter_from_cod(code: &str) -> Option<Letter> {
    match code {
        "011" | "006" => Some(Letter::C),
        "008" | "009" => Some(Letter::B),
        _ => None,
    }
}

/// Extract the fiscal letter.
///
/// Runs the pattern cascade first; when that fails and the kind is known,
/// falls back to scanning for the literal `"{letter} {KIND}"` /
/// `"{KIND} {letter}"` forms, B before C.
pub fn extract_letter(text: &str, kind: Option<DocKind>) -> Option<Letter> {
    if let Some(caps) = LETTER_BEFORE_KIND.captures(text) {
        return Letter::from_capture(&caps[1]);
    }
    if let Some(caps) = LETTER_AFTER_KIND.captures(text) {
        return Letter::from_capture(&caps[1]);
    }
    if let Some(caps) = LETTER_BEFORE_COD.captures(text) {
        return Letter::from_capture(&caps[1]);
    }
    if let Some(caps) = COD_NUMBER.captures(text) {
        if let Some(letter) = letter_from_cod(&caps[1]) {
            return Some(letter);
        }
    }
    if let Some(caps) = LETTER_ALONE.captures(text) {
        return Letter::from_capture(&caps[1]);
    }
    if let Some(caps) = LETTER_COMPACT.captures(text) {
        return Letter::from_capture(&caps[1]);
    }

    // Last resort: literal adjacency with the known kind, case-sensitive as
    // printed on the document.
    if let Some(kind) = kind {
        let keyword = kind.keyword();
        for letter in [Letter::B, Letter::C] {
            let before = format!("{} {}", letter.as_str(), keyword);
            let after = format!("{} {}", keyword, letter.as_str());
            if text.contains(&before) || text.contains(&after) {
                return Some(letter);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_kind() {
        assert_eq!(extract_kind("ORIGINAL\nFACTURA\nPunto de Venta"), Some(DocKind::Factura));
        assert_eq!(extract_kind("RECIBO C Nro 4-123"), Some(DocKind::Recibo));
        assert_eq!(extract_kind("factura electrónica"), Some(DocKind::Factura));
        assert_eq!(extract_kind("presupuesto"), None);
    }

    #[test]
    fn test_letter_adjacent_to_kind() {
        assert_eq!(extract_letter("C FACTURA ORIGINAL", None), Some(Letter::C));
        assert_eq!(extract_letter("FACTURA B Nro", None), Some(Letter::B));
    }

    #[test]
    fn test_letter_before_cod() {
        assert_eq!(extract_letter("B COD. 008", None), Some(Letter::B));
    }

    #[test]
    fn test_letter_from_cod_number() {
        assert_eq!(extract_letter("ORIGINAL COD. 011", None), Some(Letter::C));
        assert_eq!(extract_letter("COD 006", None), Some(Letter::C));
        assert_eq!(extract_letter("COD. 008", None), Some(Letter::B));
        assert_eq!(extract_letter("COD. 099", None), None);
    }

    #[test]
    fn test_letter_alone_on_line() {
        assert_eq!(
            extract_letter("ORIGINAL\n C \nPunto de Venta: 4", None),
            Some(Letter::C)
        );
    }

    #[test]
    fn test_letter_compact() {
        assert_eq!(extract_letter("comprobante C011 emitido", None), Some(Letter::C));
        assert_eq!(extract_letter("comprobante B006 emitido", None), Some(Letter::B));
    }

    #[test]
    fn test_fallback_needs_known_kind() {
        // No cascade rule fires here ("RECIBO C" is not covered by the
        // FACTURA-shaped patterns), so the literal fallback decides.
        let text = "RECIBO C emitido por el prestador";
        assert_eq!(extract_letter(text, None), None);
        assert_eq!(extract_letter(text, Some(DocKind::Recibo)), Some(Letter::C));
    }

    #[test]
    fn test_fallback_prefers_b() {
        let text = "RECIBO B y RECIBO C en el mismo texto";
        assert_eq!(extract_letter(text, Some(DocKind::Recibo)), Some(Letter::B));
    }
}
