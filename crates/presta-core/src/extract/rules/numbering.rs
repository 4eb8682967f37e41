//! Sales point / document number extraction.

use regex::Captures;

use crate::normalize::strip_leading_zeros;

use super::patterns::{
    PV_NRO_BARE, PV_NRO_COMPACT, PV_NRO_COMPACT_SPACED, PV_NRO_LABELED, PV_NRO_LABELED_SPAN,
    PV_NRO_NRO,
};
use super::{first_match, Rule};

fn read_groups_1_2(caps: &Captures) -> Option<(String, String)> {
    Some((
        strip_leading_zeros(caps.get(1)?.as_str()),
        strip_leading_zeros(caps.get(2)?.as_str()),
    ))
}

// The compact "(FAC-)?B-0004-00003575" shapes carry the letter in group 2.
fn read_groups_3_4(caps: &Captures) -> Option<(String, String)> {
    Some((
        strip_leading_zeros(caps.get(3)?.as_str()),
        strip_leading_zeros(caps.get(4)?.as_str()),
    ))
}

/// Extract the sales point and document number as a pair, leading zeros
/// already stripped. Rule order is significant.
pub fn extract_pv_nro(text: &str) -> Option<(String, String)> {
    let rules: [Rule<(String, String)>; 6] = [
        Rule {
            pattern: &PV_NRO_LABELED,
            read: read_groups_1_2,
        },
        Rule {
            pattern: &PV_NRO_LABELED_SPAN,
            read: read_groups_1_2,
        },
        Rule {
            pattern: &PV_NRO_BARE,
            read: read_groups_1_2,
        },
        Rule {
            pattern: &PV_NRO_NRO,
            read: read_groups_1_2,
        },
        Rule {
            pattern: &PV_NRO_COMPACT_SPACED,
            read: read_groups_3_4,
        },
        Rule {
            pattern: &PV_NRO_COMPACT,
            read: read_groups_3_4,
        },
    ];

    first_match(&rules, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_labeled_tight() {
        let text = "Punto de Venta: 00002    Comp. Nro: 00000924";
        assert_eq!(
            extract_pv_nro(text),
            Some(("2".to_string(), "924".to_string()))
        );
    }

    #[test]
    fn test_labeled_spanning_lines() {
        let text = "Punto de Venta: 00004\nFecha de Emisión: 05/03/2025\nComp. Nro: 00003575";
        assert_eq!(
            extract_pv_nro(text),
            Some(("4".to_string(), "3575".to_string()))
        );
    }

    #[test]
    fn test_bare_pair() {
        let text = "Comprobante 00004-00003575 ORIGINAL";
        assert_eq!(
            extract_pv_nro(text),
            Some(("4".to_string(), "3575".to_string()))
        );
    }

    #[test]
    fn test_nro_prefixed_pair() {
        let text = "FACTURA Nro 00004 - 00003575";
        assert_eq!(
            extract_pv_nro(text),
            Some(("4".to_string(), "3575".to_string()))
        );
    }

    #[test]
    fn test_compact_with_letter() {
        assert_eq!(
            extract_pv_nro("FAC-B-0003-00002475"),
            Some(("3".to_string(), "2475".to_string()))
        );
        assert_eq!(
            extract_pv_nro("C-00004-00011824"),
            Some(("4".to_string(), "11824".to_string()))
        );
    }

    #[test]
    fn test_compact_with_spaces() {
        assert_eq!(
            extract_pv_nro("B - 0003 - 00002475"),
            Some(("3".to_string(), "2475".to_string()))
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_pv_nro("sin numeración"), None);
    }
}
