//! CAE/CAI authorization-code extraction.

use crate::models::comprobante::Emission;

use super::patterns::{ANY_14_DIGITS, CAE_LABELED, CAE_NEARBY, CAE_PAGE_FOOT, CAI_LABELED};

/// Extract the 14-digit authorization code and the emission kind it
/// implies.
///
/// Any CAE-shaped match means electronic emission; only an explicit CAI
/// label means printed authorization. A bare 14-digit run anywhere is the
/// lowest-confidence fallback and is assumed electronic.
pub fn extract_cae(text: &str) -> Option<(String, Emission)> {
    if let Some(caps) = CAE_LABELED.captures(text) {
        return Some((caps[1].to_string(), Emission::Electronic));
    }
    if let Some(caps) = CAE_PAGE_FOOT.captures(text) {
        return Some((caps[1].to_string(), Emission::Electronic));
    }
    if let Some(caps) = CAE_NEARBY.captures(text) {
        return Some((caps[1].to_string(), Emission::Electronic));
    }
    if let Some(caps) = CAI_LABELED.captures(text) {
        return Some((caps[1].to_string(), Emission::Printed));
    }
    if let Some(caps) = ANY_14_DIGITS.captures(text) {
        return Some((caps[1].to_string(), Emission::Electronic));
    }
    None
}
