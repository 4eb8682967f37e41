//! CUIT (Argentine taxpayer identifier) extraction.

use crate::normalize::normalize_cuit;

use super::patterns::{CUIT_DASHED, CUIT_LABELED_DASHED, CUIT_LABELED_PLAIN, CUIT_PLAIN};

/// Collect every distinct CUIT in the text.
///
/// Labelled forms are scanned before bare ones, so the first collected CUIT
/// is the most reliably attributed; within one pattern, document order is
/// kept.
pub fn extract_all_cuits(text: &str) -> Vec<String> {
    let mut cuits = Vec::new();

    for pattern in [
        &*CUIT_LABELED_DASHED,
        &*CUIT_LABELED_PLAIN,
        &*CUIT_DASHED,
        &*CUIT_PLAIN,
    ] {
        for caps in pattern.captures_iter(text) {
            let cuit = normalize_cuit(&caps[1]);
            if cuit.len() == 11 && !cuits.contains(&cuit) {
                cuits.push(cuit);
            }
        }
    }

    cuits
}

/// The first CUIT in priority order is taken to be the issuer.
pub fn extract_issuer_cuit(text: &str) -> Option<String> {
    extract_all_cuits(text).into_iter().next()
}
