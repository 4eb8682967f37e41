//! Total amount extraction.
//!
//! Amounts end up as plain digit strings: thousands dots and the decimal
//! comma are stripped entirely, so "$ 1.500,75" becomes "150075".

use super::patterns::{AMOUNT_SHAPED, AMOUNT_TOTAL_LABELED, AMOUNT_TOTAL_PLAIN};

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Extract the document total.
///
/// Labelled totals win; otherwise every currency-shaped number is collected
/// and the last one in the document is assumed to be the total.
pub fn extract_amount(text: &str) -> Option<String> {
    for pattern in [&*AMOUNT_TOTAL_LABELED, &*AMOUNT_TOTAL_PLAIN] {
        if let Some(caps) = pattern.captures(text) {
            let digits = digits_only(&caps[1]);
            if !digits.is_empty() {
                return Some(digits);
            }
        }
    }

    AMOUNT_SHAPED
        .find_iter(text)
        .last()
        .map(|m| digits_only(m.as_str()))
}
