//! Canonicalization of captured field values.
//!
//! Captured digit strings are reduced to their integer form at extraction
//! time; fixed-width zero-padding happens only at record-build time, so the
//! two transforms compose: `pad(strip(s), w) == pad(s, w)` whenever `s`
//! fits in `w`.

/// Strip leading zeros from a digit string, keeping a lone "0" for all-zero
/// input. Non-digit input is returned unchanged.
pub fn strip_leading_zeros(s: &str) -> String {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return s.to_string();
    }
    let stripped = s.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Left-pad with zeros to `width`. Longer input is returned unchanged.
pub fn pad_left(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        let mut padded = "0".repeat(width - len);
        padded.push_str(s);
        padded
    }
}

/// Certificate codes occupy an exact width: longer values are truncated,
/// shorter ones right-padded with zeros.
pub fn fit_certificate(s: &str, width: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > width {
        chars[..width].iter().collect()
    } else {
        let mut fitted = s.to_string();
        fitted.extend(std::iter::repeat('0').take(width - chars.len()));
        fitted
    }
}

/// Strip separators from a CUIT/CUIL, yielding the bare 11-digit form.
pub fn normalize_cuit(s: &str) -> String {
    s.replace('-', "")
}
