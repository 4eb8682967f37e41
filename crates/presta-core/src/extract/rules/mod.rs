//! Rule-based field extractors for Argentine billing documents.
//!
//! Each field runs an ordered cascade of patterns; the first rule that
//! yields a value wins. Cascades with a uniform output type are expressed
//! as [`Rule`] tables consumed by [`first_match`], so rule edits touch one
//! table rather than scattered conditionals.

pub mod amounts;
pub mod cae;
pub mod cuit;
pub mod dates;
pub mod doc_kind;
pub mod numbering;
pub mod patterns;

pub use amounts::extract_amount;
pub use cae::extract_cae;
pub use cuit::{extract_all_cuits, extract_issuer_cuit};
pub use dates::{extract_issue_date, extract_period};
pub use doc_kind::{extract_kind, extract_letter};
pub use numbering::extract_pv_nro;

use regex::{Captures, Regex};

/// One prioritized pattern plus a reader that turns its captures into a
/// value. A reader returning `None` lets the cascade fall through.
pub struct Rule<T> {
    pub pattern: &'static Regex,
    pub read: fn(&Captures) -> Option<T>,
}

/// Run an ordered cascade and return the first rule that yields a value.
pub fn first_match<T>(rules: &[Rule<T>], text: &str) -> Option<T> {
    rules.iter().find_map(|rule| {
        rule.pattern
            .captures(text)
            .and_then(|caps| (rule.read)(&caps))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref WORD: Regex = Regex::new(r"\b([a-z]+)\b").unwrap();
        static ref DIGITS: Regex = Regex::new(r"(\d+)").unwrap();
    }

    #[test]
    fn test_first_match_respects_order() {
        let rules: [Rule<String>; 2] = [
            Rule {
                pattern: &DIGITS,
                read: |caps| Some(caps[1].to_string()),
            },
            Rule {
                pattern: &WORD,
                read: |caps| Some(caps[1].to_string()),
            },
        ];
        assert_eq!(first_match(&rules, "abc 42"), Some("42".to_string()));
        assert_eq!(first_match(&rules, "abc"), Some("abc".to_string()));
        assert_eq!(first_match(&rules, "---"), None);
    }

    #[test]
    fn test_reader_none_falls_through() {
        let rules: [Rule<String>; 2] = [
            Rule {
                pattern: &DIGITS,
                read: |_| None,
            },
            Rule {
                pattern: &WORD,
                read: |caps| Some(caps[1].to_string()),
            },
        ];
        assert_eq!(first_match(&rules, "abc 42"), Some("abc".to_string()));
    }
}
