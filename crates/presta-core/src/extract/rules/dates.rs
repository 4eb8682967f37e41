//! Issue date and billed period extraction.

use chrono::NaiveDate;

use super::patterns::{
    DATE_DASH, DATE_SLASH, ISSUE_DATE_LABELED, PERIOD_FROM, PERIOD_MONTH_NAME,
};

/// Extract the issue date in dd/mm/yyyy form.
///
/// On these layouts the labelled date is authoritative; without a label,
/// the fourth bare date is empirically the issuance date (the first three
/// are activity start, tax enrollment, and period boundaries). Falls back
/// to `today` when the document carries no usable date at all.
pub fn extract_issue_date(text: &str, today: NaiveDate) -> String {
    if let Some(caps) = ISSUE_DATE_LABELED.captures(text) {
        return caps[1].to_string();
    }

    let slash_dates: Vec<&str> = DATE_SLASH.find_iter(text).map(|m| m.as_str()).collect();
    if slash_dates.len() >= 4 {
        return slash_dates[3].to_string();
    }
    if let Some(first) = slash_dates.first() {
        return first.to_string();
    }

    if let Some(m) = DATE_DASH.find(text) {
        return m.as_str().replace('-', "/");
    }

    today.format("%d/%m/%Y").to_string()
}

/// Extract the billed period in MMYYYY form, defaulting to the current
/// month.
pub fn extract_period(text: &str, today: NaiveDate) -> String {
    if let Some(caps) = PERIOD_FROM.captures(text) {
        return format!("{}{}", &caps[1], &caps[2]);
    }

    if let Some(caps) = PERIOD_MONTH_NAME.captures(text) {
        if let Some(month) = month_number(&caps[1]) {
            return format!("{}{}", month, &caps[2]);
        }
    }

    today.format("%m%Y").to_string()
}

fn month_number(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "enero" => Some("01"),
        "febrero" => Some("02"),
        "marzo" => Some("03"),
        "abril" => Some("04"),
        "mayo" => Some("05"),
        "junio" => Some("06"),
        "julio" => Some("07"),
        "agosto" => Some("08"),
        "septiembre" => Some("09"),
        "octubre" => Some("10"),
        "noviembre" => Some("11"),
        "diciembre" => Some("12"),
        _ => None,
    }
}
