//! `YYYYMMDD` date codes carried by dated headings

use super::TocError;
use chrono::NaiveDate;

const DATE_CODE_FORMAT: &str = "%Y%m%d";
const DISPLAY_FORMAT: &str = "%Y-%m-%d";

/// Parse an 8-digit `YYYYMMDD` code into a calendar date
pub fn parse_date_code(code: &str) -> Result<NaiveDate, TocError> {
    let invalid = || TocError::InvalidDateCode {
        code: code.to_string(),
    };

    // chrono's %Y also accepts signs and longer years
    if code.len() != 8 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(code, DATE_CODE_FORMAT).map_err(|_| invalid())
}

/// `20240131` becomes `2024-01-31`
pub fn format_date_code(code: &str) -> Result<String, TocError> {
    parse_date_code(code).map(|date| date.format(DISPLAY_FORMAT).to_string())
}
