//! Time helpers
//!
//! Dates travel through the API as `YYYY-MM-DD` strings, timestamps as
//! RFC 3339 strings; conversions are done at the handler layer.

use chrono::{NaiveDate, Utc};

use super::{AppError, AppResult};

/// Current instant as an RFC 3339 string (record `created_at`)
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso() {
        assert!(parse_date("2026-02-28").is_ok());
        assert!(parse_date("28/02/2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
    }
}
