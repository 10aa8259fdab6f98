//! Duration Calculator
//!
//! Derives a duration from a same-day "HH:MM" time pair. Cross-midnight
//! ranges are out of scope: an end before the start is invalid, not wrapped.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("Invalid time format '{0}', expected HH:MM")]
    InvalidFormat(String),

    #[error("End time {end} precedes start time {start}")]
    EndBeforeStart { start: String, end: String },
}

/// Duration as (hours, minutes)
pub type Duration = (u32, u32);

/// Compute the duration of an optional start/end pair
///
/// - either side absent: no range given, valid with duration (0,0)
/// - `end < start`: invalid (same-day only)
/// - `end == start`: valid with duration (0,0), permitted for informational
///   occurrence types
/// - `end > start`: exact difference, no rounding
pub fn calculate(start: Option<&str>, end: Option<&str>) -> Result<Duration, DurationError> {
    let (start, end) = match (normalize(start), normalize(end)) {
        (Some(s), Some(e)) => (s, e),
        _ => return Ok((0, 0)),
    };

    let start_mins = minutes_since_midnight(start)?;
    let end_mins = minutes_since_midnight(end)?;

    if end_mins < start_mins {
        return Err(DurationError::EndBeforeStart {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let diff = end_mins - start_mins;
    Ok((diff / 60, diff % 60))
}

/// Parse "HH:MM" (24h) into minutes since midnight
pub fn minutes_since_midnight(time: &str) -> Result<u32, DurationError> {
    let invalid = || DurationError::InvalidFormat(time.to_string());

    let (h, m) = time.split_once(':').ok_or_else(invalid)?;
    let hours: u32 = h.parse().map_err(|_| invalid())?;
    let minutes: u32 = m.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

fn normalize(time: Option<&str>) -> Option<&str> {
    time.map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_range_is_zero_and_valid() {
        assert_eq!(calculate(None, None), Ok((0, 0)));
        assert_eq!(calculate(Some("09:00"), None), Ok((0, 0)));
        assert_eq!(calculate(None, Some("17:00")), Ok((0, 0)));
        assert_eq!(calculate(Some(""), Some("17:00")), Ok((0, 0)));
    }

    #[test]
    fn exact_difference() {
        assert_eq!(calculate(Some("09:00"), Some("17:30")), Ok((8, 30)));
        assert_eq!(calculate(Some("08:15"), Some("08:45")), Ok((0, 30)));
        assert_eq!(calculate(Some("00:00"), Some("23:59")), Ok((23, 59)));
    }

    #[test]
    fn equal_times_are_valid_zero() {
        assert_eq!(calculate(Some("12:00"), Some("12:00")), Ok((0, 0)));
    }

    #[test]
    fn end_before_start_is_invalid() {
        let err = calculate(Some("22:00"), Some("06:00")).unwrap_err();
        assert_eq!(
            err,
            DurationError::EndBeforeStart {
                start: "22:00".to_string(),
                end: "06:00".to_string(),
            }
        );
    }

    #[test]
    fn malformed_times_are_rejected() {
        assert!(calculate(Some("9h00"), Some("17:00")).is_err());
        assert!(calculate(Some("25:00"), Some("26:00")).is_err());
        assert!(calculate(Some("10:75"), Some("11:00")).is_err());
    }
}
