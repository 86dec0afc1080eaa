//! Timestamp parsing for sheet cells.
//!
//! Form-fed sheets carry `M/D/YYYY H:MM:SS` response stamps; hand-edited
//! ones tend toward ISO. Each candidate format is tried in order and the
//! first hit wins; naive stamps are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse a cell into a UTC instant. `None` means the row should be dropped.
pub fn parse_stamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    // Date-only cells count as midnight.
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rfc3339_with_offset() {
        let got = parse_stamp("2024-01-15T10:30:00+05:30").unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2024, 1, 15, 5, 0, 0).unwrap());
    }

    #[test]
    fn forms_response_stamp() {
        let got = parse_stamp("1/15/2024 10:30:00").unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn forms_stamp_with_meridiem() {
        let got = parse_stamp("1/15/2024 1:30:00 PM").unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2024, 1, 15, 13, 30, 0).unwrap());
    }

    #[test]
    fn iso_date_time_without_zone() {
        let got = parse_stamp("2024-01-15 10:30:00").unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn bare_date_is_midnight() {
        let got = parse_stamp("2024-01-15").unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert!(parse_stamp("  2024-01-15 10:30:00  ").is_some());
    }

    #[test]
    fn garbage_and_empty_fail() {
        assert!(parse_stamp("not a date").is_none());
        assert!(parse_stamp("").is_none());
        assert!(parse_stamp("13/45/2024 99:99:99").is_none());
    }
}
