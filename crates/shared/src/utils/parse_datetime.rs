use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses a product expiry date from client input.
///
/// Accepts RFC 3339 (offset-aware), the bare `YYYY-MM-DD HH:MM:SS` /
/// `YYYY-MM-DDTHH:MM:SS` forms (treated as UTC) and a date-only
/// `YYYY-MM-DD`, which expires at midnight. Returns `None` when the
/// value is empty or does not parse; callers decide what a missing
/// date means.
pub fn parse_expire_date(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_expire_date("2025-06-01T10:00:00+07:00").unwrap();
        assert_eq!(dt.hour(), 3);
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn parses_bare_datetime_as_utc() {
        let dt = parse_expire_date("2025-06-01 10:00:00").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn parses_t_separated_datetime() {
        assert!(parse_expire_date("2025-06-01T10:00:00").is_some());
        assert!(parse_expire_date("2025-06-01T10:00:00.500").is_some());
    }

    #[test]
    fn parses_date_only_as_midnight() {
        let dt = parse_expire_date("2025-06-01").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn rejects_garbage_and_empty() {
        assert!(parse_expire_date("").is_none());
        assert!(parse_expire_date("   ").is_none());
        assert!(parse_expire_date("next tuesday").is_none());
        assert!(parse_expire_date("2025-13-40 99:00:00").is_none());
    }
}
