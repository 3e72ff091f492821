//! Timestamp utilities: storage format, user input parsing, precision helpers.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, SubsecRound, TimeDelta, Utc};

/// Current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Smallest storable timestamp that is `>= dt`.
pub fn ceil_to_millis(dt: DateTime<Utc>) -> DateTime<Utc> {
    let truncated = dt.trunc_subsecs(3);
    if truncated == dt {
        dt
    } else {
        truncated + TimeDelta::milliseconds(1)
    }
}

/// Fixed-width RFC 3339 string, e.g. `2025-10-13T08:30:00.000Z`.
/// Text order of these strings equals chronological order, which is what
/// `created_at` range queries rely on. Matches the SQLite
/// `strftime('%f')` column default.
pub fn to_db_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// RFC 3339 string keeping every fractional digit of `dt`.
/// Used for caller-supplied instants (`due_at`, `completed_at`) that are
/// never range-compared as text.
pub fn to_db_instant(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn from_db_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Short human form used by the CLI (minutes precision).
pub fn format_minutes(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M%:z").to_string()
}

/// Parse a timestamp given on the command line.
///
/// Accepted forms:
/// - RFC 3339 (`2025-10-13T09:00:00+02:00`)
/// - `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM`, read as UTC
/// - `YYYY-MM-DD`, midnight UTC
pub fn parse_user_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN).and_utc());
    }

    Err(AppError::InvalidDate(s.to_string()))
}

pub fn parse_optional_timestamp(input: Option<&String>) -> AppResult<Option<DateTime<Utc>>> {
    input.map(|s| parse_user_timestamp(s)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn db_timestamp_is_fixed_width() {
        let a = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let b = a + TimeDelta::milliseconds(120);
        assert_eq!(to_db_timestamp(&a), "2025-01-02T03:04:05.000Z");
        assert_eq!(to_db_timestamp(&b), "2025-01-02T03:04:05.120Z");
        assert!(to_db_timestamp(&a) < to_db_timestamp(&b));
        assert_eq!(from_db_timestamp(&to_db_timestamp(&b)), Some(b));
    }

    #[test]
    fn ceil_rounds_up_only_when_needed() {
        let base = Utc.with_ymd_and_hms(2025, 5, 5, 10, 0, 0).unwrap();
        assert_eq!(ceil_to_millis(base), base);
        let odd = base + TimeDelta::microseconds(1500);
        assert_eq!(ceil_to_millis(odd), base + TimeDelta::milliseconds(2));
    }

    #[test]
    fn instants_keep_full_precision() {
        let dt = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap() + TimeDelta::nanoseconds(123_456_789);
        assert_eq!(to_db_instant(&dt), "2030-01-02T03:04:05.123456789Z");
        assert_eq!(from_db_timestamp(&to_db_instant(&dt)), Some(dt));

        let whole = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(to_db_instant(&whole), "2030-01-02T03:04:05Z");
    }

    #[test]
    fn parses_user_forms() {
        let expected = Utc.with_ymd_and_hms(2025, 10, 13, 7, 0, 0).unwrap();
        assert_eq!(
            parse_user_timestamp("2025-10-13T09:00:00+02:00").unwrap(),
            expected
        );
        assert_eq!(parse_user_timestamp("2025-10-13 07:00").unwrap(), expected);
        assert_eq!(
            parse_user_timestamp("2025-10-13").unwrap(),
            Utc.with_ymd_and_hms(2025, 10, 13, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_user_timestamp("next tuesday").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn minutes_format_keeps_offset() {
        let dt = Utc.with_ymd_and_hms(2025, 10, 13, 7, 5, 59).unwrap();
        assert_eq!(format_minutes(&dt), "2025-10-13T07:05+00:00");
    }
}
