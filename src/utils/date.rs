use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc};

/// Half-open `[start, end)` window of UTC instants.
pub type Window = (DateTime<Utc>, DateTime<Utc>);

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// ISO week (Mon..Mon) containing `anchor`, defaulting to today (UTC).
pub fn week_bounds(anchor: Option<NaiveDate>) -> AppResult<Window> {
    week_bounds_for(anchor.unwrap_or_else(today_utc))
}

/// `start` is midnight UTC of the Monday on or before `anchor`,
/// `end` is exactly seven days later.
///
/// Fails with a validation error when that week is not representable
/// (anchors at the very ends of the calendar).
pub fn week_bounds_for(anchor: NaiveDate) -> AppResult<Window> {
    let out_of_range = || AppError::Validation(format!("week of {} is out of range", anchor));

    let back = TimeDelta::days(i64::from(anchor.weekday().num_days_from_monday()));
    let monday = anchor.checked_sub_signed(back).ok_or_else(out_of_range)?;
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    let end = start
        .checked_add_signed(TimeDelta::days(7))
        .ok_or_else(out_of_range)?;
    Ok((start, end))
}

pub fn in_window(ts: &DateTime<Utc>, window: &Window) -> bool {
    window.0 <= *ts && *ts < window.1
}
