//! Calendar-day arithmetic.
//!
//! Records are keyed by calendar day, never by instant. "Today" is the day
//! the client sends (`?date=YYYY-MM-DD`) or, failing that, the server's local
//! day. Instant windows for expenses and meals start at local midnight.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Length of the trailing stats window, today included.
pub const WINDOW_DAYS: u64 = 7;

/// The server's current local calendar day.
#[must_use]
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The caller's day when supplied, otherwise the server's local day.
#[must_use]
pub fn resolve_today(requested: Option<NaiveDate>) -> NaiveDate {
    requested.unwrap_or_else(local_today)
}

/// Monday of the week containing `day`. Sundays belong to the week that
/// started six days earlier.
#[must_use]
pub fn week_start(day: NaiveDate) -> NaiveDate {
    let back = u64::from(day.weekday().num_days_from_monday());
    day.checked_sub_days(Days::new(back)).unwrap_or(day)
}

#[must_use]
pub fn month_start(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// The seven days ending at `today`, oldest first.
#[must_use]
pub fn trailing_week(today: NaiveDate) -> Vec<NaiveDate> {
    (0..WINDOW_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .collect()
}

/// Instant at which `day` begins in `tz`.
///
/// When midnight does not exist (a DST gap) the earliest valid instant of
/// the day is used.
pub fn day_start_in<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    if let Some(start) = tz.from_local_datetime(&midnight).earliest() {
        return start.with_timezone(&Utc);
    }
    (1..=3)
        .filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
        .find_map(|t| tz.from_local_datetime(&day.and_time(t)).earliest())
        .map_or_else(|| midnight.and_utc(), |start| start.with_timezone(&Utc))
}

/// `[start, end)` of `day` in `tz`.
pub fn day_window_in<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = day.succ_opt().unwrap_or(day);
    (day_start_in(tz, day), day_start_in(tz, next))
}

#[must_use]
pub fn local_day_start(day: NaiveDate) -> DateTime<Utc> {
    day_start_in(&Local, day)
}

#[must_use]
pub fn local_day_window(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    day_window_in(&Local, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Weekday};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn sunday_rolls_back_six_days() {
        assert_eq!(week_start(d(2024, 1, 7)), d(2024, 1, 1));
    }

    #[test]
    fn wednesday_rolls_back_to_monday() {
        assert_eq!(week_start(d(2024, 1, 10)), d(2024, 1, 8));
    }

    #[test]
    fn monday_is_its_own_week_start() {
        assert_eq!(week_start(d(2024, 1, 8)), d(2024, 1, 8));
    }

    #[test]
    fn week_start_crosses_month_and_year() {
        assert_eq!(week_start(d(2024, 3, 2)), d(2024, 2, 26));
        assert_eq!(week_start(d(2025, 1, 1)), d(2024, 12, 30));
    }

    #[test]
    fn week_start_is_always_a_monday_within_six_days() {
        let mut day = d(2023, 12, 20);
        for _ in 0..60 {
            let start = week_start(day);
            assert_eq!(start.weekday(), Weekday::Mon);
            assert!((day - start).num_days() <= 6);
            assert!(start <= day);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn month_start_is_first_of_month() {
        assert_eq!(month_start(d(2024, 2, 29)), d(2024, 2, 1));
    }

    #[test]
    fn trailing_week_is_seven_days_oldest_first() {
        let days = trailing_week(d(2024, 1, 3));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], d(2023, 12, 28));
        assert_eq!(days[6], d(2024, 1, 3));
    }

    #[test]
    fn resolve_today_prefers_requested_day() {
        assert_eq!(resolve_today(Some(d(2024, 5, 1))), d(2024, 5, 1));
    }

    #[test]
    fn day_window_follows_the_offset() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let (start, end) = day_window_in(&ist, d(2024, 1, 10));
        assert_eq!(start.to_rfc3339(), "2024-01-09T18:30:00+00:00");
        assert_eq!((end - start).num_hours(), 24);
    }
}
