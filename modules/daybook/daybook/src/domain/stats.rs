//! Streak and consistency over the trailing seven-day window.

use std::collections::HashMap;

use chrono::NaiveDate;
use daybook_sdk::{DailyFocus, DaySummary, FocusStats};

use super::calendar::{WINDOW_DAYS, trailing_week};

/// Completion state for each of the seven days ending at `today`, oldest
/// first. A day has a task as soon as any record exists for it; days without
/// a record count as incomplete.
#[must_use]
pub fn summarize_week(today: NaiveDate, records: &[DailyFocus]) -> Vec<DaySummary> {
    let by_date: HashMap<NaiveDate, &DailyFocus> = records.iter().map(|r| (r.date, r)).collect();
    trailing_week(today)
        .into_iter()
        .map(|date| match by_date.get(&date) {
            Some(r) => DaySummary {
                date,
                is_completed: r.is_completed,
                has_task: true,
            },
            None => DaySummary {
                date,
                is_completed: false,
                has_task: false,
            },
        })
        .collect()
}

/// Aggregate a window ordered oldest to newest; the last entry is today.
///
/// Only the newest seven entries are considered and the consistency
/// denominator is always seven.
#[must_use]
pub fn aggregate(window: &[DaySummary]) -> FocusStats {
    let len = window.len();
    let tail = &window[len.saturating_sub(7)..];

    let completed_count = u32::try_from(tail.iter().filter(|d| d.is_completed).count()).unwrap_or(0);

    let mut streak = 0u32;
    for (back, day) in tail.iter().rev().enumerate() {
        if !day.is_completed {
            // an unfinished today is skipped; any earlier gap ends the run
            if back == 0 {
                continue;
            }
            break;
        }
        streak += 1;
    }

    FocusStats {
        streak,
        consistency: consistency_percent(completed_count),
        completed_count,
    }
}

/// `round(100 * completed / 7)`, half up.
fn consistency_percent(completed: u32) -> u32 {
    let days = u32::try_from(WINDOW_DAYS).unwrap_or(7);
    #[allow(clippy::integer_division)]
    let pct = (completed.min(days) * 200 + days) / (2 * days);
    pct
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, Utc};
    use uuid::Uuid;

    fn window(flags: &[bool]) -> Vec<DaySummary> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        flags
            .iter()
            .enumerate()
            .map(|(i, &done)| DaySummary {
                date: start.checked_add_days(Days::new(i as u64)).unwrap(),
                is_completed: done,
                has_task: done,
            })
            .collect()
    }

    #[test]
    fn all_complete_week() {
        let stats = aggregate(&window(&[true; 7]));
        assert_eq!(stats.streak, 7);
        assert_eq!(stats.consistency, 100);
        assert_eq!(stats.completed_count, 7);
    }

    #[test]
    fn all_incomplete_week() {
        let stats = aggregate(&window(&[false; 7]));
        assert_eq!(stats, FocusStats::default());
    }

    #[test]
    fn earlier_gap_stops_the_streak() {
        // Thursday missed, Friday through Sunday done.
        let stats = aggregate(&window(&[true, true, true, false, true, true, true]));
        assert_eq!(stats.streak, 3);
        assert_eq!(stats.consistency, 86);
    }

    #[test]
    fn unfinished_today_is_skipped_not_counted() {
        let stats = aggregate(&window(&[true, true, true, true, true, true, false]));
        assert_eq!(stats.streak, 6);
        assert_eq!(stats.consistency, 86);
    }

    #[test]
    fn unfinished_today_then_gap_yesterday() {
        let stats = aggregate(&window(&[true, true, true, true, true, false, false]));
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn consistency_rounds_to_nearest() {
        let expected = [0, 14, 29, 43, 57, 71, 86, 100];
        for (done, pct) in expected.iter().enumerate() {
            let mut flags = [false; 7];
            flags.iter_mut().take(done).for_each(|f| *f = true);
            assert_eq!(aggregate(&window(&flags)).consistency, *pct, "{done} of 7");
        }
    }

    #[test]
    fn short_window_still_divides_by_seven() {
        let stats = aggregate(&window(&[true, true]));
        assert_eq!(stats.streak, 2);
        assert_eq!(stats.consistency, 29);
    }

    #[test]
    fn long_window_uses_newest_seven() {
        // newest seven are [F, T, T, T, T, T, T]
        let stats = aggregate(&window(&[true, true, true, false, true, true, true, true, true, true]));
        assert_eq!(stats.completed_count, 6);
        assert_eq!(stats.streak, 6);
        assert_eq!(stats.consistency, 86);
    }

    fn record(date: NaiveDate, main_focus: &str, is_completed: bool) -> DailyFocus {
        let now = Utc::now();
        DailyFocus {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_email: "a@b.c".to_owned(),
            date,
            main_focus: main_focus.to_owned(),
            is_completed,
            modules: daybook_sdk::FocusModules::default(),
            custom_tasks: Vec::new(),
            notes: String::new(),
            reflection: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn summarize_fills_missing_days() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let saved = record(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(), "Write the parser", true);
        let week = summarize_week(today, &[saved]);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(week[4].is_completed && week[4].has_task);
        assert_eq!(week.iter().filter(|d| d.is_completed).count(), 1);
    }

    #[test]
    fn any_saved_record_counts_as_a_task() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let mut saved = record(today, "", false);
        saved.modules.deep_work = true;
        let week = summarize_week(today, &[saved]);
        assert!(week[6].has_task);
        assert!(!week[6].is_completed);
        assert!(!week[5].has_task);
    }
}
