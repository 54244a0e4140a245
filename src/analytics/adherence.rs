use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::{ceil_div, WEEK_DAYS};
use crate::models::daily_log::DailyLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdherencePercent {
    pub workout: i32,
    pub diet: i32,
}

/// Adherence for one calendar week. `workout_days`/`diet_days` are omitted
/// when the week has no logs at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyAdherence {
    pub workout_adherence: i32,
    pub diet_adherence: i32,
    pub total_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekAdherence {
    pub week_number: i32,
    pub workout_adherence_percent: i32,
    pub diet_adherence_percent: i32,
    pub total_days: i64,
}

fn percent(count: usize, denominator: usize) -> i32 {
    if denominator == 0 {
        return 0;
    }
    (count as f64 / denominator as f64 * 100.0).round() as i32
}

fn percent_of_week(count: usize) -> i32 {
    percent(count, WEEK_DAYS as usize)
}

fn count_flags(logs: &[DailyLog]) -> (usize, usize) {
    let workout = logs.iter().filter(|l| l.workout_completed).count();
    let diet = logs.iter().filter(|l| l.diet_followed).count();
    (workout, diet)
}

/// Adherence over a rolling 7-day window. Always divides by 7: a day with
/// no log counts as a missed day.
pub fn rolling_adherence(logs: &[DailyLog]) -> AdherencePercent {
    let (workout, diet) = count_flags(logs);
    AdherencePercent {
        workout: percent_of_week(workout),
        diet: percent_of_week(diet),
    }
}

/// Adherence for the logs of one calendar week, measured against all 7 days.
pub fn weekly_adherence(logs: &[DailyLog]) -> WeeklyAdherence {
    if logs.is_empty() {
        return WeeklyAdherence {
            workout_adherence: 0,
            diet_adherence: 0,
            total_days: 0,
            workout_days: None,
            diet_days: None,
        };
    }

    let (workout, diet) = count_flags(logs);
    WeeklyAdherence {
        workout_adherence: percent_of_week(workout),
        diet_adherence: percent_of_week(diet),
        total_days: logs.len() as i64,
        workout_days: Some(workout as i64),
        diet_days: Some(diet as i64),
    }
}

/// Sunday-to-Saturday week, `weeks_back = 1` being the week containing
/// `today`. Returns inclusive `(start, end)` dates.
pub fn week_window(today: NaiveDate, weeks_back: u32) -> (NaiveDate, NaiveDate) {
    let offset = i64::from(today.weekday().num_days_from_sunday())
        + WEEK_DAYS * i64::from(weeks_back.saturating_sub(1));
    let start = today - Duration::days(offset);
    (start, start + Duration::days(WEEK_DAYS - 1))
}

/// Completion rates over the days that were actually logged, for the
/// dashboard. Unlike the weekly figures the denominator is the log count.
pub fn completion_rates(logs: &[DailyLog]) -> AdherencePercent {
    let (workout, diet) = count_flags(logs);
    AdherencePercent {
        workout: percent(workout, logs.len()),
        diet: percent(diet, logs.len()),
    }
}

/// Week number of a log date: whole days since Jan 1 of `now`'s year,
/// divided by 7 and rounded up. Dates from an earlier year go to zero or
/// below.
pub fn week_of(date: NaiveDate, now: DateTime<Utc>) -> i32 {
    let jan1_offset = i64::from(now.ordinal0());
    let days = (date - now.date_naive()).num_days() + jan1_offset;
    ceil_div(days, WEEK_DAYS) as i32
}

/// Per-week adherence for the progress charts, oldest week first, keeping
/// only the last `limit` weeks.
pub fn weekly_history(logs: &[DailyLog], now: DateTime<Utc>, limit: usize) -> Vec<WeekAdherence> {
    #[derive(Default)]
    struct Tally {
        workout: usize,
        diet: usize,
        total: usize,
    }

    let mut weeks: BTreeMap<i32, Tally> = BTreeMap::new();
    for log in logs {
        let tally = weeks.entry(week_of(log.log_date, now)).or_default();
        tally.total += 1;
        if log.workout_completed {
            tally.workout += 1;
        }
        if log.diet_followed {
            tally.diet += 1;
        }
    }

    let skip = weeks.len().saturating_sub(limit);
    weeks
        .into_iter()
        .skip(skip)
        .map(|(week_number, t)| WeekAdherence {
            week_number,
            workout_adherence_percent: percent_of_week(t.workout),
            diet_adherence_percent: percent_of_week(t.diet),
            total_days: t.total as i64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Weekday};

    use super::*;
    use crate::analytics::fixtures::{consecutive, days_ago, log, today};

    #[test]
    fn rolling_window_divides_by_seven() {
        let logs = consecutive(&[(true, false), (true, true), (true, false)]);
        let pct = rolling_adherence(&logs);
        assert_eq!(pct.workout, 43);
        assert_eq!(pct.diet, 14);
    }

    #[test]
    fn full_week_is_one_hundred() {
        let logs = consecutive(&[(true, true); 7]);
        assert_eq!(
            rolling_adherence(&logs),
            AdherencePercent { workout: 100, diet: 100 }
        );
    }

    #[test]
    fn empty_rolling_window_is_zero() {
        assert_eq!(rolling_adherence(&[]), AdherencePercent { workout: 0, diet: 0 });
    }

    #[test]
    fn empty_week_is_zero_filled() {
        let week = weekly_adherence(&[]);
        assert_eq!(week.workout_adherence, 0);
        assert_eq!(week.diet_adherence, 0);
        assert_eq!(week.total_days, 0);

        let json = serde_json::to_value(&week).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "workout_adherence": 0, "diet_adherence": 0, "total_days": 0 })
        );
    }

    #[test]
    fn week_counts_logged_days() {
        let logs = consecutive(&[(true, true), (false, true), (true, false), (false, false)]);
        let week = weekly_adherence(&logs);
        assert_eq!(week.total_days, 4);
        assert_eq!(week.workout_days, Some(2));
        assert_eq!(week.diet_days, Some(2));
        assert_eq!(week.workout_adherence, 29);
    }

    #[test]
    fn week_window_starts_on_sunday() {
        // 2025-03-12 is a Wednesday
        let (start, end) = week_window(today(), 1);
        assert_eq!(start.weekday(), Weekday::Sun);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());

        let (prev_start, prev_end) = week_window(today(), 2);
        assert_eq!(prev_start, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
        assert_eq!(prev_end, NaiveDate::from_ymd_opt(2025, 3, 8).unwrap());
    }

    #[test]
    fn completion_rates_use_logged_days() {
        let logs = consecutive(&[(true, true), (true, false), (false, false)]);
        assert_eq!(completion_rates(&logs), AdherencePercent { workout: 67, diet: 33 });
        assert_eq!(completion_rates(&[]), AdherencePercent { workout: 0, diet: 0 });
    }

    #[test]
    fn week_of_counts_from_new_year() {
        let now = Utc.with_ymd_and_hms(2025, 3, 12, 15, 30, 0).unwrap();
        let jan1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(week_of(jan1, now), 0);
        assert_eq!(week_of(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(), now), 1);
        assert_eq!(week_of(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(), now), 1);
        assert_eq!(week_of(NaiveDate::from_ymd_opt(2025, 1, 9).unwrap(), now), 2);
        // previous year lands at or below zero
        assert_eq!(week_of(NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(), now), -1);
    }

    #[test]
    fn history_groups_and_keeps_latest_weeks() {
        let now = Utc.with_ymd_and_hms(2025, 3, 12, 12, 0, 0).unwrap();
        let logs = vec![
            log(today(), true, true),
            log(days_ago(1), true, false),
            log(days_ago(14), false, true),
            log(days_ago(28), true, true),
        ];
        let history = weekly_history(&logs, now, 2);
        assert_eq!(history.len(), 2);
        assert!(history[0].week_number < history[1].week_number);

        let latest = &history[1];
        assert_eq!(latest.week_number, week_of(today(), now));
        assert_eq!(latest.total_days, 2);
        assert_eq!(latest.workout_adherence_percent, 29);
        assert_eq!(latest.diet_adherence_percent, 14);
    }
}
