use chrono::{DateTime, Datelike, Timelike, Utc};

use super::adherence::rolling_adherence;
use super::ceil_div;
use crate::models::daily_log::DailyLog;
use crate::models::habit_score::HabitScoreDraft;

const WORKOUT_WEIGHT: f64 = 0.5;
const DIET_WEIGHT: f64 = 0.5;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

/// Weighted blend of the two adherence percentages. The sum is rounded,
/// not the individual terms.
pub fn habit_score(workout_adherence: i32, diet_adherence: i32) -> i32 {
    (f64::from(workout_adherence) * WORKOUT_WEIGHT + f64::from(diet_adherence) * DIET_WEIGHT)
        .round() as i32
}

/// Snapshot key: time elapsed since Jan 1 00:00 UTC of `now`'s year, in
/// weeks, rounded up. Not an ISO week; midnight on Jan 1 is week 0.
pub fn week_number(now: DateTime<Utc>) -> i32 {
    let elapsed_ms = i64::from(now.ordinal0()) * MS_PER_DAY
        + i64::from(now.num_seconds_from_midnight()) * 1000
        + i64::from(now.nanosecond() % 1_000_000_000) / 1_000_000;
    ceil_div(elapsed_ms, MS_PER_WEEK) as i32
}

/// Builds the weekly snapshot from the last 7 days of logs. Returns `None`
/// when there is nothing logged in the window.
pub fn compute_snapshot(
    recent_logs: &[DailyLog],
    streak: i32,
    now: DateTime<Utc>,
) -> Option<HabitScoreDraft> {
    if recent_logs.is_empty() {
        return None;
    }

    let adherence = rolling_adherence(recent_logs);
    Some(HabitScoreDraft {
        week_number: week_number(now),
        habit_score: habit_score(adherence.workout, adherence.diet),
        streak_count: streak,
        workout_adherence_percent: adherence.workout,
        diet_adherence_percent: adherence.diet,
    })
}
