//! Daily-log orchestration: fetch logs from the store, run the analytics and
//! persist the weekly habit-score snapshot.
//!
//! Every function takes the reference instant (or date) from its caller.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::analytics::adherence::{self, WeeklyAdherence};
use crate::analytics::dropoff_risk::{self, RiskReport};
use crate::analytics::{habit_score, streak, WEEK_DAYS};
use crate::db::DailyLogStore;
use crate::dto::{DailyStatsResponse, ProgressResponse, StreakResponse, WeightPoint};
use crate::error::AppResult;
use crate::models::daily_log::{DailyLog, DailyLogPatch};
use crate::models::habit_score::HabitScore;

const PROGRESS_WEEKS: usize = 12;
const STATS_PREVIEW_LOGS: usize = 7;

/// First day of the `days`-long window ending on `today`.
///
/// "Logs from the last N days" means `log_date >= now - N days`; with dates
/// truncated to midnight that keeps `today` and the N-1 days before it.
pub fn window_start(today: NaiveDate, days: i64) -> NaiveDate {
    today - Duration::days(days.max(1) - 1)
}

/// Upserts the day's log and refreshes the weekly habit score.
///
/// The refresh is best-effort: if it fails the log stays saved and the
/// failure is only logged.
pub async fn save_daily_log<S: DailyLogStore>(
    store: &S,
    user_id: Uuid,
    log_date: NaiveDate,
    patch: &DailyLogPatch,
    streak_log_limit: i64,
    now: DateTime<Utc>,
) -> AppResult<DailyLog> {
    let log = store.upsert_log(user_id, log_date, patch).await?;

    tracing::debug!(user_id = %user_id, log_date = %log_date, "Daily log saved");

    if let Err(e) = update_habit_score(store, user_id, streak_log_limit, now).await {
        tracing::warn!(
            user_id = %user_id,
            error = %e,
            "Habit score refresh failed after daily log save"
        );
    }

    Ok(log)
}

/// Recomputes this week's snapshot from the last 7 days of logs.
///
/// Returns `Ok(None)` without writing anything when nothing was logged in
/// the window.
pub async fn update_habit_score<S: DailyLogStore>(
    store: &S,
    user_id: Uuid,
    streak_log_limit: i64,
    now: DateTime<Utc>,
) -> AppResult<Option<HabitScore>> {
    let today = now.date_naive();
    let recent = store
        .logs_since(user_id, window_start(today, WEEK_DAYS))
        .await?;

    if recent.is_empty() {
        tracing::debug!(user_id = %user_id, "No logs in the last 7 days, skipping habit score");
        return Ok(None);
    }

    let streak_logs = store.recent_logs(user_id, streak_log_limit).await?;
    let streak = streak::current_streak(&streak_logs, today);

    let Some(draft) = habit_score::compute_snapshot(&recent, streak, now) else {
        return Ok(None);
    };

    let snapshot = store.upsert_habit_score(user_id, &draft).await?;

    tracing::debug!(
        user_id = %user_id,
        week_number = snapshot.week_number,
        habit_score = snapshot.habit_score,
        streak = snapshot.streak_count,
        "Habit score updated"
    );

    Ok(Some(snapshot))
}

pub async fn streak<S: DailyLogStore>(
    store: &S,
    user_id: Uuid,
    streak_log_limit: i64,
    today: NaiveDate,
) -> AppResult<StreakResponse> {
    let logs = store.recent_logs(user_id, streak_log_limit).await?;
    Ok(StreakResponse {
        streak: streak::current_streak(&logs, today),
        longest_streak: streak::longest_streak(&logs),
    })
}

/// Adherence for the Sunday-to-Saturday week `weeks_back` weeks ago
/// (1 = the current week).
pub async fn weekly_adherence<S: DailyLogStore>(
    store: &S,
    user_id: Uuid,
    weeks_back: u32,
    today: NaiveDate,
) -> AppResult<WeeklyAdherence> {
    let (start, end) = adherence::week_window(today, weeks_back);
    let logs = store.logs_in_range(user_id, start, end).await?;
    Ok(adherence::weekly_adherence(&logs))
}

pub async fn daily_stats<S: DailyLogStore>(
    store: &S,
    user_id: Uuid,
    days: i64,
    streak_log_limit: i64,
    today: NaiveDate,
) -> AppResult<DailyStatsResponse> {
    let mut recent = store.logs_since(user_id, window_start(today, days)).await?;
    let streak_logs = store.recent_logs(user_id, streak_log_limit).await?;

    let rates = adherence::completion_rates(&recent);
    let total_days_logged = recent.len() as i64;
    recent.truncate(STATS_PREVIEW_LOGS);

    Ok(DailyStatsResponse {
        streak: streak::current_streak(&streak_logs, today),
        total_days_logged,
        workout_completion_rate: rates.workout,
        diet_completion_rate: rates.diet,
        recent_logs: recent,
    })
}

/// Weekly adherence history and weight series for the progress charts.
pub async fn progress<S: DailyLogStore>(
    store: &S,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<ProgressResponse> {
    let from = window_start(now.date_naive(), WEEK_DAYS * PROGRESS_WEEKS as i64);
    let logs = store.logs_since(user_id, from).await?;

    let weight = logs
        .iter()
        .rev()
        .filter_map(|l| match l.weight_kg {
            Some(w) if w > 0.0 => Some(WeightPoint {
                log_date: l.log_date,
                weight_kg: w,
            }),
            _ => None,
        })
        .collect();

    Ok(ProgressResponse {
        weekly_adherence: adherence::weekly_history(&logs, now, PROGRESS_WEEKS),
        weight,
    })
}

/// Drop-off risk from the `history_limit` most recent logs, the latest habit
/// score and the current streak. The logs are not cut off by age so a lapsed
/// user's last entry still drives the days-since-last-log check.
pub async fn dropoff_risk<S: DailyLogStore>(
    store: &S,
    user_id: Uuid,
    history_limit: i64,
    today: NaiveDate,
) -> AppResult<RiskReport> {
    let logs = store.recent_logs(user_id, history_limit).await?;
    let latest = store.latest_habit_score(user_id).await?;

    let streak = streak::current_streak(&logs, today);
    let report = dropoff_risk::assess(&logs, latest.map(|s| s.habit_score), streak, today);

    tracing::debug!(
        user_id = %user_id,
        risk_score = report.risk_score,
        at_risk = report.at_risk,
        "Drop-off risk assessed"
    );

    Ok(report)
}
