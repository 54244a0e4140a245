use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::daily_log::{DailyLog, DailyLogPatch};
use crate::models::habit_score::{HabitScore, HabitScoreDraft};

/// Persistence for daily logs and weekly habit-score snapshots.
///
/// Every list of logs comes back ordered by `log_date` descending.
pub trait DailyLogStore: Send + Sync {
    /// Inserts or patches the log for `(user_id, log_date)`.
    fn upsert_log(
        &self,
        user_id: Uuid,
        log_date: NaiveDate,
        patch: &DailyLogPatch,
    ) -> impl Future<Output = AppResult<DailyLog>> + Send;

    fn log_for_date(
        &self,
        user_id: Uuid,
        log_date: NaiveDate,
    ) -> impl Future<Output = AppResult<Option<DailyLog>>> + Send;

    /// Logs with `start <= log_date <= end`.
    fn logs_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = AppResult<Vec<DailyLog>>> + Send;

    /// Logs with `log_date >= from`.
    fn logs_since(
        &self,
        user_id: Uuid,
        from: NaiveDate,
    ) -> impl Future<Output = AppResult<Vec<DailyLog>>> + Send;

    /// The `limit` most recent logs.
    fn recent_logs(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> impl Future<Output = AppResult<Vec<DailyLog>>> + Send;

    /// Inserts or overwrites the snapshot for `(user_id, draft.week_number)`.
    fn upsert_habit_score(
        &self,
        user_id: Uuid,
        draft: &HabitScoreDraft,
    ) -> impl Future<Output = AppResult<HabitScore>> + Send;

    /// The most recently written snapshot.
    fn latest_habit_score(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = AppResult<Option<HabitScore>>> + Send;

    /// Up to `limit` snapshots with the highest week numbers, oldest week first.
    fn habit_scores(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> impl Future<Output = AppResult<Vec<HabitScore>>> + Send;
}
