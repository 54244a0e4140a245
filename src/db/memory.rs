//! In-memory store for service tests.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::store::DailyLogStore;
use crate::error::{AppError, AppResult};
use crate::models::daily_log::{DailyLog, DailyLogPatch, DEFAULT_ENERGY_LEVEL, DEFAULT_MOOD};
use crate::models::habit_score::{HabitScore, HabitScoreDraft};

#[derive(Default)]
pub struct MemoryStore {
    logs: Mutex<Vec<DailyLog>>,
    scores: Mutex<Vec<HabitScore>>,
    fail_score_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later `upsert_habit_score` call fail.
    pub fn fail_score_writes(&self) {
        self.fail_score_writes.store(true, Ordering::SeqCst);
    }

    pub async fn score_count(&self) -> usize {
        self.scores.lock().await.len()
    }

    async fn sorted_logs<F>(&self, user_id: Uuid, keep: F) -> Vec<DailyLog>
    where
        F: Fn(&DailyLog) -> bool,
    {
        let logs = self.logs.lock().await;
        let mut out: Vec<DailyLog> = logs
            .iter()
            .filter(|l| l.user_id == user_id && keep(l))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.log_date.cmp(&a.log_date));
        out
    }
}

fn apply_patch(log: &mut DailyLog, patch: &DailyLogPatch) {
    if let Some(v) = patch.workout_completed {
        log.workout_completed = v;
    }
    if let Some(v) = &patch.workout_notes {
        log.workout_notes = v.clone();
    }
    if let Some(v) = patch.diet_followed {
        log.diet_followed = v;
    }
    if let Some(v) = &patch.diet_notes {
        log.diet_notes = v.clone();
    }
    if let Some(v) = patch.calories_consumed {
        log.calories_consumed = v;
    }
    if let Some(v) = patch.water_intake_liters {
        log.water_intake_liters = v;
    }
    if let Some(v) = &patch.energy_level {
        log.energy_level = v.clone();
    }
    if let Some(v) = &patch.mood {
        log.mood = v.clone();
    }
    if let Some(v) = patch.sleep_hours {
        log.sleep_hours = v;
    }
    if let Some(v) = patch.weight_kg {
        log.weight_kg = Some(v);
    }
    if let Some(v) = &patch.notes {
        log.notes = v.clone();
    }
}

impl DailyLogStore for MemoryStore {
    async fn upsert_log(
        &self,
        user_id: Uuid,
        log_date: NaiveDate,
        patch: &DailyLogPatch,
    ) -> AppResult<DailyLog> {
        let mut logs = self.logs.lock().await;
        let now = Utc::now();

        if let Some(existing) = logs
            .iter_mut()
            .find(|l| l.user_id == user_id && l.log_date == log_date)
        {
            apply_patch(existing, patch);
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let mut log = DailyLog {
            id: Uuid::new_v4(),
            user_id,
            log_date,
            workout_completed: false,
            workout_notes: String::new(),
            diet_followed: false,
            diet_notes: String::new(),
            calories_consumed: 0.0,
            water_intake_liters: 0.0,
            energy_level: DEFAULT_ENERGY_LEVEL.into(),
            mood: DEFAULT_MOOD.into(),
            sleep_hours: 0.0,
            weight_kg: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        };
        apply_patch(&mut log, patch);
        logs.push(log.clone());
        Ok(log)
    }

    async fn log_for_date(&self, user_id: Uuid, log_date: NaiveDate) -> AppResult<Option<DailyLog>> {
        Ok(self
            .sorted_logs(user_id, |l| l.log_date == log_date)
            .await
            .into_iter()
            .next())
    }

    async fn logs_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DailyLog>> {
        Ok(self
            .sorted_logs(user_id, |l| l.log_date >= start && l.log_date <= end)
            .await)
    }

    async fn logs_since(&self, user_id: Uuid, from: NaiveDate) -> AppResult<Vec<DailyLog>> {
        Ok(self.sorted_logs(user_id, |l| l.log_date >= from).await)
    }

    async fn recent_logs(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<DailyLog>> {
        let mut logs = self.sorted_logs(user_id, |_| true).await;
        logs.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(logs)
    }

    async fn upsert_habit_score(
        &self,
        user_id: Uuid,
        draft: &HabitScoreDraft,
    ) -> AppResult<HabitScore> {
        if self.fail_score_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!("habit score write rejected")));
        }

        let mut scores = self.scores.lock().await;
        let now = Utc::now();

        if let Some(existing) = scores
            .iter_mut()
            .find(|s| s.user_id == user_id && s.week_number == draft.week_number)
        {
            existing.habit_score = draft.habit_score;
            existing.streak_count = draft.streak_count;
            existing.workout_adherence_percent = draft.workout_adherence_percent;
            existing.diet_adherence_percent = draft.diet_adherence_percent;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let score = HabitScore {
            id: Uuid::new_v4(),
            user_id,
            week_number: draft.week_number,
            habit_score: draft.habit_score,
            streak_count: draft.streak_count,
            workout_adherence_percent: draft.workout_adherence_percent,
            diet_adherence_percent: draft.diet_adherence_percent,
            created_at: now,
            updated_at: now,
        };
        scores.push(score.clone());
        Ok(score)
    }

    async fn latest_habit_score(&self, user_id: Uuid) -> AppResult<Option<HabitScore>> {
        let scores = self.scores.lock().await;
        Ok(scores
            .iter()
            .filter(|s| s.user_id == user_id)
            .max_by_key(|s| s.updated_at)
            .cloned())
    }

    async fn habit_scores(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<HabitScore>> {
        let scores = self.scores.lock().await;
        let mut out: Vec<HabitScore> = scores
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        out.sort_by_key(|s| s.week_number);
        let skip = out.len().saturating_sub(usize::try_from(limit).unwrap_or(0));
        Ok(out.split_off(skip))
    }
}
