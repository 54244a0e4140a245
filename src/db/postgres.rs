use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::store::DailyLogStore;
use crate::error::AppResult;
use crate::models::daily_log::{DailyLog, DailyLogPatch, DEFAULT_ENERGY_LEVEL, DEFAULT_MOOD};
use crate::models::habit_score::{HabitScore, HabitScoreDraft};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl DailyLogStore for PgStore {
    async fn upsert_log(
        &self,
        user_id: Uuid,
        log_date: NaiveDate,
        patch: &DailyLogPatch,
    ) -> AppResult<DailyLog> {
        let log = sqlx::query_as::<_, DailyLog>(
            r#"
            INSERT INTO daily_logs (
                id, user_id, log_date,
                workout_completed, workout_notes, diet_followed, diet_notes,
                calories_consumed, water_intake_liters, energy_level, mood,
                sleep_hours, weight_kg, notes
            )
            VALUES (
                $1, $2, $3,
                COALESCE($4, FALSE), COALESCE($5, ''), COALESCE($6, FALSE), COALESCE($7, ''),
                COALESCE($8, 0), COALESCE($9, 0), COALESCE($10, $15), COALESCE($11, $16),
                COALESCE($12, 0), $13, COALESCE($14, '')
            )
            ON CONFLICT (user_id, log_date) DO UPDATE SET
                workout_completed = COALESCE($4, daily_logs.workout_completed),
                workout_notes = COALESCE($5, daily_logs.workout_notes),
                diet_followed = COALESCE($6, daily_logs.diet_followed),
                diet_notes = COALESCE($7, daily_logs.diet_notes),
                calories_consumed = COALESCE($8, daily_logs.calories_consumed),
                water_intake_liters = COALESCE($9, daily_logs.water_intake_liters),
                energy_level = COALESCE($10, daily_logs.energy_level),
                mood = COALESCE($11, daily_logs.mood),
                sleep_hours = COALESCE($12, daily_logs.sleep_hours),
                weight_kg = COALESCE($13, daily_logs.weight_kg),
                notes = COALESCE($14, daily_logs.notes),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(log_date)
        .bind(patch.workout_completed)
        .bind(&patch.workout_notes)
        .bind(patch.diet_followed)
        .bind(&patch.diet_notes)
        .bind(patch.calories_consumed)
        .bind(patch.water_intake_liters)
        .bind(&patch.energy_level)
        .bind(&patch.mood)
        .bind(patch.sleep_hours)
        .bind(patch.weight_kg)
        .bind(&patch.notes)
        .bind(DEFAULT_ENERGY_LEVEL)
        .bind(DEFAULT_MOOD)
        .fetch_one(&self.db)
        .await?;

        Ok(log)
    }

    async fn log_for_date(&self, user_id: Uuid, log_date: NaiveDate) -> AppResult<Option<DailyLog>> {
        let log = sqlx::query_as::<_, DailyLog>(
            "SELECT * FROM daily_logs WHERE user_id = $1 AND log_date = $2",
        )
        .bind(user_id)
        .bind(log_date)
        .fetch_optional(&self.db)
        .await?;

        Ok(log)
    }

    async fn logs_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DailyLog>> {
        let logs = sqlx::query_as::<_, DailyLog>(
            r#"
            SELECT * FROM daily_logs
            WHERE user_id = $1 AND log_date BETWEEN $2 AND $3
            ORDER BY log_date DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(logs)
    }

    async fn logs_since(&self, user_id: Uuid, from: NaiveDate) -> AppResult<Vec<DailyLog>> {
        let logs = sqlx::query_as::<_, DailyLog>(
            r#"
            SELECT * FROM daily_logs
            WHERE user_id = $1 AND log_date >= $2
            ORDER BY log_date DESC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .fetch_all(&self.db)
        .await?;

        Ok(logs)
    }

    async fn recent_logs(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<DailyLog>> {
        let logs = sqlx::query_as::<_, DailyLog>(
            r#"
            SELECT * FROM daily_logs
            WHERE user_id = $1
            ORDER BY log_date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(logs)
    }

    async fn upsert_habit_score(
        &self,
        user_id: Uuid,
        draft: &HabitScoreDraft,
    ) -> AppResult<HabitScore> {
        let score = sqlx::query_as::<_, HabitScore>(
            r#"
            INSERT INTO habit_scores (
                id, user_id, week_number, habit_score, streak_count,
                workout_adherence_percent, diet_adherence_percent
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, week_number) DO UPDATE SET
                habit_score = EXCLUDED.habit_score,
                streak_count = EXCLUDED.streak_count,
                workout_adherence_percent = EXCLUDED.workout_adherence_percent,
                diet_adherence_percent = EXCLUDED.diet_adherence_percent,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(draft.week_number)
        .bind(draft.habit_score)
        .bind(draft.streak_count)
        .bind(draft.workout_adherence_percent)
        .bind(draft.diet_adherence_percent)
        .fetch_one(&self.db)
        .await?;

        Ok(score)
    }

    async fn latest_habit_score(&self, user_id: Uuid) -> AppResult<Option<HabitScore>> {
        let score = sqlx::query_as::<_, HabitScore>(
            r#"
            SELECT * FROM habit_scores
            WHERE user_id = $1
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(score)
    }

    async fn habit_scores(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<HabitScore>> {
        let mut scores = sqlx::query_as::<_, HabitScore>(
            r#"
            SELECT * FROM habit_scores
            WHERE user_id = $1
            ORDER BY week_number DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        scores.reverse();
        Ok(scores)
    }
}
