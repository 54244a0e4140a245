use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Weekly snapshot, one row per (user, week_number).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HabitScore {
    pub id: Uuid,
    pub user_id: Uuid,
    pub week_number: i32,
    pub habit_score: i32,
    pub streak_count: i32,
    pub workout_adherence_percent: i32,
    pub diet_adherence_percent: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Computed values written by the snapshot upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HabitScoreDraft {
    pub week_number: i32,
    pub habit_score: i32,
    pub streak_count: i32,
    pub workout_adherence_percent: i32,
    pub diet_adherence_percent: i32,
}
