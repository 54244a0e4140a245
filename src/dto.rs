//! # FitArc — Request/Response DTOs
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - All validation is expressed via `validator` derive macros

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::analytics::adherence::WeekAdherence;
use crate::models::daily_log::{DailyLog, DailyLogPatch, EnergyLevel, Mood};

// ============================================================================
// Daily logs
// ============================================================================

/// POST /api/daily-logs
///
/// Every field is optional; omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpsertDailyLogRequest {
    /// Defaults to today (UTC)
    pub log_date: Option<NaiveDate>,

    pub workout_completed: Option<bool>,

    #[validate(length(max = 2000, message = "Workout notes must be at most 2000 characters"))]
    pub workout_notes: Option<String>,

    pub diet_followed: Option<bool>,

    #[validate(length(max = 2000, message = "Diet notes must be at most 2000 characters"))]
    pub diet_notes: Option<String>,

    #[validate(range(min = 0.0, max = 20000.0, message = "Calories must be between 0 and 20000"))]
    pub calories_consumed: Option<f64>,

    #[validate(range(min = 0.0, max = 20.0, message = "Water intake must be between 0 and 20 liters"))]
    pub water_intake_liters: Option<f64>,

    #[validate(custom = "validate_energy_level")]
    pub energy_level: Option<String>,

    #[validate(custom = "validate_mood")]
    pub mood: Option<String>,

    /// 0 = not recorded
    #[validate(range(min = 0.0, max = 24.0, message = "Sleep hours must be between 0 and 24"))]
    pub sleep_hours: Option<f64>,

    #[validate(range(min = 0.1, max = 700.0, message = "Weight must be between 0.1 and 700 kg"))]
    pub weight_kg: Option<f64>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

impl UpsertDailyLogRequest {
    pub fn into_parts(self) -> (Option<NaiveDate>, DailyLogPatch) {
        let patch = DailyLogPatch {
            workout_completed: self.workout_completed,
            workout_notes: self.workout_notes,
            diet_followed: self.diet_followed,
            diet_notes: self.diet_notes,
            calories_consumed: self.calories_consumed,
            water_intake_liters: self.water_intake_liters,
            energy_level: self.energy_level,
            mood: self.mood,
            sleep_hours: self.sleep_hours,
            weight_kg: self.weight_kg,
            notes: self.notes,
        };
        (self.log_date, patch)
    }
}

fn validate_energy_level(value: &str) -> Result<(), ValidationError> {
    if EnergyLevel::parse(value).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("energy_level");
    err.message = Some("Unknown energy level".into());
    Err(err)
}

fn validate_mood(value: &str) -> Result<(), ValidationError> {
    if Mood::parse(value).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("mood");
    err.message = Some("Mood must be one of Poor, Fair, Good, Great, Excellent".into());
    Err(err)
}

/// GET /api/daily-logs?start_date=&end_date=
#[derive(Debug, Deserialize)]
pub struct DailyLogRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// GET /api/daily-logs/recent?days=
#[derive(Debug, Deserialize, Validate)]
pub struct RecentLogsQuery {
    #[validate(range(min = 1, max = 365, message = "days must be between 1 and 365"))]
    pub days: Option<i64>,
}

// ============================================================================
// Stats
// ============================================================================

/// GET /api/daily-logs/streak
#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub streak: i32,
    pub longest_streak: i32,
}

/// GET /api/daily-logs/stats
#[derive(Debug, Serialize)]
pub struct DailyStatsResponse {
    pub streak: i32,
    pub total_days_logged: i64,
    pub workout_completion_rate: i32,
    pub diet_completion_rate: i32,
    pub recent_logs: Vec<DailyLog>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct WeightPoint {
    pub log_date: NaiveDate,
    pub weight_kg: f64,
}

/// GET /api/daily-logs/progress
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub weekly_adherence: Vec<WeekAdherence>,
    pub weight: Vec<WeightPoint>,
}

// ============================================================================
// Habit scores
// ============================================================================

/// GET /api/habit-scores?limit=
#[derive(Debug, Deserialize, Validate)]
pub struct HabitScoreHistoryQuery {
    #[validate(range(min = 1, max = 104, message = "limit must be between 1 and 104"))]
    pub limit: Option<i64>,
}
