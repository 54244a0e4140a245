use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_ENERGY_LEVEL: &str = "Medium";
pub const DEFAULT_MOOD: &str = "Good";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub log_date: NaiveDate,
    pub workout_completed: bool,
    pub workout_notes: String,
    pub diet_followed: bool,
    pub diet_notes: String,
    pub calories_consumed: f64,
    pub water_intake_liters: f64,
    pub energy_level: String,
    pub mood: String,
    /// 0 means "not recorded".
    pub sleep_hours: f64,
    pub weight_kg: Option<f64>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyLog {
    /// Both the workout and the diet were kept that day.
    pub fn is_fully_adherent(&self) -> bool {
        self.workout_completed && self.diet_followed
    }

    /// Neither the workout nor the diet were kept that day.
    pub fn is_missed(&self) -> bool {
        !self.workout_completed && !self.diet_followed
    }

    pub fn has_low_energy(&self) -> bool {
        EnergyLevel::parse(&self.energy_level).is_some_and(|e| e.is_low())
    }
}

/// Partial update applied on upsert. `None` keeps the stored value, or the
/// column default when the row is being created.
#[derive(Debug, Clone, Default)]
pub struct DailyLogPatch {
    pub workout_completed: Option<bool>,
    pub workout_notes: Option<String>,
    pub diet_followed: Option<bool>,
    pub diet_notes: Option<String>,
    pub calories_consumed: Option<f64>,
    pub water_intake_liters: Option<f64>,
    pub energy_level: Option<String>,
    pub mood: Option<String>,
    pub sleep_hours: Option<f64>,
    pub weight_kg: Option<f64>,
    pub notes: Option<String>,
}

/// Energy vocabulary. The first three come from the daily log form, the rest
/// from the alternate wellness check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
    Energized,
    Normal,
    SlightlyFatigued,
    VeryTired,
}

impl EnergyLevel {
    pub const ALL: [EnergyLevel; 7] = [
        EnergyLevel::Low,
        EnergyLevel::Medium,
        EnergyLevel::High,
        EnergyLevel::Energized,
        EnergyLevel::Normal,
        EnergyLevel::SlightlyFatigued,
        EnergyLevel::VeryTired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::Low => "Low",
            EnergyLevel::Medium => "Medium",
            EnergyLevel::High => "High",
            EnergyLevel::Energized => "Energized",
            EnergyLevel::Normal => "Normal",
            EnergyLevel::SlightlyFatigued => "Slightly Fatigued",
            EnergyLevel::VeryTired => "Very Tired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == value)
    }

    /// Bottom of either scale.
    pub fn is_low(&self) -> bool {
        matches!(self, EnergyLevel::Low | EnergyLevel::VeryTired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Poor,
    Fair,
    Good,
    Great,
    Excellent,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Poor, Mood::Fair, Mood::Good, Mood::Great, Mood::Excellent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Poor => "Poor",
            Mood::Fair => "Fair",
            Mood::Good => "Good",
            Mood::Great => "Great",
            Mood::Excellent => "Excellent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_level_round_trips_its_labels() {
        for level in EnergyLevel::ALL {
            assert_eq!(EnergyLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(EnergyLevel::parse("low"), None);
        assert_eq!(EnergyLevel::parse(""), None);
    }

    #[test]
    fn low_bucket_covers_both_scales() {
        let low: Vec<_> = EnergyLevel::ALL.into_iter().filter(|e| e.is_low()).collect();
        assert_eq!(low, vec![EnergyLevel::Low, EnergyLevel::VeryTired]);
    }

    #[test]
    fn mood_parse_is_case_sensitive() {
        assert_eq!(Mood::parse("Great"), Some(Mood::Great));
        assert_eq!(Mood::parse("great"), None);
    }
}
