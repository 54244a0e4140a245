//! Drop-off risk heuristics.
//!
//! Eight independent checks run over the most recent week of logs plus the
//! latest habit score and the current streak. Each triggered check adds to
//! `risk_score` and contributes one reason and its recommendations; checks
//! that clear their "doing great" threshold add a positive note instead.
//! Only the logging, adherence, missed-day and habit-score checks flag the
//! user as `at_risk`; the streak, energy and sleep checks only move the score.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::daily_log::DailyLog;

const RECENT_WINDOW: usize = 7;

const STALE_LOG_DAYS: i64 = 3;
const WORKOUT_RATE_FLOOR: f64 = 30.0;
const WORKOUT_RATE_STRONG: f64 = 70.0;
const DIET_RATE_FLOOR: f64 = 40.0;
const DIET_RATE_STRONG: f64 = 80.0;
const MISSED_DAYS_LIMIT: usize = 3;
const HABIT_SCORE_FLOOR: i32 = 50;
const HABIT_SCORE_STRONG: i32 = 80;
const STREAK_STRONG: i32 = 7;
const LOW_ENERGY_DAYS_LIMIT: usize = 4;
const SLEEP_FLOOR_HOURS: f64 = 6.0;
const SLEEP_HEALTHY_HOURS: (f64, f64) = (7.0, 9.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 75 => RiskLevel::Critical,
            s if s >= 50 => RiskLevel::High,
            s if s >= 25 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub at_risk: bool,
    pub risk_level: RiskLevel,
    pub risk_score: i32,
    pub reasons: Vec<String>,
    pub recommendations: Vec<String>,
    pub positive_notes: Vec<String>,
}

impl Default for RiskReport {
    fn default() -> Self {
        Self {
            at_risk: false,
            risk_level: RiskLevel::Low,
            risk_score: 0,
            reasons: Vec::new(),
            recommendations: Vec::new(),
            positive_notes: Vec::new(),
        }
    }
}

impl RiskReport {
    fn flag(&mut self, score: i32, marks_at_risk: bool, reason: String, recommendations: &[&str]) {
        if marks_at_risk {
            self.at_risk = true;
        }
        self.risk_score += score;
        self.reasons.push(reason);
        self.recommendations
            .extend(recommendations.iter().map(|r| r.to_string()));
    }

    fn note(&mut self, note: String) {
        self.positive_notes.push(note);
    }
}

/// Assesses how likely the user is to drop off.
///
/// `logs` must be ordered most recent first. `habit_score` is the latest
/// snapshot's score, if any; a score of 0 is treated as unknown. `today` is
/// the reference date for the logging-recency check.
pub fn assess(
    logs: &[DailyLog],
    habit_score: Option<i32>,
    streak: i32,
    today: NaiveDate,
) -> RiskReport {
    let mut risk = RiskReport::default();

    let Some(latest) = logs.first() else {
        risk.at_risk = true;
        risk.risk_level = RiskLevel::Critical;
        risk.risk_score = 100;
        risk.reasons.push("No activity logged yet".into());
        risk.recommendations.push("Start by logging your first day".into());
        risk.recommendations.push("Set a daily reminder to log your progress".into());
        return risk;
    };

    let last_week = &logs[..logs.len().min(RECENT_WINDOW)];
    let window = last_week.len() as f64;

    // 1. logging recency
    let days_since_last_log = (today - latest.log_date).num_days();
    if days_since_last_log > STALE_LOG_DAYS {
        risk.flag(
            25,
            true,
            format!("No log for {days_since_last_log} days"),
            &[
                "Resume daily logging to maintain momentum",
                "Set a daily reminder at a consistent time",
            ],
        );
    } else if days_since_last_log == 0 {
        risk.note("Logged today - great consistency!".into());
    }

    // 2. workout adherence
    let workouts = last_week.iter().filter(|l| l.workout_completed).count();
    let workout_rate = workouts as f64 / window * 100.0;
    if workout_rate < WORKOUT_RATE_FLOOR {
        risk.flag(
            30,
            true,
            format!(
                "Only {workouts} workouts in last 7 days ({}%)",
                workout_rate.round()
            ),
            &[
                "Try shorter 15-20 minute workouts",
                "Schedule workouts at your highest energy time",
            ],
        );
    } else if workout_rate >= WORKOUT_RATE_STRONG {
        risk.note(format!(
            "Strong workout consistency: {}%",
            workout_rate.round()
        ));
    }

    // 3. diet adherence
    let diet_days = last_week.iter().filter(|l| l.diet_followed).count();
    let diet_rate = diet_days as f64 / window * 100.0;
    if diet_rate < DIET_RATE_FLOOR {
        risk.flag(
            25,
            true,
            format!("Diet adherence at {}% (last 7 days)", diet_rate.round()),
            &[
                "Meal prep on Sundays to stay on track",
                "Focus on one meal at a time",
            ],
        );
    } else if diet_rate >= DIET_RATE_STRONG {
        risk.note(format!("Excellent nutrition: {}% adherence", diet_rate.round()));
    }

    // 4. leading run of days with nothing done
    let missed_in_a_row = last_week.iter().take_while(|l| l.is_missed()).count();
    if missed_in_a_row >= MISSED_DAYS_LIMIT {
        risk.flag(
            20,
            true,
            format!("{missed_in_a_row} consecutive days with no activity"),
            &[
                "Start fresh today - even small progress counts",
                "Talk to AI Coach for motivation",
            ],
        );
    }

    // 5. habit score
    match habit_score.filter(|s| *s != 0) {
        Some(score) if score < HABIT_SCORE_FLOOR => risk.flag(
            15,
            true,
            format!("Habit score below 50 (currently {score})"),
            &["Focus on building one habit at a time"],
        ),
        Some(score) if score >= HABIT_SCORE_STRONG => {
            risk.note(format!("Outstanding habit score: {score}/100"))
        }
        _ => {}
    }

    // 6. streak
    if streak == 0 {
        risk.flag(
            10,
            false,
            "No active streak".into(),
            &["Start a new streak today!"],
        );
    } else if streak >= STREAK_STRONG {
        risk.note(format!("Amazing {streak}-day streak! 🔥"));
    }

    // 7. energy
    let low_energy_days = last_week.iter().filter(|l| l.has_low_energy()).count();
    if low_energy_days >= LOW_ENERGY_DAYS_LIMIT {
        risk.flag(
            10,
            false,
            format!("Low energy reported {low_energy_days} days this week"),
            &[
                "Review sleep quality and hydration",
                "Consider lighter workout intensity",
            ],
        );
    }

    // 8. sleep; unrecorded (zero) nights stay in the average
    let avg_sleep = last_week.iter().map(|l| l.sleep_hours).sum::<f64>() / window;
    if avg_sleep > 0.0 && avg_sleep < SLEEP_FLOOR_HOURS {
        risk.flag(
            10,
            false,
            format!("Average sleep: {avg_sleep:.1} hours (below 6)"),
            &[
                "Prioritize 7-9 hours of sleep",
                "Sleep is crucial for recovery and results",
            ],
        );
    } else if (SLEEP_HEALTHY_HOURS.0..=SLEEP_HEALTHY_HOURS.1).contains(&avg_sleep) {
        risk.note(format!("Great sleep: {avg_sleep:.1} hours average"));
    }

    risk.risk_level = RiskLevel::from_score(risk.risk_score);

    if !risk.at_risk {
        risk.note("You're doing great! Keep up the momentum".into());
        risk.recommendations.push("Continue your current routine".into());
        risk.recommendations.push("Consider increasing intensity gradually".into());
    }

    risk
}
