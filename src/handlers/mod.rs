pub mod daily_logs;
pub mod habit_scores;
pub mod health;
