pub mod daily_log;
pub mod habit_score;
