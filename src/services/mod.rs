pub mod daily_logs;
