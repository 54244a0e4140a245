use chrono::NaiveDate;

use crate::models::daily_log::DailyLog;

/// Consecutive days, counting back from `today`, on which both the workout
/// and the diet were kept.
///
/// Position `i` in `logs` must hold the log for `today - i`. A missing day,
/// a misaligned date or a day with either flag unset ends the streak; there
/// is no grace day.
pub fn current_streak(logs: &[DailyLog], today: NaiveDate) -> i32 {
    let mut streak = 0i32;
    let mut expected = today;

    for log in logs {
        if log.log_date != expected || !log.is_fully_adherent() {
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(prev) => expected = prev,
            None => break,
        }
    }

    streak
}

/// Longest run of consecutive fully-adherent days anywhere in `logs`.
pub fn longest_streak(logs: &[DailyLog]) -> i32 {
    let mut longest = 0i32;
    let mut run = 0i32;
    let mut prev_date: Option<NaiveDate> = None;

    // logs arrive newest first, walk them oldest first
    for log in logs.iter().rev() {
        if !log.is_fully_adherent() {
            run = 0;
            prev_date = None;
            continue;
        }
        run = match prev_date {
            Some(prev) if prev.succ_opt() == Some(log.log_date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev_date = Some(log.log_date);
    }

    longest
}
