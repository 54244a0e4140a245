//! # Habit analytics
//!
//! Pure functions that turn a user's daily logs into streaks, adherence
//! percentages, a weekly habit score and a drop-off risk report.
//!
//! Nothing in here touches the database or reads the clock: callers fetch
//! the logs and pass the reference date (or instant) explicitly. Logs are
//! always expected most-recent-first, the order the store returns them in.

pub mod adherence;
pub mod dropoff_risk;
pub mod habit_score;
pub mod streak;

pub const WEEK_DAYS: i64 = 7;

/// Integer division rounding toward positive infinity, for either sign of `a`.
pub(crate) fn ceil_div(a: i64, b: i64) -> i64 {
    -((-a).div_euclid(b))
}


#[cfg(test)]
mod tests {
    use super::ceil_div;

    #[test]
    fn ceil_div_matches_math_ceil() {
        assert_eq!(ceil_div(0, 7), 0);
        assert_eq!(ceil_div(1, 7), 1);
        assert_eq!(ceil_div(7, 7), 1);
        assert_eq!(ceil_div(8, 7), 2);
        assert_eq!(ceil_div(-3, 7), 0);
        assert_eq!(ceil_div(-8, 7), -1);
    }
}
