use crate::clock::date_key;
use crate::models::CompletionLog;
use chrono::{Duration, NaiveDate};

/// Hard cap on the backward scan. Streaks longer than a year report as
/// 365, the scan horizon.
const SCAN_HORIZON_DAYS: u32 = 365;

/// Consecutive completed days ending the day before `today`. Today is
/// excluded: it may still be in progress and must neither break nor
/// extend a streak. Recomputed on every call; the log can change between
/// queries.
pub fn compute_streak(log: &CompletionLog, id: &str, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today - Duration::days(1);
    while streak < SCAN_HORIZON_DAYS {
        if !log.entry_for(id, &date_key(day)) {
            break;
        }
        streak += 1;
        day = day - Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(today: NaiveDate, back: i64) -> String {
        date_key(today - Duration::days(back))
    }

    #[test]
    fn empty_log_has_no_streak() {
        let log = CompletionLog::default();
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(compute_streak(&log, "a", today), 0);
    }

    #[test]
    fn three_consecutive_days_before_today() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let mut log = CompletionLog::default();
        for back in 1..=3 {
            log.toggle("a", &day(today, back));
        }
        assert_eq!(compute_streak(&log, "a", today), 3);
    }

    #[test]
    fn today_does_not_extend_the_streak() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let mut log = CompletionLog::default();
        log.toggle("a", &day(today, 0));
        assert_eq!(compute_streak(&log, "a", today), 0);

        log.toggle("a", &day(today, 1));
        assert_eq!(compute_streak(&log, "a", today), 1);
    }

    #[test]
    fn gap_truncates_the_streak() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let mut log = CompletionLog::default();
        log.toggle("a", &day(today, 1));
        log.toggle("a", &day(today, 2));
        // day 3 missing
        log.toggle("a", &day(today, 4));
        log.toggle("a", &day(today, 5));
        assert_eq!(compute_streak(&log, "a", today), 2);
    }

    #[test]
    fn recorded_false_breaks_like_an_absent_day() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let mut log = CompletionLog::default();
        log.toggle("a", &day(today, 1));
        // toggled on and back off
        log.toggle("a", &day(today, 2));
        log.toggle("a", &day(today, 2));
        log.toggle("a", &day(today, 3));
        assert_eq!(compute_streak(&log, "a", today), 1);
    }

    #[test]
    fn streak_is_capped_at_the_scan_horizon() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let mut log = CompletionLog::default();
        for back in 1..=400 {
            log.toggle("a", &day(today, back));
        }
        assert_eq!(compute_streak(&log, "a", today), 365);
    }

    #[test]
    fn streaks_are_per_quest() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let mut log = CompletionLog::default();
        log.toggle("a", &day(today, 1));
        log.toggle("a", &day(today, 2));
        log.toggle("b", &day(today, 1));
        assert_eq!(compute_streak(&log, "a", today), 2);
        assert_eq!(compute_streak(&log, "b", today), 1);
    }
}
