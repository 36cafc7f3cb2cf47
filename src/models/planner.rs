// SPDX-License-Identifier: MIT

//! Task list, completion streak, and study-minutes log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One to-do item in the local task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub class_name: String,
    /// Optional due date, "YYYY-MM-DD".
    #[serde(default)]
    pub due: String,
    #[serde(default)]
    pub done: bool,
    /// Day the task was completed, "YYYY-MM-DD"; empty while open.
    #[serde(default)]
    pub done_date: String,
    /// RFC 3339 creation timestamp.
    #[serde(default)]
    pub created: String,
}

/// Consecutive-day completion streak.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    #[serde(default)]
    pub count: u32,
    /// Last day a completion counted, "YYYY-MM-DD".
    #[serde(default)]
    pub last_done: String,
}

impl StreakRecord {
    /// Register a completion on `today`.
    ///
    /// At most one bump per day: +1 if the previous bump was yesterday,
    /// reset to 1 after a gap. Returns `false` if today already counted.
    pub fn bump(&mut self, today: NaiveDate) -> bool {
        let today_str = today.format("%Y-%m-%d").to_string();
        if self.last_done == today_str {
            return false;
        }

        let yesterday = today.pred_opt().map(|d| d.format("%Y-%m-%d").to_string());
        if yesterday.as_deref() == Some(self.last_done.as_str()) {
            self.count += 1;
        } else {
            self.count = 1;
        }
        self.last_done = today_str;
        true
    }
}

/// Minutes studied per day, keyed by "YYYY-MM-DD".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyLog {
    #[serde(flatten)]
    pub minutes_by_day: HashMap<String, u32>,
}

impl StudyLog {
    /// Accumulate minutes into one day's bucket.
    pub fn add(&mut self, day: &str, minutes: u32) {
        *self.minutes_by_day.entry(day.to_string()).or_insert(0) += minutes;
    }

    /// Minutes for the `n` days ending at `today`, oldest first. Days with
    /// no entry report zero.
    pub fn last_days(&self, today: NaiveDate, n: usize) -> Vec<(String, u32)> {
        let mut out = Vec::with_capacity(n);
        for offset in (0..n).rev() {
            let day = today - chrono::Duration::days(offset as i64);
            let key = day.format("%Y-%m-%d").to_string();
            let minutes = self.minutes_by_day.get(&key).copied().unwrap_or(0);
            out.push((key, minutes));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let mut s = StreakRecord::default();
        assert!(s.bump(day("2026-03-01")));
        assert_eq!(s.count, 1);
        assert!(s.bump(day("2026-03-02")));
        assert_eq!(s.count, 2);
    }

    #[test]
    fn streak_bumps_once_per_day() {
        let mut s = StreakRecord::default();
        assert!(s.bump(day("2026-03-01")));
        assert!(!s.bump(day("2026-03-01")));
        assert_eq!(s.count, 1);
    }

    #[test]
    fn streak_resets_after_gap() {
        let mut s = StreakRecord::default();
        s.bump(day("2026-03-01"));
        s.bump(day("2026-03-02"));
        assert!(s.bump(day("2026-03-05")));
        assert_eq!(s.count, 1);
    }

    #[test]
    fn study_log_accumulates_within_a_day() {
        let mut log = StudyLog::default();
        log.add("2026-03-01", 25);
        log.add("2026-03-01", 10);
        assert_eq!(log.minutes_by_day.get("2026-03-01"), Some(&35));
    }

    #[test]
    fn last_days_fills_missing_with_zero() {
        let mut log = StudyLog::default();
        log.add("2026-03-02", 30);
        let series = log.last_days(day("2026-03-03"), 3);
        assert_eq!(
            series,
            vec![
                ("2026-03-01".to_string(), 0),
                ("2026-03-02".to_string(), 30),
                ("2026-03-03".to_string(), 0),
            ]
        );
    }
}
