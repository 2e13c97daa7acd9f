//src/progress.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::{end_of_week, same_day, start_of_week};
use crate::store::WorkoutStore;

/// Days-per-week target, always within [`WeeklyGoal::MIN`, `WeeklyGoal::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct WeeklyGoal(u8);

impl WeeklyGoal {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    /// Reads free-form input leniently: a leading integer is honoured
    /// (`"3 days"` is 3, `"4.8"` is 4), anything else falls back to the minimum.
    pub fn parse_lenient(input: &str) -> Self {
        leading_integer(input).map_or(Self(Self::MIN), Self::clamped)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for WeeklyGoal {
    fn default() -> Self {
        Self(5)
    }
}

impl From<i64> for WeeklyGoal {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<WeeklyGoal> for i64 {
    fn from(goal: WeeklyGoal) -> Self {
        i64::from(goal.0)
    }
}

impl fmt::Display for WeeklyGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Overlong inputs saturate; they clamp to the maximum anyway.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklyProgress {
    pub count: u32,
    pub goal: WeeklyGoal,
    pub ratio: f64,
}

impl WeeklyProgress {
    pub fn new(count: u32, goal: WeeklyGoal) -> Self {
        let ratio = (f64::from(count) / f64::from(goal.get())).min(1.0);
        Self { count, goal, ratio }
    }

    pub fn goal_met(&self) -> bool {
        self.count >= u32::from(self.goal.get())
    }
}

/// Counts distinct calendar days with at least one workout inside the
/// Sunday-based week containing `reference`.
pub fn weekly_progress(store: &WorkoutStore, reference: NaiveDateTime) -> u32 {
    let start = start_of_week(reference);
    let end = end_of_week(reference);
    let mut days: Vec<NaiveDateTime> = Vec::new();
    for workout in store.all().iter().filter(|w| w.date >= start && w.date < end) {
        if !days.iter().any(|&d| same_day(d, workout.date)) {
            days.push(workout.date);
        }
    }
    days.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_goal_parsing() {
        assert_eq!(WeeklyGoal::parse_lenient("abc").get(), 1);
        assert_eq!(WeeklyGoal::parse_lenient("").get(), 1);
        assert_eq!(WeeklyGoal::parse_lenient("0").get(), 1);
        assert_eq!(WeeklyGoal::parse_lenient("-2").get(), 1);
        assert_eq!(WeeklyGoal::parse_lenient("3 days").get(), 3);
        assert_eq!(WeeklyGoal::parse_lenient(" 4.8").get(), 4);
        assert_eq!(WeeklyGoal::parse_lenient("12").get(), 7);
        assert_eq!(WeeklyGoal::parse_lenient("99999999999999999999999").get(), 7);
    }

    #[test]
    fn ratio_is_capped() {
        let goal = WeeklyGoal::clamped(2);
        assert!((WeeklyProgress::new(1, goal).ratio - 0.5).abs() < f64::EPSILON);
        let over = WeeklyProgress::new(4, goal);
        assert!((over.ratio - 1.0).abs() < f64::EPSILON);
        assert!(over.goal_met());
    }
}
