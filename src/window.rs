//src/window.rs
use chrono::NaiveDateTime;
use strum_macros::Display;
use tracing::debug;

use crate::calendar::add_days;

/// Number of days shown side by side.
pub const WINDOW_DAYS: usize = 5;
/// How far before today the window opens after a reset.
const DAYS_BEFORE_TODAY: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    const fn offset(self) -> i64 {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// Sliding window of consecutive days. Independent of the edit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    anchor: NaiveDateTime,
}

impl DateWindow {
    /// Window with `today` in the middle slot.
    pub fn centered_on(today: NaiveDateTime) -> Self {
        Self {
            anchor: add_days(today, -DAYS_BEFORE_TODAY),
        }
    }

    pub const fn anchor(&self) -> NaiveDateTime {
        self.anchor
    }

    pub fn step(&mut self, direction: Direction) {
        self.anchor = add_days(self.anchor, direction.offset());
        debug!(%direction, anchor = %self.anchor.date(), "stepped window");
    }

    pub fn visible_days(&self) -> [NaiveDateTime; WINDOW_DAYS] {
        std::array::from_fn(|i| add_days(self.anchor, i as i64))
    }

    pub fn jump_to_today(&mut self, today: NaiveDateTime) {
        *self = Self::centered_on(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn visible_days_are_consecutive() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 31)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let window = DateWindow::centered_on(today);
        let days = window.visible_days();
        assert_eq!(days[2], today);
        assert_eq!(days[0], add_days(today, -2));
        assert_eq!(days[4].date(), NaiveDate::from_ymd_opt(2027, 1, 2).unwrap());
    }
}
