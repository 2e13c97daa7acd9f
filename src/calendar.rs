//src/calendar.rs
use chrono::{Datelike, Days, Duration, Local, NaiveDateTime, NaiveTime};

/// Number of days in the week window used for progress.
pub const DAYS_PER_WEEK: i64 = 7;

/// Source of "now" for the tracker. Boxed so tests can pin or advance time.
pub type Clock = Box<dyn Fn() -> NaiveDateTime>;

/// Reads the local wall clock.
pub fn system_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// True iff both instants fall on the same local calendar date.
/// Every day-keyed comparison in the crate goes through here.
pub fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

pub fn start_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    instant.date().and_time(NaiveTime::MIN)
}

/// Last representable moment of the instant's day.
pub fn end_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    start_of_day(instant) + Duration::days(1) - Duration::nanoseconds(1)
}

/// Midnight of the Sunday that opens the week containing `instant`.
pub fn start_of_week(instant: NaiveDateTime) -> NaiveDateTime {
    let offset = i64::from(instant.weekday().num_days_from_sunday());
    start_of_day(instant) - Duration::days(offset)
}

/// Exclusive upper bound of the week containing `instant`.
pub fn end_of_week(instant: NaiveDateTime) -> NaiveDateTime {
    start_of_week(instant) + Duration::days(DAYS_PER_WEEK)
}

/// Shifts by whole calendar days on wall-clock fields; time of day is kept.
/// Saturates at the ends of the representable range.
pub fn add_days(instant: NaiveDateTime, n: i64) -> NaiveDateTime {
    let days = Days::new(n.unsigned_abs());
    let shifted = if n < 0 {
        instant.checked_sub_days(days)
    } else {
        instant.checked_add_days(days)
    };
    shifted.unwrap_or(if n < 0 {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    })
}

/// Short weekday, e.g. `Mon`.
pub fn day_label(instant: NaiveDateTime) -> String {
    instant.format("%a").to_string()
}

/// Month and day, e.g. `Oct 16`.
pub fn date_label(instant: NaiveDateTime) -> String {
    instant.format("%b %-d").to_string()
}

/// Heading used for history groups, e.g. `Fri Oct 16 2026`.
pub fn history_label(instant: NaiveDateTime) -> String {
    instant.format("%a %b %d %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    #[test]
    fn same_day_ignores_time_of_day() {
        assert!(same_day(at(2026, 10, 16, 0), at(2026, 10, 16, 23)));
        assert!(!same_day(at(2026, 10, 16, 23), at(2026, 10, 17, 0)));
    }

    #[test]
    fn week_starts_on_sunday_midnight() {
        // 2026-10-16 is a Friday
        let start = start_of_week(at(2026, 10, 16, 15));
        assert_eq!(start.weekday(), Weekday::Sun);
        assert_eq!(
            start,
            NaiveDate::from_ymd_opt(2026, 10, 11)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(end_of_week(at(2026, 10, 16, 15)), start + Duration::days(7));

        // a Sunday is the start of its own week
        assert_eq!(start_of_week(at(2026, 10, 11, 9)), start);
    }

    #[test]
    fn add_days_crosses_month_and_keeps_time() {
        let moved = add_days(at(2026, 10, 30, 8), 3);
        assert_eq!(moved, at(2026, 11, 2, 8));
        assert_eq!(add_days(moved, -3), at(2026, 10, 30, 8));
    }

    #[test]
    fn end_of_day_stays_on_same_date() {
        let instant = at(2026, 2, 28, 6);
        assert!(same_day(end_of_day(instant), instant));
        assert!(!same_day(end_of_day(instant) + Duration::nanoseconds(1), instant));
    }

    #[test]
    fn labels() {
        let instant = at(2026, 10, 6, 12);
        assert_eq!(day_label(instant), "Tue");
        assert_eq!(date_label(instant), "Oct 6");
        assert_eq!(history_label(instant), "Tue Oct 06 2026");
    }

    #[test]
    fn add_days_saturates_instead_of_overflowing() {
        let instant = at(2026, 10, 16, 9);
        assert_eq!(add_days(instant, -3).date(), at(2026, 10, 13, 9).date());
        assert_eq!(add_days(NaiveDateTime::MAX, 1), NaiveDateTime::MAX);
        assert_eq!(add_days(NaiveDateTime::MIN, -1), NaiveDateTime::MIN);
        assert_eq!(add_days(instant, i64::MAX), NaiveDateTime::MAX);
    }
}
