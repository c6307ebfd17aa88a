//! Calendar arithmetic helpers shared by the period calculator.
//!
//! Period boundaries are computed with direct year/month arithmetic instead of
//! `jiff::Span` round-trips: cadence math only ever needs "same day N months
//! later, clamped to month length" and whole-month distances, both of which
//! are simpler (and harder to get subtly wrong) written out by hand.

use jiff::civil::Date;

/// The day after `d`. Saturates at `Date::MAX` rather than failing.
#[inline]
pub fn next_day(d: Date) -> Date {
    d.tomorrow().unwrap_or(d)
}

/// The day before `d`. Saturates at `Date::MIN` rather than failing.
#[inline]
pub fn prev_day(d: Date) -> Date {
    d.yesterday().unwrap_or(d)
}

/// Offset a date by whole days.
#[inline]
pub fn offset_days(d: Date, n: i32) -> Date {
    let duration = jiff::SignedDuration::from_hours(n as i64 * 24);
    d.checked_add(duration).unwrap_or(d)
}

/// Same day-of-month `months` later (or earlier, when negative), with the day
/// clamped to the target month's length. Jan 31 + 1 month = Feb 28/29.
pub fn add_months(d: Date, months: i32) -> Date {
    let total = d.year() as i32 * 12 + d.month() as i32 - 1 + months;
    let year = total.div_euclid(12) as i16;
    let month = (total.rem_euclid(12) + 1) as i8;
    day_of_month(year, month, d.day())
}

/// Build a date from year/month with the day clamped into the month.
pub fn day_of_month(year: i16, month: i8, day: i8) -> Date {
    let max = jiff::civil::date(year, month, 1).days_in_month();
    jiff::civil::date(year, month, day.clamp(1, max))
}

/// Number of whole months elapsed from `start` to `end`.
///
/// Counts month components and subtracts one when the end's day-of-month has
/// not yet reached the start's, i.e. Jan 1 → Mar 31 is 2 whole months while
/// Jan 1 → Apr 1 is 3. Cadence inference depends on exactly this convention.
pub fn whole_months_between(start: Date, end: Date) -> i32 {
    let mut months = (end.year() as i32 - start.year() as i32) * 12
        + (end.month() as i32 - start.month() as i32);
    if end.day() < start.day() {
        months -= 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_next_day_month_boundary() {
        assert_eq!(next_day(date(2025, 1, 31)), date(2025, 2, 1));
        assert_eq!(next_day(date(2025, 4, 30)), date(2025, 5, 1));
    }

    #[test]
    fn test_next_day_year_boundary() {
        assert_eq!(next_day(date(2025, 12, 31)), date(2026, 1, 1));
    }

    #[test]
    fn test_next_day_february() {
        // 2024 is a leap year, 2025 is not
        assert_eq!(next_day(date(2024, 2, 28)), date(2024, 2, 29));
        assert_eq!(next_day(date(2024, 2, 29)), date(2024, 3, 1));
        assert_eq!(next_day(date(2025, 2, 28)), date(2025, 3, 1));
    }

    #[test]
    fn test_prev_day() {
        assert_eq!(prev_day(date(2025, 3, 1)), date(2025, 2, 28));
        assert_eq!(prev_day(date(2024, 3, 1)), date(2024, 2, 29));
        assert_eq!(prev_day(date(2026, 1, 1)), date(2025, 12, 31));
    }

    #[test]
    fn test_offset_days() {
        assert_eq!(offset_days(date(2025, 6, 15), 0), date(2025, 6, 15));
        assert_eq!(offset_days(date(2025, 6, 30), 1), date(2025, 7, 1));
        assert_eq!(offset_days(date(2025, 3, 31), -7), date(2025, 3, 24));
    }

    #[test]
    fn test_add_months_basic() {
        assert_eq!(add_months(date(2025, 1, 15), 1), date(2025, 2, 15));
        assert_eq!(add_months(date(2025, 1, 15), 3), date(2025, 4, 15));
        assert_eq!(add_months(date(2025, 11, 15), 2), date(2026, 1, 15));
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2025, 3, 31), 1), date(2025, 4, 30));
    }

    #[test]
    fn test_add_months_negative() {
        assert_eq!(add_months(date(2025, 1, 15), -1), date(2024, 12, 15));
        assert_eq!(add_months(date(2025, 3, 31), -1), date(2025, 2, 28));
    }

    #[test]
    fn test_whole_months_between() {
        assert_eq!(whole_months_between(date(2025, 1, 1), date(2025, 1, 31)), 0);
        assert_eq!(whole_months_between(date(2025, 1, 1), date(2025, 2, 1)), 1);
        // An inclusive-end quarter registers as 2 whole months
        assert_eq!(whole_months_between(date(2025, 1, 1), date(2025, 3, 31)), 2);
        assert_eq!(whole_months_between(date(2025, 1, 1), date(2025, 12, 31)), 11);
        assert_eq!(whole_months_between(date(2025, 1, 15), date(2025, 2, 14)), 0);
    }

    #[test]
    fn test_day_of_month_clamps() {
        assert_eq!(day_of_month(2025, 2, 31), date(2025, 2, 28));
        assert_eq!(day_of_month(2024, 2, 31), date(2024, 2, 29));
        assert_eq!(day_of_month(2025, 6, 10), date(2025, 6, 10));
    }
}
