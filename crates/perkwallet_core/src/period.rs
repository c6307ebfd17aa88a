//! Renewal cadences and period boundary calculation.
//!
//! A benefit's period is the inclusive `[start, end]` date range it is
//! available (or already used) for. `next_reset` is always the day after
//! `end`, which is also the start of the following period, so consecutive
//! periods tile the calendar with no gaps and no overlap.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::{add_months, day_of_month, next_day, prev_day, whole_months_between};

/// How often a benefit renews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cadence {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl Cadence {
    /// Every cadence, finest first.
    pub const ALL: [Cadence; 4] = [
        Cadence::Monthly,
        Cadence::Quarterly,
        Cadence::SemiAnnual,
        Cadence::Annual,
    ];

    /// How many periods of this cadence fit in a calendar year.
    pub fn periods_per_year(self) -> u32 {
        match self {
            Cadence::Monthly => 12,
            Cadence::Quarterly => 4,
            Cadence::SemiAnnual => 2,
            Cadence::Annual => 1,
        }
    }

    /// Length of one period in months.
    pub fn months(self) -> i32 {
        match self {
            Cadence::Monthly => 1,
            Cadence::Quarterly => 3,
            Cadence::SemiAnnual => 6,
            Cadence::Annual => 12,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Cadence::Monthly => "monthly",
            Cadence::Quarterly => "quarterly",
            Cadence::SemiAnnual => "semi-annual",
            Cadence::Annual => "annual",
        }
    }
}

/// One period's boundaries. `end` is the last day *of* the period; the period
/// after this one begins on `next_reset = end + 1 day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: Date,
    pub end: Date,
    pub next_reset: Date,
}

impl Period {
    /// Whether `date` falls inside this period (inclusive on both ends).
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Compute the period of `cadence` containing `reference`.
///
/// Quarterly, semi-annual, and annual periods are calendar-aligned
/// (Jan–Mar/Apr–Jun/..., Jan–Jun/Jul–Dec, Jan–Dec). Monthly periods are
/// calendar months unless `anchor_day` is given, in which case the period
/// starts on the most recent occurrence of that day-of-month on or before
/// `reference` and runs one month minus a day. Anchor days past the end of a
/// month clamp to its last day (anchor 31 in February starts on Feb 28/29).
pub fn period_for(cadence: Cadence, reference: Date, anchor_day: Option<i8>) -> Period {
    match (cadence, anchor_day) {
        (Cadence::Monthly, Some(day)) if day >= 1 => anchored_month(reference, day),
        _ => calendar_aligned(reference, cadence.months()),
    }
}

/// Calendar-aligned period of `span_months` containing `reference`.
fn calendar_aligned(reference: Date, span_months: i32) -> Period {
    let month0 = (reference.month() as i32 - 1) / span_months * span_months;
    let start = jiff::civil::date(reference.year(), (month0 + 1) as i8, 1);
    let end = add_months(start, span_months - 1).last_of_month();
    Period {
        start,
        end,
        next_reset: next_day(end),
    }
}

/// Monthly period anchored on a specific day-of-month.
///
/// Both boundaries are derived from the anchor, not from the (possibly
/// clamped) start day: a period that was forced to start on Feb 28 by anchor
/// 31 still ends the day before March 31. Deriving the end from the clamped
/// start instead would shift every later period earlier each time a short
/// month was crossed, breaking the contiguity of successive periods.
fn anchored_month(reference: Date, anchor: i8) -> Period {
    let this_month = day_of_month(reference.year(), reference.month(), anchor);
    let start = if reference >= this_month {
        this_month
    } else {
        // The anchor day hasn't occurred yet this month; roll back one.
        let prev = add_months(reference.first_of_month(), -1);
        day_of_month(prev.year(), prev.month(), anchor)
    };
    let after = add_months(start.first_of_month(), 1);
    let following = day_of_month(after.year(), after.month(), anchor);
    Period {
        start,
        end: prev_day(following),
        next_reset: following,
    }
}

/// Infer a cadence from a stored period's span.
///
/// Buckets are keyed on whole elapsed months. Because period ends are
/// inclusive, a clean N-month period registers as N-1 whole months (Jan 1 –
/// Mar 31 counts as 2), so each bucket is one lower than the naive reading:
/// 0–1 monthly, 2–4 quarterly, 5–7 semi-annual, 8+ annual. Rollover behaviour
/// depends on these exact boundaries; do not re-centre them without also
/// changing the period-end convention.
pub fn infer_cadence(period_start: Date, period_end: Date) -> Cadence {
    match whole_months_between(period_start, period_end) {
        m if m <= 1 => Cadence::Monthly,
        2..=4 => Cadence::Quarterly,
        5..=7 => Cadence::SemiAnnual,
        _ => Cadence::Annual,
    }
}
