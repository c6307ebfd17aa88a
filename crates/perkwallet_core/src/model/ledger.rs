//! The usage ledger - the immutable audit log of redemption events.
//!
//! Every mark-as-used and every automatic period-expiry write-off appends one
//! entry. Entries snapshot the value and names at the time of the event so
//! history survives later edits, renames, and rollovers. The only permitted
//! removal is retraction on undo; there is no update-in-place.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ids::{BenefitId, LedgerEntryId};
use crate::date_math::add_months;
use crate::period::{Cadence, period_for};

/// One redemption or auto-expiry event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLedgerEntry {
    pub entry_id: LedgerEntryId,
    pub benefit_id: BenefitId,
    /// When the event happened.
    pub used_on: Date,
    /// The benefit's period boundaries at the time of the event.
    pub period_start: Date,
    pub period_end: Date,
    /// Value captured (or written off), snapshotted from the benefit.
    pub value_redeemed: f64,
    /// True when the Reset Sweep wrote this entry for an unused, elapsed
    /// benefit; false for a manual mark-as-used.
    pub was_auto_expired: bool,
    /// Denormalized so history outlives renames and deletions.
    pub benefit_name: String,
    pub card_name: String,
}

/// A ledger entry waiting for the store to assign its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerDraft {
    pub benefit_id: BenefitId,
    pub used_on: Date,
    pub period_start: Date,
    pub period_end: Date,
    pub value_redeemed: f64,
    pub was_auto_expired: bool,
    pub benefit_name: String,
    pub card_name: String,
}

impl LedgerDraft {
    pub fn into_entry(self, entry_id: LedgerEntryId) -> UsageLedgerEntry {
        UsageLedgerEntry {
            entry_id,
            benefit_id: self.benefit_id,
            used_on: self.used_on,
            period_start: self.period_start,
            period_end: self.period_end,
            value_redeemed: self.value_redeemed,
            was_auto_expired: self.was_auto_expired,
            benefit_name: self.benefit_name,
            card_name: self.card_name,
        }
    }
}

/// Total value manually redeemed in the window of `cadence` containing
/// `reference`.
///
/// An entry belongs to the calendar month containing its period start, so a
/// quarterly redemption counts once - in the month its period opened - no
/// matter how wide the reporting window is. Wider windows are sums of their
/// sub-windows: a quarter is three months, a half is two quarters, a year is
/// two halves. Auto-expiry write-offs never count as redemptions.
pub fn sum_redeemed(entries: &[UsageLedgerEntry], cadence: Cadence, reference: Date) -> f64 {
    match cadence {
        Cadence::Monthly => entries
            .iter()
            .filter(|e| !e.was_auto_expired)
            .filter(|e| {
                e.period_start.year() == reference.year()
                    && e.period_start.month() == reference.month()
            })
            .map(|e| e.value_redeemed)
            .sum(),
        Cadence::Quarterly => sub_window_sum(entries, Cadence::Monthly, reference, cadence),
        Cadence::SemiAnnual => sub_window_sum(entries, Cadence::Quarterly, reference, cadence),
        Cadence::Annual => sub_window_sum(entries, Cadence::SemiAnnual, reference, cadence),
    }
}

/// Sum a window as the sum of its constituent sub-windows.
fn sub_window_sum(
    entries: &[UsageLedgerEntry],
    sub: Cadence,
    reference: Date,
    window: Cadence,
) -> f64 {
    let start = period_for(window, reference, None).start;
    let step = sub.months();
    (0..window.months() / step)
        .map(|i| sum_redeemed(entries, sub, add_months(start, i * step)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn entry(
        id: u64,
        benefit: u32,
        period_start: Date,
        period_end: Date,
        value: f64,
        auto: bool,
    ) -> UsageLedgerEntry {
        UsageLedgerEntry {
            entry_id: LedgerEntryId(id),
            benefit_id: BenefitId(benefit),
            used_on: period_start,
            period_start,
            period_end,
            value_redeemed: value,
            was_auto_expired: auto,
            benefit_name: format!("benefit {benefit}"),
            card_name: "Test Card".to_string(),
        }
    }

    #[test]
    fn test_monthly_window_sums_one_month() {
        let entries = vec![
            entry(1, 1, date(2025, 1, 1), date(2025, 1, 31), 100.0, false),
            entry(2, 2, date(2025, 2, 1), date(2025, 2, 28), 50.0, false),
        ];
        assert_eq!(sum_redeemed(&entries, Cadence::Monthly, date(2025, 1, 15)), 100.0);
        assert_eq!(sum_redeemed(&entries, Cadence::Monthly, date(2025, 2, 15)), 50.0);
        assert_eq!(sum_redeemed(&entries, Cadence::Monthly, date(2025, 3, 15)), 0.0);
    }

    #[test]
    fn test_quarterly_window_sums_three_months() {
        let entries = vec![
            entry(1, 1, date(2025, 1, 1), date(2025, 1, 31), 100.0, false),
            entry(2, 1, date(2025, 2, 1), date(2025, 2, 28), 100.0, false),
            entry(3, 1, date(2025, 3, 1), date(2025, 3, 31), 100.0, false),
            entry(4, 1, date(2025, 4, 1), date(2025, 4, 30), 100.0, false),
        ];
        assert_eq!(sum_redeemed(&entries, Cadence::Quarterly, date(2025, 2, 10)), 300.0);
    }

    #[test]
    fn test_quarterly_entry_counted_once_in_wider_windows() {
        // A quarterly redemption belongs to the month its period opened
        let entries = vec![entry(1, 1, date(2025, 1, 1), date(2025, 3, 31), 300.0, false)];
        assert_eq!(sum_redeemed(&entries, Cadence::Monthly, date(2025, 1, 5)), 300.0);
        assert_eq!(sum_redeemed(&entries, Cadence::Monthly, date(2025, 2, 5)), 0.0);
        assert_eq!(sum_redeemed(&entries, Cadence::Quarterly, date(2025, 3, 5)), 300.0);
        assert_eq!(sum_redeemed(&entries, Cadence::SemiAnnual, date(2025, 5, 5)), 300.0);
        assert_eq!(sum_redeemed(&entries, Cadence::Annual, date(2025, 12, 5)), 300.0);
    }

    #[test]
    fn test_annual_window_spans_both_halves() {
        let entries = vec![
            entry(1, 1, date(2025, 3, 1), date(2025, 3, 31), 40.0, false),
            entry(2, 2, date(2025, 10, 1), date(2025, 12, 31), 60.0, false),
        ];
        assert_eq!(sum_redeemed(&entries, Cadence::SemiAnnual, date(2025, 4, 1)), 40.0);
        assert_eq!(sum_redeemed(&entries, Cadence::SemiAnnual, date(2025, 9, 1)), 60.0);
        assert_eq!(sum_redeemed(&entries, Cadence::Annual, date(2025, 6, 1)), 100.0);
    }

    #[test]
    fn test_auto_expired_entries_excluded() {
        let entries = vec![
            entry(1, 1, date(2025, 1, 1), date(2025, 1, 31), 100.0, false),
            entry(2, 2, date(2025, 1, 1), date(2025, 1, 31), 999.0, true),
        ];
        assert_eq!(sum_redeemed(&entries, Cadence::Monthly, date(2025, 1, 15)), 100.0);
        assert_eq!(sum_redeemed(&entries, Cadence::Annual, date(2025, 1, 15)), 100.0);
    }

    #[test]
    fn test_entries_outside_year_excluded() {
        let entries = vec![entry(1, 1, date(2024, 12, 1), date(2024, 12, 31), 75.0, false)];
        assert_eq!(sum_redeemed(&entries, Cadence::Annual, date(2025, 1, 1)), 0.0);
        assert_eq!(sum_redeemed(&entries, Cadence::Annual, date(2024, 1, 1)), 75.0);
    }
}
