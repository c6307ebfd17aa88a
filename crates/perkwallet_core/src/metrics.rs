//! Cross-cadence value aggregation for dashboards.
//!
//! Rolling heterogeneous cadences into one reporting window needs a
//! normalization rule: a monthly $100 credit is worth $300 over a quarter,
//! while an annual credit viewed monthly is still one credit, not a twelfth
//! of one. `calculate` applies that rule; nothing here mutates state.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::model::{Benefit, BenefitStatus};
use crate::period::{Cadence, Period, period_for};

/// Aggregated value and counts for one reporting window. Derived, never
/// persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    /// Sum of benefit values, each scaled by its occurrence factor.
    pub total_value: f64,
    /// Same sum restricted to currently-available benefits.
    pub available_value: f64,
    /// Value actually captured: used benefits un-scaled (a redemption is one
    /// real-world event), or a ledger-derived figure for closed periods.
    pub redeemed_value: f64,
    pub total_count: usize,
    pub used_count: usize,
    pub available_count: usize,
}

impl PeriodMetrics {
    /// Share of the window's value already captured, as a percentage.
    /// Zero when there is no value at all; never divides by zero.
    pub fn percentage_used(&self) -> f64 {
        if self.total_value <= 0.0 {
            0.0
        } else {
            self.redeemed_value / self.total_value * 100.0
        }
    }
}

/// How many times a benefit's cadence occurs within one target period, or
/// `None` when the benefit is excluded from the window.
///
/// Finer-than-target cadences contribute multiplicatively (monthly into a
/// quarterly window → 3). Coarser cadences count once if their current
/// period overlaps the window at all, and are excluded when disjoint -
/// overlap-based inclusion, never fractional.
fn occurrence_factor(benefit: &Benefit, target: Cadence, window: &Period) -> Option<f64> {
    let per_year = benefit.cadence().periods_per_year() as f64;
    let target_per_year = target.periods_per_year() as f64;
    if per_year >= target_per_year {
        Some(per_year / target_per_year)
    } else if benefit.period_start <= window.end && benefit.period_end >= window.start {
        Some(1.0)
    } else {
        None
    }
}

/// Aggregate a set of benefits into the target window containing
/// `reference`, deriving redeemed value from live status.
///
/// `redeemed_value <= total_value` holds by construction: every included
/// used benefit contributes at least its own value to the total (the factor
/// is never below 1), and only included benefits are counted as redeemed.
pub fn calculate(benefits: &[Benefit], target: Cadence, reference: Date) -> PeriodMetrics {
    let window = period_for(target, reference, None);
    let mut metrics = PeriodMetrics::default();

    for benefit in benefits {
        let Some(factor) = occurrence_factor(benefit, target, &window) else {
            continue;
        };
        metrics.total_value += benefit.value * factor;
        metrics.total_count += 1;
        match benefit.status {
            BenefitStatus::Available => {
                metrics.available_value += benefit.value * factor;
                metrics.available_count += 1;
            }
            BenefitStatus::Used => {
                metrics.redeemed_value += benefit.value;
                metrics.used_count += 1;
            }
            BenefitStatus::Expired => {}
        }
    }

    metrics
}

/// Aggregate with a caller-supplied, ledger-derived redeemed figure.
///
/// Used when reporting a closed historical window: live statuses have rolled
/// over since, so redemption truth lives in the usage ledger
/// (`model::sum_redeemed`), not in current status.
pub fn calculate_with_history(
    benefits: &[Benefit],
    historical_redeemed: f64,
    target: Cadence,
    reference: Date,
) -> PeriodMetrics {
    let mut metrics = calculate(benefits, target, reference);
    metrics.redeemed_value = historical_redeemed;
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BenefitId, CardId, Category};
    use crate::period::period_for;
    use jiff::civil::{date, datetime};

    fn benefit(id: u32, value: f64, cadence: Cadence, status: BenefitStatus) -> Benefit {
        let created = datetime(2025, 1, 1, 9, 0, 0, 0);
        let period = period_for(cadence, date(2025, 2, 10), None);
        Benefit {
            benefit_id: BenefitId(id),
            card_id: CardId(1),
            name: format!("benefit {id}"),
            value,
            category: Category::Other,
            status,
            period_start: period.start,
            period_end: period.end,
            next_reset: period.next_reset,
            cadence_override: Some(cadence),
            reminder_lead_days: None,
            last_reminded: None,
            notification_handle: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_single_cadence_mark_one_used() {
        // $100/$50/$25 all monthly, the $100 one used
        let benefits = vec![
            benefit(1, 100.0, Cadence::Monthly, BenefitStatus::Used),
            benefit(2, 50.0, Cadence::Monthly, BenefitStatus::Available),
            benefit(3, 25.0, Cadence::Monthly, BenefitStatus::Available),
        ];
        let m = calculate(&benefits, Cadence::Monthly, date(2025, 2, 10));
        assert_eq!(m.total_value, 175.0);
        assert_eq!(m.available_value, 75.0);
        assert_eq!(m.redeemed_value, 100.0);
        assert_eq!(m.total_count, 3);
        assert_eq!(m.used_count, 1);
        assert_eq!(m.available_count, 2);
    }

    #[test]
    fn test_monthly_counts_three_times_in_quarterly_window() {
        let benefits = vec![
            benefit(1, 100.0, Cadence::Monthly, BenefitStatus::Used),
            benefit(2, 300.0, Cadence::Quarterly, BenefitStatus::Available),
        ];
        let m = calculate(&benefits, Cadence::Quarterly, date(2025, 2, 10));
        assert_eq!(m.total_value, 600.0);
        // A redemption is a single real-world event: $100, not $300
        assert_eq!(m.redeemed_value, 100.0);
        assert_eq!(m.available_value, 300.0);
    }

    #[test]
    fn test_coarser_benefit_counts_once_when_overlapping() {
        let benefits = vec![benefit(1, 400.0, Cadence::Annual, BenefitStatus::Available)];
        let m = calculate(&benefits, Cadence::Monthly, date(2025, 2, 10));
        assert_eq!(m.total_value, 400.0);
        assert_eq!(m.total_count, 1);
    }

    #[test]
    fn test_disjoint_coarser_benefit_excluded() {
        let mut b = benefit(1, 400.0, Cadence::Annual, BenefitStatus::Used);
        // Period entirely in 2024; window is a 2025 month
        b.period_start = date(2024, 1, 1);
        b.period_end = date(2024, 12, 31);
        b.next_reset = date(2025, 1, 1);
        let m = calculate(&[b], Cadence::Monthly, date(2025, 2, 10));
        assert_eq!(m.total_value, 0.0);
        assert_eq!(m.redeemed_value, 0.0);
        assert_eq!(m.total_count, 0);
    }

    #[test]
    fn test_expired_counts_toward_total_only() {
        let benefits = vec![
            benefit(1, 100.0, Cadence::Monthly, BenefitStatus::Expired),
            benefit(2, 50.0, Cadence::Monthly, BenefitStatus::Available),
        ];
        let m = calculate(&benefits, Cadence::Monthly, date(2025, 2, 10));
        assert_eq!(m.total_value, 150.0);
        assert_eq!(m.available_value, 50.0);
        assert_eq!(m.redeemed_value, 0.0);
        assert!(m.available_value + m.redeemed_value <= m.total_value);
    }

    #[test]
    fn test_percentage_used_no_division_by_zero() {
        let m = calculate(&[], Cadence::Monthly, date(2025, 2, 10));
        assert_eq!(m.percentage_used(), 0.0);

        let benefits = vec![benefit(1, 100.0, Cadence::Monthly, BenefitStatus::Used)];
        let m = calculate(&benefits, Cadence::Monthly, date(2025, 2, 10));
        assert_eq!(m.percentage_used(), 100.0);
    }

    #[test]
    fn test_redeemed_never_exceeds_total() {
        let cadences = [
            Cadence::Monthly,
            Cadence::Quarterly,
            Cadence::SemiAnnual,
            Cadence::Annual,
        ];
        for target in cadences {
            for status in [BenefitStatus::Available, BenefitStatus::Used] {
                let benefits: Vec<Benefit> = cadences
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| benefit(i as u32, 50.0 * (i + 1) as f64, c, status))
                    .collect();
                let m = calculate(&benefits, target, date(2025, 2, 10));
                assert!(
                    m.redeemed_value <= m.total_value,
                    "redeemed {} exceeded total {} for target {target:?}",
                    m.redeemed_value,
                    m.total_value
                );
            }
        }
    }

    #[test]
    fn test_with_history_overrides_redeemed_only() {
        let benefits = vec![
            benefit(1, 100.0, Cadence::Monthly, BenefitStatus::Available),
            benefit(2, 50.0, Cadence::Monthly, BenefitStatus::Available),
        ];
        let m = calculate_with_history(&benefits, 80.0, Cadence::Monthly, date(2025, 2, 10));
        assert_eq!(m.redeemed_value, 80.0);
        assert_eq!(m.total_value, 150.0);
        assert_eq!(m.available_value, 150.0);
    }
}
