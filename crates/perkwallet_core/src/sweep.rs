//! The reset sweep: a startup pass that rolls every elapsed benefit.
//!
//! Runs once per launch (and on demand). Failures are isolated per benefit:
//! one bad row is recorded and skipped, the rest of the sweep continues, and
//! each individual reset is all-or-nothing through the repository.

use jiff::civil::DateTime;

use crate::error::RepoError;
use crate::model::{BenefitId, LedgerEntryId};
use crate::repository::PerkRepository;
use crate::store::PerkStore;
use crate::transitions::needs_reset;

/// What a sweep pass found and did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepOutcome {
    /// How many benefits were examined.
    pub checked: usize,
    /// Benefits rolled into a fresh period.
    pub rolled: Vec<BenefitId>,
    /// Auto-expiry write-offs created for unused, elapsed benefits.
    pub expired_entries: Vec<LedgerEntryId>,
    /// Per-benefit failures; the sweep continued past each.
    pub failures: Vec<(BenefitId, RepoError)>,
}

impl SweepOutcome {
    /// True when nothing was due and nothing failed.
    pub fn is_quiet(&self) -> bool {
        self.rolled.is_empty() && self.failures.is_empty()
    }
}

/// Roll every benefit whose period has elapsed as of `now`.
pub fn run_reset_sweep<S: PerkStore>(repo: &mut PerkRepository<S>, now: DateTime) -> SweepOutcome {
    let benefits = repo.benefits();
    let mut outcome = SweepOutcome {
        checked: benefits.len(),
        ..SweepOutcome::default()
    };

    let due: Vec<BenefitId> = benefits
        .iter()
        .filter(|b| needs_reset(b, now.date()))
        .map(|b| b.benefit_id)
        .collect();

    for benefit_id in due {
        match repo.reset_benefit(benefit_id, now) {
            Ok(report) => {
                if report.rolled {
                    outcome.rolled.push(benefit_id);
                }
                if let Some(entry_id) = report.expired_entry {
                    outcome.expired_entries.push(entry_id);
                }
            }
            Err(err) => outcome.failures.push((benefit_id, err)),
        }
    }

    outcome
}
