//! The benefit state machine.
//!
//! Transitions mutate the benefit in place and hand any ledger consequence
//! back to the caller as a draft; nothing here touches the store, so every
//! transition is a synchronous pure computation that the repository persists
//! (or discards, on error) as a unit.
//!
//! Legal transitions:
//! - available → used (`mark_used`, appends a manual ledger entry)
//! - used → available (`undo_mark_used`, retracts that entry)
//! - any → available (`reset_for_new_period`, when the period has elapsed;
//!   an unused benefit is first written off with an auto-expiry entry)

use jiff::civil::{Date, DateTime};

use crate::error::StateError;
use crate::model::{Benefit, BenefitStatus, LedgerDraft};
use crate::period::period_for;

/// Whether the benefit's current period has elapsed.
pub fn needs_reset(benefit: &Benefit, today: Date) -> bool {
    today >= benefit.next_reset
}

/// Redeem an available benefit.
///
/// Returns the ledger draft recording the redemption; the caller must
/// persist both the mutated benefit and the entry together.
pub fn mark_used(
    benefit: &mut Benefit,
    card_name: &str,
    now: DateTime,
) -> Result<LedgerDraft, StateError> {
    if benefit.status != BenefitStatus::Available {
        return Err(StateError::MarkUsedUnavailable {
            benefit_id: benefit.benefit_id,
            status: benefit.status,
        });
    }
    benefit.status = BenefitStatus::Used;
    benefit.updated_at = now;
    Ok(ledger_draft(benefit, card_name, now.date(), false))
}

/// Revert a redemption. The caller must retract the benefit's open ledger
/// entry in the same operation.
pub fn undo_mark_used(benefit: &mut Benefit, now: DateTime) -> Result<(), StateError> {
    if benefit.status != BenefitStatus::Used {
        return Err(StateError::UndoNotUsed {
            benefit_id: benefit.benefit_id,
            status: benefit.status,
        });
    }
    benefit.status = BenefitStatus::Available;
    benefit.updated_at = now;
    Ok(())
}

/// What a reset did to one benefit.
#[derive(Debug, Clone, PartialEq)]
pub enum ResetOutcome {
    /// The period has not elapsed; the benefit was left untouched.
    NotDue,
    /// The benefit rolled into a fresh period. `expired` carries the
    /// auto-expiry write-off when the prior period's value went unused.
    Rolled { expired: Option<LedgerDraft> },
}

/// Roll an elapsed benefit into the period containing `now`.
///
/// No-op when the period has not elapsed. Otherwise: an unused benefit is
/// written off first (snapshotting the value it would have captured), then
/// the period is recomputed from the effective cadence - explicit override if
/// present, else inferred from the old period - preserving a day-of-month
/// anchor when one exists. Reminder bookkeeping is cleared so the new period
/// starts with a clean slate.
pub fn reset_for_new_period(benefit: &mut Benefit, card_name: &str, now: DateTime) -> ResetOutcome {
    if !needs_reset(benefit, now.date()) {
        return ResetOutcome::NotDue;
    }

    let expired = (benefit.status == BenefitStatus::Available)
        .then(|| ledger_draft(benefit, card_name, now.date(), true));

    // Cadence and anchor must be read before the period is overwritten.
    let cadence = benefit.cadence();
    let anchor = benefit.anchor_day();
    let period = period_for(cadence, now.date(), anchor);

    benefit.period_start = period.start;
    benefit.period_end = period.end;
    benefit.next_reset = period.next_reset;
    benefit.status = BenefitStatus::Available;
    benefit.last_reminded = None;
    benefit.notification_handle = None;
    benefit.updated_at = now;

    ResetOutcome::Rolled { expired }
}

/// Push the reminder marker to `until` without touching status.
///
/// Any previously scheduled external notification is forgotten; the caller
/// is responsible for rescheduling with the scheduler it owns.
pub fn snooze(benefit: &mut Benefit, until: Date, now: DateTime) {
    benefit.last_reminded = Some(until);
    benefit.notification_handle = None;
    benefit.updated_at = now;
}

fn ledger_draft(benefit: &Benefit, card_name: &str, used_on: Date, auto: bool) -> LedgerDraft {
    LedgerDraft {
        benefit_id: benefit.benefit_id,
        used_on,
        period_start: benefit.period_start,
        period_end: benefit.period_end,
        value_redeemed: benefit.value,
        was_auto_expired: auto,
        benefit_name: benefit.name.clone(),
        card_name: card_name.to_string(),
    }
}
