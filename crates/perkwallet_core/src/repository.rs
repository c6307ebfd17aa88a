//! The repository facade - the single writer for all benefit mutations.
//!
//! UI actions and the reset sweep go through here. Each mutating method is a
//! synchronous read-modify-write: fetch a clone from the store, run the
//! state-machine transition on it, then persist benefit and ledger changes
//! together. A transition that fails leaves the store untouched.

use jiff::civil::{Date, DateTime};

use crate::catalog::{BenefitTemplate, CatalogSource};
use crate::error::{RepoError, StoreError};
use crate::metrics::{self, PeriodMetrics};
use crate::model::{
    Benefit, BenefitId, BenefitPreview, BenefitStatus, Card, CardId, LedgerEntryId,
    UsageLedgerEntry, preview, sum_redeemed,
};
use crate::period::{Cadence, period_for};
use crate::store::{BenefitDraft, PerkStore};
use crate::transitions::{self, ResetOutcome};

/// What `reset_benefit` did, with the ids the caller may want to log.
#[derive(Debug, Clone, PartialEq)]
pub struct ResetReport {
    /// False when the benefit was not yet due and nothing changed.
    pub rolled: bool,
    /// The auto-expiry ledger entry written for an unused benefit.
    pub expired_entry: Option<LedgerEntryId>,
}

pub struct PerkRepository<S: PerkStore> {
    store: S,
}

impl<S: PerkStore> PerkRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct store access for host-level maintenance (seeding, migration).
    /// Normal mutations go through the typed methods below.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // === Cards ===

    pub fn add_card(&mut self, name: &str, issuer: Option<&str>, now: DateTime) -> CardId {
        self.store.insert_card(name, issuer, now)
    }

    /// Add a card from the catalog, cloning every benefit template it ships
    /// with into a live benefit whose first period contains `now`.
    pub fn add_card_from_catalog(
        &mut self,
        catalog: &dyn CatalogSource,
        template_id: &str,
        now: DateTime,
    ) -> Result<CardId, RepoError> {
        let template = catalog
            .card_template(template_id)
            .ok_or_else(|| RepoError::TemplateNotFound(template_id.to_string()))?
            .clone();
        let card_id = self
            .store
            .insert_card(&template.name, template.issuer.as_deref(), now);
        for benefit in &template.benefits {
            self.add_benefit(card_id, benefit, now)?;
        }
        Ok(card_id)
    }

    pub fn delete_card(&mut self, id: CardId) -> Result<(), RepoError> {
        self.store.delete_card(id)?;
        Ok(())
    }

    pub fn cards(&self) -> Vec<Card> {
        self.store.cards()
    }

    // === Benefits ===

    /// Seed one benefit on an existing card from a template.
    pub fn add_benefit(
        &mut self,
        card_id: CardId,
        template: &BenefitTemplate,
        now: DateTime,
    ) -> Result<BenefitId, RepoError> {
        let period = period_for(template.cadence, now.date(), template.anchor_day);
        let id = self.store.insert_benefit(BenefitDraft {
            card_id,
            name: template.name.clone(),
            value: template.value,
            category: template.category,
            status: BenefitStatus::Available,
            period_start: period.start,
            period_end: period.end,
            next_reset: period.next_reset,
            cadence_override: Some(template.cadence),
            reminder_lead_days: template.reminder_lead_days,
            created_at: now,
        })?;
        Ok(id)
    }

    pub fn benefit(&self, id: BenefitId) -> Result<Benefit, RepoError> {
        self.store
            .benefit(id)
            .ok_or(RepoError::Store(StoreError::BenefitNotFound(id)))
    }

    pub fn benefits(&self) -> Vec<Benefit> {
        self.store.benefits()
    }

    // === State transitions ===

    /// Redeem an available benefit, appending its ledger entry.
    pub fn mark_used(&mut self, id: BenefitId, now: DateTime) -> Result<LedgerEntryId, RepoError> {
        let mut benefit = self.benefit(id)?;
        let card = self.card_of(&benefit)?;
        let draft = transitions::mark_used(&mut benefit, &card.name, now)?;
        self.store.update_benefit(benefit)?;
        Ok(self.store.insert_entry(draft))
    }

    /// Revert a redemption, retracting its ledger entry.
    pub fn undo_mark_used(&mut self, id: BenefitId, now: DateTime) -> Result<(), RepoError> {
        let mut benefit = self.benefit(id)?;
        transitions::undo_mark_used(&mut benefit, now)?;
        // The staged mutation is discarded if the open entry is missing;
        // nothing has been persisted yet.
        let entry = self
            .open_entry(&benefit)
            .ok_or(RepoError::LedgerOutOfSync(id))?;
        self.store.update_benefit(benefit)?;
        self.store.delete_entry(entry.entry_id)?;
        Ok(())
    }

    /// Push the benefit's reminder out to `until`.
    pub fn snooze(&mut self, id: BenefitId, until: Date, now: DateTime) -> Result<(), RepoError> {
        let mut benefit = self.benefit(id)?;
        transitions::snooze(&mut benefit, until, now);
        self.store.update_benefit(benefit)?;
        Ok(())
    }

    /// Roll one benefit into a fresh period if it is due. No-op otherwise.
    pub fn reset_benefit(&mut self, id: BenefitId, now: DateTime) -> Result<ResetReport, RepoError> {
        let mut benefit = self.benefit(id)?;
        let card = self.card_of(&benefit)?;
        match transitions::reset_for_new_period(&mut benefit, &card.name, now) {
            ResetOutcome::NotDue => Ok(ResetReport {
                rolled: false,
                expired_entry: None,
            }),
            ResetOutcome::Rolled { expired } => {
                self.store.update_benefit(benefit)?;
                let expired_entry = expired.map(|draft| self.store.insert_entry(draft));
                Ok(ResetReport {
                    rolled: true,
                    expired_entry,
                })
            }
        }
    }

    // === Read-only projections ===

    pub fn previews(&self, today: Date) -> Vec<BenefitPreview> {
        self.store
            .benefits()
            .iter()
            .map(|b| {
                let card_name = self
                    .store
                    .card(b.card_id)
                    .map(|c| c.name)
                    .unwrap_or_default();
                preview(b, &card_name, today)
            })
            .collect()
    }

    pub fn history(&self) -> Vec<UsageLedgerEntry> {
        self.store.entries()
    }

    /// Live dashboard metrics for the window of `target` containing
    /// `reference`, redeemed value derived from current statuses.
    pub fn metrics(&self, target: Cadence, reference: Date) -> PeriodMetrics {
        metrics::calculate(&self.store.benefits(), target, reference)
    }

    /// Metrics for a (typically closed) window with redeemed value taken
    /// from the usage ledger instead of live status.
    pub fn metrics_with_history(&self, target: Cadence, reference: Date) -> PeriodMetrics {
        let redeemed = sum_redeemed(&self.store.entries(), target, reference);
        metrics::calculate_with_history(&self.store.benefits(), redeemed, target, reference)
    }

    // === Legacy data repair ===

    /// Backfill explicit cadences on benefits that predate the override
    /// field, by matching benefit names against catalog templates. Inferred
    /// cadence keeps working without this; the backfill just pins records to
    /// their catalog truth. Returns how many benefits were updated.
    pub fn backfill_cadences(
        &mut self,
        catalog: &dyn CatalogSource,
        now: DateTime,
    ) -> Result<usize, RepoError> {
        let mut updated = 0;
        for mut benefit in self.store.benefits() {
            if benefit.cadence_override.is_some() {
                continue;
            }
            let template = catalog
                .card_templates()
                .iter()
                .flat_map(|c| c.benefits.iter())
                .find(|t| t.name == benefit.name);
            if let Some(template) = template {
                benefit.cadence_override = Some(template.cadence);
                benefit.updated_at = now;
                self.store.update_benefit(benefit)?;
                updated += 1;
            }
        }
        Ok(updated)
    }

    fn card_of(&self, benefit: &Benefit) -> Result<Card, RepoError> {
        self.store
            .card(benefit.card_id)
            .ok_or(RepoError::Store(StoreError::CardNotFound(benefit.card_id)))
    }

    /// The single non-retracted manual entry backing a `Used` status in the
    /// benefit's current period.
    fn open_entry(&self, benefit: &Benefit) -> Option<UsageLedgerEntry> {
        self.store
            .entries_for_benefit(benefit.benefit_id)
            .into_iter()
            .find(|e| !e.was_auto_expired && e.period_start == benefit.period_start)
    }
}
