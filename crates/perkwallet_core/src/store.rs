//! The persistence contract and its in-memory implementation.
//!
//! The core only needs create/read/update/delete with relationship cascade;
//! how rows reach disk is the host's concern. `MemoryStore` is the reference
//! implementation: it backs every test and, serialized whole, the host's
//! JSON snapshot persistence.

use jiff::civil::DateTime;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::{
    Benefit, BenefitId, Card, CardId, LedgerDraft, LedgerEntryId, UsageLedgerEntry,
};

/// Everything the repository needs from a backing store.
///
/// Fetches return owned clones: mutations are staged on the clone and written
/// back with `update_benefit`, which keeps each operation all-or-nothing from
/// the store's point of view. Deleting a card cascades to its benefits and
/// their ledger entries.
pub trait PerkStore {
    fn insert_card(&mut self, name: &str, issuer: Option<&str>, now: DateTime) -> CardId;
    fn card(&self, id: CardId) -> Option<Card>;
    fn cards(&self) -> Vec<Card>;
    fn delete_card(&mut self, id: CardId) -> Result<(), StoreError>;

    fn insert_benefit(&mut self, draft: BenefitDraft) -> Result<BenefitId, StoreError>;
    fn benefit(&self, id: BenefitId) -> Option<Benefit>;
    fn benefits(&self) -> Vec<Benefit>;
    fn benefits_for_card(&self, id: CardId) -> Vec<Benefit>;
    fn update_benefit(&mut self, benefit: Benefit) -> Result<(), StoreError>;

    fn insert_entry(&mut self, draft: LedgerDraft) -> LedgerEntryId;
    fn entries(&self) -> Vec<UsageLedgerEntry>;
    fn entries_for_benefit(&self, id: BenefitId) -> Vec<UsageLedgerEntry>;
    fn delete_entry(&mut self, id: LedgerEntryId) -> Result<(), StoreError>;
}

/// A benefit waiting for the store to assign its id. Owning card must exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitDraft {
    pub card_id: CardId,
    pub name: String,
    pub value: f64,
    pub category: crate::model::Category,
    pub status: crate::model::BenefitStatus,
    pub period_start: jiff::civil::Date,
    pub period_end: jiff::civil::Date,
    pub next_reset: jiff::civil::Date,
    pub cadence_override: Option<crate::period::Cadence>,
    pub reminder_lead_days: Option<i32>,
    pub created_at: DateTime,
}

/// In-memory store. Serializable so a host can snapshot it wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    cards: FxHashMap<CardId, Card>,
    benefits: FxHashMap<BenefitId, Benefit>,
    entries: FxHashMap<LedgerEntryId, UsageLedgerEntry>,
    next_card: u32,
    next_benefit: u32,
    next_entry: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PerkStore for MemoryStore {
    fn insert_card(&mut self, name: &str, issuer: Option<&str>, now: DateTime) -> CardId {
        self.next_card += 1;
        let card_id = CardId(self.next_card);
        self.cards.insert(
            card_id,
            Card {
                card_id,
                name: name.to_string(),
                issuer: issuer.map(str::to_string),
                created_at: now,
            },
        );
        card_id
    }

    fn card(&self, id: CardId) -> Option<Card> {
        self.cards.get(&id).cloned()
    }

    fn cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.cards.values().cloned().collect();
        cards.sort_by_key(|c| c.card_id);
        cards
    }

    fn delete_card(&mut self, id: CardId) -> Result<(), StoreError> {
        self.cards.remove(&id).ok_or(StoreError::CardNotFound(id))?;
        let orphaned: Vec<BenefitId> = self
            .benefits
            .values()
            .filter(|b| b.card_id == id)
            .map(|b| b.benefit_id)
            .collect();
        for benefit_id in orphaned {
            self.benefits.remove(&benefit_id);
            self.entries.retain(|_, e| e.benefit_id != benefit_id);
        }
        Ok(())
    }

    fn insert_benefit(&mut self, draft: BenefitDraft) -> Result<BenefitId, StoreError> {
        if !self.cards.contains_key(&draft.card_id) {
            return Err(StoreError::CardNotFound(draft.card_id));
        }
        self.next_benefit += 1;
        let benefit_id = BenefitId(self.next_benefit);
        self.benefits.insert(
            benefit_id,
            Benefit {
                benefit_id,
                card_id: draft.card_id,
                name: draft.name,
                value: draft.value,
                category: draft.category,
                status: draft.status,
                period_start: draft.period_start,
                period_end: draft.period_end,
                next_reset: draft.next_reset,
                cadence_override: draft.cadence_override,
                reminder_lead_days: draft.reminder_lead_days,
                last_reminded: None,
                notification_handle: None,
                created_at: draft.created_at,
                updated_at: draft.created_at,
            },
        );
        Ok(benefit_id)
    }

    fn benefit(&self, id: BenefitId) -> Option<Benefit> {
        self.benefits.get(&id).cloned()
    }

    fn benefits(&self) -> Vec<Benefit> {
        let mut benefits: Vec<Benefit> = self.benefits.values().cloned().collect();
        benefits.sort_by_key(|b| b.benefit_id);
        benefits
    }

    fn benefits_for_card(&self, id: CardId) -> Vec<Benefit> {
        let mut benefits: Vec<Benefit> = self
            .benefits
            .values()
            .filter(|b| b.card_id == id)
            .cloned()
            .collect();
        benefits.sort_by_key(|b| b.benefit_id);
        benefits
    }

    fn update_benefit(&mut self, benefit: Benefit) -> Result<(), StoreError> {
        let id = benefit.benefit_id;
        match self.benefits.get_mut(&id) {
            Some(slot) => {
                *slot = benefit;
                Ok(())
            }
            None => Err(StoreError::BenefitNotFound(id)),
        }
    }

    fn insert_entry(&mut self, draft: LedgerDraft) -> LedgerEntryId {
        self.next_entry += 1;
        let entry_id = LedgerEntryId(self.next_entry);
        self.entries.insert(entry_id, draft.into_entry(entry_id));
        entry_id
    }

    fn entries(&self) -> Vec<UsageLedgerEntry> {
        let mut entries: Vec<UsageLedgerEntry> = self.entries.values().cloned().collect();
        entries.sort_by_key(|e| e.entry_id);
        entries
    }

    fn entries_for_benefit(&self, id: BenefitId) -> Vec<UsageLedgerEntry> {
        let mut entries: Vec<UsageLedgerEntry> = self
            .entries
            .values()
            .filter(|e| e.benefit_id == id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.entry_id);
        entries
    }

    fn delete_entry(&mut self, id: LedgerEntryId) -> Result<(), StoreError> {
        self.entries
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::EntryNotFound(id))
    }
}
