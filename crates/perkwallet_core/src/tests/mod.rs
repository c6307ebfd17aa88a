//! Integration tests for the benefit-tracking core
//!
//! Tests are organized by topic:
//! - `transitions` - State machine transitions and ledger invariants
//! - `repository` - Facade operations, cascade deletion, historical metrics
//! - `sweep` - The startup reset sweep
//!
//! Unit tests for period math, cadence inference, ledger windowing, and
//! metrics normalization live alongside their modules.


use jiff::civil::DateTime;

use crate::catalog::BenefitTemplate;
use crate::model::{CardId, Category};
use crate::period::Cadence;
use crate::repository::PerkRepository;
use crate::store::MemoryStore;

pub(crate) fn template(name: &str, value: f64, cadence: Cadence) -> BenefitTemplate {
    BenefitTemplate {
        template_id: name.to_ascii_lowercase().replace(' ', "-"),
        name: name.to_string(),
        value,
        category: Category::Other,
        cadence,
        anchor_day: None,
        reminder_lead_days: Some(3),
        description: None,
    }
}

/// A repository holding one card with no benefits yet.
pub(crate) fn empty_repo(now: DateTime) -> (PerkRepository<MemoryStore>, CardId) {
    let mut repo = PerkRepository::new(MemoryStore::new());
    let card_id = repo.add_card("Sapphire Reserve", Some("Chase"), now);
    (repo, card_id)
}
