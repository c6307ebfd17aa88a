//! The catalog contract: read-only card/benefit templates.
//!
//! Where templates come from (a bundled data file, in the host) is not the
//! core's concern; the repository only needs lookup by id to seed new cards
//! and to backfill cadence on legacy records.

use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::period::Cadence;

/// Seed data for one benefit on a catalog card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitTemplate {
    pub template_id: String,
    pub name: String,
    pub value: f64,
    pub category: Category,
    pub cadence: Cadence,
    /// Day-of-month the period resets on; None means calendar-aligned.
    #[serde(default)]
    pub anchor_day: Option<i8>,
    #[serde(default)]
    pub reminder_lead_days: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A catalog card and the benefits it ships with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub template_id: String,
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    pub benefits: Vec<BenefitTemplate>,
}

/// Read-only template lookup.
pub trait CatalogSource {
    fn card_template(&self, template_id: &str) -> Option<&CardTemplate>;
    fn benefit_template(&self, template_id: &str) -> Option<&BenefitTemplate>;
    fn card_templates(&self) -> &[CardTemplate];
}

/// The trivial source: a list of card templates held in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticCatalog {
    cards: Vec<CardTemplate>,
}

impl StaticCatalog {
    pub fn new(cards: Vec<CardTemplate>) -> Self {
        Self { cards }
    }
}

impl CatalogSource for StaticCatalog {
    fn card_template(&self, template_id: &str) -> Option<&CardTemplate> {
        self.cards.iter().find(|c| c.template_id == template_id)
    }

    fn benefit_template(&self, template_id: &str) -> Option<&BenefitTemplate> {
        self.cards
            .iter()
            .flat_map(|c| c.benefits.iter())
            .find(|b| b.template_id == template_id)
    }

    fn card_templates(&self) -> &[CardTemplate] {
        &self.cards
    }
}
