//! Read-only projections built at the repository boundary.
//!
//! Views consume these lightweight structs instead of the persisted entities;
//! a plain mapping function replaces any runtime display-adapter machinery.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::benefit::{Benefit, BenefitStatus, Category};
use super::ids::BenefitId;
use crate::period::Cadence;

/// Everything a list row or dashboard tile needs to render one benefit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitPreview {
    pub benefit_id: BenefitId,
    pub card_name: String,
    pub name: String,
    pub value: f64,
    pub category: Category,
    pub status: BenefitStatus,
    pub cadence: Cadence,
    pub period_end: Date,
    /// Days until the period ends; negative once elapsed.
    pub days_left: i32,
}

/// Project a benefit into its display shape.
pub fn preview(benefit: &Benefit, card_name: &str, today: Date) -> BenefitPreview {
    BenefitPreview {
        benefit_id: benefit.benefit_id,
        card_name: card_name.to_string(),
        name: benefit.name.clone(),
        value: benefit.value,
        category: benefit.category,
        status: benefit.status,
        cadence: benefit.cadence(),
        period_end: benefit.period_end,
        days_left: benefit.days_left(today),
    }
}
