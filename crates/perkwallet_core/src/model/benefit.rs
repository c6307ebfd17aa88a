//! The Benefit entity - one recurring credit tied to a card.

use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};

use super::ids::{BenefitId, CardId};
use crate::period::{Cadence, infer_cadence};

/// Where a benefit sits in its current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitStatus {
    /// Value not yet redeemed this period
    Available,
    /// Redeemed this period; exactly one open ledger entry exists
    Used,
    /// Period elapsed without redemption (transient until the next reset)
    Expired,
}

/// Spending category a benefit applies to.
///
/// The consolidated set. Retired names from older data files are folded into
/// these by `migrate::canonical_category` at load time, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dining,
    Travel,
    Shopping,
    Entertainment,
    Grocery,
    Transit,
    Wellness,
    Other,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Dining => "dining",
            Category::Travel => "travel",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Grocery => "grocery",
            Category::Transit => "transit",
            Category::Wellness => "wellness",
            Category::Other => "other",
        }
    }
}

/// A recurring credit owned by exactly one card.
///
/// Invariants maintained by the repository: `period_start <= period_end`,
/// `next_reset` is the day after `period_end`, and status is `Used` only
/// while a single non-auto-expired ledger entry for the current period
/// exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benefit {
    pub benefit_id: BenefitId,
    pub card_id: CardId,
    pub name: String,
    /// Face value of one period's credit, in dollars. Never negative.
    pub value: f64,
    pub category: Category,
    pub status: BenefitStatus,
    pub period_start: Date,
    pub period_end: Date,
    pub next_reset: Date,
    /// Explicit cadence; when absent the cadence is inferred from the span
    /// of the stored period.
    #[serde(default)]
    pub cadence_override: Option<Cadence>,
    /// Days before period end to remind the user. None disables reminders.
    #[serde(default)]
    pub reminder_lead_days: Option<i32>,
    /// When the user was last reminded (or snoozed until).
    #[serde(default)]
    pub last_reminded: Option<Date>,
    /// Opaque handle for whatever the external scheduler was last asked to
    /// do for this benefit. Cleared on rollover and snooze.
    #[serde(default)]
    pub notification_handle: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Benefit {
    /// Effective cadence: the explicit override when present, otherwise
    /// inferred from the stored period span.
    pub fn cadence(&self) -> Cadence {
        self.cadence_override
            .unwrap_or_else(|| infer_cadence(self.period_start, self.period_end))
    }

    /// Day-of-month anchor for monthly benefits whose period does not start
    /// on the 1st. Calendar-aligned benefits have no anchor.
    pub fn anchor_day(&self) -> Option<i8> {
        if self.cadence() == Cadence::Monthly && self.period_start.day() != 1 {
            Some(self.period_start.day())
        } else {
            None
        }
    }

    /// Days until the current period ends. Negative once the period has
    /// elapsed.
    pub fn days_left(&self, today: Date) -> i32 {
        (self.period_end - today).get_days()
    }
}
