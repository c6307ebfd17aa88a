//! Credit-card benefit tracking library
//!
//! This crate is the domain core for a benefit/subscription/coupon tracker:
//! - Period calculation for monthly/quarterly/semi-annual/annual cadences,
//!   calendar-aligned or anchored to a day of month
//! - Cadence inference from stored period spans
//! - The available/used/expired benefit state machine with an auditable
//!   usage ledger (manual redemptions and automatic expiry write-offs)
//! - Cross-cadence value aggregation for dashboard metrics
//! - A startup reset sweep that rolls elapsed benefits forward
//!
//! Persistence, reminder delivery, and the benefit catalog are contracts
//! (`PerkStore`, `ReminderScheduler`, `CatalogSource`) the host implements;
//! every "now" is injected, so the whole core tests deterministically.

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod date_math;
pub mod error;
pub mod metrics;
pub mod migrate;
pub mod notify;
pub mod period;
pub mod repository;
pub mod sweep;
pub mod transitions;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod catalog;
pub mod model;
pub mod store;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use catalog::{BenefitTemplate, CardTemplate, CatalogSource, StaticCatalog};
pub use error::{RepoError, StateError, StoreError};
pub use metrics::PeriodMetrics;
pub use model::{
    Benefit, BenefitId, BenefitPreview, BenefitStatus, Card, CardId, Category, LedgerEntryId,
    UsageLedgerEntry,
};
pub use period::{Cadence, Period, infer_cadence, period_for};
pub use repository::PerkRepository;
pub use store::{MemoryStore, PerkStore};
pub use sweep::{SweepOutcome, run_reset_sweep};
