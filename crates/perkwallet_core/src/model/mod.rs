mod benefit;
mod card;
mod ids;
mod ledger;
mod preview;

pub use benefit::{Benefit, BenefitStatus, Category};
pub use card::Card;
pub use ids::{BenefitId, CardId, LedgerEntryId};
pub use ledger::{LedgerDraft, UsageLedgerEntry, sum_redeemed};
pub use preview::{BenefitPreview, preview};
